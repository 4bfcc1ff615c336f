//! Null-model orchestration.
//!
//! Provides the [`NullModel`] runtime entry point: derive the observed
//! graph's degree sequence, draw configuration-model graphs realising it,
//! sanitise each one, evaluate the statistic, and z-score the observed value
//! against the resulting sample.

use std::num::NonZeroUsize;

use rand::{RngCore, SeedableRng, rngs::SmallRng};
#[cfg(feature = "parallel")]
use rayon::prelude::*;
use tracing::{info, instrument, warn};

use crate::{
    Result,
    builder::{ExecutionStrategy, UndefinedPolicy},
    degree::DegreeSequence,
    error::{NullModelError, StatisticError},
    generator::generate,
    graph::{MultiGraph, SimplifyReport, simplify},
    statistic::Statistic,
    zscore::{Deviation, observed_z_score},
};

/// Outcome of a [`NullModel::run`] invocation.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct NullModelReport {
    /// Name reported by the statistic.
    pub statistic: String,
    /// Statistic of the sanitised observed graph.
    pub observed: f64,
    /// Statistic of every completed null graph, in trial order.
    pub sample: Vec<f64>,
    /// Mean of the sample with the observed value included.
    pub mean: f64,
    /// Standard deviation of the sample with the observed value included.
    pub std_dev: f64,
    /// Standardised distance of the observed value from the mean.
    pub z_score: f64,
    /// Divisor used for the standard deviation.
    pub deviation: Deviation,
    /// Trials that contributed to the sample.
    pub completed_trials: usize,
    /// Trials dropped because the statistic was undefined.
    pub skipped_trials: usize,
    /// Self-loops stripped across all null graphs.
    pub self_loops_removed: usize,
    /// Parallel edges collapsed across all null graphs.
    pub parallel_edges_collapsed: usize,
}

/// Entry point for running a configuration-model null-model comparison.
///
/// # Examples
/// ```
/// use nullmodel_core::{ExecutionStrategy, MultiGraph, NullModelBuilder, TriangleCount};
///
/// let observed = MultiGraph::from_edges(4, [(0, 1), (1, 2), (2, 0), (2, 3)])?;
/// let model = NullModelBuilder::new()
///     .with_trials(50)
///     .with_execution_strategy(ExecutionStrategy::Sequential)
///     .build()?;
/// let report = model.run(&observed, &TriangleCount)?;
/// assert_eq!(report.observed, 1.0);
/// assert_eq!(report.completed_trials, 50);
/// assert_eq!(report.sample.len(), 50);
/// # Ok::<(), Box<dyn std::error::Error>>(())
/// ```
#[derive(Debug, Clone)]
pub struct NullModel {
    trials: NonZeroUsize,
    seed: u64,
    deviation: Deviation,
    execution_strategy: ExecutionStrategy,
    undefined_policy: UndefinedPolicy,
}

/// Statistic value and sanitisation counts for one null graph.
struct TrialOutcome {
    value: core::result::Result<f64, StatisticError>,
    simplified: SimplifyReport,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Scheduler {
    Sequential,
    #[cfg(feature = "parallel")]
    Parallel,
}

impl NullModel {
    pub(crate) fn new(
        trials: NonZeroUsize,
        seed: u64,
        deviation: Deviation,
        execution_strategy: ExecutionStrategy,
        undefined_policy: UndefinedPolicy,
    ) -> Self {
        Self {
            trials,
            seed,
            deviation,
            execution_strategy,
            undefined_policy,
        }
    }

    /// Returns the number of null graphs drawn per run.
    #[must_use]
    pub fn trials(&self) -> NonZeroUsize {
        self.trials
    }

    /// Returns the master seed.
    #[must_use]
    pub fn seed(&self) -> u64 {
        self.seed
    }

    /// Returns the standard-deviation divisor.
    #[must_use]
    pub fn deviation(&self) -> Deviation {
        self.deviation
    }

    /// Returns the execution strategy that will be used when running.
    #[must_use]
    pub fn execution_strategy(&self) -> ExecutionStrategy {
        self.execution_strategy
    }

    /// Returns the undefined-statistic policy.
    #[must_use]
    pub fn undefined_policy(&self) -> UndefinedPolicy {
        self.undefined_policy
    }

    /// Compares `statistic` on `observed` with its configuration-model null
    /// distribution.
    ///
    /// The observed graph is sanitised with [`simplify`] before scoring, just
    /// like every null graph.
    ///
    /// # Errors
    /// Returns [`NullModelError::BackendUnavailable`] when parallel execution
    /// is requested without the `parallel` feature,
    /// [`NullModelError::ObservedStatistic`] when the statistic fails on the
    /// observed graph, [`NullModelError::TrialStatistic`] when it fails on a
    /// null graph under [`UndefinedPolicy::Fail`],
    /// [`NullModelError::NoCompletedTrials`] when every trial was skipped, and
    /// [`NullModelError::ZScore`] when the combined distribution cannot be
    /// standardised.
    #[instrument(
        name = "core.null_model.run",
        err,
        skip(self, observed, statistic),
        fields(
            statistic = %statistic.name(),
            nodes = observed.node_count(),
            edges = observed.edge_count(),
            trials = self.trials.get(),
            seed = self.seed,
            strategy = ?self.execution_strategy
        ),
    )]
    pub fn run<S>(&self, observed: &MultiGraph, statistic: &S) -> Result<NullModelReport>
    where
        S: Statistic + ?Sized,
    {
        let scheduler = self.resolve_scheduler()?;
        let degrees = DegreeSequence::from_graph(observed);
        let (observed_simple, _) = simplify(observed);
        let observed_value = statistic
            .evaluate(&observed_simple)
            .map_err(|source| NullModelError::ObservedStatistic { source })?;

        let seeds = trial_seeds(self.seed, self.trials.get());
        let outcomes = run_trials(scheduler, &degrees, statistic, &seeds);

        let mut sample = Vec::with_capacity(outcomes.len());
        let mut skipped = 0_usize;
        let mut self_loops_removed = 0_usize;
        let mut parallel_edges_collapsed = 0_usize;
        for (trial, outcome) in outcomes.into_iter().enumerate() {
            self_loops_removed += outcome.simplified.self_loops_removed;
            parallel_edges_collapsed += outcome.simplified.parallel_edges_collapsed;
            match (outcome.value, self.undefined_policy) {
                (Ok(value), _) => sample.push(value),
                (Err(source), UndefinedPolicy::Fail) => {
                    return Err(NullModelError::TrialStatistic { trial, source });
                }
                (Err(source), UndefinedPolicy::Skip) => {
                    warn!(trial, error = %source, "skipping null trial");
                    skipped += 1;
                }
            }
        }
        record_metrics(sample.len(), skipped, self_loops_removed);

        if sample.is_empty() {
            return Err(NullModelError::NoCompletedTrials { skipped });
        }
        let score = observed_z_score(observed_value, &sample, self.deviation)?;
        info!(
            observed = observed_value,
            mean = score.mean,
            std_dev = score.std_dev,
            z_score = score.z_score,
            skipped,
            "null model completed"
        );

        Ok(NullModelReport {
            statistic: statistic.name().to_owned(),
            observed: observed_value,
            completed_trials: sample.len(),
            sample,
            mean: score.mean,
            std_dev: score.std_dev,
            z_score: score.z_score,
            deviation: self.deviation,
            skipped_trials: skipped,
            self_loops_removed,
            parallel_edges_collapsed,
        })
    }

    fn resolve_scheduler(&self) -> Result<Scheduler> {
        match self.execution_strategy {
            ExecutionStrategy::Sequential => Ok(Scheduler::Sequential),
            #[cfg(feature = "parallel")]
            ExecutionStrategy::Auto | ExecutionStrategy::Parallel => Ok(Scheduler::Parallel),
            #[cfg(not(feature = "parallel"))]
            ExecutionStrategy::Auto => Ok(Scheduler::Sequential),
            #[cfg(not(feature = "parallel"))]
            ExecutionStrategy::Parallel => Err(NullModelError::BackendUnavailable {
                requested: ExecutionStrategy::Parallel,
            }),
        }
    }
}

/// Draws one seed per trial from a master generator so every scheduler sees
/// the same per-trial random streams.
fn trial_seeds(seed: u64, trials: usize) -> Vec<u64> {
    let mut master = SmallRng::seed_from_u64(seed);
    (0..trials).map(|_| master.next_u64()).collect()
}

#[instrument(
    name = "core.null_model.trials",
    skip_all,
    fields(trials = seeds.len(), scheduler = ?scheduler),
)]
fn run_trials<S>(
    scheduler: Scheduler,
    degrees: &DegreeSequence,
    statistic: &S,
    seeds: &[u64],
) -> Vec<TrialOutcome>
where
    S: Statistic + ?Sized,
{
    match scheduler {
        Scheduler::Sequential => seeds
            .iter()
            .map(|&seed| run_trial(degrees, statistic, seed))
            .collect(),
        #[cfg(feature = "parallel")]
        Scheduler::Parallel => seeds
            .par_iter()
            .map(|&seed| run_trial(degrees, statistic, seed))
            .collect(),
    }
}

fn run_trial<S>(degrees: &DegreeSequence, statistic: &S, seed: u64) -> TrialOutcome
where
    S: Statistic + ?Sized,
{
    let mut rng = SmallRng::seed_from_u64(seed);
    let graph = generate(degrees, &mut rng);
    let (simple, simplified) = simplify(&graph);
    TrialOutcome {
        value: statistic.evaluate(&simple),
        simplified,
    }
}

#[cfg(feature = "metrics")]
fn record_metrics(completed: usize, skipped: usize, self_loops_removed: usize) {
    metrics::counter!("null_model_trials_total").increment(completed as u64);
    metrics::counter!("null_model_trials_skipped_total").increment(skipped as u64);
    metrics::counter!("null_model_self_loops_removed_total").increment(self_loops_removed as u64);
}

#[cfg(not(feature = "metrics"))]
fn record_metrics(_completed: usize, _skipped: usize, _self_loops_removed: usize) {}
