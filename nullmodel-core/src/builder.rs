//! Builder utilities for configuring null-model runs.
//!
//! Exposes the execution strategy and undefined-statistic policy selection
//! surface, plus the validation performed before constructing [`NullModel`]
//! instances.

use std::num::NonZeroUsize;

use crate::{Result, error::NullModelError, null_model::NullModel, zscore::Deviation};

/// Default number of null graphs drawn per run.
pub const DEFAULT_TRIALS: usize = 1000;

/// Default master seed for trial random sources.
pub const DEFAULT_SEED: u64 = 42;

/// Indicates how [`NullModel`] schedules trials when [`NullModel::run`] is
/// invoked.
///
/// `Auto` resolves deterministically: it maps to `Parallel` when the
/// `parallel` feature is compiled in and to `Sequential` otherwise. Trial
/// seeds are fixed before scheduling, so every strategy yields the same
/// report for the same seed.
///
/// # Examples
/// ```
/// use nullmodel_core::ExecutionStrategy;
///
/// let strategy = ExecutionStrategy::Auto;
/// assert!(matches!(strategy, ExecutionStrategy::Auto));
/// ```
///
/// Downstream matches need a wildcard arm:
/// ```compile_fail
/// use nullmodel_core::ExecutionStrategy;
///
/// fn label(strategy: ExecutionStrategy) -> &'static str {
///     match strategy {
///         ExecutionStrategy::Auto => "auto",
///         ExecutionStrategy::Sequential => "sequential",
///         ExecutionStrategy::Parallel => "parallel",
///     }
/// }
/// ```
#[non_exhaustive]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExecutionStrategy {
    /// Allow the library to select a scheduler automatically.
    Auto,
    /// Run every trial on the calling thread.
    Sequential,
    /// Spread trials across the Rayon thread pool.
    Parallel,
}

/// What to do when the statistic is undefined on a generated null graph.
///
/// ```compile_fail
/// use nullmodel_core::UndefinedPolicy;
///
/// fn skips(policy: UndefinedPolicy) -> bool {
///     match policy {
///         UndefinedPolicy::Fail => false,
///         UndefinedPolicy::Skip => true,
///     }
/// }
/// ```
#[non_exhaustive]
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum UndefinedPolicy {
    /// Abort the run with [`NullModelError::TrialStatistic`].
    #[default]
    Fail,
    /// Drop the trial from the null sample and count it as skipped.
    Skip,
}

/// Configures and constructs [`NullModel`] instances.
///
/// # Examples
/// ```
/// use nullmodel_core::{ExecutionStrategy, NullModelBuilder};
///
/// let model = NullModelBuilder::new()
///     .with_trials(200)
///     .with_seed(7)
///     .with_execution_strategy(ExecutionStrategy::Sequential)
///     .build()
///     .expect("builder configuration is valid");
/// assert_eq!(model.trials().get(), 200);
/// assert_eq!(model.seed(), 7);
/// assert_eq!(model.execution_strategy(), ExecutionStrategy::Sequential);
/// ```
#[derive(Debug, Clone)]
pub struct NullModelBuilder {
    trials: usize,
    seed: u64,
    deviation: Deviation,
    execution_strategy: ExecutionStrategy,
    undefined_policy: UndefinedPolicy,
}

impl Default for NullModelBuilder {
    fn default() -> Self {
        Self {
            trials: DEFAULT_TRIALS,
            seed: DEFAULT_SEED,
            deviation: Deviation::Population,
            execution_strategy: ExecutionStrategy::Auto,
            undefined_policy: UndefinedPolicy::Fail,
        }
    }
}

impl NullModelBuilder {
    /// Creates a builder populated with default parameters.
    ///
    /// # Examples
    /// ```
    /// use nullmodel_core::{Deviation, ExecutionStrategy, NullModelBuilder, UndefinedPolicy};
    ///
    /// let builder = NullModelBuilder::new();
    /// assert_eq!(builder.trials(), 1000);
    /// assert_eq!(builder.seed(), 42);
    /// assert_eq!(builder.deviation(), Deviation::Population);
    /// assert_eq!(builder.execution_strategy(), ExecutionStrategy::Auto);
    /// assert_eq!(builder.undefined_policy(), UndefinedPolicy::Fail);
    /// ```
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Overrides the number of null graphs drawn.
    #[must_use]
    pub fn with_trials(mut self, trials: usize) -> Self {
        self.trials = trials;
        self
    }

    /// Returns the configured trial count.
    #[must_use]
    pub fn trials(&self) -> usize {
        self.trials
    }

    /// Overrides the master seed from which per-trial seeds are drawn.
    #[must_use]
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = seed;
        self
    }

    /// Returns the configured master seed.
    #[must_use]
    pub fn seed(&self) -> u64 {
        self.seed
    }

    /// Selects the standard-deviation divisor used for the z-score.
    #[must_use]
    pub fn with_deviation(mut self, deviation: Deviation) -> Self {
        self.deviation = deviation;
        self
    }

    /// Returns the configured standard-deviation divisor.
    #[must_use]
    pub fn deviation(&self) -> Deviation {
        self.deviation
    }

    /// Sets the execution strategy used when running trials.
    ///
    /// # Examples
    /// ```
    /// use nullmodel_core::{ExecutionStrategy, NullModelBuilder};
    ///
    /// let builder = NullModelBuilder::new().with_execution_strategy(ExecutionStrategy::Parallel);
    /// assert_eq!(builder.execution_strategy(), ExecutionStrategy::Parallel);
    /// ```
    #[must_use]
    pub fn with_execution_strategy(mut self, strategy: ExecutionStrategy) -> Self {
        self.execution_strategy = strategy;
        self
    }

    /// Returns the currently configured execution strategy.
    #[must_use]
    pub fn execution_strategy(&self) -> ExecutionStrategy {
        self.execution_strategy
    }

    /// Sets how trials with an undefined statistic are handled.
    #[must_use]
    pub fn with_undefined_policy(mut self, policy: UndefinedPolicy) -> Self {
        self.undefined_policy = policy;
        self
    }

    /// Returns the configured undefined-statistic policy.
    #[must_use]
    pub fn undefined_policy(&self) -> UndefinedPolicy {
        self.undefined_policy
    }

    /// Validates the configuration and constructs a [`NullModel`] instance.
    ///
    /// # Errors
    /// Returns [`NullModelError::InvalidTrialCount`] when the trial count is
    /// zero.
    ///
    /// # Examples
    /// ```
    /// use nullmodel_core::{NullModelBuilder, NullModelError};
    ///
    /// let err = NullModelBuilder::new().with_trials(0).build().expect_err("zero trials");
    /// assert_eq!(err, NullModelError::InvalidTrialCount { got: 0 });
    /// ```
    pub fn build(self) -> Result<NullModel> {
        let trials = NonZeroUsize::new(self.trials)
            .ok_or(NullModelError::InvalidTrialCount { got: self.trials })?;

        Ok(NullModel::new(
            trials,
            self.seed,
            self.deviation,
            self.execution_strategy,
            self.undefined_policy,
        ))
    }
}
