//! Benchmark parameter types used as Criterion input labels.

use std::fmt;

/// Parameters for a stub-matching benchmark run.
#[derive(Clone, Debug)]
pub struct GeneratorBenchParams {
    /// Number of nodes in the degree sequence.
    pub node_count: usize,
    /// Upper bound on any node's degree.
    pub max_degree: usize,
}

impl fmt::Display for GeneratorBenchParams {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "n={},dmax={}", self.node_count, self.max_degree)
    }
}

/// Parameters for a null-model runner benchmark run.
#[derive(Clone, Debug)]
pub struct RunnerBenchParams {
    /// Number of nodes in the observed graph.
    pub node_count: usize,
    /// Null graphs drawn per run.
    pub trials: usize,
}

impl fmt::Display for RunnerBenchParams {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "n={},trials={}", self.node_count, self.trials)
    }
}
