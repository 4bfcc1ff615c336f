//! Seeded synthetic inputs for benchmarks.

use nullmodel_core::{DegreeSequence, MultiGraph};
use rand::{Rng, SeedableRng, rngs::SmallRng};

use crate::error::BenchSetupError;

/// Configuration for [`synthetic_degrees`].
#[derive(Clone, Copy, Debug)]
pub struct SyntheticConfig {
    /// Number of nodes.
    pub node_count: usize,
    /// Upper bound on any node's degree; degrees are drawn from
    /// `1..=max_degree`.
    pub max_degree: usize,
    /// Seed for the degree draws.
    pub seed: u64,
}

/// Draws a degree sequence with uniformly random degrees, bumping the first
/// degree when needed so the total is even.
///
/// # Errors
/// Returns [`BenchSetupError::InvalidConfig`] when `max_degree` is zero and
/// [`BenchSetupError::DegreeSequence`] if the total overflows.
///
/// # Examples
/// ```
/// use nullmodel_benches::source::{SyntheticConfig, synthetic_degrees};
///
/// let degrees = synthetic_degrees(&SyntheticConfig { node_count: 10, max_degree: 4, seed: 1 })?;
/// assert_eq!(degrees.len(), 10);
/// assert!(degrees.total().is_multiple_of(2));
/// # Ok::<(), nullmodel_benches::error::BenchSetupError>(())
/// ```
pub fn synthetic_degrees(config: &SyntheticConfig) -> Result<DegreeSequence, BenchSetupError> {
    if config.max_degree == 0 {
        return Err(BenchSetupError::InvalidConfig {
            reason: "max_degree must be positive",
        });
    }
    let mut rng = SmallRng::seed_from_u64(config.seed);
    let mut degrees: Vec<usize> = (0..config.node_count)
        .map(|_| rng.gen_range(1..=config.max_degree))
        .collect();
    let total: usize = degrees.iter().sum();
    if !total.is_multiple_of(2) {
        if let Some(first) = degrees.first_mut() {
            *first += 1;
        }
    }
    Ok(DegreeSequence::new(degrees)?)
}

/// Builds a ring lattice where every node links to its `half_width` nearest
/// neighbours on each side.
///
/// # Errors
/// Returns [`BenchSetupError::InvalidConfig`] when the lattice would wrap
/// onto itself, that is when `2 * half_width >= node_count`.
///
/// # Examples
/// ```
/// use nullmodel_benches::source::ring_lattice;
///
/// let graph = ring_lattice(10, 2)?;
/// assert_eq!(graph.edge_count(), 20);
/// assert!(graph.is_simple());
/// # Ok::<(), nullmodel_benches::error::BenchSetupError>(())
/// ```
pub fn ring_lattice(node_count: usize, half_width: usize) -> Result<MultiGraph, BenchSetupError> {
    if half_width.saturating_mul(2) >= node_count {
        return Err(BenchSetupError::InvalidConfig {
            reason: "ring lattice is too narrow for its width",
        });
    }
    let pairs = (0..node_count).flat_map(|node| {
        (1..=half_width).map(move |offset| {
            let target = node + offset;
            let wrapped = if target >= node_count {
                target - node_count
            } else {
                target
            };
            (node, wrapped)
        })
    });
    Ok(MultiGraph::from_edges(node_count, pairs)?)
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case(1, 3)]
    #[case(25, 1)]
    #[case(200, 8)]
    fn synthetic_degrees_are_bounded_and_even(#[case] node_count: usize, #[case] max_degree: usize) {
        let config = SyntheticConfig {
            node_count,
            max_degree,
            seed: 5,
        };
        let degrees = synthetic_degrees(&config).expect("configuration is valid");
        assert_eq!(degrees.len(), node_count);
        assert!(degrees.total().is_multiple_of(2));
        assert!(degrees.max_degree() <= max_degree + 1);
    }

    #[rstest]
    fn synthetic_degrees_reject_zero_max_degree() {
        let config = SyntheticConfig {
            node_count: 4,
            max_degree: 0,
            seed: 0,
        };
        assert!(matches!(
            synthetic_degrees(&config),
            Err(BenchSetupError::InvalidConfig { .. })
        ));
    }

    #[rstest]
    #[case(5, 1, 5)]
    #[case(9, 4, 36)]
    fn ring_lattice_is_regular(
        #[case] node_count: usize,
        #[case] half_width: usize,
        #[case] edges: usize,
    ) {
        let graph = ring_lattice(node_count, half_width).expect("lattice fits");
        assert_eq!(graph.edge_count(), edges);
        assert!(graph.is_simple());
        assert!(graph.degrees().iter().all(|&degree| degree == 2 * half_width));
    }

    #[rstest]
    fn ring_lattice_rejects_wrapping_width() {
        assert!(ring_lattice(4, 2).is_err());
    }
}
