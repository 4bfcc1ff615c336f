//! Configuration-model graph generation by stub matching.
//!
//! Every node `i` contributes `degree[i]` stubs. The stub list is shuffled
//! with a Fisher–Yates permutation drawn from the caller's random source and
//! consecutive stubs are paired into edges. The result realises the degree
//! sequence exactly for every draw; self-loops and parallel edges are left in
//! place for [`crate::simplify`] to remove.

use rand::{Rng, seq::SliceRandom};
use tracing::debug;

use crate::{
    degree::DegreeSequence,
    error::DegreeSequenceError,
    graph::{Edge, MultiGraph},
};

/// Generates a random multigraph realising `degrees`.
///
/// The random source is borrowed exclusively for the call, so two sources
/// producing the same stream yield the same edges in the same order.
///
/// # Examples
/// ```
/// use nullmodel_core::{DegreeSequence, generate};
/// use rand::{SeedableRng, rngs::SmallRng};
///
/// let degrees = DegreeSequence::new(vec![2, 2, 2])?;
/// let mut rng = SmallRng::seed_from_u64(7);
/// let graph = generate(&degrees, &mut rng);
/// assert_eq!(graph.edge_count(), 3);
/// assert_eq!(graph.degrees(), vec![2, 2, 2]);
/// # Ok::<(), nullmodel_core::DegreeSequenceError>(())
/// ```
pub fn generate<R>(degrees: &DegreeSequence, rng: &mut R) -> MultiGraph
where
    R: Rng + ?Sized,
{
    let mut stubs = build_stubs(degrees);
    stubs.shuffle(rng);

    let mut graph = MultiGraph::with_capacity(degrees.len(), degrees.edge_count());
    for pair in stubs.chunks_exact(2) {
        if let &[left, right] = pair {
            graph.push_edge_unchecked(Edge::new(left, right));
        }
    }
    debug!(
        nodes = graph.node_count(),
        edges = graph.edge_count(),
        self_loops = graph.self_loop_count(),
        "configuration model generated"
    );
    graph
}

/// Validates `degrees` and generates a random multigraph realising them.
///
/// # Errors
/// Returns [`DegreeSequenceError::OddTotal`] when the degrees sum to an odd
/// number and [`DegreeSequenceError::TotalOverflow`] when the sum overflows.
///
/// # Examples
/// ```
/// use nullmodel_core::{DegreeSequenceError, configuration_model};
/// use rand::{SeedableRng, rngs::SmallRng};
///
/// let mut rng = SmallRng::seed_from_u64(1);
/// let err = configuration_model(&[1], &mut rng).expect_err("odd total");
/// assert_eq!(err, DegreeSequenceError::OddTotal { total: 1 });
/// ```
pub fn configuration_model<R>(
    degrees: &[usize],
    rng: &mut R,
) -> Result<MultiGraph, DegreeSequenceError>
where
    R: Rng + ?Sized,
{
    let sequence = DegreeSequence::new(degrees.to_vec())?;
    Ok(generate(&sequence, rng))
}

fn build_stubs(degrees: &DegreeSequence) -> Vec<usize> {
    let mut stubs = Vec::with_capacity(degrees.total());
    for (node, &degree) in degrees.as_slice().iter().enumerate() {
        stubs.extend(std::iter::repeat_n(node, degree));
    }
    stubs
}
