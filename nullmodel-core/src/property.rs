//! Property-based tests for stub matching and sanitisation.
//!
//! Degree sequences are generated with an even total by construction so the
//! generator's guarantees can be checked for every random draw, not just on
//! average.

use proptest::prelude::*;
use rand::{SeedableRng, rngs::SmallRng};
use test_strategy::Arbitrary;

use crate::{
    degree::DegreeSequence,
    error::DegreeSequenceError,
    generator::{configuration_model, generate},
    graph::{MultiGraph, simplify},
    test_utils::suite_proptest_config,
};

/// Maximum number of nodes in generated sequences.
const MAX_NODES: usize = 40;
/// Maximum degree per node in generated sequences.
const MAX_DEGREE: usize = 12;

/// Shape of the generated degree sequence.
#[derive(Clone, Copy, Debug, Eq, PartialEq, Arbitrary)]
enum SequenceShape {
    /// Independent degrees in `0..=MAX_DEGREE`.
    #[weight(3)]
    Uniform,
    /// One hub holding most stubs, leaves of degree one.
    #[weight(1)]
    Star,
    /// Every node has the same degree.
    #[weight(1)]
    Regular,
}

fn even_degrees(shape: SequenceShape) -> impl Strategy<Value = Vec<usize>> {
    let raw = match shape {
        SequenceShape::Uniform => {
            prop::collection::vec(0..=MAX_DEGREE, 0..=MAX_NODES).boxed()
        }
        SequenceShape::Star => (1..MAX_NODES)
            .prop_map(|leaves| {
                let mut degrees = vec![leaves];
                degrees.extend(std::iter::repeat_n(1, leaves));
                degrees
            })
            .boxed(),
        SequenceShape::Regular => (1..=MAX_NODES, 0..=MAX_DEGREE)
            .prop_map(|(nodes, degree)| vec![degree; nodes])
            .boxed(),
    };
    raw.prop_map(|mut degrees| {
        // Bump the first degree when the total is odd.
        if !degrees.iter().sum::<usize>().is_multiple_of(2) {
            if let Some(first) = degrees.first_mut() {
                *first += 1;
            }
        }
        degrees
    })
}

fn valid_sequence() -> impl Strategy<Value = DegreeSequence> {
    any::<SequenceShape>()
        .prop_flat_map(even_degrees)
        .prop_map(|degrees| DegreeSequence::new(degrees).expect("strategy keeps totals even"))
}

fn sorted_edges(graph: &MultiGraph) -> Vec<(usize, usize)> {
    let mut edges: Vec<_> = graph
        .edges()
        .iter()
        .map(|edge| (edge.source(), edge.target()))
        .collect();
    edges.sort_unstable();
    edges
}

proptest! {
    #![proptest_config(suite_proptest_config(256))]

    #[test]
    fn generated_degrees_match_input(degrees in valid_sequence(), seed in any::<u64>()) {
        let mut rng = SmallRng::seed_from_u64(seed);
        let graph = generate(&degrees, &mut rng);
        prop_assert_eq!(graph.node_count(), degrees.len());
        prop_assert_eq!(graph.degrees(), degrees.as_slice().to_vec());
    }

    #[test]
    fn edge_count_is_half_the_total(degrees in valid_sequence(), seed in any::<u64>()) {
        let mut rng = SmallRng::seed_from_u64(seed);
        let graph = generate(&degrees, &mut rng);
        prop_assert_eq!(graph.edge_count(), degrees.total() / 2);
    }

    #[test]
    fn odd_totals_never_produce_graphs(
        mut degrees in prop::collection::vec(0..=MAX_DEGREE, 1..=MAX_NODES),
        seed in any::<u64>(),
    ) {
        if degrees.iter().sum::<usize>().is_multiple_of(2) {
            degrees.push(1);
        }
        let total = degrees.iter().sum::<usize>();
        let mut rng = SmallRng::seed_from_u64(seed);
        let result = configuration_model(&degrees, &mut rng);
        prop_assert_eq!(result, Err(DegreeSequenceError::OddTotal { total }));
    }

    #[test]
    fn identical_seeds_give_identical_edge_sets(
        degrees in valid_sequence(),
        seed in any::<u64>(),
    ) {
        let mut first = SmallRng::seed_from_u64(seed);
        let mut second = SmallRng::seed_from_u64(seed);
        prop_assert_eq!(
            sorted_edges(&generate(&degrees, &mut first)),
            sorted_edges(&generate(&degrees, &mut second))
        );
    }

    #[test]
    fn simplify_output_is_simple_and_idempotent(
        degrees in valid_sequence(),
        seed in any::<u64>(),
    ) {
        let mut rng = SmallRng::seed_from_u64(seed);
        let graph = generate(&degrees, &mut rng);
        let (simple, report) = simplify(&graph);
        let projected = simple.to_multigraph();
        prop_assert!(projected.is_simple());
        prop_assert_eq!(
            simple.edge_count() + report.self_loops_removed + report.parallel_edges_collapsed,
            graph.edge_count()
        );
        prop_assert_eq!(report.self_loops_removed, graph.self_loop_count());

        let (again, again_report) = simplify(&projected);
        prop_assert!(again_report.is_noop());
        prop_assert_eq!(again, simple);
    }

    #[test]
    fn derived_sequence_round_trips_through_generation(
        degrees in valid_sequence(),
        seed in any::<u64>(),
    ) {
        let mut rng = SmallRng::seed_from_u64(seed);
        let graph = generate(&degrees, &mut rng);
        prop_assert_eq!(DegreeSequence::from_graph(&graph), degrees);
    }
}
