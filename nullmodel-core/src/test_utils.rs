//! Shared test utilities for `nullmodel-core`.

use nullmodel_test_support::ci::property_test_profile::ProptestRunProfile;
use proptest::test_runner::Config as ProptestConfig;

use crate::graph::MultiGraph;

/// Builds a standard proptest configuration from the shared CI profile.
///
/// This keeps property suites aligned on the same `PROGTEST_CASES` and
/// `NULLMODEL_PBT_FORK` interpretation.
#[must_use]
pub(crate) fn suite_proptest_config(default_cases: u32) -> ProptestConfig {
    let profile = ProptestRunProfile::load(default_cases, false);
    ProptestConfig {
        cases: profile.cases(),
        fork: profile.fork(),
        ..ProptestConfig::default()
    }
}

/// Returns the cycle `0 - 1 - ... - (n-1) - 0`.
///
/// `n` must be at least 3 for the result to be simple.
#[must_use]
pub(crate) fn cycle(n: usize) -> MultiGraph {
    MultiGraph::from_edges(n, (0..n).map(|node| (node, (node + 1) % n)))
        .expect("cycle endpoints are always in bounds")
}
