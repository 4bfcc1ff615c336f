use nullmodel_core::{MultiGraph, NullModel, NullModelBuilder};

/// Two triangles joined by a single bridge edge.
#[must_use]
pub fn bridged_triangles() -> MultiGraph {
    MultiGraph::from_edges(
        6,
        [(0, 1), (1, 2), (2, 0), (3, 4), (4, 5), (5, 3), (2, 3)],
    )
    .expect("fixture endpoints are in bounds")
}

/// Builds a model with the given trial count and seed, panicking on invalid
/// configuration.
#[must_use]
pub fn model(trials: usize, seed: u64) -> NullModelBuilder {
    NullModelBuilder::new().with_trials(trials).with_seed(seed)
}

#[must_use]
pub fn built(builder: NullModelBuilder) -> NullModel {
    builder.build().expect("configuration must be valid")
}
