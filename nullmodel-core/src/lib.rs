//! Configuration-model null graphs and the analysis built around them.
//!
//! [`generate`] draws a random multigraph with a prescribed degree sequence
//! by stub matching. [`simplify`] turns it into a simple graph, a
//! [`Statistic`] measures it, and [`NullModel`] repeats that over many seeded
//! trials to z-score an observed graph against its degree-preserving null.
#![cfg_attr(docsrs, feature(doc_cfg))]

mod builder;
pub mod datasets;
mod degree;
mod error;
mod generator;
mod graph;
mod null_model;
mod statistic;
mod zscore;

#[cfg(test)]
mod property;
#[cfg(test)]
mod test_utils;

pub use crate::{
    builder::{DEFAULT_SEED, DEFAULT_TRIALS, ExecutionStrategy, NullModelBuilder, UndefinedPolicy},
    degree::DegreeSequence,
    error::{
        DegreeSequenceError, DegreeSequenceErrorCode, GraphError, GraphErrorCode, NullModelError,
        NullModelErrorCode, Result, StatisticError, StatisticErrorCode, ZScoreError,
        ZScoreErrorCode,
    },
    generator::{configuration_model, generate},
    graph::{Edge, MultiGraph, SimpleGraph, SimplifyReport, simplify},
    null_model::{NullModel, NullModelReport},
    statistic::{FnStatistic, Statistic, Transitivity, TriangleCount},
    zscore::{Deviation, ZScore, observed_z_score, z_scores},
};
