//! Statistics evaluated on sanitised graphs.
//!
//! The null-model runner is generic over [`Statistic`], so callers can plug
//! in any scalar graph measure (degree assortativity being the classic one)
//! without the crate implementing it. Triangle count and transitivity ship
//! as built-ins.

use std::sync::Arc;

use crate::{error::StatisticError, graph::SimpleGraph};

/// A scalar measure of a [`SimpleGraph`].
///
/// Implementations must be pure: the runner may evaluate the same statistic
/// from several threads at once.
///
/// # Examples
/// ```
/// use nullmodel_core::{MultiGraph, SimpleGraph, Statistic, StatisticError, simplify};
///
/// struct EdgeCount;
///
/// impl Statistic for EdgeCount {
///     fn name(&self) -> &str { "edge_count" }
///     fn evaluate(&self, graph: &SimpleGraph) -> Result<f64, StatisticError> {
///         Ok(graph.edge_count() as f64)
///     }
/// }
///
/// let (graph, _) = simplify(&MultiGraph::from_edges(3, [(0, 1), (1, 2)])?);
/// assert_eq!(EdgeCount.evaluate(&graph)?, 2.0);
/// # Ok::<(), Box<dyn std::error::Error>>(())
/// ```
pub trait Statistic: Send + Sync {
    /// Returns a short identifier used in logs and reports.
    fn name(&self) -> &str;

    /// Evaluates the statistic on `graph`.
    ///
    /// # Errors
    /// Returns [`StatisticError::Undefined`] when the statistic has no value
    /// for `graph`.
    fn evaluate(&self, graph: &SimpleGraph) -> Result<f64, StatisticError>;
}

impl<S: Statistic + ?Sized> Statistic for &S {
    fn name(&self) -> &str {
        (**self).name()
    }

    fn evaluate(&self, graph: &SimpleGraph) -> Result<f64, StatisticError> {
        (**self).evaluate(graph)
    }
}

impl<S: Statistic + ?Sized> Statistic for Box<S> {
    fn name(&self) -> &str {
        (**self).name()
    }

    fn evaluate(&self, graph: &SimpleGraph) -> Result<f64, StatisticError> {
        (**self).evaluate(graph)
    }
}

/// Adapts a closure into a named [`Statistic`].
///
/// # Examples
/// ```
/// use nullmodel_core::{FnStatistic, MultiGraph, SimpleGraph, Statistic, simplify};
///
/// let max_degree = FnStatistic::new("max_degree", |graph: &SimpleGraph| {
///     let max = (0..graph.node_count()).map(|node| graph.degree(node)).max();
///     Ok(max.unwrap_or(0) as f64)
/// });
/// let (graph, _) = simplify(&MultiGraph::from_edges(3, [(0, 1), (0, 2)])?);
/// assert_eq!(max_degree.name(), "max_degree");
/// assert_eq!(max_degree.evaluate(&graph)?, 2.0);
/// # Ok::<(), Box<dyn std::error::Error>>(())
/// ```
#[derive(Clone)]
pub struct FnStatistic<F> {
    name: Arc<str>,
    evaluate: F,
}

impl<F> FnStatistic<F>
where
    F: Fn(&SimpleGraph) -> Result<f64, StatisticError> + Send + Sync,
{
    /// Wraps `evaluate` under `name`.
    pub fn new(name: impl Into<Arc<str>>, evaluate: F) -> Self {
        Self {
            name: name.into(),
            evaluate,
        }
    }
}

impl<F> Statistic for FnStatistic<F>
where
    F: Fn(&SimpleGraph) -> Result<f64, StatisticError> + Send + Sync,
{
    fn name(&self) -> &str {
        &self.name
    }

    fn evaluate(&self, graph: &SimpleGraph) -> Result<f64, StatisticError> {
        (self.evaluate)(graph)
    }
}

/// Number of triangles in the graph.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct TriangleCount;

impl Statistic for TriangleCount {
    fn name(&self) -> &str {
        "triangles"
    }

    #[expect(
        clippy::cast_precision_loss,
        reason = "triangle counts far below 2^53 are represented exactly"
    )]
    fn evaluate(&self, graph: &SimpleGraph) -> Result<f64, StatisticError> {
        Ok(count_triangles(graph) as f64)
    }
}

/// Global clustering coefficient: `3 × triangles / connected triples`.
///
/// Undefined for graphs where no node has two neighbours.
///
/// # Examples
/// ```
/// use nullmodel_core::{MultiGraph, Statistic, Transitivity, simplify};
///
/// let (triangle, _) = simplify(&MultiGraph::from_edges(3, [(0, 1), (1, 2), (2, 0)])?);
/// assert_eq!(Transitivity.evaluate(&triangle)?, 1.0);
///
/// let (edge, _) = simplify(&MultiGraph::from_edges(2, [(0, 1)])?);
/// assert!(Transitivity.evaluate(&edge).is_err());
/// # Ok::<(), Box<dyn std::error::Error>>(())
/// ```
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct Transitivity;

impl Statistic for Transitivity {
    fn name(&self) -> &str {
        "transitivity"
    }

    #[expect(
        clippy::cast_precision_loss,
        clippy::float_arithmetic,
        reason = "transitivity is a ratio of counts"
    )]
    fn evaluate(&self, graph: &SimpleGraph) -> Result<f64, StatisticError> {
        let triples = count_connected_triples(graph);
        if triples == 0 {
            return Err(StatisticError::Undefined {
                statistic: Arc::from(self.name()),
                reason: Arc::from("graph has no connected triples"),
            });
        }
        let closed = 3 * count_triangles(graph);
        Ok(closed as f64 / triples as f64)
    }
}

/// Counts each triangle once by only closing wedges `u < v < w`.
pub(crate) fn count_triangles(graph: &SimpleGraph) -> usize {
    graph
        .edges()
        .iter()
        .map(|edge| {
            let above = |node: usize| {
                let neighbours = graph.neighbours(node);
                let start = neighbours.partition_point(|&other| other <= edge.target());
                neighbours.get(start..).unwrap_or(&[])
            };
            count_common(above(edge.source()), above(edge.target()))
        })
        .sum()
}

/// Number of paths of length two, i.e. `Σ d(d-1)/2`.
pub(crate) fn count_connected_triples(graph: &SimpleGraph) -> usize {
    (0..graph.node_count())
        .map(|node| {
            let degree = graph.degree(node);
            degree * degree.saturating_sub(1) / 2
        })
        .sum()
}

fn count_common(left: &[usize], right: &[usize]) -> usize {
    let (mut i, mut j, mut common) = (0, 0, 0);
    while let (Some(&a), Some(&b)) = (left.get(i), right.get(j)) {
        match a.cmp(&b) {
            std::cmp::Ordering::Less => i += 1,
            std::cmp::Ordering::Greater => j += 1,
            std::cmp::Ordering::Equal => {
                common += 1;
                i += 1;
                j += 1;
            }
        }
    }
    common
}
