//! Undirected graph containers used by the null-model pipeline.
//!
//! [`MultiGraph`] is what the configuration model produces: self-loops and
//! parallel edges are permitted. [`SimpleGraph`] is the sanitised projection
//! statistics are evaluated on, built with [`simplify`].

use std::collections::BTreeSet;

use crate::error::GraphError;

/// An undirected edge stored in canonical form (`source <= target`).
///
/// # Examples
/// ```
/// use nullmodel_core::Edge;
///
/// let edge = Edge::new(4, 1);
/// assert_eq!((edge.source(), edge.target()), (1, 4));
/// assert!(!edge.is_self_loop());
/// ```
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Edge {
    source: usize,
    target: usize,
}

impl Edge {
    /// Creates an edge between `left` and `right`, ordering the endpoints.
    #[must_use]
    pub fn new(left: usize, right: usize) -> Self {
        if left <= right {
            Self {
                source: left,
                target: right,
            }
        } else {
            Self {
                source: right,
                target: left,
            }
        }
    }

    /// Returns the smaller endpoint id.
    #[must_use]
    pub fn source(&self) -> usize {
        self.source
    }

    /// Returns the larger endpoint id.
    #[must_use]
    pub fn target(&self) -> usize {
        self.target
    }

    /// Returns `true` when both endpoints are the same node.
    #[must_use]
    pub fn is_self_loop(&self) -> bool {
        self.source == self.target
    }
}

/// An undirected multigraph over nodes `0..node_count`.
///
/// Edges are kept in insertion order. Self-loops and repeated edges are
/// allowed, and a self-loop contributes two to its node's degree.
///
/// # Examples
/// ```
/// use nullmodel_core::MultiGraph;
///
/// let graph = MultiGraph::from_edges(3, [(0, 1), (1, 1), (0, 1)])?;
/// assert_eq!(graph.edge_count(), 3);
/// assert_eq!(graph.degrees(), vec![2, 4, 0]);
/// assert_eq!(graph.self_loop_count(), 1);
/// assert!(!graph.is_simple());
/// # Ok::<(), nullmodel_core::GraphError>(())
/// ```
#[derive(Clone, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct MultiGraph {
    node_count: usize,
    edges: Vec<Edge>,
}

impl MultiGraph {
    /// Creates an edgeless graph with `node_count` nodes.
    #[must_use]
    pub fn new(node_count: usize) -> Self {
        Self {
            node_count,
            edges: Vec::new(),
        }
    }

    /// Creates an edgeless graph with room for `edge_capacity` edges.
    #[must_use]
    pub fn with_capacity(node_count: usize, edge_capacity: usize) -> Self {
        Self {
            node_count,
            edges: Vec::with_capacity(edge_capacity),
        }
    }

    /// Builds a graph from endpoint pairs.
    ///
    /// # Errors
    /// Returns [`GraphError::NodeOutOfBounds`] when any endpoint is not
    /// smaller than `node_count`.
    pub fn from_edges<I>(node_count: usize, pairs: I) -> Result<Self, GraphError>
    where
        I: IntoIterator<Item = (usize, usize)>,
    {
        let mut graph = Self::new(node_count);
        for (left, right) in pairs {
            graph.add_edge(left, right)?;
        }
        Ok(graph)
    }

    /// Appends an edge between `left` and `right`.
    ///
    /// # Errors
    /// Returns [`GraphError::NodeOutOfBounds`] when either endpoint lies
    /// outside the graph.
    pub fn add_edge(&mut self, left: usize, right: usize) -> Result<(), GraphError> {
        for node in [left, right] {
            if node >= self.node_count {
                return Err(GraphError::NodeOutOfBounds {
                    node,
                    node_count: self.node_count,
                });
            }
        }
        self.edges.push(Edge::new(left, right));
        Ok(())
    }

    /// Appends an edge whose endpoints the caller has already bounds-checked.
    pub(crate) fn push_edge_unchecked(&mut self, edge: Edge) {
        debug_assert!(edge.target() < self.node_count);
        self.edges.push(edge);
    }

    /// Returns the number of nodes.
    #[must_use]
    pub fn node_count(&self) -> usize {
        self.node_count
    }

    /// Returns the number of edges, counting each parallel copy.
    #[must_use]
    pub fn edge_count(&self) -> usize {
        self.edges.len()
    }

    /// Returns the edges in insertion order.
    #[must_use]
    pub fn edges(&self) -> &[Edge] {
        &self.edges
    }

    /// Returns the degree of every node, counting a self-loop twice.
    #[must_use]
    pub fn degrees(&self) -> Vec<usize> {
        let mut degrees = vec![0_usize; self.node_count];
        for edge in &self.edges {
            if let Some(degree) = degrees.get_mut(edge.source()) {
                *degree += 1;
            }
            if let Some(degree) = degrees.get_mut(edge.target()) {
                *degree += 1;
            }
        }
        degrees
    }

    /// Returns how many edges are self-loops.
    #[must_use]
    pub fn self_loop_count(&self) -> usize {
        self.edges.iter().filter(|edge| edge.is_self_loop()).count()
    }

    /// Returns `true` when the graph has neither self-loops nor parallel
    /// edges.
    #[must_use]
    pub fn is_simple(&self) -> bool {
        let mut seen = BTreeSet::new();
        self.edges
            .iter()
            .all(|edge| !edge.is_self_loop() && seen.insert(*edge))
    }
}

/// An undirected graph without self-loops or parallel edges.
///
/// Edges are sorted and unique, and each node carries a sorted neighbour
/// list for statistic evaluation.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct SimpleGraph {
    edges: Vec<Edge>,
    adjacency: Vec<Vec<usize>>,
}

impl SimpleGraph {
    /// Returns the number of nodes.
    #[must_use]
    pub fn node_count(&self) -> usize {
        self.adjacency.len()
    }

    /// Returns the number of distinct edges.
    #[must_use]
    pub fn edge_count(&self) -> usize {
        self.edges.len()
    }

    /// Returns the edges in ascending order.
    #[must_use]
    pub fn edges(&self) -> &[Edge] {
        &self.edges
    }

    /// Returns the sorted neighbours of `node`, or an empty slice for an
    /// unknown node.
    #[must_use]
    pub fn neighbours(&self, node: usize) -> &[usize] {
        self.adjacency.get(node).map(Vec::as_slice).unwrap_or(&[])
    }

    /// Returns the degree of `node`.
    #[must_use]
    pub fn degree(&self, node: usize) -> usize {
        self.neighbours(node).len()
    }

    /// Returns the same graph as a [`MultiGraph`].
    #[must_use]
    pub fn to_multigraph(&self) -> MultiGraph {
        MultiGraph {
            node_count: self.node_count(),
            edges: self.edges.clone(),
        }
    }
}

/// Counts what [`simplify`] removed from a multigraph.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct SimplifyReport {
    /// Number of self-loop edges dropped.
    pub self_loops_removed: usize,
    /// Number of redundant parallel copies dropped.
    pub parallel_edges_collapsed: usize,
}

impl SimplifyReport {
    /// Returns `true` when nothing was removed.
    #[must_use]
    pub fn is_noop(&self) -> bool {
        self.self_loops_removed == 0 && self.parallel_edges_collapsed == 0
    }
}

/// Projects `graph` onto a simple graph by removing self-loops and collapsing
/// parallel edges into one.
///
/// The node set is preserved, so nodes left isolated keep their index.
///
/// # Examples
/// ```
/// use nullmodel_core::{MultiGraph, simplify};
///
/// let multi = MultiGraph::from_edges(3, [(0, 0), (0, 1), (1, 0), (1, 2)])?;
/// let (simple, report) = simplify(&multi);
/// assert_eq!(simple.edge_count(), 2);
/// assert_eq!(report.self_loops_removed, 1);
/// assert_eq!(report.parallel_edges_collapsed, 1);
/// # Ok::<(), nullmodel_core::GraphError>(())
/// ```
#[must_use]
pub fn simplify(graph: &MultiGraph) -> (SimpleGraph, SimplifyReport) {
    let mut report = SimplifyReport::default();
    let mut unique = BTreeSet::new();
    for edge in graph.edges() {
        if edge.is_self_loop() {
            report.self_loops_removed += 1;
        } else if !unique.insert(*edge) {
            report.parallel_edges_collapsed += 1;
        }
    }

    let mut adjacency = vec![Vec::new(); graph.node_count()];
    for edge in &unique {
        if let Some(list) = adjacency.get_mut(edge.source()) {
            list.push(edge.target());
        }
        if let Some(list) = adjacency.get_mut(edge.target()) {
            list.push(edge.source());
        }
    }
    for list in &mut adjacency {
        list.sort_unstable();
    }

    let simple = SimpleGraph {
        edges: unique.into_iter().collect(),
        adjacency,
    };
    (simple, report)
}
