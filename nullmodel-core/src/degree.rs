//! Validated degree sequences.
//!
//! A [`DegreeSequence`] always has an even total, so every value of the type
//! can be realised by stub matching.

use crate::{error::DegreeSequenceError, graph::MultiGraph};

/// Target degree of every node, indexed `0..n-1`, with an even total.
///
/// # Examples
/// ```
/// use nullmodel_core::{DegreeSequence, DegreeSequenceError};
///
/// let degrees = DegreeSequence::new(vec![3, 1, 2])?;
/// assert_eq!(degrees.total(), 6);
/// assert_eq!(degrees.edge_count(), 3);
///
/// let odd = DegreeSequence::new(vec![1]).expect_err("odd totals are rejected");
/// assert_eq!(odd, DegreeSequenceError::OddTotal { total: 1 });
/// # Ok::<(), DegreeSequenceError>(())
/// ```
#[derive(Clone, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct DegreeSequence {
    degrees: Vec<usize>,
    total: usize,
}

impl DegreeSequence {
    /// Validates `degrees` and wraps them.
    ///
    /// # Errors
    /// Returns [`DegreeSequenceError::OddTotal`] when the degrees sum to an
    /// odd number and [`DegreeSequenceError::TotalOverflow`] when the sum
    /// does not fit in a `usize`.
    pub fn new(degrees: Vec<usize>) -> Result<Self, DegreeSequenceError> {
        let total = degrees
            .iter()
            .try_fold(0_usize, |acc, &degree| acc.checked_add(degree))
            .ok_or(DegreeSequenceError::TotalOverflow)?;
        if !total.is_multiple_of(2) {
            return Err(DegreeSequenceError::OddTotal { total });
        }
        Ok(Self { degrees, total })
    }

    /// Validates signed degrees, rejecting negative entries before applying
    /// [`Self::new`].
    ///
    /// # Errors
    /// Returns [`DegreeSequenceError::NegativeDegree`] for the first negative
    /// entry, [`DegreeSequenceError::TotalOverflow`] when an entry or the sum
    /// does not fit in a `usize`, and [`DegreeSequenceError::OddTotal`] for
    /// odd totals.
    ///
    /// # Examples
    /// ```
    /// use nullmodel_core::{DegreeSequence, DegreeSequenceError};
    ///
    /// let err = DegreeSequence::try_from_signed(&[2, -1, 1])
    ///     .expect_err("negative degrees are rejected");
    /// assert_eq!(err, DegreeSequenceError::NegativeDegree { node: 1, degree: -1 });
    /// ```
    pub fn try_from_signed(degrees: &[i64]) -> Result<Self, DegreeSequenceError> {
        let converted = degrees
            .iter()
            .enumerate()
            .map(|(node, &degree)| {
                if degree < 0 {
                    return Err(DegreeSequenceError::NegativeDegree { node, degree });
                }
                usize::try_from(degree).map_err(|_| DegreeSequenceError::TotalOverflow)
            })
            .collect::<Result<Vec<_>, _>>()?;
        Self::new(converted)
    }

    /// Derives the degree sequence of an existing graph, counting a
    /// self-loop twice.
    ///
    /// The result is always valid because every edge contributes two to the
    /// total.
    #[must_use]
    pub fn from_graph(graph: &MultiGraph) -> Self {
        let degrees = graph.degrees();
        let total = graph.edge_count() * 2;
        Self { degrees, total }
    }

    /// Returns the degrees as a slice.
    #[must_use]
    pub fn as_slice(&self) -> &[usize] {
        &self.degrees
    }

    /// Returns the number of nodes.
    #[must_use]
    pub fn len(&self) -> usize {
        self.degrees.len()
    }

    /// Returns `true` when the sequence describes no nodes.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.degrees.is_empty()
    }

    /// Returns the sum of all degrees, which is also the stub count.
    #[must_use]
    pub fn total(&self) -> usize {
        self.total
    }

    /// Returns the number of edges any realisation has.
    #[must_use]
    pub fn edge_count(&self) -> usize {
        self.total / 2
    }

    /// Returns the largest degree, or zero for an empty sequence.
    #[must_use]
    pub fn max_degree(&self) -> usize {
        self.degrees.iter().copied().max().unwrap_or(0)
    }
}

impl TryFrom<Vec<usize>> for DegreeSequence {
    type Error = DegreeSequenceError;

    fn try_from(degrees: Vec<usize>) -> Result<Self, Self::Error> {
        Self::new(degrees)
    }
}

impl TryFrom<&[i64]> for DegreeSequence {
    type Error = DegreeSequenceError;

    fn try_from(degrees: &[i64]) -> Result<Self, Self::Error> {
        Self::try_from_signed(degrees)
    }
}

impl AsRef<[usize]> for DegreeSequence {
    fn as_ref(&self) -> &[usize] {
        self.as_slice()
    }
}
