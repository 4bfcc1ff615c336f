//! Error types for the nullmodel core library.
//!
//! Defines error enums exposed by the public API, their stable
//! machine-readable codes, and a convenient result alias.

use std::{fmt, sync::Arc};

use thiserror::Error;

use crate::builder::ExecutionStrategy;

macro_rules! define_error_codes {
    (
        $(#[$enum_meta:meta])*
        enum $CodeTy:ident for $ErrTy:ident {
            $(
                $(#[$variant_meta:meta])*
                $CodeVariant:ident => $ErrVariant:ident $( { $($pattern:tt)* } )? => $code:expr
            ),+ $(,)?
        }
    ) => {
        $(#[$enum_meta])*
        #[derive(Clone, Copy, Debug, Eq, Hash, PartialEq)]
        #[non_exhaustive]
        pub enum $CodeTy {
            $(
                $(#[$variant_meta])*
                $CodeVariant,
            )+
        }

        impl $CodeTy {
            /// Return the stable machine-readable representation of this error code.
            pub const fn as_str(self) -> &'static str {
                match self {
                    $(Self::$CodeVariant => $code,)+
                }
            }
        }

        impl fmt::Display for $CodeTy {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str(self.as_str())
            }
        }

        impl $ErrTy {
            #[doc = concat!(
                "Retrieve the stable [`",
                stringify!($CodeTy),
                "`] for this error."
            )]
            pub const fn code(&self) -> $CodeTy {
                match self {
                    $(Self::$ErrVariant $( { $($pattern)* } )? => $CodeTy::$CodeVariant,)+
                }
            }
        }
    };
}

/// A degree sequence that no graph can realise.
///
/// Every variant is reported to callers as an invalid degree sequence; the
/// variant records which check rejected it.
#[non_exhaustive]
#[derive(Clone, Debug, Eq, Error, PartialEq)]
pub enum DegreeSequenceError {
    /// The degrees sum to an odd total, so stubs cannot be paired.
    #[error("invalid degree sequence: total degree {total} is odd")]
    OddTotal {
        /// Sum of all degrees.
        total: usize,
    },
    /// A node was given a negative number of stubs.
    #[error("invalid degree sequence: node {node} has negative degree {degree}")]
    NegativeDegree {
        /// Index of the offending node.
        node: usize,
        /// The negative degree supplied for that node.
        degree: i64,
    },
    /// The degrees do not fit in a `usize` or their sum overflows.
    #[error("invalid degree sequence: total degree overflows the platform integer")]
    TotalOverflow,
}

define_error_codes! {
    /// Stable codes describing [`DegreeSequenceError`] variants.
    enum DegreeSequenceErrorCode for DegreeSequenceError {
        /// The degrees sum to an odd total.
        OddTotal => OddTotal { .. } => "DEGREE_SEQUENCE_ODD_TOTAL",
        /// A node was given a negative degree.
        NegativeDegree => NegativeDegree { .. } => "DEGREE_SEQUENCE_NEGATIVE_DEGREE",
        /// The total degree overflowed.
        TotalOverflow => TotalOverflow => "DEGREE_SEQUENCE_TOTAL_OVERFLOW",
    }
}

/// An error produced while assembling a graph from explicit edges.
#[non_exhaustive]
#[derive(Clone, Debug, Eq, Error, PartialEq)]
pub enum GraphError {
    /// An edge referenced a node outside `0..node_count`.
    #[error("edge references node {node}, but node_count is {node_count}")]
    NodeOutOfBounds {
        /// The invalid node id referenced by an edge.
        node: usize,
        /// The number of nodes in the graph.
        node_count: usize,
    },
}

define_error_codes! {
    /// Stable codes describing [`GraphError`] variants.
    enum GraphErrorCode for GraphError {
        /// An edge referenced a node outside the graph.
        NodeOutOfBounds => NodeOutOfBounds { .. } => "GRAPH_NODE_OUT_OF_BOUNDS",
    }
}

/// An error produced by a [`crate::Statistic`] evaluation.
#[non_exhaustive]
#[derive(Clone, Debug, Eq, Error, PartialEq)]
pub enum StatisticError {
    /// The statistic has no value on the supplied graph.
    #[error("statistic `{statistic}` is undefined: {reason}")]
    Undefined {
        /// Name of the statistic that failed.
        statistic: Arc<str>,
        /// Why the value does not exist.
        reason: Arc<str>,
    },
}

define_error_codes! {
    /// Stable codes describing [`StatisticError`] variants.
    enum StatisticErrorCode for StatisticError {
        /// The statistic has no value on the supplied graph.
        Undefined => Undefined { .. } => "STATISTIC_UNDEFINED",
    }
}

/// An error produced while standardising a value against a sample.
#[non_exhaustive]
#[derive(Clone, Copy, Debug, Eq, Error, PartialEq)]
pub enum ZScoreError {
    /// No null-sample values were supplied.
    #[error("cannot compute a z-score against an empty sample")]
    EmptySample,
    /// The distribution contained NaN or an infinity.
    #[error("value at index {index} is not finite")]
    NonFiniteValue {
        /// Position of the offending value within the scored distribution.
        index: usize,
    },
    /// Every value in the distribution was identical.
    #[error("standard deviation is zero, the z-score is undefined")]
    ZeroDeviation,
}

define_error_codes! {
    /// Stable codes describing [`ZScoreError`] variants.
    enum ZScoreErrorCode for ZScoreError {
        /// No null-sample values were supplied.
        EmptySample => EmptySample => "ZSCORE_EMPTY_SAMPLE",
        /// The distribution contained NaN or an infinity.
        NonFiniteValue => NonFiniteValue { .. } => "ZSCORE_NON_FINITE_VALUE",
        /// Every value in the distribution was identical.
        ZeroDeviation => ZeroDeviation => "ZSCORE_ZERO_DEVIATION",
    }
}

/// Error type produced when constructing or running [`crate::NullModel`].
#[non_exhaustive]
#[derive(Clone, Debug, Eq, Error, PartialEq)]
pub enum NullModelError {
    /// The trial count must be greater than zero.
    #[error("trials must be at least 1 (got {got})")]
    InvalidTrialCount {
        /// The invalid trial count supplied by the caller.
        got: usize,
    },
    /// The requested execution strategy is unavailable in the current build.
    #[error("the requested execution strategy {requested:?} is not available in this build")]
    BackendUnavailable {
        /// Strategy that could not be satisfied by the current build.
        requested: ExecutionStrategy,
    },
    /// The statistic failed on the observed graph.
    #[error("statistic failed on the observed graph: {source}")]
    ObservedStatistic {
        /// Underlying statistic failure.
        #[source]
        source: StatisticError,
    },
    /// The statistic failed on a generated null graph.
    #[error("statistic failed on null trial {trial}: {source}")]
    TrialStatistic {
        /// Index of the failing trial.
        trial: usize,
        /// Underlying statistic failure.
        #[source]
        source: StatisticError,
    },
    /// Every trial was skipped, leaving no null sample.
    #[error("all {skipped} null trials were skipped; no sample remains")]
    NoCompletedTrials {
        /// Number of trials skipped by the undefined-statistic policy.
        skipped: usize,
    },
    /// Scoring the observed value against the null sample failed.
    #[error(transparent)]
    ZScore {
        /// Underlying scoring failure.
        #[from]
        source: ZScoreError,
    },
}

define_error_codes! {
    /// Stable codes describing [`NullModelError`] variants.
    enum NullModelErrorCode for NullModelError {
        /// The trial count must be greater than zero.
        InvalidTrialCount => InvalidTrialCount { .. } => "NULL_MODEL_INVALID_TRIAL_COUNT",
        /// The requested execution strategy is unavailable in the current build.
        BackendUnavailable => BackendUnavailable { .. } => "NULL_MODEL_BACKEND_UNAVAILABLE",
        /// The statistic failed on the observed graph.
        ObservedStatistic => ObservedStatistic { .. } => "NULL_MODEL_OBSERVED_STATISTIC",
        /// The statistic failed on a generated null graph.
        TrialStatistic => TrialStatistic { .. } => "NULL_MODEL_TRIAL_STATISTIC",
        /// Every trial was skipped.
        NoCompletedTrials => NoCompletedTrials { .. } => "NULL_MODEL_NO_COMPLETED_TRIALS",
        /// Scoring the observed value failed.
        ZScoreFailure => ZScore { .. } => "NULL_MODEL_ZSCORE_FAILURE",
    }
}

/// Convenient alias for results returned by the null-model runner.
pub type Result<T> = core::result::Result<T, NullModelError>;

#[cfg(test)]
mod tests {
    use super::*;

    use rstest::rstest;

    #[rstest]
    #[case(DegreeSequenceError::OddTotal { total: 3 }, "DEGREE_SEQUENCE_ODD_TOTAL")]
    #[case(
        DegreeSequenceError::NegativeDegree { node: 1, degree: -2 },
        "DEGREE_SEQUENCE_NEGATIVE_DEGREE"
    )]
    #[case(DegreeSequenceError::TotalOverflow, "DEGREE_SEQUENCE_TOTAL_OVERFLOW")]
    fn degree_sequence_codes_are_stable(
        #[case] error: DegreeSequenceError,
        #[case] expected: &str,
    ) {
        assert_eq!(error.code().as_str(), expected);
        assert_eq!(error.code().to_string(), expected);
    }

    #[test]
    fn trial_count_errors_carry_stable_code() {
        let error = NullModelError::InvalidTrialCount { got: 0 };
        assert_eq!(error.code().as_str(), "NULL_MODEL_INVALID_TRIAL_COUNT");
        assert_eq!(error.to_string(), "trials must be at least 1 (got 0)");
    }

    #[test]
    fn zscore_errors_wrap_transparently() {
        let error = NullModelError::from(ZScoreError::ZeroDeviation);
        assert_eq!(error.code(), NullModelErrorCode::ZScoreFailure);
        assert_eq!(
            error.to_string(),
            "standard deviation is zero, the z-score is undefined"
        );
    }
}
