//! Z-scoring an observed statistic against a null sample.
//!
//! The observed value is appended to the null sample before the mean and
//! standard deviation are taken, and is then scored against that combined
//! distribution. Leaving it out changes the score, so callers comparing with
//! earlier analyses must keep it in.

use crate::error::ZScoreError;

/// Divisor used for the standard deviation.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Deviation {
    /// Divide the squared deviations by `n`.
    #[default]
    Population,
    /// Divide the squared deviations by `n - 1`.
    Sample,
}

/// Mean, standard deviation, and z-score of one scored value.
#[derive(Clone, Copy, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct ZScore {
    /// Mean of the scored distribution.
    pub mean: f64,
    /// Standard deviation of the scored distribution.
    pub std_dev: f64,
    /// `(value - mean) / std_dev`.
    pub z_score: f64,
}

/// Scores `observed` against `sample ∪ {observed}`.
///
/// # Errors
/// Returns [`ZScoreError::EmptySample`] when `sample` is empty,
/// [`ZScoreError::NonFiniteValue`] when any value is NaN or infinite (the
/// observed value has index `sample.len()`), and
/// [`ZScoreError::ZeroDeviation`] when every value is identical.
///
/// # Examples
/// ```
/// use nullmodel_core::{Deviation, observed_z_score};
///
/// let score = observed_z_score(0.2, &[0.1, 0.2, 0.3], Deviation::Population)?;
/// assert!((score.mean - 0.2).abs() < 1e-9);
/// assert!(score.z_score.abs() < 1e-9);
/// # Ok::<(), nullmodel_core::ZScoreError>(())
/// ```
pub fn observed_z_score(
    observed: f64,
    sample: &[f64],
    deviation: Deviation,
) -> Result<ZScore, ZScoreError> {
    if sample.is_empty() {
        return Err(ZScoreError::EmptySample);
    }
    let mut values = Vec::with_capacity(sample.len() + 1);
    values.extend_from_slice(sample);
    values.push(observed);

    let (mean, std_dev) = moments(&values, deviation)?;
    Ok(ZScore {
        mean,
        std_dev,
        z_score: standardise(observed, mean, std_dev),
    })
}

/// Standardises every value in `values` against the whole slice.
///
/// # Errors
/// Returns [`ZScoreError::EmptySample`] for an empty slice,
/// [`ZScoreError::NonFiniteValue`] for NaN or infinite entries, and
/// [`ZScoreError::ZeroDeviation`] when the spread is zero.
///
/// # Examples
/// ```
/// use nullmodel_core::{Deviation, z_scores};
///
/// let scores = z_scores(&[1.0, 3.0], Deviation::Population)?;
/// assert_eq!(scores, vec![-1.0, 1.0]);
/// # Ok::<(), nullmodel_core::ZScoreError>(())
/// ```
pub fn z_scores(values: &[f64], deviation: Deviation) -> Result<Vec<f64>, ZScoreError> {
    let (mean, std_dev) = moments(values, deviation)?;
    Ok(values
        .iter()
        .map(|&value| standardise(value, mean, std_dev))
        .collect())
}

#[expect(
    clippy::cast_precision_loss,
    clippy::float_arithmetic,
    reason = "moments are defined over floating-point samples"
)]
fn moments(values: &[f64], deviation: Deviation) -> Result<(f64, f64), ZScoreError> {
    if values.is_empty() {
        return Err(ZScoreError::EmptySample);
    }
    if let Some(index) = values.iter().position(|value| !value.is_finite()) {
        return Err(ZScoreError::NonFiniteValue { index });
    }

    if let Some(first) = values.first()
        && values.iter().all(|value| value.total_cmp(first).is_eq())
    {
        return Err(ZScoreError::ZeroDeviation);
    }

    let count = values.len();
    let mean = values.iter().sum::<f64>() / count as f64;
    let squared: f64 = values.iter().map(|value| (value - mean).powi(2)).sum();
    let divisor = match deviation {
        Deviation::Population => count,
        Deviation::Sample => count - 1,
    };
    if divisor == 0 {
        return Err(ZScoreError::ZeroDeviation);
    }
    let std_dev = (squared / divisor as f64).sqrt();
    if std_dev == 0.0 {
        return Err(ZScoreError::ZeroDeviation);
    }
    Ok((mean, std_dev))
}

#[expect(
    clippy::float_arithmetic,
    reason = "z-scores are defined over floating-point samples"
)]
fn standardise(value: f64, mean: f64, std_dev: f64) -> f64 {
    (value - mean) / std_dev
}

#[cfg(test)]
mod tests {
    use super::*;

    use rstest::rstest;

    const TOLERANCE: f64 = 1e-9;

    #[test]
    fn observed_at_the_mean_scores_zero() {
        let score = observed_z_score(0.2, &[0.1, 0.2, 0.3], Deviation::Population)
            .expect("sample has spread");
        assert!((score.mean - 0.2).abs() < TOLERANCE);
        assert!(score.z_score.abs() < TOLERANCE);
    }

    #[rstest]
    #[case::population(Deviation::Population, 1.521_277_658_511_329_7)]
    #[case::sample(Deviation::Sample, 1.317_465_098_480_519_8)]
    fn observed_value_is_included_in_distribution(
        #[case] deviation: Deviation,
        #[case] expected: f64,
    ) {
        let score =
            observed_z_score(0.5, &[0.1, 0.2, 0.3], deviation).expect("sample has spread");
        assert!((score.mean - 0.275).abs() < TOLERANCE);
        assert!((score.z_score - expected).abs() < TOLERANCE);
    }

    #[test]
    fn z_scores_standardise_whole_slice() {
        let scores = z_scores(&[1.0, 2.0, 3.0, 4.0, 10.0], Deviation::Population)
            .expect("slice has spread");
        let expected = [
            -0.948_683_298_050_513_8,
            -0.632_455_532_033_675_9,
            -0.316_227_766_016_837_94,
            0.0,
            1.897_366_596_101_027_5,
        ];
        for (actual, wanted) in scores.iter().zip(expected) {
            assert!((actual - wanted).abs() < TOLERANCE);
        }
    }

    #[rstest]
    #[case::empty_sample(0.0, vec![], ZScoreError::EmptySample)]
    #[case::constant(1.0, vec![1.0, 1.0], ZScoreError::ZeroDeviation)]
    #[case::inexact_constant_pair(0.1, vec![0.1], ZScoreError::ZeroDeviation)]
    #[case::inexact_constant_run(0.7, vec![0.7; 4], ZScoreError::ZeroDeviation)]
    #[case::nan_sample(1.0, vec![f64::NAN], ZScoreError::NonFiniteValue { index: 0 })]
    #[case::infinite_observed(f64::INFINITY, vec![1.0, 2.0], ZScoreError::NonFiniteValue { index: 2 })]
    fn observed_z_score_rejects_degenerate_input(
        #[case] observed: f64,
        #[case] sample: Vec<f64>,
        #[case] expected: ZScoreError,
    ) {
        let err = observed_z_score(observed, &sample, Deviation::Population)
            .expect_err("input is degenerate");
        assert_eq!(err, expected);
    }

    #[rstest]
    #[case::population(Deviation::Population)]
    #[case::sample(Deviation::Sample)]
    fn inexact_constants_have_no_spread(#[case] deviation: Deviation) {
        let err = z_scores(&[0.1, 0.1, 0.1], deviation).expect_err("values are identical");
        assert_eq!(err, ZScoreError::ZeroDeviation);
    }

    #[test]
    fn sample_deviation_needs_two_values() {
        let err = z_scores(&[4.0], Deviation::Sample).expect_err("n - 1 is zero");
        assert_eq!(err, ZScoreError::ZeroDeviation);
    }
}
