//! Observed category counts
#[cfg(feature = "serde1")]
use serde::{Deserialize, Serialize};

use std::fmt;

/// Malformed observation input
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde1", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde1", serde(rename_all = "snake_case"))]
pub enum InputError {
    /// A count is less than zero
    NegativeCount { ix: usize, count: f64 },
    /// A count is infinite or NaN
    NonFiniteCount { ix: usize, count: f64 },
    /// There are more counts than categories in the model
    TooManyCounts { n_counts: usize, k: usize },
    /// A Monte Carlo estimate was requested with zero draws
    NoDraws,
}

/// Validate a count vector against a model with `k` categories.
///
/// Shorter vectors are allowed; the missing trailing categories are taken to
/// have zero counts.
///
/// # Example
///
/// ```
/// # use zoo::data::{check_counts, InputError};
/// assert!(check_counts(&[3.0, 2.0, 1.0], 4).is_ok());
/// assert_eq!(
///     check_counts(&[3.0, 2.0, 1.0], 2),
///     Err(InputError::TooManyCounts { n_counts: 3, k: 2 })
/// );
/// ```
pub fn check_counts(counts: &[f64], k: usize) -> Result<(), InputError> {
    if counts.len() > k {
        return Err(InputError::TooManyCounts {
            n_counts: counts.len(),
            k,
        });
    }

    counts.iter().enumerate().try_for_each(|(ix, &count)| {
        if !count.is_finite() {
            Err(InputError::NonFiniteCount { ix, count })
        } else if count < 0.0 {
            Err(InputError::NegativeCount { ix, count })
        } else {
            Ok(())
        }
    })
}

/// Validate `counts` and zero-pad them on the high-index side to length `k`
///
/// # Example
///
/// ```
/// # use zoo::data::padded_counts;
/// let xs = padded_counts(&[3.0, 2.0, 1.0], 5).unwrap();
/// assert_eq!(xs, vec![3.0, 2.0, 1.0, 0.0, 0.0]);
/// ```
pub fn padded_counts(counts: &[f64], k: usize) -> Result<Vec<f64>, InputError> {
    check_counts(counts, k)?;
    let mut xs = Vec::with_capacity(k);
    xs.extend_from_slice(counts);
    xs.resize(k, 0.0);
    Ok(xs)
}

impl std::error::Error for InputError {}

impl fmt::Display for InputError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::NegativeCount { ix, count } => {
                write!(f, "count at index {} is negative: {}", ix, count)
            }
            Self::NonFiniteCount { ix, count } => {
                write!(f, "count at index {} is non-finite: {}", ix, count)
            }
            Self::TooManyCounts { n_counts, k } => write!(
                f,
                "{} counts supplied for a model with {} categories",
                n_counts, k
            ),
            Self::NoDraws => write!(f, "number of draws must be at least 1"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_counts_are_valid() {
        assert!(check_counts(&[], 2).is_ok());
        assert_eq!(padded_counts(&[], 3).unwrap(), vec![0.0; 3]);
    }

    #[test]
    fn exact_length_counts_are_unchanged() {
        let xs = padded_counts(&[1.0, 0.0, 4.5], 3).unwrap();
        assert_eq!(xs, vec![1.0, 0.0, 4.5]);
    }

    #[test]
    fn negative_count_is_reported_with_its_index() {
        assert_eq!(
            check_counts(&[1.0, -2.0], 3),
            Err(InputError::NegativeCount {
                ix: 1,
                count: -2.0
            })
        );
    }

    #[test]
    fn nan_count_is_rejected() {
        let err = check_counts(&[f64::NAN], 3).unwrap_err();
        assert!(matches!(err, InputError::NonFiniteCount { ix: 0, .. }));
    }

    #[test]
    fn infinite_count_is_rejected() {
        let err = check_counts(&[0.0, f64::INFINITY], 3).unwrap_err();
        assert!(matches!(err, InputError::NonFiniteCount { ix: 1, .. }));
    }

    #[test]
    fn too_many_counts_is_checked_before_values() {
        assert_eq!(
            check_counts(&[-1.0, 1.0, 1.0], 2),
            Err(InputError::TooManyCounts { n_counts: 3, k: 2 })
        );
    }
}
