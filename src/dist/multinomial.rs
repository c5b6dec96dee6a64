//! Multinomial distribution over category counts
#[cfg(feature = "serde1")]
use serde::{Deserialize, Serialize};

use crate::consts::SIMPLEX_TOL;
use crate::impl_display;
use crate::misc::{ln_multinomial_pmf, vec_to_string};
use crate::traits::*;
use rand::Rng;
use rand_distr::Binomial;
use std::fmt;

/// [Multinomial distribution](https://en.wikipedia.org/wiki/Multinomial_distribution)
/// of `n` trials over `k` categories with probabilities `ps`.
///
/// Counts are carried as `f64` so that they line up with Dirichlet updates.
///
/// # Example
///
/// ```
/// # use zoo::dist::Multinomial;
/// # use zoo::traits::*;
/// let mn = Multinomial::new(6, vec![0.5, 0.3, 0.2]).unwrap();
/// assert!(mn.supports(&vec![3.0, 2.0, 1.0]));
/// assert!(!mn.supports(&vec![3.0, 2.0, 2.0]));
///
/// assert::close(mn.pmf(&vec![3.0, 2.0, 1.0]), 0.135, 1E-12);
/// ```
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde1", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde1", serde(rename_all = "snake_case"))]
pub struct Multinomial {
    n: u32,
    ps: Vec<f64>,
}

#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde1", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde1", serde(rename_all = "snake_case"))]
pub enum MultinomialError {
    /// The probability vector is empty
    EmptyProbabilities,
    /// A probability is less than zero
    NegativeProbability { ix: usize, p: f64 },
    /// A probability is infinite or NaN
    NonFiniteProbability { ix: usize, p: f64 },
    /// The probabilities do not sum to 1
    ProbabilitiesDoNotSumToOne { sum: f64 },
}

impl Multinomial {
    pub fn new(n: u32, ps: Vec<f64>) -> Result<Self, MultinomialError> {
        if ps.is_empty() {
            return Err(MultinomialError::EmptyProbabilities);
        }

        ps.iter().enumerate().try_for_each(|(ix, &p)| {
            if !p.is_finite() {
                Err(MultinomialError::NonFiniteProbability { ix, p })
            } else if p < 0.0 {
                Err(MultinomialError::NegativeProbability { ix, p })
            } else {
                Ok(())
            }
        })?;

        let sum: f64 = ps.iter().sum();
        if (sum - 1.0).abs() > SIMPLEX_TOL {
            return Err(MultinomialError::ProbabilitiesDoNotSumToOne { sum });
        }

        Ok(Multinomial { n, ps })
    }

    #[inline]
    pub fn new_unchecked(n: u32, ps: Vec<f64>) -> Self {
        Multinomial { n, ps }
    }

    /// Number of trials
    #[inline]
    pub fn n(&self) -> u32 {
        self.n
    }

    /// Number of categories
    #[inline]
    pub fn k(&self) -> usize {
        self.ps.len()
    }

    #[inline]
    pub fn ps(&self) -> &[f64] {
        &self.ps
    }
}

impl From<&Multinomial> for String {
    fn from(mn: &Multinomial) -> String {
        format!("Multinomial(n: {}, p: {})", mn.n, vec_to_string(&mn.ps, 5))
    }
}

impl_display!(Multinomial);

impl HasDensity<Vec<f64>> for Multinomial {
    fn ln_f(&self, x: &Vec<f64>) -> f64 {
        ln_multinomial_pmf(x, &self.ps)
    }
}

impl Support<Vec<f64>> for Multinomial {
    fn supports(&self, x: &Vec<f64>) -> bool {
        x.len() == self.ps.len()
            && x.iter().all(|&xi| xi >= 0.0 && xi.fract() == 0.0)
            && x.iter().sum::<f64>() == f64::from(self.n)
    }
}

impl DiscreteDistr<Vec<f64>> for Multinomial {}

impl Sampleable<Vec<f64>> for Multinomial {
    // Sequential conditional binomials: x_i ~ Bin(n - Σ_{j<i} x_j, p_i / Σ_{j>=i} p_j)
    fn draw<R: Rng>(&self, rng: &mut R) -> Vec<f64> {
        let k = self.ps.len();
        let mut remaining = u64::from(self.n);
        let mut mass_left = 1.0;
        let mut xs = vec![0.0; k];

        for (ix, &p) in self.ps.iter().enumerate() {
            if remaining == 0 {
                break;
            }
            let x = if ix + 1 == k {
                remaining
            } else {
                let q = (p / mass_left).clamp(0.0, 1.0);
                Binomial::new(remaining, q).map_or(0, |b| rng.sample(b))
            };
            xs[ix] = x as f64;
            remaining -= x;
            mass_left -= p;
        }
        xs
    }
}

impl Mean<Vec<f64>> for Multinomial {
    fn mean(&self) -> Option<Vec<f64>> {
        let n = f64::from(self.n);
        Some(self.ps.iter().map(|&p| n * p).collect())
    }
}

impl std::error::Error for MultinomialError {}

impl fmt::Display for MultinomialError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::EmptyProbabilities => write!(f, "probabilities were empty"),
            Self::NegativeProbability { ix, p } => {
                write!(f, "probability at index {} is negative: {}", ix, p)
            }
            Self::NonFiniteProbability { ix, p } => {
                write!(f, "probability at index {} is non-finite: {}", ix, p)
            }
            Self::ProbabilitiesDoNotSumToOne { sum } => {
                write!(f, "probabilities sum to {}, not 1", sum)
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_basic_impls;
    use rand::SeedableRng;
    use rand_xoshiro::Xoshiro256Plus;

    const TOL: f64 = 1E-12;

    test_basic_impls!(Multinomial::new(3, vec![0.5, 0.5]).unwrap());

    #[test]
    fn new_validates_probabilities() {
        assert_eq!(
            Multinomial::new(1, vec![]),
            Err(MultinomialError::EmptyProbabilities)
        );
        assert!(matches!(
            Multinomial::new(1, vec![0.5, 0.6]),
            Err(MultinomialError::ProbabilitiesDoNotSumToOne { .. })
        ));
        assert!(matches!(
            Multinomial::new(1, vec![1.5, -0.5]),
            Err(MultinomialError::NegativeProbability { ix: 1, .. })
        ));
    }

    #[test]
    fn pmf_sums_to_one_over_support() {
        let mn = Multinomial::new(3, vec![0.2, 0.3, 0.5]).unwrap();
        let mut total = 0.0;
        for a in 0..=3 {
            for b in 0..=(3 - a) {
                let c = 3 - a - b;
                total += mn.pmf(&vec![a as f64, b as f64, c as f64]);
            }
        }
        assert::close(total, 1.0, TOL);
    }

    #[test]
    fn draws_are_in_support() {
        let mut rng = Xoshiro256Plus::seed_from_u64(0xABCD);
        let mn = Multinomial::new(25, vec![0.1, 0.0, 0.6, 0.3]).unwrap();
        for _ in 0..200 {
            let x = mn.draw(&mut rng);
            assert!(mn.supports(&x));
            assert_eq!(x[1], 0.0);
        }
    }

    #[test]
    fn zero_trials_draw_nothing() {
        let mut rng = Xoshiro256Plus::seed_from_u64(1);
        let mn = Multinomial::new(0, vec![0.5, 0.5]).unwrap();
        assert_eq!(mn.draw(&mut rng), vec![0.0, 0.0]);
        assert::close(mn.pmf(&vec![0.0, 0.0]), 1.0, TOL);
    }

    #[test]
    fn sample_mean_approaches_mean() {
        let mut rng = Xoshiro256Plus::seed_from_u64(2);
        let mn = Multinomial::new(10, vec![0.2, 0.3, 0.5]).unwrap();
        let n = 10_000;
        let xs: Vec<Vec<f64>> = mn.sample(n, &mut rng);
        let mean = mn.mean().unwrap();
        for ix in 0..3 {
            let m = xs.iter().map(|x| x[ix]).sum::<f64>() / n as f64;
            assert::close(m, mean[ix], 0.1);
        }
    }
}
