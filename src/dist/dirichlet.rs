//! Dirichlet distribution over species prevalence
#[cfg(feature = "serde1")]
use serde::{Deserialize, Serialize};

use crate::consts::{DEFAULT_CONCENTRATION, SIMPLEX_TOL};
use crate::data::{check_counts, padded_counts, InputError};
use crate::dist::Beta;
use crate::impl_display;
use crate::misc::{ln_gammafn, ln_multinomial_coeff, pflip, vec_to_string};
use crate::traits::*;
use rand::Rng;
use rand_distr::Gamma as RGamma;
use std::fmt;

/// [Dirichlet distribution](https://en.wikipedia.org/wiki/Dirichlet_distribution)
/// over the prevalence of `k >= 2` categories.
///
/// A fresh model has every alpha equal to the prior concentration. Observed
/// counts are folded in with [`update`](Dirichlet::update), which is the
/// conjugate update against multinomial data.
///
/// # Example
///
/// ```
/// # use zoo::dist::Dirichlet;
/// let mut dir = Dirichlet::new(3, 1.0).unwrap();
/// assert_eq!(dir.mean_prevalence(), vec![1.0 / 3.0; 3]);
///
/// dir.update(&[3.0, 2.0, 1.0]).unwrap();
/// assert_eq!(dir.alphas(), &[4.0, 3.0, 2.0]);
/// assert_eq!(dir.mean_prevalence(), vec![4.0 / 9.0, 3.0 / 9.0, 2.0 / 9.0]);
/// ```
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde1", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde1", serde(rename_all = "snake_case"))]
pub struct Dirichlet {
    /// A `Vec` of real numbers in (0, ∞)
    alphas: Vec<f64>,
}

#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde1", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde1", serde(rename_all = "snake_case"))]
pub enum DirichletError {
    /// Fewer than two categories
    InvalidDimension { n: usize },
    /// The concentration is less than or equal to zero
    ConcentrationTooLow { concentration: f64 },
    /// The concentration is infinite or NaN
    ConcentrationNotFinite { concentration: f64 },
    /// alphas parameter has one or more entries less than or equal to zero
    AlphaTooLow { ix: usize, alpha: f64 },
    /// alphas parameter has one or more infinite or NaN entries
    AlphaNotFinite { ix: usize, alpha: f64 },
}

impl Dirichlet {
    /// Create a symmetric Dirichlet over `n` categories with every alpha set
    /// to `concentration`.
    ///
    /// # Example
    ///
    /// ```
    /// # use zoo::dist::{Dirichlet, DirichletError};
    /// assert!(Dirichlet::new(2, 0.5).is_ok());
    /// assert_eq!(
    ///     Dirichlet::new(1, 1.0),
    ///     Err(DirichletError::InvalidDimension { n: 1 })
    /// );
    /// ```
    pub fn new(n: usize, concentration: f64) -> Result<Self, DirichletError> {
        if n < 2 {
            Err(DirichletError::InvalidDimension { n })
        } else if concentration <= 0.0 {
            Err(DirichletError::ConcentrationTooLow { concentration })
        } else if !concentration.is_finite() {
            Err(DirichletError::ConcentrationNotFinite { concentration })
        } else {
            Ok(Dirichlet::new_unchecked(vec![concentration; n]))
        }
    }

    /// Create a Dirichlet over `n` categories with the default concentration
    /// of 1, which is uniform over the simplex.
    pub fn uniform(n: usize) -> Result<Self, DirichletError> {
        Dirichlet::new(n, DEFAULT_CONCENTRATION)
    }

    /// Creates a `Dirichlet` with a given `alphas` vector
    pub fn from_alphas(alphas: Vec<f64>) -> Result<Self, DirichletError> {
        if alphas.len() < 2 {
            return Err(DirichletError::InvalidDimension { n: alphas.len() });
        }

        alphas.iter().enumerate().try_for_each(|(ix, &alpha)| {
            if alpha <= 0.0 {
                Err(DirichletError::AlphaTooLow { ix, alpha })
            } else if !alpha.is_finite() {
                Err(DirichletError::AlphaNotFinite { ix, alpha })
            } else {
                Ok(())
            }
        })?;

        Ok(Dirichlet { alphas })
    }

    /// Creates a new Dirichlet without checking whether the parameters are
    /// valid.
    #[inline]
    pub fn new_unchecked(alphas: Vec<f64>) -> Self {
        Dirichlet { alphas }
    }

    /// The number of categories
    #[inline]
    pub fn k(&self) -> usize {
        self.alphas.len()
    }

    /// Alias for [`k`](Dirichlet::k)
    #[inline]
    pub fn dimension(&self) -> usize {
        self.k()
    }

    /// Get a reference to the weights vector, `alphas`
    #[inline]
    pub fn alphas(&self) -> &[f64] {
        &self.alphas
    }

    #[inline]
    fn sum_alphas(&self) -> f64 {
        self.alphas.iter().sum()
    }

    /// Add `counts[i]` to `alphas[i]`.
    ///
    /// `counts` may be shorter than `k`, in which case the trailing alphas are
    /// left unchanged. On error the model is untouched.
    ///
    /// # Example
    ///
    /// ```
    /// # use zoo::dist::Dirichlet;
    /// # use zoo::data::InputError;
    /// let mut dir = Dirichlet::new(4, 1.0).unwrap();
    /// dir.update(&[2.0, 1.0]).unwrap();
    /// assert_eq!(dir.alphas(), &[3.0, 2.0, 1.0, 1.0]);
    ///
    /// let err = dir.update(&[1.0, 1.0, 1.0, 1.0, 1.0]).unwrap_err();
    /// assert_eq!(err, InputError::TooManyCounts { n_counts: 5, k: 4 });
    /// assert_eq!(dir.alphas(), &[3.0, 2.0, 1.0, 1.0]);
    /// ```
    pub fn update(&mut self, counts: &[f64]) -> Result<(), InputError> {
        check_counts(counts, self.k())?;
        self.alphas
            .iter_mut()
            .zip(counts.iter())
            .for_each(|(alpha, &ct)| *alpha += ct);
        Ok(())
    }

    /// Draw one prevalence vector.
    ///
    /// Each category gets an independent Gamma(α<sub>i</sub>, 1) variate and the
    /// variates are normalized by their sum.
    pub fn sample_prevalence<R: Rng>(&self, rng: &mut R) -> Vec<f64> {
        self.draw(rng)
    }

    /// The mean prevalence, α<sub>i</sub> / Σα
    pub fn mean_prevalence(&self) -> Vec<f64> {
        let z = self.sum_alphas();
        self.alphas.iter().map(|&alpha| alpha / z).collect()
    }

    /// The marginal distribution of the prevalence of category `ix`,
    /// Beta(α<sub>ix</sub>, Σα - α<sub>ix</sub>). `None` if `ix` is out of
    /// range.
    ///
    /// # Example
    ///
    /// ```
    /// # use zoo::dist::Dirichlet;
    /// # use zoo::traits::Mean;
    /// let dir = Dirichlet::from_alphas(vec![4.0, 3.0, 2.0]).unwrap();
    /// let beta = dir.marginal(0).unwrap();
    /// assert_eq!((beta.alpha(), beta.beta()), (4.0, 5.0));
    ///
    /// let mean: f64 = beta.mean().unwrap();
    /// assert::close(mean, dir.mean_prevalence()[0], 1E-12);
    ///
    /// assert!(dir.marginal(3).is_none());
    /// ```
    ///
    /// Returns `None` when the other components' mass vanishes next to
    /// `alphas[ix]` in floating point.
    pub fn marginal(&self, ix: usize) -> Option<Beta> {
        let alpha = *self.alphas.get(ix)?;
        Beta::new(alpha, self.sum_alphas() - alpha).ok()
    }

    /// Exact log marginal likelihood of multinomial `counts` under this
    /// Dirichlet (the Dirichlet-multinomial PMF).
    ///
    /// `counts` shorter than `k` are zero-padded.
    pub fn ln_m(&self, counts: &[f64]) -> Result<f64, InputError> {
        let xs = padded_counts(counts, self.k())?;
        let n: f64 = xs.iter().sum();
        let sum_alpha = self.sum_alphas();

        let terms = self
            .alphas
            .iter()
            .zip(xs.iter())
            .fold(0.0, |acc, (&alpha, &x)| {
                acc + ln_gammafn(alpha + x) - ln_gammafn(alpha)
            });

        Ok(ln_multinomial_coeff(&xs) + ln_gammafn(sum_alpha)
            - ln_gammafn(sum_alpha + n)
            + terms)
    }
}

impl From<&Dirichlet> for String {
    fn from(dir: &Dirichlet) -> String {
        format!("Dir(α: {})", vec_to_string(&dir.alphas, 5))
    }
}

impl_display!(Dirichlet);

impl Sampleable<Vec<f64>> for Dirichlet {
    fn draw<R: Rng>(&self, rng: &mut R) -> Vec<f64> {
        // alphas are positive and finite, so every Gamma is well formed
        let xs: Vec<f64> = self
            .alphas
            .iter()
            .map(|&alpha| {
                RGamma::new(alpha, 1.0).map_or(0.0, |g| rng.sample(g))
            })
            .collect();

        let z: f64 = xs.iter().sum();
        if z > 0.0 && z.is_finite() {
            xs.iter().map(|x| x / z).collect()
        } else {
            // Every variate underflowed. In the limit of tiny alphas all of
            // the mass lands on one category, chosen in proportion to alpha.
            let ix = pflip(&self.alphas, rng).unwrap_or(0);
            let mut ps = vec![0.0; self.k()];
            ps[ix] = 1.0;
            ps
        }
    }
}

impl HasDensity<Vec<f64>> for Dirichlet {
    fn ln_f(&self, x: &Vec<f64>) -> f64 {
        let sum_ln_gamma: f64 = self
            .alphas
            .iter()
            .fold(0.0, |acc, &alpha| acc + ln_gammafn(alpha));

        let ln_gamma_sum = ln_gammafn(self.sum_alphas());

        let term = x
            .iter()
            .zip(self.alphas.iter())
            .fold(0.0, |acc, (&xi, &alpha)| acc + (alpha - 1.0) * xi.ln());

        term - (sum_ln_gamma - ln_gamma_sum)
    }
}

impl Support<Vec<f64>> for Dirichlet {
    fn supports(&self, x: &Vec<f64>) -> bool {
        if x.len() != self.alphas.len() {
            false
        } else {
            let sum: f64 = x.iter().sum();
            x.iter().all(|&xi| xi > 0.0) && (1.0 - sum).abs() < SIMPLEX_TOL
        }
    }
}

impl ContinuousDistr<Vec<f64>> for Dirichlet {}

impl Mean<Vec<f64>> for Dirichlet {
    fn mean(&self) -> Option<Vec<f64>> {
        Some(self.mean_prevalence())
    }
}

impl Variance<Vec<f64>> for Dirichlet {
    fn variance(&self) -> Option<Vec<f64>> {
        let z = self.sum_alphas();
        let denom = z * z * (z + 1.0);
        Some(
            self.alphas
                .iter()
                .map(|&alpha| alpha * (z - alpha) / denom)
                .collect(),
        )
    }
}

impl Observe for Dirichlet {
    fn check(&self, counts: &[f64]) -> Result<(), InputError> {
        check_counts(counts, self.k())
    }

    fn observe(&mut self, counts: &[f64]) -> Result<(), InputError> {
        self.update(counts)
    }
}

impl AsRef<Dirichlet> for Dirichlet {
    fn as_ref(&self) -> &Dirichlet {
        self
    }
}

impl std::error::Error for DirichletError {}

impl fmt::Display for DirichletError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::InvalidDimension { n } => {
                write!(f, "need at least 2 categories, got {}", n)
            }
            Self::ConcentrationTooLow { concentration } => write!(
                f,
                "concentration ({}) must be greater than zero",
                concentration
            ),
            Self::ConcentrationNotFinite { concentration } => {
                write!(f, "concentration ({}) was non-finite", concentration)
            }
            Self::AlphaTooLow { ix, alpha } => {
                write!(f, "Invalid alpha at index {}: {} <= 0.0", ix, alpha)
            }
            Self::AlphaNotFinite { ix, alpha } => {
                write!(f, "Non-finite alpha at index {}: {}", ix, alpha)
            }
        }
    }
}
