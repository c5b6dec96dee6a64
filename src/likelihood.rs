//! Marginal likelihood of observed counts under a Dirichlet model
#[cfg(feature = "serde1")]
use serde::{Deserialize, Serialize};

use crate::consts::DEFAULT_DRAWS;
use crate::data::{padded_counts, InputError};
use crate::dist::Dirichlet;
use crate::misc::ln_multinomial_pmf;
use log::trace;
use rand::Rng;

/// Strategy for scoring a hypothesis against data.
///
/// The [`Suite`](crate::suite::Suite) calls this once per hypothesis during an
/// update. Randomized strategies draw from the generator they are handed.
pub trait Likelihood<H: ?Sized, D: ?Sized> {
    /// Likelihood of `data` under `hypo`. Must be finite and non-negative.
    fn likelihood<R: Rng>(
        &self,
        hypo: &H,
        data: &D,
        rng: &mut R,
    ) -> Result<f64, InputError>;
}

/// Monte Carlo estimate of the marginal probability of `counts` under
/// `model`.
///
/// Draws `draws` prevalence vectors from `model`, scores `counts` under a
/// multinomial with each one (with the number of trials equal to the sum of
/// `counts`), and returns the mean score. `counts` shorter than the model are
/// zero-padded. The standard error shrinks as 1/√draws.
///
/// # Example
///
/// ```
/// # use zoo::dist::Dirichlet;
/// # use zoo::likelihood::estimate_likelihood;
/// use rand::SeedableRng;
/// use rand_xoshiro::Xoshiro256Plus;
///
/// let mut rng = Xoshiro256Plus::seed_from_u64(0x1234);
/// let dir = Dirichlet::uniform(3).unwrap();
///
/// let m = estimate_likelihood(&dir, &[3.0, 2.0, 1.0], 20_000, &mut rng).unwrap();
/// let exact = dir.ln_m(&[3.0, 2.0, 1.0]).unwrap().exp();
/// assert::close(m, exact, 3E-3);
/// ```
pub fn estimate_likelihood<R: Rng>(
    model: &Dirichlet,
    counts: &[f64],
    draws: usize,
    rng: &mut R,
) -> Result<f64, InputError> {
    if draws == 0 {
        return Err(InputError::NoDraws);
    }
    let xs = padded_counts(counts, model.k())?;

    let total = (0..draws).fold(0.0, |acc, _| {
        let ps = model.sample_prevalence(rng);
        acc + ln_multinomial_pmf(&xs, &ps).exp()
    });

    let m = total / draws as f64;
    trace!("estimated likelihood {} for {} from {} draws", m, model, draws);
    Ok(m)
}

/// Sampling estimator of the marginal likelihood. See
/// [`estimate_likelihood`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde1", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde1", serde(rename_all = "snake_case"))]
pub struct MonteCarlo {
    draws: usize,
}

impl MonteCarlo {
    /// Estimator taking `draws` samples per likelihood
    pub fn new(draws: usize) -> Self {
        MonteCarlo { draws }
    }

    #[inline]
    pub fn draws(&self) -> usize {
        self.draws
    }
}

impl Default for MonteCarlo {
    fn default() -> Self {
        MonteCarlo::new(DEFAULT_DRAWS)
    }
}

impl<H: AsRef<Dirichlet>> Likelihood<H, [f64]> for MonteCarlo {
    fn likelihood<R: Rng>(
        &self,
        hypo: &H,
        data: &[f64],
        rng: &mut R,
    ) -> Result<f64, InputError> {
        estimate_likelihood(hypo.as_ref(), data, self.draws, rng)
    }
}

/// Closed-form Dirichlet-multinomial marginal likelihood. Ignores the
/// generator.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde1", derive(Serialize, Deserialize))]
pub struct Exact;

impl<H: AsRef<Dirichlet>> Likelihood<H, [f64]> for Exact {
    fn likelihood<R: Rng>(
        &self,
        hypo: &H,
        data: &[f64],
        _rng: &mut R,
    ) -> Result<f64, InputError> {
        hypo.as_ref().ln_m(data).map(f64::exp)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;
    use rand_xoshiro::Xoshiro256Plus;

    const COUNTS: [f64; 3] = [3.0, 2.0, 1.0];

    #[test]
    fn zero_draws_is_an_error() {
        let mut rng = Xoshiro256Plus::seed_from_u64(0);
        let dir = Dirichlet::uniform(3).unwrap();
        assert_eq!(
            estimate_likelihood(&dir, &COUNTS, 0, &mut rng),
            Err(InputError::NoDraws)
        );
    }

    #[test]
    fn too_many_counts_is_an_error() {
        let mut rng = Xoshiro256Plus::seed_from_u64(0);
        let dir = Dirichlet::uniform(2).unwrap();
        assert_eq!(
            estimate_likelihood(&dir, &COUNTS, 10, &mut rng),
            Err(InputError::TooManyCounts { n_counts: 3, k: 2 })
        );
    }

    #[test]
    fn negative_count_is_an_error() {
        let mut rng = Xoshiro256Plus::seed_from_u64(0);
        let dir = Dirichlet::uniform(3).unwrap();
        assert!(estimate_likelihood(&dir, &[1.0, -1.0], 10, &mut rng).is_err());
    }

    #[test]
    fn no_data_has_likelihood_one() {
        let mut rng = Xoshiro256Plus::seed_from_u64(0);
        let dir = Dirichlet::uniform(4).unwrap();
        let m = estimate_likelihood(&dir, &[], 50, &mut rng).unwrap();
        assert::close(m, 1.0, 1E-12);
    }

    #[test]
    fn same_seed_same_estimate() {
        let dir = Dirichlet::uniform(5).unwrap();
        let mut rng_a = Xoshiro256Plus::seed_from_u64(99);
        let mut rng_b = Xoshiro256Plus::seed_from_u64(99);
        let a = estimate_likelihood(&dir, &COUNTS, 500, &mut rng_a).unwrap();
        let b = estimate_likelihood(&dir, &COUNTS, 500, &mut rng_b).unwrap();
        assert_eq!(a, b);
    }

    #[test]
    fn estimate_is_a_probability() {
        let mut rng = Xoshiro256Plus::seed_from_u64(3);
        for n in 3..8 {
            let dir = Dirichlet::new(n, 0.7).unwrap();
            let m = estimate_likelihood(&dir, &COUNTS, 200, &mut rng).unwrap();
            assert!((0.0..=1.0).contains(&m));
        }
    }

    #[test]
    fn monte_carlo_agrees_with_exact() {
        let mut rng = Xoshiro256Plus::seed_from_u64(0xBEEF);
        let mc = MonteCarlo::new(20_000);
        for n in 3..=6 {
            let dir = Dirichlet::uniform(n).unwrap();
            let est = mc.likelihood(&dir, &COUNTS[..], &mut rng).unwrap();
            let exact = Exact.likelihood(&dir, &COUNTS[..], &mut rng).unwrap();
            approx::assert_relative_eq!(est, exact, max_relative = 0.1);
        }
    }

    #[test]
    fn monte_carlo_agrees_with_exact_after_update() {
        let mut rng = Xoshiro256Plus::seed_from_u64(0xF00D);
        let mut dir = Dirichlet::uniform(4).unwrap();
        dir.update(&COUNTS).unwrap();

        let next = [1.0, 1.0, 0.0, 1.0];
        let est = MonteCarlo::new(20_000)
            .likelihood(&dir, &next[..], &mut rng)
            .unwrap();
        let exact = Exact.likelihood(&dir, &next[..], &mut rng).unwrap();
        approx::assert_relative_eq!(est, exact, max_relative = 0.1);
    }

    #[test]
    fn default_draws() {
        assert_eq!(MonteCarlo::default().draws(), DEFAULT_DRAWS);
    }
}
