//! Top-level posterior over a finite set of hypotheses
#[cfg(feature = "serde1")]
use serde::{Deserialize, Serialize};

use crate::consts::MASS_TOL;
use crate::data::InputError;
use crate::likelihood::Likelihood;
use crate::pmf::Pmf;
use crate::traits::Observe;
use log::{debug, warn};
use rand::Rng;
use std::fmt;

/// A discrete distribution over hypotheses of type `H`, updated by Bayes'
/// rule.
///
/// The suite starts uniform (or from normalized prior weights) and its masses
/// always sum to one between calls. Each [`update`](Suite::update) treats the
/// current masses as the prior, so updates can be chained.
///
/// Updating the suite does not touch the hypotheses themselves. Use
/// [`update_all`](Suite::update_all) to update both levels at once, or
/// [`hypotheses_mut`](Suite::hypotheses_mut) to update the bottom level by
/// hand.
///
/// # Example
///
/// ```
/// # use zoo::suite::Suite;
/// // Which die was rolled, given that we saw a 6?
/// let mut suite = Suite::new(vec![4_u32, 6, 8, 12, 20]).unwrap();
/// let z = suite
///     .update_with(|&sides| -> Result<f64, zoo::suite::SuiteError> {
///         Ok(if 6 > sides { 0.0 } else { 1.0 / sides as f64 })
///     })
///     .unwrap();
///
/// assert!(z > 0.0);
/// assert_eq!(suite.mass(0), Some(0.0));
/// assert_eq!(suite.max_likelihood().map(|(h, _)| *h), Some(6));
/// ```
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde1", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde1", serde(rename_all = "snake_case"))]
pub struct Suite<H> {
    hypotheses: Vec<H>,
    masses: Vec<f64>,
}

#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde1", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde1", serde(rename_all = "snake_case"))]
pub enum SuiteError {
    /// No hypotheses were supplied
    EmptyHypothesisSet,
    /// Every hypothesis gave the evidence zero probability
    DegenerateEvidence { total: f64 },
    /// A prior weight was negative or non-finite
    InvalidMass { ix: usize, mass: f64 },
    /// A likelihood was negative or non-finite
    InvalidLikelihood { ix: usize, likelihood: f64 },
    /// The observation itself was malformed
    InvalidInput(InputError),
}

impl From<InputError> for SuiteError {
    fn from(err: InputError) -> Self {
        SuiteError::InvalidInput(err)
    }
}

impl<H> Suite<H> {
    /// Uniform suite: each hypothesis gets mass 1/n
    pub fn new(hypotheses: Vec<H>) -> Result<Self, SuiteError> {
        if hypotheses.is_empty() {
            return Err(SuiteError::EmptyHypothesisSet);
        }
        let n = hypotheses.len();
        Ok(Suite {
            hypotheses,
            masses: vec![1.0 / n as f64; n],
        })
    }

    /// Suite from `(hypothesis, prior weight)` pairs. The weights are
    /// normalized.
    ///
    /// # Example
    ///
    /// ```
    /// # use zoo::suite::{Suite, SuiteError};
    /// let suite = Suite::from_weighted(vec![('a', 1.0), ('b', 3.0)]).unwrap();
    /// assert_eq!(suite.mass(1), Some(0.75));
    ///
    /// let err = Suite::from_weighted(vec![('a', 0.0)]).unwrap_err();
    /// assert_eq!(err, SuiteError::DegenerateEvidence { total: 0.0 });
    /// ```
    pub fn from_weighted(weighted: Vec<(H, f64)>) -> Result<Self, SuiteError> {
        if weighted.is_empty() {
            return Err(SuiteError::EmptyHypothesisSet);
        }

        weighted.iter().enumerate().try_for_each(|(ix, &(_, mass))| {
            if mass < 0.0 || !mass.is_finite() {
                Err(SuiteError::InvalidMass { ix, mass })
            } else {
                Ok(())
            }
        })?;

        let (hypotheses, mut masses): (Vec<H>, Vec<f64>) =
            weighted.into_iter().unzip();
        normalize(&mut masses)?;
        Ok(Suite { hypotheses, masses })
    }

    /// Number of hypotheses
    #[inline]
    pub fn len(&self) -> usize {
        self.hypotheses.len()
    }

    /// Always `false`; a suite cannot be built empty
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.hypotheses.is_empty()
    }

    /// Current `(hypothesis, mass)` pairs in construction order
    pub fn items(&self) -> impl Iterator<Item = (&H, f64)> + '_ {
        self.hypotheses.iter().zip(self.masses.iter().copied())
    }

    pub fn hypotheses(&self) -> &[H] {
        &self.hypotheses
    }

    /// Mutable access to the hypotheses, for updating the bottom level of
    /// the hierarchy by hand. Masses are not affected.
    pub fn hypotheses_mut(&mut self) -> impl Iterator<Item = &mut H> + '_ {
        self.hypotheses.iter_mut()
    }

    /// Current masses in construction order
    pub fn masses(&self) -> &[f64] {
        &self.masses
    }

    /// Mass of the `ix`-th hypothesis
    pub fn mass(&self, ix: usize) -> Option<f64> {
        self.masses.get(ix).copied()
    }

    /// The hypothesis with the greatest mass. Ties go to the first.
    pub fn max_likelihood(&self) -> Option<(&H, f64)> {
        self.items().fold(None, |best, (h, p)| match best {
            Some((_, bp)) if bp >= p => best,
            _ => Some((h, p)),
        })
    }

    /// Bayes' rule with likelihoods supplied by `likelihood_fn`.
    ///
    /// Every mass is multiplied by the likelihood of its hypothesis and the
    /// products are renormalized. Returns the normalizing constant, which is
    /// the probability of the evidence under the whole mixture. On error the
    /// masses are left as they were.
    pub fn update_with<F, E>(
        &mut self,
        mut likelihood_fn: F,
    ) -> Result<f64, SuiteError>
    where
        F: FnMut(&H) -> Result<f64, E>,
        E: Into<SuiteError>,
    {
        let mut posterior = Vec::with_capacity(self.len());
        for (ix, (hypo, &prior)) in
            self.hypotheses.iter().zip(self.masses.iter()).enumerate()
        {
            let likelihood = likelihood_fn(hypo).map_err(Into::into)?;
            if likelihood < 0.0 || !likelihood.is_finite() {
                return Err(SuiteError::InvalidLikelihood { ix, likelihood });
            }
            posterior.push(prior * likelihood);
        }

        let total = normalize(&mut posterior)?;
        self.masses = posterior;
        debug!(
            "updated suite of {} hypotheses; normalizing constant {}",
            self.len(),
            total
        );
        Ok(total)
    }

    /// Bayes' rule with likelihoods from the `likelihood` strategy.
    pub fn update<D, L, R>(
        &mut self,
        data: &D,
        likelihood: &L,
        rng: &mut R,
    ) -> Result<f64, SuiteError>
    where
        D: ?Sized,
        L: Likelihood<H, D>,
        R: Rng,
    {
        self.update_with(|hypo| likelihood.likelihood(hypo, data, rng))
    }

    /// Group mass by `key_fn` of each hypothesis
    ///
    /// # Example
    ///
    /// ```
    /// # use zoo::suite::Suite;
    /// let suite = Suite::new(vec!["ab", "cd", "efg", "h"]).unwrap();
    /// let by_len = suite.posterior_over(|s| s.len());
    /// assert_eq!(by_len.prob(&2), 0.5);
    /// assert_eq!(by_len.prob(&3), 0.25);
    /// ```
    pub fn posterior_over<K, F>(&self, key_fn: F) -> Pmf<K>
    where
        K: Ord,
        F: Fn(&H) -> K,
    {
        self.items().map(|(h, p)| (key_fn(h), p)).collect()
    }

    /// Σ mass(h) · value_fn(h), the law of total probability
    pub fn expected_value<F>(&self, value_fn: F) -> f64
    where
        F: Fn(&H) -> f64,
    {
        self.items().map(|(h, p)| p * value_fn(h)).sum()
    }
}

impl<H: Observe> Suite<H> {
    /// Update both levels of the hierarchy with the same `counts`.
    ///
    /// The top level is updated first, scoring each hypothesis with its
    /// parameters as they were before this evidence. Then every hypothesis
    /// observes `counts`. The counts are checked against every hypothesis up
    /// front, so on error neither level changes.
    pub fn update_all<L, R>(
        &mut self,
        counts: &[f64],
        likelihood: &L,
        rng: &mut R,
    ) -> Result<f64, SuiteError>
    where
        L: Likelihood<H, [f64]>,
        R: Rng,
    {
        self.hypotheses
            .iter()
            .try_for_each(|hypo| hypo.check(counts))?;

        let total = self.update(counts, likelihood, rng)?;
        self.hypotheses
            .iter_mut()
            .try_for_each(|hypo| hypo.observe(counts))?;
        Ok(total)
    }
}

fn normalize(masses: &mut [f64]) -> Result<f64, SuiteError> {
    let total: f64 = masses.iter().sum();
    if total > 0.0 && total.is_finite() {
        masses.iter_mut().for_each(|p| *p /= total);
        debug_assert!((masses.iter().sum::<f64>() - 1.0).abs() < MASS_TOL);
        Ok(total)
    } else {
        warn!("evidence has total probability {}; cannot normalize", total);
        Err(SuiteError::DegenerateEvidence { total })
    }
}

impl std::error::Error for SuiteError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::InvalidInput(err) => Some(err),
            _ => None,
        }
    }
}

impl fmt::Display for SuiteError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::EmptyHypothesisSet => {
                write!(f, "a suite needs at least one hypothesis")
            }
            Self::DegenerateEvidence { total } => write!(
                f,
                "total probability of the evidence is {}; cannot renormalize",
                total
            ),
            Self::InvalidMass { ix, mass } => {
                write!(f, "invalid prior mass at index {}: {}", ix, mass)
            }
            Self::InvalidLikelihood { ix, likelihood } => write!(
                f,
                "invalid likelihood for hypothesis {}: {}",
                ix, likelihood
            ),
            Self::InvalidInput(err) => write!(f, "invalid input: {}", err),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dist::Dirichlet;
    use crate::likelihood::{Exact, MonteCarlo};
    use crate::test_basic_impls;
    use proptest::prelude::*;
    use rand::SeedableRng;
    use rand_xoshiro::Xoshiro256Plus;

    const TOL: f64 = 1E-12;

    test_basic_impls!(Suite::new(vec![1_u8, 2, 3]).unwrap());

    fn dirichlets(sizes: &[usize]) -> Vec<Dirichlet> {
        sizes.iter().map(|&n| Dirichlet::uniform(n).unwrap()).collect()
    }

    #[test]
    fn empty_suite_is_an_error() {
        let hyps: Vec<Dirichlet> = vec![];
        assert_eq!(Suite::new(hyps), Err(SuiteError::EmptyHypothesisSet));
        let weighted: Vec<(u8, f64)> = vec![];
        assert_eq!(
            Suite::from_weighted(weighted),
            Err(SuiteError::EmptyHypothesisSet)
        );
    }

    #[test]
    fn new_is_uniform() {
        let suite = Suite::new(dirichlets(&[3, 4, 4, 4, 5, 5, 5, 6])).unwrap();
        assert_eq!(suite.len(), 8);
        assert!(!suite.is_empty());
        suite.items().for_each(|(_, p)| assert_eq!(p, 0.125));
    }

    #[test]
    fn from_weighted_rejects_negative_mass() {
        let err = Suite::from_weighted(vec![('a', 1.0), ('b', -1.0)]);
        assert_eq!(err, Err(SuiteError::InvalidMass { ix: 1, mass: -1.0 }));
    }

    #[test]
    fn all_zero_likelihoods_are_degenerate_and_leave_masses_alone() {
        let mut suite = Suite::new(vec![1_u8, 2]).unwrap();
        let res = suite.update_with(|_| -> Result<f64, SuiteError> { Ok(0.0) });
        assert_eq!(res, Err(SuiteError::DegenerateEvidence { total: 0.0 }));
        assert_eq!(suite.masses(), &[0.5, 0.5]);
    }

    #[test]
    fn nan_likelihood_is_rejected() {
        let mut suite = Suite::new(vec![1_u8, 2]).unwrap();
        let res = suite.update_with(|&h| -> Result<f64, SuiteError> {
            Ok(if h == 2 { f64::NAN } else { 1.0 })
        });
        assert!(matches!(
            res,
            Err(SuiteError::InvalidLikelihood { ix: 1, .. })
        ));
        assert_eq!(suite.masses(), &[0.5, 0.5]);
    }

    #[test]
    fn sequential_updates_match_a_single_combined_update() {
        let mut a = Suite::new(vec![0.2_f64, 0.5, 0.8]).unwrap();
        let mut b = a.clone();

        // two heads, one after the other
        a.update_with(|&p| -> Result<f64, SuiteError> { Ok(p) }).unwrap();
        a.update_with(|&p| -> Result<f64, SuiteError> { Ok(p) }).unwrap();
        b.update_with(|&p| -> Result<f64, SuiteError> { Ok(p * p) })
            .unwrap();

        a.masses()
            .iter()
            .zip(b.masses().iter())
            .for_each(|(x, y)| assert::close(*x, *y, TOL));
    }

    #[test]
    fn update_returns_prior_weighted_likelihood() {
        let mut rng = Xoshiro256Plus::seed_from_u64(0);
        let mut suite = Suite::new(dirichlets(&[3, 4, 6])).unwrap();
        let counts = [3.0, 2.0, 1.0];
        let z = suite.update(&counts[..], &Exact, &mut rng).unwrap();
        let expected = (1.0 / 28.0 + 1.0 / 84.0 + 1.0 / 462.0) / 3.0;
        assert::close(z, expected, TOL);
        assert::close(suite.masses()[0], 1.0 / 28.0 / 3.0 / expected, TOL);
    }

    #[test]
    fn update_with_too_many_counts_is_invalid_input() {
        let mut rng = Xoshiro256Plus::seed_from_u64(0);
        let mut suite = Suite::new(dirichlets(&[2, 3])).unwrap();
        let res = suite.update(&[1.0, 1.0, 1.0][..], &Exact, &mut rng);
        assert_eq!(
            res,
            Err(SuiteError::InvalidInput(InputError::TooManyCounts {
                n_counts: 3,
                k: 2
            }))
        );
        assert_eq!(suite.masses(), &[0.5, 0.5]);
    }

    #[test]
    fn update_does_not_touch_the_bottom_level() {
        let mut rng = Xoshiro256Plus::seed_from_u64(0);
        let mut suite = Suite::new(dirichlets(&[3, 4])).unwrap();
        suite
            .update(&[3.0, 2.0, 1.0][..], &MonteCarlo::new(100), &mut rng)
            .unwrap();
        assert_eq!(suite.hypotheses(), dirichlets(&[3, 4]).as_slice());
    }

    #[test]
    fn update_all_updates_both_levels() {
        let mut rng = Xoshiro256Plus::seed_from_u64(0);
        let mut a = Suite::new(dirichlets(&[3, 4])).unwrap();
        let mut b = a.clone();
        let counts = [3.0, 2.0, 1.0];

        let za = a.update_all(&counts, &Exact, &mut rng).unwrap();

        // the two-step way
        let zb = b.update(&counts[..], &Exact, &mut rng).unwrap();
        b.hypotheses_mut()
            .for_each(|dir| dir.update(&counts).unwrap());

        assert_eq!(za, zb);
        assert_eq!(a, b);
        assert_eq!(a.hypotheses()[1].alphas(), &[4.0, 3.0, 2.0, 1.0]);
    }

    #[test]
    fn update_all_with_bad_counts_changes_nothing() {
        let mut rng = Xoshiro256Plus::seed_from_u64(0);
        let mut suite = Suite::new(dirichlets(&[4, 3])).unwrap();
        let before = suite.clone();
        let res = suite.update_all(&[1.0, 1.0, 1.0, 1.0], &Exact, &mut rng);
        assert!(matches!(res, Err(SuiteError::InvalidInput(_))));
        assert_eq!(suite, before);
    }

    #[test]
    fn expected_value_of_constant_is_constant() {
        let suite = Suite::from_weighted(vec![(1, 0.3), (2, 0.7)]).unwrap();
        assert::close(suite.expected_value(|_| 0.25), 0.25, TOL);
        assert_eq!(suite.expected_value(|_| 0.0), 0.0);
    }

    #[test]
    fn max_likelihood_ties_go_first() {
        let suite = Suite::new(vec!['x', 'y']).unwrap();
        assert_eq!(suite.max_likelihood(), Some((&'x', 0.5)));
    }

    proptest! {
        #[test]
        fn update_normalizes_and_returns_the_pre_normalization_sum(
            likelihoods in prop::collection::vec(0.0_f64..1.0, 1..20),
        ) {
            prop_assume!(likelihoods.iter().any(|&l| l > 0.0));
            let n = likelihoods.len();
            let mut suite = Suite::new((0..n).collect::<Vec<usize>>()).unwrap();

            let z = suite
                .update_with(|&ix| -> Result<f64, SuiteError> { Ok(likelihoods[ix]) })
                .unwrap();

            let expected: f64 = likelihoods.iter().map(|l| l / n as f64).sum();
            prop_assert!((z - expected).abs() < TOL);
            prop_assert!((suite.masses().iter().sum::<f64>() - 1.0).abs() < MASS_TOL);
        }
    }
}
