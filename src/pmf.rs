//! Discrete distributions over ordered keys
#[cfg(feature = "serde1")]
use serde::{Deserialize, Serialize};

use std::collections::BTreeMap;
use std::fmt;

/// A probability mass function over keys of type `K`.
///
/// Keys iterate in order, so a `Pmf` can be handed straight to anything that
/// plots or prints a sequence of `(key, mass)` pairs. Masses are whatever was
/// put in; call [`normalize`](Pmf::normalize) to make them sum to one.
///
/// # Example
///
/// ```
/// # use zoo::pmf::Pmf;
/// let pmf: Pmf<usize> = vec![(3, 0.2), (4, 0.5), (3, 0.2), (5, 0.1)]
///     .into_iter()
///     .collect();
///
/// assert::close(pmf.prob(&3), 0.4, 1E-12);
/// assert_eq!(pmf.prob(&6), 0.0);
/// assert_eq!(pmf.mode(), Some(&4));
///
/// let pairs: Vec<(usize, f64)> = pmf.items().map(|(&k, p)| (k, p)).collect();
/// assert_eq!(pairs.len(), 3);
/// assert_eq!(pairs[0].0, 3);
/// ```
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde1", derive(Serialize, Deserialize))]
pub struct Pmf<K: Ord> {
    masses: BTreeMap<K, f64>,
}

impl<K: Ord> Pmf<K> {
    pub fn new() -> Self {
        Pmf {
            masses: BTreeMap::new(),
        }
    }

    /// Add `mass` to `key`
    pub fn incr(&mut self, key: K, mass: f64) {
        *self.masses.entry(key).or_insert(0.0) += mass;
    }

    /// Set the mass of `key`, replacing whatever was there
    pub fn set(&mut self, key: K, mass: f64) {
        self.masses.insert(key, mass);
    }

    /// Mass at `key`; zero if the key is absent
    pub fn prob(&self, key: &K) -> f64 {
        self.masses.get(key).copied().unwrap_or(0.0)
    }

    /// Sum of all masses
    pub fn total(&self) -> f64 {
        self.masses.values().sum()
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.masses.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.masses.is_empty()
    }

    /// Scale masses to sum to one. Returns the old total, or `None` (leaving
    /// the masses alone) if the total is not positive and finite.
    pub fn normalize(&mut self) -> Option<f64> {
        let total = self.total();
        if total > 0.0 && total.is_finite() {
            self.masses.values_mut().for_each(|p| *p /= total);
            Some(total)
        } else {
            None
        }
    }

    /// `(key, mass)` pairs in key order
    pub fn items(&self) -> impl Iterator<Item = (&K, f64)> + '_ {
        self.masses.iter().map(|(k, &p)| (k, p))
    }

    pub fn keys(&self) -> impl Iterator<Item = &K> + '_ {
        self.masses.keys()
    }

    /// Key with the greatest mass. Ties go to the smallest key.
    pub fn mode(&self) -> Option<&K> {
        self.masses
            .iter()
            .fold(None, |best: Option<(&K, f64)>, (k, &p)| match best {
                Some((_, bp)) if bp >= p => best,
                _ => Some((k, p)),
            })
            .map(|(k, _)| k)
    }

    /// Σ mass(k) · f(k)
    pub fn expectation<F: Fn(&K) -> f64>(&self, f: F) -> f64 {
        self.masses.iter().map(|(k, &p)| p * f(k)).sum()
    }

    /// Cumulative mass of every key up to and including `key`
    pub fn cdf(&self, key: &K) -> f64 {
        self.masses.range::<K, _>(..=key).map(|(_, &p)| p).sum()
    }

    /// Smallest key whose cumulative mass reaches `q` of the total
    pub fn quantile(&self, q: f64) -> Option<&K> {
        let target = q * self.total();
        let mut acc = 0.0;
        self.masses
            .iter()
            .find(|(_, &p)| {
                acc += p;
                acc >= target
            })
            .map(|(k, _)| k)
            .or_else(|| self.masses.keys().next_back())
    }

    /// Central credible interval holding `mass` (in [0, 1]) of the total
    ///
    /// # Example
    ///
    /// ```
    /// # use zoo::pmf::Pmf;
    /// let pmf: Pmf<u8> = vec![(1, 0.1), (2, 0.3), (3, 0.4), (4, 0.2)]
    ///     .into_iter()
    ///     .collect();
    /// assert_eq!(pmf.credible_interval(0.5), Some((&2, &3)));
    /// ```
    pub fn credible_interval(&self, mass: f64) -> Option<(&K, &K)> {
        let tail = (1.0 - mass) / 2.0;
        let lower = self.quantile(tail)?;
        let upper = self.quantile(1.0 - tail)?;
        Some((lower, upper))
    }
}

impl<K: Ord> Default for Pmf<K> {
    fn default() -> Self {
        Pmf::new()
    }
}

impl<K: Ord> FromIterator<(K, f64)> for Pmf<K> {
    fn from_iter<I: IntoIterator<Item = (K, f64)>>(iter: I) -> Self {
        let mut pmf = Pmf::new();
        iter.into_iter().for_each(|(k, p)| pmf.incr(k, p));
        pmf
    }
}

impl<K: Ord + fmt::Display> fmt::Display for Pmf<K> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.masses
            .iter()
            .try_for_each(|(k, p)| writeln!(f, "{}\t{}", k, p))
    }
}
