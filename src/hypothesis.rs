//! Enumeration of the species sets that could be in the zoo
#[cfg(feature = "serde1")]
use serde::{Deserialize, Serialize};

use itertools::Itertools;
use std::fmt;

/// One candidate set of species.
///
/// Members are kept in the order they appear in the universe they were drawn
/// from. Position `i` of any count or parameter vector attached to the
/// hypothesis refers to `members()[i]`.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde1", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde1", serde(rename_all = "snake_case"))]
pub struct Hypothesis<L> {
    members: Vec<L>,
}

impl<L> Hypothesis<L> {
    /// Create a hypothesis from an ordered list of member labels
    pub fn new(members: Vec<L>) -> Self {
        Hypothesis { members }
    }

    /// Number of species in the set
    #[inline]
    pub fn size(&self) -> usize {
        self.members.len()
    }

    #[inline]
    pub fn members(&self) -> &[L] {
        &self.members
    }
}

impl<L: PartialEq> Hypothesis<L> {
    /// `true` if `label` is one of the members
    pub fn contains(&self, label: &L) -> bool {
        self.members.contains(label)
    }

    /// Position of `label` among the members
    pub fn index_of(&self, label: &L) -> Option<usize> {
        self.members.iter().position(|m| m == label)
    }

    /// Build a positional count vector of length `size()` from labelled
    /// counts. Labels that are not members are ignored; members with no entry
    /// get zero. Repeated labels accumulate.
    ///
    /// # Example
    ///
    /// ```
    /// # use zoo::hypothesis::Hypothesis;
    /// let hyp = Hypothesis::new(vec!['L', 'T', 'C', 'B']);
    /// let counts = hyp.align_counts(&[('L', 3.0), ('T', 2.0), ('B', 1.0)]);
    /// assert_eq!(counts, vec![3.0, 2.0, 0.0, 1.0]);
    /// ```
    pub fn align_counts(&self, observations: &[(L, f64)]) -> Vec<f64> {
        let mut counts = vec![0.0; self.size()];
        observations.iter().for_each(|(label, count)| {
            if let Some(ix) = self.index_of(label) {
                counts[ix] += count;
            }
        });
        counts
    }
}

impl<L: fmt::Display> fmt::Display for Hypothesis<L> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.members.iter().try_for_each(|m| write!(f, "{}", m))
    }
}

/// Every subset of `universe` that contains all of `observed`.
///
/// Hypotheses come out in increasing order of size, and within a size in
/// lexicographic order of position in `universe`. There are exactly
/// 2<sup>|universe| - |observed|</sup> of them. If `observed` is not a subset
/// of `universe` nothing is produced.
///
/// # Example
///
/// ```
/// # use zoo::hypothesis::enumerate_hypotheses;
/// let hyps: Vec<String> = enumerate_hypotheses(&['L', 'T', 'B', 'C'], &['L', 'T'])
///     .map(|h| h.to_string())
///     .collect();
///
/// assert_eq!(hyps, vec!["LT", "LTB", "LTC", "LTBC"]);
/// ```
pub fn enumerate_hypotheses<'a, L>(
    universe: &'a [L],
    observed: &'a [L],
) -> impl Iterator<Item = Hypothesis<L>> + 'a
where
    L: Clone + PartialEq,
{
    let is_subset = observed.iter().all(|o| universe.contains(o));
    let n_observed = observed
        .iter()
        .enumerate()
        .filter(|(ix, o)| !observed[..*ix].contains(*o))
        .count();
    let sizes = if is_subset {
        n_observed..=universe.len()
    } else {
        // empty range
        1..=0
    };

    sizes.flat_map(move |size| {
        universe
            .iter()
            .combinations(size)
            .filter(move |combo| observed.iter().all(|o| combo.contains(&o)))
            .map(|combo| Hypothesis::new(combo.into_iter().cloned().collect()))
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_basic_impls;
    use proptest::prelude::*;

    test_basic_impls!(Hypothesis::new(vec!['L', 'T']));

    const UNIVERSE: [char; 6] = ['L', 'T', 'B', 'C', 'R', 'E'];
    const OBSERVED: [char; 3] = ['L', 'T', 'B'];

    #[test]
    fn zoo_has_eight_hypotheses_in_size_order() {
        let hyps: Vec<_> = enumerate_hypotheses(&UNIVERSE, &OBSERVED).collect();
        let sizes: Vec<usize> = hyps.iter().map(|h| h.size()).collect();
        assert_eq!(sizes, vec![3, 4, 4, 4, 5, 5, 5, 6]);

        let labels: Vec<String> = hyps.iter().map(|h| h.to_string()).collect();
        assert_eq!(
            labels,
            vec![
                "LTB", "LTBC", "LTBR", "LTBE", "LTBCR", "LTBCE", "LTBRE",
                "LTBCRE"
            ]
        );
    }

    #[test]
    fn observed_not_in_universe_yields_nothing() {
        let n = enumerate_hypotheses(&UNIVERSE, &['L', 'Z']).count();
        assert_eq!(n, 0);
    }

    #[test]
    fn nothing_observed_gives_every_subset() {
        let hyps: Vec<_> = enumerate_hypotheses(&['a', 'b'], &[]).collect();
        assert_eq!(hyps.len(), 4);
        assert_eq!(hyps[0].size(), 0);
        assert_eq!(hyps[3].members(), &['a', 'b']);
    }

    #[test]
    fn repeated_observations_count_once() {
        let n = enumerate_hypotheses(&UNIVERSE, &['L', 'L', 'T']).count();
        assert_eq!(n, 16);
    }

    #[test]
    fn index_of_and_contains() {
        let hyp = Hypothesis::new(vec!['L', 'T', 'B', 'E']);
        assert_eq!(hyp.index_of(&'E'), Some(3));
        assert_eq!(hyp.index_of(&'C'), None);
        assert!(hyp.contains(&'B'));
        assert!(!hyp.contains(&'R'));
    }

    #[test]
    fn align_counts_ignores_non_members() {
        let hyp = Hypothesis::new(vec!['L', 'T', 'B']);
        let counts = hyp.align_counts(&[('E', 5.0), ('T', 1.0), ('T', 1.0)]);
        assert_eq!(counts, vec![0.0, 2.0, 0.0]);
    }

    fn universe_and_observed() -> impl Strategy<Value = (Vec<u8>, Vec<u8>)> {
        (1_u8..10).prop_flat_map(|n| {
            let universe: Vec<u8> = (0..n).collect();
            (Just(universe.clone()), prop::sample::subsequence(universe, 0..=n as usize))
        })
    }

    proptest! {
        #[test]
        fn enumerates_every_superset_once((universe, observed) in universe_and_observed()) {
            let hyps: Vec<_> = enumerate_hypotheses(&universe, &observed).collect();
            prop_assert_eq!(hyps.len(), 1 << (universe.len() - observed.len()));

            for hyp in hyps.iter() {
                prop_assert!(observed.iter().all(|o| hyp.contains(o)));
            }

            let distinct = hyps.iter().unique().count();
            prop_assert_eq!(distinct, hyps.len());

            prop_assert!(hyps.windows(2).all(|w| w[0].size() <= w[1].size()));
        }
    }
}
