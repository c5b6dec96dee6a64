//! Species hypotheses with their own prevalence model
//!
//! Each [`Species`] entry pairs a candidate species set with a Dirichlet over
//! the prevalence of its members. A [`Suite`] of them is the full two-level
//! hierarchy.
#[cfg(feature = "serde1")]
use serde::{Deserialize, Serialize};

use crate::data::InputError;
use crate::dist::{Dirichlet, DirichletError};
use crate::hypothesis::{enumerate_hypotheses, Hypothesis};
use crate::suite::{Suite, SuiteError};
use crate::traits::Observe;
use std::fmt;

/// A species set together with the prevalence model it exclusively owns
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde1", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde1", serde(rename_all = "snake_case"))]
pub struct Species<L> {
    hypothesis: Hypothesis<L>,
    model: Dirichlet,
}

#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde1", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde1", serde(rename_all = "snake_case"))]
pub enum ZooError {
    /// A hypothesis could not carry a Dirichlet
    Dirichlet(DirichletError),
    /// The suite could not be built
    Suite(SuiteError),
}

impl<L> Species<L> {
    /// Attach a symmetric Dirichlet with `concentration` to `hypothesis`.
    /// Fails for hypotheses with fewer than two members.
    pub fn new(
        hypothesis: Hypothesis<L>,
        concentration: f64,
    ) -> Result<Self, DirichletError> {
        let model = Dirichlet::new(hypothesis.size(), concentration)?;
        Ok(Species { hypothesis, model })
    }

    /// Number of species in the hypothesis
    #[inline]
    pub fn size(&self) -> usize {
        self.hypothesis.size()
    }

    #[inline]
    pub fn hypothesis(&self) -> &Hypothesis<L> {
        &self.hypothesis
    }

    #[inline]
    pub fn model(&self) -> &Dirichlet {
        &self.model
    }
}

impl<L: PartialEq> Species<L> {
    /// Mean prevalence of `label` under this hypothesis; zero if `label` is
    /// not a member.
    pub fn mean_prevalence_of(&self, label: &L) -> f64 {
        self.hypothesis
            .index_of(label)
            .map_or(0.0, |ix| self.model.mean_prevalence()[ix])
    }
}

impl<L> AsRef<Dirichlet> for Species<L> {
    fn as_ref(&self) -> &Dirichlet {
        &self.model
    }
}

impl<L> Observe for Species<L> {
    fn check(&self, counts: &[f64]) -> Result<(), InputError> {
        self.model.check(counts)
    }

    fn observe(&mut self, counts: &[f64]) -> Result<(), InputError> {
        self.model.update(counts)
    }
}

impl<L: fmt::Display> fmt::Display for Species<L> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.hypothesis, self.model)
    }
}

/// Uniform suite over every superset of `observed` within `universe`, each
/// with a fresh symmetric Dirichlet of the given `concentration`.
///
/// # Example
///
/// ```
/// # use zoo::zoo::species_suite;
/// let suite = species_suite(&['L', 'T', 'B', 'C'], &['L', 'T', 'B'], 1.0).unwrap();
/// assert_eq!(suite.len(), 2);
/// assert_eq!(suite.mass(0), Some(0.5));
/// ```
pub fn species_suite<L>(
    universe: &[L],
    observed: &[L],
    concentration: f64,
) -> Result<Suite<Species<L>>, ZooError>
where
    L: Clone + PartialEq,
{
    let species = enumerate_hypotheses(universe, observed)
        .map(|hyp| Species::new(hyp, concentration))
        .collect::<Result<Vec<_>, _>>()?;
    Ok(Suite::new(species)?)
}

/// Posterior probability that the next animal seen is a `label`: the mean
/// prevalence of `label` under each hypothesis, weighted by the hypothesis'
/// mass.
pub fn prob_of_species<L: PartialEq>(suite: &Suite<Species<L>>, label: &L) -> f64 {
    suite.expected_value(|sp| sp.mean_prevalence_of(label))
}

/// Posterior probability that the next animal seen belongs to a species not
/// in `observed`.
pub fn prob_of_unseen<L: PartialEq>(
    suite: &Suite<Species<L>>,
    observed: &[L],
) -> f64 {
    suite.expected_value(|sp| {
        sp.hypothesis()
            .members()
            .iter()
            .filter(|m| !observed.contains(*m))
            .map(|m| sp.mean_prevalence_of(m))
            .sum()
    })
}

impl From<DirichletError> for ZooError {
    fn from(err: DirichletError) -> Self {
        ZooError::Dirichlet(err)
    }
}

impl From<SuiteError> for ZooError {
    fn from(err: SuiteError) -> Self {
        ZooError::Suite(err)
    }
}

impl std::error::Error for ZooError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::Dirichlet(err) => Some(err),
            Self::Suite(err) => Some(err),
        }
    }
}

impl fmt::Display for ZooError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Dirichlet(err) => write!(f, "bad species model: {}", err),
            Self::Suite(err) => write!(f, "bad species suite: {}", err),
        }
    }
}
