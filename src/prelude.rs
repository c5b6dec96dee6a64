//! Re-imports for convenience
#[doc(no_inline)]
pub use crate::data::InputError;
#[doc(no_inline)]
pub use crate::dist::*;
#[doc(no_inline)]
pub use crate::hypothesis::{enumerate_hypotheses, Hypothesis};
#[doc(no_inline)]
pub use crate::likelihood::{estimate_likelihood, Exact, Likelihood, MonteCarlo};
#[doc(no_inline)]
pub use crate::pmf::Pmf;
#[doc(no_inline)]
pub use crate::suite::{Suite, SuiteError};
#[doc(no_inline)]
pub use crate::traits::*;
#[doc(no_inline)]
pub use crate::zoo::{
    prob_of_species, prob_of_unseen, species_suite, Species, ZooError,
};
