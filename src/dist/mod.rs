//! Probability distributions
mod beta;
mod dirichlet;
mod multinomial;

pub use beta::{Beta, BetaError};
pub use dirichlet::{Dirichlet, DirichletError};
pub use multinomial::{Multinomial, MultinomialError};
