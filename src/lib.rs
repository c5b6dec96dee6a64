//! Hierarchical Dirichlet-multinomial inference over which species live in a
//! zoo, and how prevalent each one is.
//!
//! The hierarchy has two levels:
//!
//! - the top level, a [`Suite`](suite::Suite), holds belief over *which*
//!   set of species is present;
//! - the bottom level, one [`Dirichlet`](dist::Dirichlet) per hypothesis,
//!   holds belief over the *prevalence* of each species within that set.
//!
//! # Example
//!
//! Three lions, two tigers, and one bear have been seen. Three more species
//! might be hiding.
//!
//! ```
//! use rand::SeedableRng;
//! use rand_xoshiro::Xoshiro256Plus;
//! use zoo::prelude::*;
//!
//! let mut rng = Xoshiro256Plus::seed_from_u64(1337);
//!
//! let universe = ['L', 'T', 'B', 'C', 'R', 'E'];
//! let observed = ['L', 'T', 'B'];
//!
//! let mut suite = species_suite(&universe, &observed, 1.0).unwrap();
//! assert_eq!(suite.len(), 8);
//!
//! let z = suite
//!     .update_all(&[3.0, 2.0, 1.0], &MonteCarlo::new(2_000), &mut rng)
//!     .unwrap();
//! assert!(z > 0.0);
//!
//! let n_species = suite.posterior_over(|sp| sp.size());
//! assert::close(n_species.total(), 1.0, 1E-9);
//!
//! let p_unseen = prob_of_unseen(&suite, &observed);
//! assert!(0.0 < p_unseen && p_unseen < 1.0);
//! ```

pub mod consts;
pub mod data;
pub mod dist;
pub mod hypothesis;
pub mod likelihood;
pub mod misc;
pub mod pmf;
pub mod prelude;
pub mod suite;
pub mod traits;
pub mod zoo;

#[macro_export]
macro_rules! impl_display {
    ($kind: ty) => {
        impl ::std::fmt::Display for $kind {
            fn fmt(&self, f: &mut ::std::fmt::Formatter) -> ::std::fmt::Result {
                write!(f, "{}", String::from(self))
            }
        }
    };
}
