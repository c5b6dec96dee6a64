//! Numerical constants and defaults

/// Default number of Monte Carlo draws used to estimate a marginal likelihood
pub const DEFAULT_DRAWS: usize = 1_000;
/// Default symmetric concentration of a fresh Dirichlet prior
pub const DEFAULT_CONCENTRATION: f64 = 1.0;
/// Tolerance on the sum of a point on the simplex
pub const SIMPLEX_TOL: f64 = 1E-9;
/// Tolerance on the total mass of a normalized distribution
pub const MASS_TOL: f64 = 1E-9;
