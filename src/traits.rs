//! Trait definitions
use crate::data::InputError;
use rand::Rng;

/// Has a (possibly un-normalized) density or mass function
pub trait HasDensity<X: ?Sized> {
    /// Probability function
    fn f(&self, x: &X) -> f64 {
        self.ln_f(x).exp()
    }

    /// Log of the probability function
    fn ln_f(&self, x: &X) -> f64;
}

/// Can be drawn from
pub trait Sampleable<X> {
    /// Single draw
    fn draw<R: Rng>(&self, rng: &mut R) -> X;

    /// Multiple draws
    fn sample<R: Rng>(&self, n: usize, mut rng: &mut R) -> Vec<X> {
        (0..n).map(|_| self.draw(&mut rng)).collect()
    }

    /// Infinite stream of draws
    fn sample_stream<'r, R: Rng>(
        &'r self,
        mut rng: &'r mut R,
    ) -> Box<dyn Iterator<Item = X> + 'r>
    where
        X: 'r,
    {
        Box::new(std::iter::repeat_with(move || self.draw(&mut rng)))
    }
}

/// Identifies the support of the distribution
pub trait Support<X: ?Sized> {
    /// Returns `true` if `x` is in the support
    fn supports(&self, x: &X) -> bool;
}

/// Continuous probability distributions
pub trait ContinuousDistr<X: ?Sized>: HasDensity<X> + Support<X> {
    /// The value of the Probability Density Function (PDF) at `x`
    fn pdf(&self, x: &X) -> f64 {
        self.ln_pdf(x).exp()
    }

    /// The value of the log PDF at `x`. Zero density outside the support.
    fn ln_pdf(&self, x: &X) -> f64 {
        if self.supports(x) {
            self.ln_f(x)
        } else {
            f64::NEG_INFINITY
        }
    }
}

/// Discrete probability distributions
pub trait DiscreteDistr<X: ?Sized>: HasDensity<X> + Support<X> {
    /// The value of the Probability Mass Function (PMF) at `x`
    fn pmf(&self, x: &X) -> f64 {
        self.ln_pmf(x).exp()
    }

    /// The value of the log PMF at `x`. Zero mass outside the support.
    fn ln_pmf(&self, x: &X) -> f64 {
        if self.supports(x) {
            self.ln_f(x)
        } else {
            f64::NEG_INFINITY
        }
    }
}

pub trait Mean<M> {
    fn mean(&self) -> Option<M>;
}

pub trait Variance<V> {
    fn variance(&self) -> Option<V>;
}

/// Conjugate update of a model's parameters against category counts
///
/// This is the bottom level of the hierarchy. Implementors must validate the
/// counts before touching any state so that a failed call is a no-op.
pub trait Observe {
    /// Check that `counts` could be observed without mutating anything
    fn check(&self, counts: &[f64]) -> Result<(), InputError>;

    /// Fold `counts` into the model's parameters
    fn observe(&mut self, counts: &[f64]) -> Result<(), InputError>;
}
