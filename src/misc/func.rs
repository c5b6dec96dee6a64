use rand::Rng;
use special::Gamma;
use std::fmt::Debug;
use std::ops::AddAssign;

/// Natural logarithm of the gamma function
#[inline]
pub fn ln_gammafn(x: f64) -> f64 {
    Gamma::ln_gamma(x).0
}

/// Convert a Vector to a printable string
///
/// # Example
///
/// ```rust
/// # use zoo::misc::vec_to_string;
/// let xs: Vec<u8> = vec![0, 1, 2, 3, 4, 5];
///
/// assert_eq!(vec_to_string(&xs, 6).as_str(), "[0, 1, 2, 3, 4, 5]");
/// assert_eq!(vec_to_string(&xs, 5).as_str(), "[0, 1, 2, 3, ... , 5]");
///
/// ```
pub fn vec_to_string<T: Debug>(xs: &[T], max_entries: usize) -> String {
    let mut out = String::new();
    out += "[";
    let n = xs.len();
    xs.iter().enumerate().for_each(|(i, x)| {
        let to_push = if i + 1 == n {
            format!("{:?}]", x)
        } else if i + 1 < max_entries {
            format!("{:?}, ", x)
        } else if i + 1 == max_entries {
            String::from("... , ")
        } else {
            String::new()
        };

        out.push_str(to_push.as_str());
    });

    if n == 0 {
        out.push(']');
    }

    out
}

/// Log of the multinomial coefficient, ln(N! / (x<sub>1</sub>! ... x<sub>k</sub>!)),
/// where N = Σx<sub>i</sub>.
///
/// Counts may be any non-negative real; factorials are taken through the
/// gamma function.
///
/// # Example
///
/// ```rust
/// # use zoo::misc::ln_multinomial_coeff;
/// // 6! / (3! 2! 1!) = 60
/// let ln_c = ln_multinomial_coeff(&[3.0, 2.0, 1.0]);
/// assert::close(ln_c, 60_f64.ln(), 1E-12);
/// ```
pub fn ln_multinomial_coeff(xs: &[f64]) -> f64 {
    let n: f64 = xs.iter().sum();
    xs.iter()
        .fold(ln_gammafn(n + 1.0), |acc, &x| acc - ln_gammafn(x + 1.0))
}

/// Log of the multinomial PMF of counts `xs` under probabilities `ps`, with
/// the number of trials taken to be the sum of `xs`.
///
/// Categories with zero counts contribute nothing, so a zero probability only
/// matters where something was observed. `xs` and `ps` must be the same
/// length.
///
/// # Example
///
/// ```rust
/// # use zoo::misc::ln_multinomial_pmf;
/// let ps = [0.5, 0.3, 0.2];
/// let f = ln_multinomial_pmf(&[3.0, 2.0, 1.0], &ps).exp();
/// assert::close(f, 60.0 * 0.125 * 0.09 * 0.2, 1E-12);
///
/// let f0 = ln_multinomial_pmf(&[1.0, 0.0], &[0.0, 1.0]).exp();
/// assert_eq!(f0, 0.0);
/// ```
pub fn ln_multinomial_pmf(xs: &[f64], ps: &[f64]) -> f64 {
    debug_assert_eq!(xs.len(), ps.len());
    let kernel = xs
        .iter()
        .zip(ps.iter())
        .filter(|(&x, _)| x > 0.0)
        .fold(0.0, |acc, (&x, &p)| acc + x * p.ln());

    ln_multinomial_coeff(xs) + kernel
}

/// Cumulative sum of `xs`
///
/// # Example
///
/// ```rust
/// # use zoo::misc::cumsum;
/// let xs: Vec<i32> = vec![1, 1, 2, 1];
/// assert_eq!(cumsum(&xs), vec![1, 2, 4, 5]);
/// ```
pub fn cumsum<T>(xs: &[T]) -> Vec<T>
where
    T: AddAssign + Copy + Default,
{
    xs.iter()
        .scan(T::default(), |acc, &x| {
            *acc += x;
            Some(*acc)
        })
        .collect()
}

/// Draw an index in proportion to its weight. Returns `None` if the weights
/// are empty or do not have a positive, finite sum.
pub fn pflip<R: Rng>(weights: &[f64], rng: &mut R) -> Option<usize> {
    let cws: Vec<f64> = cumsum(weights);
    let scale = *cws.last()?;
    if !(scale > 0.0 && scale.is_finite()) {
        return None;
    }
    let r = rng.gen::<f64>() * scale;
    cws.iter()
        .position(|&w| w > r)
        .or(Some(weights.len() - 1))
}
