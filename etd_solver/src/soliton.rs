//! Closed form soliton solutions of the Korteweg-de Vries equation
//! ```latex
//! u_t + \sigma u u_x + u_{xxx} = 0
//! ```
use ndarray::Array1;
use ndarray_linalg::Norm;

/// A single soliton with peak height `3 alpha^2 / sigma`, at `x = s` when `t = 0`
#[must_use]
pub fn one_soliton(t: f64, x: &Array1<f64>, alpha: f64, s: f64, sigma: f64) -> Array1<f64> {
    x.mapv(|x| {
        let f = (-alpha * (x - s) + alpha.powi(3) * t).exp();
        12.0 / sigma * alpha * alpha * f / (1.0 + f).powi(2)
    })
}

/// Two interacting solitons, see G.B. Whitham "Linear and Nonlinear Waves" eq (17.21)
///
/// `alpha` and `s` are the parameters of each soliton as in [`one_soliton`]
#[must_use]
pub fn two_solitons(
    t: f64,
    x: &Array1<f64>,
    alpha: [f64; 2],
    s: [f64; 2],
    sigma: f64,
) -> Array1<f64> {
    let [a1, a2] = alpha;
    let [s1, s2] = s;
    let (b1, b2) = (a1 * a1, a2 * a2);
    let c1 = (a2 - a1).powi(2);
    let c2 = c1 / (a2 + a1).powi(2);

    x.mapv(|x| {
        let f1 = (a1 * (-(x - s1) + b1 * t)).exp();
        let f2 = (a2 * (-(x - s2) + b2 * t)).exp();
        let f3 = f1 * f2;
        let u = b1 * f1 + b2 * f2 + f3 * (2.0 * c1 + c2 * (b2 * f1 + b1 * f2));
        12.0 / sigma * u / (1.0 + f1 + f2 + c2 * f3).powi(2)
    })
}

/// `max |actual - reference| / max |reference|`
///
/// # Panics
///
/// Will panic if `actual` and `reference` have different lengths
#[must_use]
pub fn max_relative_error(actual: &Array1<f64>, reference: &Array1<f64>) -> f64 {
    assert_eq!(actual.len(), reference.len());
    (actual - reference).norm_max() / reference.norm_max()
}
