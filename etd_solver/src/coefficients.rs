use std::f64::consts::PI;

use ndarray::{Array1, Zip};
use num_complex::Complex;

/// Number of points on the unit circle used to average the
/// exponential-integrator weights around each `h a`.
pub const CONTOUR_POINTS: usize = 64;

/// The points `r_k = exp(i pi (2k + 1) / M)` on the unit circle
#[must_use]
#[allow(clippy::cast_precision_loss)]
pub fn contour_points() -> Array1<Complex<f64>> {
    (0..CONTOUR_POINTS)
        .map(|k| Complex::from_polar(1.0, PI * (2 * k + 1) as f64 / CONTOUR_POINTS as f64))
        .collect()
}

/// True if every entry of the operator has an imaginary part of exactly zero
#[must_use]
#[allow(clippy::float_cmp)]
pub fn is_real_operator(linear: &Array1<Complex<f64>>) -> bool {
    linear.iter().all(|a| a.im == 0.0)
}

/// The integrating factor for a diagonal operator `A`
/// ```latex
/// E = e^{hA/2}, E_2 = E^2
/// ```
#[derive(Clone, Debug, PartialEq)]
pub struct IntegratingFactor {
    pub e: Array1<Complex<f64>>,
    pub e2: Array1<Complex<f64>>,
}

impl IntegratingFactor {
    #[must_use]
    pub fn new(linear: &Array1<Complex<f64>>, dt: f64) -> Self {
        let e = linear.map(|&a| (a * (0.5 * dt)).exp());
        let e2 = e.map(|&e| e * e);
        Self { e, e2 }
    }
}

/// Weights of a single ETDRK4 step, see Kassam and Trefethen,
/// SIAM J Sci Comput 26 (2005) 1214.
///
/// ```latex
/// Q = h \langle (e^{z/2} - 1) / z \rangle
/// f_1 = h \langle (-4 - z + e^z(4 - 3z + z^2)) / z^3 \rangle
/// f_2 = h \langle 2(2 + z + e^z(z - 2)) / z^3 \rangle
/// f_3 = h \langle (-4 - 3z - z^2 + e^z(4 - z)) / z^3 \rangle
/// ```
/// where `<.>` is the mean over `z = h a + r_k`.
/// Every quotient has a removable singularity at `z = 0`, so evaluating them
/// directly loses all precision for small `|h a|`.
#[derive(Clone, Debug, PartialEq)]
pub struct EtdCoefficients {
    pub factor: IntegratingFactor,
    pub q: Array1<Complex<f64>>,
    pub f1: Array1<Complex<f64>>,
    pub f2: Array1<Complex<f64>>,
    pub f3: Array1<Complex<f64>>,
}

struct ContourMean {
    q: Complex<f64>,
    f1: Complex<f64>,
    f2: Complex<f64>,
    f3: Complex<f64>,
}

#[inline]
#[allow(clippy::cast_precision_loss)]
fn contour_mean(ha: Complex<f64>, points: &Array1<Complex<f64>>, dt: f64) -> ContourMean {
    let mut q = Complex::default();
    let mut f1 = Complex::default();
    let mut f2 = Complex::default();
    let mut f3 = Complex::default();
    for &r in points {
        let z = ha + r;
        let z2 = z * z;
        let z3 = z2 * z;
        let exp_z = z.exp();

        q += ((0.5 * z).exp() - 1.0) / z;
        f1 += (-4.0 - z + exp_z * (4.0 - 3.0 * z + z2)) / z3;
        f2 += 2.0 * (2.0 + z + exp_z * (z - 2.0)) / z3;
        f3 += (-4.0 - 3.0 * z - z2 + exp_z * (4.0 - z)) / z3;
    }
    let scale = dt / points.len() as f64;
    ContourMean {
        q: q * scale,
        f1: f1 * scale,
        f2: f2 * scale,
        f3: f3 * scale,
    }
}

impl EtdCoefficients {
    #[must_use]
    pub fn new(linear: &Array1<Complex<f64>>, dt: f64) -> Self {
        let factor = IntegratingFactor::new(linear, dt);
        let points = contour_points();

        let n_states = linear.len();
        let mut q = Array1::zeros(n_states);
        let mut f1 = Array1::zeros(n_states);
        let mut f2 = Array1::zeros(n_states);
        let mut f3 = Array1::zeros(n_states);
        Zip::from(linear)
            .and(&mut q)
            .and(&mut f1)
            .and(&mut f2)
            .and(&mut f3)
            .for_each(|&a, q, f1, f2, f3| {
                let mean = contour_mean(a * dt, &points, dt);
                *q = mean.q;
                *f1 = mean.f1;
                *f2 = mean.f2;
                *f3 = mean.f3;
            });

        let is_real = is_real_operator(linear);
        if is_real {
            // Finite M leaves imaginary residue which should cancel exactly
            for weights in [&mut q, &mut f1, &mut f2, &mut f3] {
                weights.mapv_inplace(|w| Complex { re: w.re, im: 0.0 });
            }
        }
        log::debug!(
            "evaluated ETDRK4 coefficients for {n_states} states with dt={dt} (real={is_real})"
        );

        Self {
            factor,
            q,
            f1,
            f2,
            f3,
        }
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.q.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

#[cfg(test)]
mod tests {
    use ndarray::Array1;
    use num_complex::Complex;
    use rand::{rngs::StdRng, Rng, SeedableRng};
    use rand_distr::StandardNormal;

    use super::{contour_points, EtdCoefficients, IntegratingFactor, CONTOUR_POINTS};

    fn random_operator(rng: &mut StdRng, n_states: usize, scale: f64) -> Array1<Complex<f64>> {
        (0..n_states)
            .map(|_| Complex {
                re: scale * rng.sample::<f64, _>(StandardNormal),
                im: scale * rng.sample::<f64, _>(StandardNormal),
            })
            .collect()
    }

    #[test]
    fn test_contour_points_lie_on_unit_circle() {
        let points = contour_points();
        assert_eq!(points.len(), CONTOUR_POINTS);
        for r in &points {
            assert!((r.norm() - 1.0).abs() < 1e-15);
        }
        // Symmetric about the real axis, so the mean is zero
        let mean = points.sum() / CONTOUR_POINTS as f64;
        assert!(mean.norm() < 1e-14);
    }

    #[test]
    fn test_zero_operator_limits() {
        let dt = 0.5;
        let coefficients = EtdCoefficients::new(&Array1::zeros(3), dt);
        for i in 0..3 {
            assert_eq!(coefficients.factor.e[i], Complex { re: 1.0, im: 0.0 });
            assert!((coefficients.q[i].re - dt / 2.0).abs() < 1e-14);
            assert!((coefficients.f1[i].re - dt / 6.0).abs() < 1e-14);
            assert!((coefficients.f2[i].re - dt / 3.0).abs() < 1e-14);
            assert!((coefficients.f3[i].re - dt / 6.0).abs() < 1e-14);
        }
    }

    #[test]
    fn test_matches_direct_evaluation_away_from_origin() {
        let dt = 0.5;
        let linear = Array1::from(vec![
            Complex { re: -3.0, im: 0.0 },
            Complex { re: 4.0, im: 0.0 },
            Complex { re: 0.0, im: 20.0 },
            Complex { re: -10.0, im: 5.0 },
        ]);
        let coefficients = EtdCoefficients::new(&linear, dt);
        for (i, &a) in linear.iter().enumerate() {
            let z = a * dt;
            let exp_z = z.exp();
            let z3 = z * z * z;
            let q = dt * ((0.5 * z).exp() - 1.0) / z;
            let f1 = dt * (-4.0 - z + exp_z * (4.0 - 3.0 * z + z * z)) / z3;
            let f2 = dt * 2.0 * (2.0 + z + exp_z * (z - 2.0)) / z3;
            let f3 = dt * (-4.0 - 3.0 * z - z * z + exp_z * (4.0 - z)) / z3;

            assert!((coefficients.q[i] - q).norm() < 1e-12 * q.norm().max(1.0));
            assert!((coefficients.f1[i] - f1).norm() < 1e-12 * f1.norm().max(1.0));
            assert!((coefficients.f2[i] - f2).norm() < 1e-12 * f2.norm().max(1.0));
            assert!((coefficients.f3[i] - f3).norm() < 1e-12 * f3.norm().max(1.0));
        }
    }

    #[test]
    fn test_small_argument_is_accurate() {
        // Direct evaluation of f1 at z = 1e-6 cancels to garbage
        let dt = 1e-3;
        let linear = Array1::from(vec![Complex { re: -1e-3, im: 0.0 }]);
        let coefficients = EtdCoefficients::new(&linear, dt);
        let z = -1e-6;
        // Leading terms of the Taylor series of f1 / h
        let expected = 1.0 / 6.0 + z / 6.0;
        assert!((coefficients.f1[0].re / dt - expected).abs() < 1e-12);
    }

    #[test]
    fn test_coefficients_are_reproducible() {
        let mut rng = StdRng::seed_from_u64(7);
        let linear = random_operator(&mut rng, 32, 10.0);
        let first = EtdCoefficients::new(&linear, 0.1);
        let second = EtdCoefficients::new(&linear, 0.1);
        assert_eq!(first, second);
    }

    #[test]
    fn test_real_operator_gives_real_coefficients() {
        let mut rng = StdRng::seed_from_u64(3);
        let linear = random_operator(&mut rng, 64, 20.0).map(|a| Complex { re: a.re, im: 0.0 });
        let coefficients = EtdCoefficients::new(&linear, 0.15);
        for weights in [
            &coefficients.factor.e,
            &coefficients.factor.e2,
            &coefficients.q,
            &coefficients.f1,
            &coefficients.f2,
            &coefficients.f3,
        ] {
            assert!(weights.iter().all(|w| w.im == 0.0));
        }
    }

    #[test]
    fn test_complex_operator_keeps_imaginary_part() {
        let linear = Array1::from(vec![Complex { re: 0.0, im: 2.0 }]);
        let coefficients = EtdCoefficients::new(&linear, 1.0);
        assert!(coefficients.q[0].im.abs() > 1e-3);
    }

    #[test]
    fn test_integrating_factor_squares() {
        let mut rng = StdRng::seed_from_u64(11);
        let linear = random_operator(&mut rng, 16, 3.0);
        let factor = IntegratingFactor::new(&linear, 0.2);
        for (&a, e2) in linear.iter().zip(&factor.e2) {
            let expected = (a * 0.2).exp();
            assert!((e2 - expected).norm() < 1e-12 * expected.norm());
        }
    }
}
