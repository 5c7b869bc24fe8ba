use ndarray::{Array1, Zip};
use num_complex::Complex;

use crate::{coefficients::IntegratingFactor, error::SolverError, system::SemilinearSystem};

use super::{evaluate_nonlinear, Solver};

/// The classical fourth order Runge-Kutta scheme applied to
/// ```latex
/// w(t) = e^{-At} y(t)
/// ```
/// see L.N. Trefethen "Spectral Methods in MATLAB" p112
#[derive(Default, Clone, Copy, Debug)]
pub struct Ifrk4Solver {}

impl Solver for Ifrk4Solver {
    type Coefficients = IntegratingFactor;

    fn coefficients(&self, linear: &Array1<Complex<f64>>, dt: f64) -> Self::Coefficients {
        IntegratingFactor::new(linear, dt)
    }

    fn step<T: SemilinearSystem>(
        &self,
        coefficients: &Self::Coefficients,
        state: &Array1<Complex<f64>>,
        system: &T,
        t: f64,
        dt: f64,
    ) -> Result<Array1<Complex<f64>>, SolverError> {
        let IntegratingFactor { e, e2 } = coefficients;

        // a = h F(t, y)
        let a = evaluate_nonlinear(system, t, state)? * dt;

        // b = h F(t + h/2, E (y + a/2))
        let b_support = Zip::from(e)
            .and(state)
            .and(&a)
            .map_collect(|&e, &y, &a| e * (y + 0.5 * a));
        let b = evaluate_nonlinear(system, t + 0.5 * dt, &b_support)? * dt;

        // c = h F(t + h/2, E y + b/2)
        let c_support = e * state + &(&b * 0.5);
        let c = evaluate_nonlinear(system, t + 0.5 * dt, &c_support)? * dt;

        // d = h F(t + h, E^2 y + E c)
        let d_support = e2 * state + &(e * &c);
        let d = evaluate_nonlinear(system, t + dt, &d_support)? * dt;

        // E^2 y + (E^2 a + 2 E (b + c) + d) / 6
        let mut out = e2 * state;
        Zip::from(&mut out)
            .and(e)
            .and(e2)
            .and(&a)
            .and(&(&b + &c))
            .and(&d)
            .for_each(|out, &e, &e2, &a, &bc, &d| *out += (e2 * a + 2.0 * e * bc + d) / 6.0);
        Ok(out)
    }
}
