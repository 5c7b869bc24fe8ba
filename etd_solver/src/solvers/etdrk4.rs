use ndarray::{Array1, Zip};
use num_complex::Complex;

use crate::{coefficients::EtdCoefficients, error::SolverError, system::SemilinearSystem};

use super::{evaluate_nonlinear, Solver};

/// Exponential time differencing with a fourth order Runge-Kutta
/// treatment of the nonlinear term.
///
/// The linear part is integrated exactly, see
/// Kassam and Trefethen, SIAM J Sci Comput 26 (2005) 1214
#[derive(Default, Clone, Copy, Debug)]
pub struct Etdrk4Solver {}

impl Solver for Etdrk4Solver {
    type Coefficients = EtdCoefficients;

    fn coefficients(&self, linear: &Array1<Complex<f64>>, dt: f64) -> Self::Coefficients {
        EtdCoefficients::new(linear, dt)
    }

    fn step<T: SemilinearSystem>(
        &self,
        coefficients: &Self::Coefficients,
        state: &Array1<Complex<f64>>,
        system: &T,
        t: f64,
        dt: f64,
    ) -> Result<Array1<Complex<f64>>, SolverError> {
        let EtdCoefficients {
            factor,
            q,
            f1,
            f2,
            f3,
        } = coefficients;
        let e_state = &factor.e * state;

        // y_1 = E y + Q F(t, y)
        let a = evaluate_nonlinear(system, t, state)?;
        let y1 = &e_state + &(q * &a);

        // y_2 = E y + Q F(t + h/2, y_1)
        let b = evaluate_nonlinear(system, t + 0.5 * dt, &y1)?;
        let y2 = &e_state + &(q * &b);

        // y_3 = E y_1 + Q (2 F(t + h/2, y_2) - a)
        let c = evaluate_nonlinear(system, t + 0.5 * dt, &y2)?;
        let y3 = Zip::from(&factor.e)
            .and(&y1)
            .and(q)
            .and(&a)
            .and(&c)
            .map_collect(|&e, &y1, &q, &a, &c| e * y1 + q * (2.0 * c - a));

        let d = evaluate_nonlinear(system, t + dt, &y3)?;

        // E^2 y + f_1 a + f_2 (b + c) + f_3 d
        let mut out = &factor.e2 * state;
        out += &(&a * f1);
        out += &((&b + &c) * f2);
        out += &(&d * f3);
        Ok(out)
    }
}
