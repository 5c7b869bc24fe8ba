use std::ops::Range;

use ndarray::{Array1, Array2};
use num_complex::Complex;

use crate::{
    error::{ensure_len, SolverError},
    system::SemilinearSystem,
};

pub trait Measurement {
    type Out;
    fn measure(&self, state: &Array1<Complex<f64>>) -> Self::Out;
}

pub struct StateMeasurement {}

impl Measurement for StateMeasurement {
    type Out = Array1<Complex<f64>>;
    fn measure(&self, state: &Array1<Complex<f64>>) -> Self::Out {
        state.clone()
    }
}

impl<M0: Measurement, M1: Measurement> Measurement for (M0, M1) {
    type Out = (M0::Out, M1::Out);
    fn measure(&self, state: &Array1<Complex<f64>>) -> Self::Out {
        (self.0.measure(state), self.1.measure(state))
    }
}

/// Evaluate the nonlinear term, checking that it preserves the shape of the state
#[inline]
pub(crate) fn evaluate_nonlinear<T: SemilinearSystem>(
    system: &T,
    t: f64,
    state: &Array1<Complex<f64>>,
) -> Result<Array1<Complex<f64>>, SolverError> {
    let out = system.nonlinear(t, state);
    ensure_len("nonlinear term", state.len(), out.len())?;
    Ok(out)
}

fn validate<T: SemilinearSystem>(
    initial_state: &Array1<Complex<f64>>,
    system: &T,
    n: usize,
    n_step: usize,
) -> Result<(), SolverError> {
    if n == 0 {
        return Err(SolverError::ZeroSteps);
    }
    if n_step == 0 {
        return Err(SolverError::ZeroOutputStride);
    }
    ensure_len("initial state", system.n_states(), initial_state.len())
}

pub trait Solver {
    /// Weights derived from the linear operator, fixed for a given `dt`
    type Coefficients;

    fn coefficients(&self, linear: &Array1<Complex<f64>>, dt: f64) -> Self::Coefficients;

    /// Advance `state` from `t` to `t + dt`
    ///
    /// # Errors
    ///
    /// Returns an error if the nonlinear term does not preserve the shape of the state
    fn step<T: SemilinearSystem>(
        &self,
        coefficients: &Self::Coefficients,
        state: &Array1<Complex<f64>>,
        system: &T,
        t: f64,
        dt: f64,
    ) -> Result<Array1<Complex<f64>>, SolverError>;

    /// Perform the sub-steps with index in `steps`, where step `i` starts at `t_start + i dt`
    ///
    /// # Errors
    ///
    /// Returns an error if any step fails
    #[allow(clippy::cast_precision_loss)]
    fn integrate<T: SemilinearSystem>(
        &self,
        coefficients: &Self::Coefficients,
        state: &Array1<Complex<f64>>,
        system: &T,
        t_start: f64,
        dt: f64,
        steps: Range<usize>,
    ) -> Result<Array1<Complex<f64>>, SolverError> {
        let mut out = state.clone();
        for i in steps {
            out = self.step(coefficients, &out, system, t_start + i as f64 * dt, dt)?;
        }
        Ok(out)
    }

    /// Integrate `n` steps over `t_span`, measuring the initial state and
    /// the state after every `n_step` steps.
    ///
    /// If `n_step` does not divide `n` the final steps are still taken,
    /// but the state at the end of `t_span` is not measured.
    ///
    /// # Errors
    ///
    /// Returns an error if `n` or `n_step` is zero, if the initial state
    /// does not match the linear operator, or if any step fails
    #[allow(clippy::cast_precision_loss)]
    fn solve<T: SemilinearSystem, M: Measurement>(
        &self,
        initial_state: &Array1<Complex<f64>>,
        system: &T,
        measurement: &M,
        t_span: (f64, f64),
        n: usize,
        n_step: usize,
    ) -> Result<Vec<M::Out>, SolverError> {
        validate(initial_state, system, n, n_step)?;

        let (t_start, t_end) = t_span;
        let dt = (t_end - t_start) / n as f64;
        let coefficients = self.coefficients(system.linear_operator(), dt);

        let n_out = n / n_step;
        log::debug!("integrating {n} steps with dt={dt}, measuring every {n_step} steps");

        let mut out = Vec::with_capacity(n_out + 1);
        out.push(measurement.measure(initial_state));
        let mut current = initial_state.to_owned();
        for i in 0..n_out {
            let steps = (i * n_step)..((i + 1) * n_step);
            current = self.integrate(&coefficients, &current, system, t_start, dt, steps)?;
            log::trace!("measured output {} at step {}", i + 1, (i + 1) * n_step);
            out.push(measurement.measure(&current));
        }

        let measured = n_out * n_step;
        if measured < n {
            log::debug!(
                "n_step={n_step} does not divide n={n}, the last {} steps are not measured",
                n - measured
            );
            self.integrate(&coefficients, &current, system, t_start, dt, measured..n)?;
        }

        Ok(out)
    }

    /// Integrate `n` steps over `t_span`, returning the state after every
    /// `n_step` steps as the rows of an array, starting with `initial_state`
    ///
    /// # Errors
    ///
    /// Returns an error if `solve` fails
    fn trajectory<T: SemilinearSystem>(
        &self,
        initial_state: &Array1<Complex<f64>>,
        system: &T,
        t_span: (f64, f64),
        n: usize,
        n_step: usize,
    ) -> Result<Array2<Complex<f64>>, SolverError> {
        let states = self.solve(
            initial_state,
            system,
            &StateMeasurement {},
            t_span,
            n,
            n_step,
        )?;

        let mut out = Array2::zeros([0, initial_state.len()]);
        for state in &states {
            out.push_row(state.view())?;
        }
        Ok(out)
    }
}
