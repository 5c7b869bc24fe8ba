#![warn(clippy::pedantic)]

pub mod coefficients;
pub mod config;
pub mod error;
pub mod soliton;
pub mod solvers;
pub mod system;
pub mod transform;

use ndarray::{Array1, Array2};
use num_complex::Complex;

pub use config::{Method, SimulationConfig};
pub use error::SolverError;
pub use solvers::{Etdrk4Solver, Ifrk4Solver, Measurement, Solver, StateMeasurement};
pub use system::{spectral::SpectralSystem, FnSystem, SemilinearSystem};

/// Solve `dy/dt = A y + F(t, y)` by exponential time differencing and
/// fourth order Runge-Kutta.
///
/// Returns `n / n_step + 1` rows, where row `i` is the state at
/// `t0 + i n_step (t1 - t0) / n`
///
/// # Errors
///
/// Returns an error if `n` or `n_step` is zero, or if the lengths of
/// `linear`, `initial_state` and the output of `nonlinear` differ
pub fn etdrk4<F>(
    linear: &Array1<Complex<f64>>,
    nonlinear: F,
    t_span: (f64, f64),
    initial_state: &Array1<Complex<f64>>,
    n: usize,
    n_step: usize,
) -> Result<Array2<Complex<f64>>, SolverError>
where
    F: Fn(f64, &Array1<Complex<f64>>) -> Array1<Complex<f64>>,
{
    let system = FnSystem::new(linear.to_owned(), nonlinear);
    Etdrk4Solver {}.trajectory(initial_state, &system, t_span, n, n_step)
}

/// Solve `dy/dt = A y + F(t, y)` by an integrating factor and
/// fourth order Runge-Kutta.
///
/// Returns `n / n_step + 1` rows, where row `i` is the state at
/// `t0 + i n_step (t1 - t0) / n`
///
/// # Errors
///
/// Returns an error if `n` or `n_step` is zero, or if the lengths of
/// `linear`, `initial_state` and the output of `nonlinear` differ
pub fn ifrk4<F>(
    linear: &Array1<Complex<f64>>,
    nonlinear: F,
    t_span: (f64, f64),
    initial_state: &Array1<Complex<f64>>,
    n: usize,
    n_step: usize,
) -> Result<Array2<Complex<f64>>, SolverError>
where
    F: Fn(f64, &Array1<Complex<f64>>) -> Array1<Complex<f64>>,
{
    let system = FnSystem::new(linear.to_owned(), nonlinear);
    Ifrk4Solver {}.trajectory(initial_state, &system, t_span, n, n_step)
}
