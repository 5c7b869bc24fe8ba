use std::{fmt, str::FromStr};

use ndarray::Array1;
use num_complex::Complex;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use crate::{
    error::SolverError,
    solvers::{Etdrk4Solver, Ifrk4Solver, Measurement, Solver},
    system::SemilinearSystem,
};

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum Method {
    #[cfg_attr(feature = "serde", serde(rename = "ETDRK4"))]
    Etdrk4,
    #[cfg_attr(feature = "serde", serde(rename = "IFRK4"))]
    Ifrk4,
}

impl fmt::Display for Method {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Method::Etdrk4 => write!(f, "ETDRK4"),
            Method::Ifrk4 => write!(f, "IFRK4"),
        }
    }
}

impl FromStr for Method {
    type Err = SolverError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_uppercase().as_str() {
            "ETDRK4" => Ok(Method::Etdrk4),
            "IFRK4" => Ok(Method::Ifrk4),
            _ => Err(SolverError::UnknownMethod(s.to_owned())),
        }
    }
}

/// Integrate from `t_start` to `t_end` in `n` equal steps,
/// measuring the state every `n_step` steps
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct SimulationConfig {
    pub t_start: f64,
    pub t_end: f64,
    pub n: usize,
    pub n_step: usize,
    pub method: Method,
}

impl SimulationConfig {
    /// # Errors
    ///
    /// Returns an error if `n` or `n_step` is zero
    pub fn validate(&self) -> Result<(), SolverError> {
        if self.n == 0 {
            return Err(SolverError::ZeroSteps);
        }
        if self.n_step == 0 {
            return Err(SolverError::ZeroOutputStride);
        }
        Ok(())
    }

    #[must_use]
    #[allow(clippy::cast_precision_loss)]
    pub fn dt(&self) -> f64 {
        (self.t_end - self.t_start) / self.n as f64
    }

    /// The number of measured states, including the initial state
    #[must_use]
    pub fn n_outputs(&self) -> usize {
        self.n / self.n_step + 1
    }

    /// The times at which the state is measured
    #[must_use]
    #[allow(clippy::cast_precision_loss)]
    pub fn output_times(&self) -> Vec<f64> {
        let dt = self.dt();
        (0..self.n_outputs())
            .map(|i| self.t_start + (i * self.n_step) as f64 * dt)
            .collect()
    }

    /// # Errors
    ///
    /// Returns an error if the configuration is invalid or the integration fails
    pub fn solve<T: SemilinearSystem, M: Measurement>(
        &self,
        initial_state: &Array1<Complex<f64>>,
        system: &T,
        measurement: &M,
    ) -> Result<Vec<M::Out>, SolverError> {
        self.validate()?;
        let t_span = (self.t_start, self.t_end);
        match self.method {
            Method::Etdrk4 => Etdrk4Solver {}.solve(
                initial_state,
                system,
                measurement,
                t_span,
                self.n,
                self.n_step,
            ),
            Method::Ifrk4 => Ifrk4Solver {}.solve(
                initial_state,
                system,
                measurement,
                t_span,
                self.n,
                self.n_step,
            ),
        }
    }
}
