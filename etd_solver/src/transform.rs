use std::{f64::consts::PI, sync::Arc};

use ndarray::Array1;
use num_complex::Complex;
use rustfft::{Fft, FftPlanner};

use crate::error::{ensure_len, SolverError};

/// A planned transform between a real signal of length `N`
/// and its `N / 2 + 1` non-negative frequency modes.
///
/// The forward transform is unnormalised, the inverse carries the `1 / N`.
pub struct RealFft {
    n_points: usize,
    forward_plan: Arc<dyn Fft<f64>>,
    inverse_plan: Arc<dyn Fft<f64>>,
}

impl RealFft {
    #[must_use]
    pub fn new(n_points: usize) -> Self {
        let mut planner = FftPlanner::new();
        let forward_plan = planner.plan_fft_forward(n_points);
        let inverse_plan = planner.plan_fft_inverse(n_points);

        Self {
            n_points,
            forward_plan,
            inverse_plan,
        }
    }

    #[must_use]
    pub fn n_points(&self) -> usize {
        self.n_points
    }

    #[must_use]
    pub fn n_modes(&self) -> usize {
        self.n_points / 2 + 1
    }

    /// Transform a real signal into its non-negative frequency modes
    ///
    /// # Errors
    ///
    /// Returns an error if `signal` does not have length `n_points`
    pub fn forward(&self, signal: &Array1<f64>) -> Result<Array1<Complex<f64>>, SolverError> {
        ensure_len("signal", self.n_points, signal.len())?;
        Ok(self.forward_unchecked(signal))
    }

    /// Transform non-negative frequency modes back into a real signal.
    ///
    /// The negative frequencies are the conjugates of the positive ones,
    /// so any imaginary part of the zero (and for even `N`, Nyquist) mode is dropped.
    ///
    /// # Errors
    ///
    /// Returns an error if `modes` does not have length `n_modes`
    pub fn inverse(&self, modes: &Array1<Complex<f64>>) -> Result<Array1<f64>, SolverError> {
        ensure_len("modes", self.n_modes(), modes.len())?;
        Ok(self.inverse_unchecked(modes))
    }

    /// # Panics
    ///
    /// Will panic if `signal` does not have length `n_points`
    pub(crate) fn forward_unchecked(&self, signal: &Array1<f64>) -> Array1<Complex<f64>> {
        assert_eq!(signal.len(), self.n_points);

        let mut buffer = signal
            .iter()
            .map(|&re| Complex { re, im: 0.0 })
            .collect::<Vec<_>>();
        self.forward_plan.process(&mut buffer);
        buffer.truncate(self.n_modes());

        Array1::from(buffer)
    }

    /// # Panics
    ///
    /// Will panic if `modes` does not have length `n_modes`
    #[allow(clippy::cast_precision_loss)]
    pub(crate) fn inverse_unchecked(&self, modes: &Array1<Complex<f64>>) -> Array1<f64> {
        assert_eq!(modes.len(), self.n_modes());

        let n = self.n_points;
        let mut buffer = vec![Complex::default(); n];
        for (b, &m) in buffer.iter_mut().zip(modes) {
            *b = m;
        }
        for k in 1..(n + 1) / 2 {
            buffer[n - k] = modes[k].conj();
        }
        self.inverse_plan.process(&mut buffer);

        let norm = 1.0 / n as f64;
        buffer.into_iter().map(|b| b.re * norm).collect()
    }
}

/// Angular wavenumbers `2 pi k / (N dx)` of the non-negative frequency modes
#[must_use]
#[allow(clippy::cast_precision_loss)]
pub fn frequencies(n_points: usize, spacing: f64) -> Array1<f64> {
    let length = n_points as f64 * spacing;
    (0..=n_points / 2)
        .map(|k| 2.0 * PI * k as f64 / length)
        .collect()
}
