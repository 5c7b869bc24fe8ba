use ndarray::{Array1, Zip};
use num_complex::Complex;

use crate::{
    error::SolverError,
    solvers::Measurement,
    transform::{frequencies, RealFft},
};

use super::SemilinearSystem;

/// A periodic one dimensional field `u(x)` evolved in the basis of its
/// non-negative Fourier modes, with a Burgers nonlinearity
///
/// ```latex
/// u_t = L u - u u_x
/// ```
/// where `L` is diagonal in Fourier space.
#[allow(clippy::module_name_repetitions)]
pub struct SpectralSystem {
    grid: Array1<f64>,
    wavenumbers: Array1<f64>,
    linear: Array1<Complex<f64>>,
    transform: RealFft,
}

impl SpectralSystem {
    /// Build a system on `n_points` points of `[0, length)`, where the linear operator
    /// for the mode with angular wavenumber `p` is `dispersion(p)`
    #[must_use]
    #[allow(clippy::cast_precision_loss)]
    pub fn from_dispersion<F: Fn(f64) -> Complex<f64>>(
        n_points: usize,
        length: f64,
        dispersion: F,
    ) -> Self {
        let spacing = length / n_points as f64;
        let grid = (0..n_points).map(|i| i as f64 * spacing).collect();
        let wavenumbers = frequencies(n_points, spacing);
        let linear = wavenumbers.mapv(dispersion);

        Self {
            grid,
            wavenumbers,
            linear,
            transform: RealFft::new(n_points),
        }
    }

    /// The Korteweg-de Vries equation
    /// ```latex
    /// u_t + u u_x + u_{xxx} = 0
    /// ```
    #[must_use]
    pub fn korteweg_de_vries(n_points: usize, length: f64) -> Self {
        Self::from_dispersion(n_points, length, |p| Complex {
            re: 0.0,
            im: p * p * p,
        })
    }

    /// The Kuramoto-Sivashinsky equation
    /// ```latex
    /// u_t + u u_x + u_{xx} + u_{xxxx} = 0
    /// ```
    #[must_use]
    pub fn kuramoto_sivashinsky(n_points: usize, length: f64) -> Self {
        Self::from_dispersion(n_points, length, |p| Complex {
            re: p * p - p.powi(4),
            im: 0.0,
        })
    }

    #[must_use]
    pub fn grid(&self) -> &Array1<f64> {
        &self.grid
    }

    #[must_use]
    pub fn wavenumbers(&self) -> &Array1<f64> {
        &self.wavenumbers
    }

    #[must_use]
    pub fn transform(&self) -> &RealFft {
        &self.transform
    }

    /// # Errors
    ///
    /// Returns an error if `field` is not sampled on the grid
    pub fn to_spectral(&self, field: &Array1<f64>) -> Result<Array1<Complex<f64>>, SolverError> {
        self.transform.forward(field)
    }

    /// # Errors
    ///
    /// Returns an error if `state` does not have one entry per mode
    pub fn to_physical(&self, state: &Array1<Complex<f64>>) -> Result<Array1<f64>, SolverError> {
        self.transform.inverse(state)
    }
}

impl SemilinearSystem for SpectralSystem {
    fn linear_operator(&self) -> &Array1<Complex<f64>> {
        &self.linear
    }

    /// `-u u_x = -(u^2)_x / 2`, with the product taken on the grid
    fn nonlinear(&self, _t: f64, state: &Array1<Complex<f64>>) -> Array1<Complex<f64>> {
        let field = self.transform.inverse_unchecked(state);
        let flux = self.transform.forward_unchecked(&field.mapv(|u| u * u));

        Zip::from(&flux)
            .and(&self.wavenumbers)
            .map_collect(|&f, &p| Complex { re: 0.0, im: -0.5 * p } * f)
    }
}

/// Measure the field on the grid rather than its modes
pub struct PhysicalMeasurement<'a> {
    pub system: &'a SpectralSystem,
}

impl Measurement for PhysicalMeasurement<'_> {
    type Out = Array1<f64>;

    fn measure(&self, state: &Array1<Complex<f64>>) -> Self::Out {
        self.system.transform.inverse_unchecked(state)
    }
}

#[cfg(test)]
mod tests {
    use std::f64::consts::PI;

    use ndarray::Array1;

    use crate::system::SemilinearSystem;

    use super::SpectralSystem;

    #[test]
    fn test_operators() {
        let kdv = SpectralSystem::korteweg_de_vries(16, 2.0 * PI);
        assert_eq!(kdv.n_states(), 9);
        assert_eq!(kdv.grid().len(), 16);
        for (k, a) in kdv.linear_operator().iter().enumerate() {
            let p = k as f64;
            assert!(a.re.abs() < 1e-12);
            assert!((a.im - p * p * p).abs() < 1e-9);
        }

        let ks = SpectralSystem::kuramoto_sivashinsky(16, 32.0 * PI);
        for (a, p) in ks.linear_operator().iter().zip(ks.wavenumbers()) {
            assert_eq!(a.im, 0.0);
            assert!((a.re - (p * p - p.powi(4))).abs() < 1e-12);
        }
    }

    #[test]
    fn test_burgers_flux_of_sine() {
        // u = sin(x) gives -u u_x = -sin(2x) / 2
        let system = SpectralSystem::korteweg_de_vries(32, 2.0 * PI);
        let field = system.grid().mapv(f64::sin);
        let state = system.to_spectral(&field).unwrap();

        let flux = system
            .to_physical(&system.nonlinear(0.0, &state))
            .unwrap();
        let expected: Array1<f64> = system.grid().mapv(|x| -0.5 * (2.0 * x).sin());
        for (f, e) in flux.iter().zip(&expected) {
            assert!((f - e).abs() < 1e-12);
        }
    }

    #[test]
    fn test_constant_field_has_no_flux() {
        let system = SpectralSystem::kuramoto_sivashinsky(16, 10.0);
        let state = system.to_spectral(&Array1::from_elem(16, 2.5)).unwrap();
        let flux = system.nonlinear(0.0, &state);
        assert!(flux.iter().all(|f| f.norm() < 1e-10));
    }
}
