use ndarray::Array1;
use num_complex::Complex;

pub mod spectral;

/// Represents a semilinear system, seperated into a diagonal linear term
/// and an arbitrary nonlinear term
///
/// ```latex
/// \frac{dy}{dt} = A y + F(t, y)
/// ```
///
/// Where `A` acts elementwise on the state.
#[allow(clippy::module_name_repetitions)]
pub trait SemilinearSystem {
    /// The diagonal of the linear operator `A`
    fn linear_operator(&self) -> &Array1<Complex<f64>>;

    /// The nonlinear term `F(t, y)`.
    ///
    /// The returned state must have the same length as `state`.
    fn nonlinear(&self, t: f64, state: &Array1<Complex<f64>>) -> Array1<Complex<f64>>;

    /// The total number of states
    #[inline]
    fn n_states(&self) -> usize {
        self.linear_operator().len()
    }
}

/// A system built from a linear operator and a closure for the nonlinear term
pub struct FnSystem<F> {
    pub linear: Array1<Complex<f64>>,
    pub nonlinear: F,
}

impl<F> FnSystem<F>
where
    F: Fn(f64, &Array1<Complex<f64>>) -> Array1<Complex<f64>>,
{
    pub fn new(linear: Array1<Complex<f64>>, nonlinear: F) -> Self {
        Self { linear, nonlinear }
    }
}

impl<F> SemilinearSystem for FnSystem<F>
where
    F: Fn(f64, &Array1<Complex<f64>>) -> Array1<Complex<f64>>,
{
    #[inline]
    fn linear_operator(&self) -> &Array1<Complex<f64>> {
        &self.linear
    }

    #[inline]
    fn nonlinear(&self, t: f64, state: &Array1<Complex<f64>>) -> Array1<Complex<f64>> {
        (self.nonlinear)(t, state)
    }
}
