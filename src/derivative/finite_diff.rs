//! derivative::finite_diff — first-order derivative of a gridded field.
//!
//! Purpose
//! -------
//! Approximate the partial derivative of an N-D scalar field along one axis
//! from its samples on a (possibly non-uniform) [`Grid`].
//!
//! Key behaviors
//! -------------
//! - Interior samples use the secant through the two *flanking* samples,
//!   `(f[i-1] - f[i+1]) / (x[i-1] - x[i+1])`. The sample at `i` itself does
//!   not enter the estimate.
//! - The two boundary samples use the one-sided secant to their single
//!   neighbour, `(f[0] - f[1]) / (x[0] - x[1])` and
//!   `(f[n-1] - f[n-2]) / (x[n-1] - x[n-2])`.
//! - With exactly two samples along the axis only the boundary rule applies,
//!   so both outputs equal the same secant.
//!
//! Invariants & assumptions
//! ------------------------
//! - Inputs are validated by [`validate_grid_field`] before any allocation.
//! - Grid axes are strictly monotonic, so every denominator is non-zero and
//!   finite fields yield finite derivatives.
//! - The output has the same shape and dimension type as the input field.
//!
//! Conventions
//! -----------
//! - Differences use actual coordinate gaps, never a nominal step size.
//! - Work is done lane by lane along `axis` using `ndarray::Zip`, so memory
//!   layout of the field does not matter.
//!
//! Testing notes
//! -------------
//! - Unit tests check the analytic cases `∂x X = 1`, `∂y (X·Y) = X`,
//!   `∂x (X·Y) = Y`, `∂x X² ≈ 2X` on the interior, non-uniform spacing, and
//!   the two-sample boundary case.

use crate::derivative::{
    errors::DerivResult,
    grid::Grid,
    validation::validate_grid_field,
};
use ndarray::{Array, ArrayBase, ArrayView1, ArrayViewMut1, Axis, Data, Dimension, Zip};

/// compute_derivative — flanking-secant derivative of `field` along `axis`.
///
/// Parameters
/// ----------
/// - `grid`: `&Grid`
///   Coordinate axes co-indexed with `field`.
/// - `field`: `&ArrayBase<S, D>`
///   Scalar samples; any storage and dimensionality.
/// - `axis`: `usize`
///   Axis along which to differentiate; must be `< field.ndim()`.
///
/// Returns
/// -------
/// `DerivResult<Array<f64, D>>`
///   Freshly allocated derivative with the shape of `field`.
///
/// Errors
/// ------
/// - `DerivError::InvalidAxis`, `DerivError::GridDimMismatch`,
///   `DerivError::ShapeMismatch`, `DerivError::TooFewSamples`
///   as raised by [`validate_grid_field`].
///
/// Panics
/// ------
/// - Never panics.
///
/// Examples
/// --------
/// ```rust
/// # use dendro::derivative::{Grid, compute_derivative};
/// # use ndarray::array;
/// let x = array![0.0, 1.0, 3.0, 4.0];
/// let grid = Grid::from_axis(x.clone()).unwrap();
/// let d = compute_derivative(&grid, &(2.0 * &x), 0).unwrap();
/// assert!(d.iter().all(|v| (v - 2.0).abs() < 1e-12));
/// ```
pub fn compute_derivative<S, D>(
    grid: &Grid, field: &ArrayBase<S, D>, axis: usize,
) -> DerivResult<Array<f64, D>>
where
    S: Data<Elem = f64>,
    D: Dimension,
{
    validate_grid_field(grid, field.shape(), axis)?;
    let coords = grid.axis(axis)?.view();

    let mut derivative = Array::<f64, D>::zeros(field.raw_dim());
    Zip::from(derivative.lanes_mut(Axis(axis)))
        .and(field.lanes(Axis(axis)))
        .for_each(|out, values| secant_lane(out, values, coords));
    Ok(derivative)
}

// ---- Helper methods ----

/// Fill one lane of the derivative. Requires `values.len() >= 2`.
fn secant_lane(mut out: ArrayViewMut1<f64>, values: ArrayView1<f64>, coords: ArrayView1<f64>) {
    let n = values.len();
    for i in 1..n - 1 {
        out[i] = (values[i - 1] - values[i + 1]) / (coords[i - 1] - coords[i + 1]);
    }
    out[0] = (values[0] - values[1]) / (coords[0] - coords[1]);
    out[n - 1] = (values[n - 1] - values[n - 2]) / (coords[n - 1] - coords[n - 2]);
}
