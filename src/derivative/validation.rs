//! derivative::validation — shared input guards for derivative routines.
//!
//! Purpose
//! -------
//! Centralize the checks that every derivative-engine entry point performs
//! before touching data: axis range, grid/field dimensionality, and
//! per-axis length agreement. Keeping them here gives every routine the same
//! failure order and the same error payloads.
//!
//! Key behaviors
//! -------------
//! - [`validate_axis`] rejects axes outside `0..ndim`.
//! - [`validate_grid_field`] checks that a [`Grid`] is co-indexed with a
//!   field shape and that the derivative axis carries at least two samples.
//!
//! Conventions
//! -----------
//! - Checks run in a fixed order: axis range, grid dimensionality, per-axis
//!   lengths (ascending axis order), then the sample count along `axis`.
//! - Guards never allocate beyond error construction.

use crate::derivative::{
    errors::{DerivError, DerivResult},
    grid::Grid,
};

/// Validate that `axis` addresses a dimension of an `ndim`-dimensional array.
///
/// Errors
/// ------
/// - `DerivError::InvalidAxis` when `axis >= ndim`.
///
/// Examples
/// --------
/// ```rust
/// # use dendro::derivative::validation::validate_axis;
/// # use dendro::derivative::DerivError;
/// assert!(validate_axis(1, 2).is_ok());
/// assert_eq!(validate_axis(2, 2), Err(DerivError::InvalidAxis { axis: 2, ndim: 2 }));
/// ```
pub fn validate_axis(axis: usize, ndim: usize) -> DerivResult<()> {
    if axis >= ndim {
        return Err(DerivError::InvalidAxis { axis, ndim });
    }
    Ok(())
}

/// Validate that `grid` is co-indexed with a field of shape `field_shape`
/// and that a derivative along `axis` is defined.
///
/// Parameters
/// ----------
/// - `grid`: `&Grid`
///   Coordinate axes, already validated for monotonicity by [`Grid::new`].
/// - `field_shape`: `&[usize]`
///   Shape of the scalar field.
/// - `axis`: `usize`
///   Derivative axis.
///
/// Errors
/// ------
/// - `DerivError::InvalidAxis` when `axis >= field_shape.len()`.
/// - `DerivError::GridDimMismatch` when `grid.ndim() != field_shape.len()`.
/// - `DerivError::ShapeMismatch` for the first axis whose grid length
///   differs from the field's extent.
/// - `DerivError::TooFewSamples` when fewer than two samples lie along
///   `axis`.
pub fn validate_grid_field(grid: &Grid, field_shape: &[usize], axis: usize) -> DerivResult<()> {
    validate_axis(axis, field_shape.len())?;

    if grid.ndim() != field_shape.len() {
        return Err(DerivError::GridDimMismatch {
            grid_ndim: grid.ndim(),
            field_ndim: field_shape.len(),
        });
    }

    for (k, (&grid_len, &field_len)) in grid.shape().iter().zip(field_shape).enumerate() {
        if grid_len != field_len {
            return Err(DerivError::ShapeMismatch { axis: k, grid_len, field_len });
        }
    }

    let len = field_shape[axis];
    if len < 2 {
        return Err(DerivError::TooFewSamples { axis, len });
    }

    Ok(())
}
