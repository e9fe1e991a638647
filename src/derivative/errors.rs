//! derivative::errors — error type for grids, derivatives, and extremum masks.
//!
//! Purpose
//! -------
//! Provide the error enum and result alias shared by grid construction,
//! finite differencing, and extremum detection, together with a conversion
//! layer to Python exceptions for the PyO3 bindings.
//!
//! Key behaviors
//! -------------
//! - Define [`DerivResult`] and [`DerivError`] as the canonical result and
//!   error types for everything under `derivative`.
//! - Attach human-readable `Display` messages that embed the offending axis,
//!   index, or length.
//! - Implement `From<DerivError> for PyErr` so bindings can use `?` directly.
//!
//! Invariants & assumptions
//! ------------------------
//! - Every variant is raised before any output array is allocated; callers
//!   never observe a partially filled derivative or mask.
//! - Variants are small and `Clone` so they can be compared in tests and
//!   wrapped by higher-level error types (see `dendrogram::errors`).
//!
//! Conventions
//! -----------
//! - Axis indices are zero-based and refer to the field's dimension order.
//! - Messages are phrased in terms of the violated constraint
//!   ("grid axis 1 has 64 samples but the field has 32").
//!
//! Testing notes
//! -------------
//! - Unit tests check that `Display` output embeds each variant's payload.
//! - Error paths themselves are exercised by `validation`, `grid`,
//!   `finite_diff`, and `extrema` tests.

#[cfg(feature = "python-bindings")]
use pyo3::{PyErr, exceptions::PyValueError};

pub type DerivResult<T> = Result<T, DerivError>;

/// DerivError — failures raised by grid and derivative routines.
///
/// Variants
/// --------
/// - `ShapeMismatch { axis, grid_len, field_len }`
///   Grid axis length disagrees with the field's extent along that axis.
/// - `InvalidAxis { axis, ndim }`
///   Requested axis is outside `0..ndim`.
/// - `GridDimMismatch { grid_ndim, field_ndim }`
///   The grid carries a different number of coordinate axes than the field
///   has dimensions.
/// - `TooFewSamples { axis, len }`
///   Fewer than two samples along the derivative axis, so not even the
///   one-sided secant is defined.
/// - `EmptyGrid`
///   A grid was constructed without any axis.
/// - `EmptyAxis { axis }`
///   A grid axis holds no coordinates.
/// - `NonFiniteCoordinate { axis, index, value }`
///   A grid coordinate is NaN or ±∞.
/// - `NonMonotonicAxis { axis, index }`
///   Coordinates along `axis` are not strictly monotonic; `index` is the
///   first sample that breaks the ordering set by the first step.
/// - `InconsistentMesh { axis }`
///   A full-shape coordinate array for `axis` varies along some other
///   dimension, so it is not a meshgrid of a single 1-D axis.
#[derive(Debug, Clone, PartialEq)]
pub enum DerivError {
    // ---- Field / grid agreement ----
    ShapeMismatch { axis: usize, grid_len: usize, field_len: usize },
    InvalidAxis { axis: usize, ndim: usize },
    GridDimMismatch { grid_ndim: usize, field_ndim: usize },
    TooFewSamples { axis: usize, len: usize },

    // ---- Grid construction ----
    EmptyGrid,
    EmptyAxis { axis: usize },
    NonFiniteCoordinate { axis: usize, index: usize, value: f64 },
    NonMonotonicAxis { axis: usize, index: usize },
    InconsistentMesh { axis: usize },
}

impl std::error::Error for DerivError {}

impl std::fmt::Display for DerivError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            // ---- Field / grid agreement ----
            DerivError::ShapeMismatch { axis, grid_len, field_len } => write!(
                f,
                "Shape mismatch: grid axis {axis} has {grid_len} samples but the field has {field_len}."
            ),
            DerivError::InvalidAxis { axis, ndim } => {
                write!(f, "Invalid axis {axis} for a field with {ndim} dimension(s).")
            }
            DerivError::GridDimMismatch { grid_ndim, field_ndim } => write!(
                f,
                "Grid has {grid_ndim} axis/axes but the field has {field_ndim} dimension(s)."
            ),
            DerivError::TooFewSamples { axis, len } => write!(
                f,
                "Need at least 2 samples along axis {axis} to take a difference, found {len}."
            ),

            // ---- Grid construction ----
            DerivError::EmptyGrid => write!(f, "Grid must contain at least one axis."),
            DerivError::EmptyAxis { axis } => write!(f, "Grid axis {axis} is empty."),
            DerivError::NonFiniteCoordinate { axis, index, value } => write!(
                f,
                "Grid axis {axis} has non-finite coordinate {value} at index {index}."
            ),
            DerivError::NonMonotonicAxis { axis, index } => write!(
                f,
                "Grid axis {axis} is not strictly monotonic (ordering breaks at index {index})."
            ),
            DerivError::InconsistentMesh { axis } => write!(
                f,
                "Coordinate array {axis} is not a meshgrid: it varies along a dimension other than {axis}."
            ),
        }
    }
}

#[cfg(feature = "python-bindings")]
impl From<DerivError> for PyErr {
    fn from(err: DerivError) -> PyErr {
        PyValueError::new_err(format!("DerivError: {err}"))
    }
}
