//! Unified error handling for dendrogram construction.
//!
//! This module defines `DendroError`, the error type used by minima
//! extraction, builder configuration, and tree construction, together with
//! the `DendroResult<T>` alias. Grid and derivative failures raised while
//! preparing the input are wrapped rather than re-described.

use crate::derivative::errors::DerivError;

#[cfg(feature = "python-bindings")]
use pyo3::{PyErr, exceptions::PyValueError};

/// Unified error type for dendrogram routines.
#[derive(Debug, Clone, PartialEq)]
pub enum DendroError {
    // ---- Input shape ----
    /// Coordinates and field values must have the same length.
    LengthMismatch { x_len: usize, data_len: usize },

    /// Minimum coordinates and minimum values must pair up.
    MinimaLengthMismatch { x_len: usize, y_len: usize },

    /// Mask length differs from the domain it should select from.
    MaskLengthMismatch { expected: usize, found: usize },

    // ---- Input values ----
    /// Field values must be finite.
    NonFiniteData { index: usize, value: f64 },

    /// Minimum coordinates and values must be finite.
    NonFiniteMinimum { index: usize, value: f64 },

    // ---- Options ----
    /// Coordinate matching tolerance must lie in [0, 0.5).
    InvalidMatchTolerance { tol: f64 },

    /// Unknown tie-break policy name.
    InvalidTieBreak { name: String },

    // ---- Tree invariants ----
    /// A sample is claimed by zero or several nodes.
    PartitionViolation { index: usize, count: usize },

    // ---- Wrapped ----
    /// Grid or derivative failure while preparing the input.
    Derivative(DerivError),
}

pub type DendroResult<T> = Result<T, DendroError>;

impl std::error::Error for DendroError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            DendroError::Derivative(err) => Some(err),
            _ => None,
        }
    }
}

impl From<DerivError> for DendroError {
    fn from(err: DerivError) -> Self {
        DendroError::Derivative(err)
    }
}

impl std::fmt::Display for DendroError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            // ---- Input shape ----
            DendroError::LengthMismatch { x_len, data_len } => write!(
                f,
                "Dendrogram Error: x has {x_len} samples but data has {data_len}"
            ),
            DendroError::MinimaLengthMismatch { x_len, y_len } => write!(
                f,
                "Dendrogram Error: {x_len} minimum coordinates but {y_len} minimum values"
            ),
            DendroError::MaskLengthMismatch { expected, found } => write!(
                f,
                "Dendrogram Error: mask has length {found}, expected {expected}"
            ),

            // ---- Input values ----
            DendroError::NonFiniteData { index, value } => {
                write!(f, "Dendrogram Error: non-finite data value {value} at index {index}")
            }
            DendroError::NonFiniteMinimum { index, value } => {
                write!(f, "Dendrogram Error: non-finite minimum entry {value} at index {index}")
            }

            // ---- Options ----
            DendroError::InvalidMatchTolerance { tol } => write!(
                f,
                "Dendrogram Error: match tolerance {tol} must satisfy 0 <= tol < 0.5"
            ),
            DendroError::InvalidTieBreak { name } => write!(
                f,
                "Dendrogram Error: invalid tie-break {name:?} (expected 'first' or 'leftmost')"
            ),

            // ---- Tree invariants ----
            DendroError::PartitionViolation { index, count } => write!(
                f,
                "Dendrogram Error: sample {index} is claimed by {count} nodes (expected exactly 1)"
            ),

            // ---- Wrapped ----
            DendroError::Derivative(err) => write!(f, "Dendrogram Error: {err}"),
        }
    }
}

#[cfg(feature = "python-bindings")]
impl From<DendroError> for PyErr {
    fn from(err: DendroError) -> PyErr {
        PyValueError::new_err(err.to_string())
    }
}
