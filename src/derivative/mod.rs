//! derivative — finite differences and extremum detection on gridded fields.
//!
//! Purpose
//! -------
//! Provide the numerical front half of the dendrogram pipeline: validated
//! coordinate grids, a first-order derivative along any axis of an N-D
//! field, and boolean masks marking extrema, minima, and maxima along that
//! axis.
//!
//! Key behaviors
//! -------------
//! - [`Grid`] holds one strictly monotonic coordinate axis per dimension and
//!   can broadcast an axis to a full meshgrid via [`Grid::mesh`].
//! - [`compute_derivative`] applies the flanking-secant stencil on interior
//!   samples and one-sided secants at the two boundaries, honouring
//!   non-uniform spacing.
//! - [`find_extrema`], [`find_minima`], [`find_maxima`] (and their
//!   `_from_derivative` variants) flag derivative sign changes, always
//!   flagging both boundary samples.
//! - [`flagged_runs`] groups adjacent interior flags of a 1-D mask.
//!
//! Invariants & assumptions
//! ------------------------
//! - All routines are pure: inputs are borrowed immutably and results are
//!   freshly allocated arrays of the input's shape.
//! - Validation happens up front; no routine returns partial output.
//!
//! Conventions
//! -----------
//! - Axes are zero-based in the field's dimension order.
//! - Grids are "ij"-indexed: axis `k` of the grid runs along dimension `k`
//!   of the field.
//!
//! Downstream usage
//! ----------------
//! - `dendrogram::Minima::from_signal` calls [`find_minima`] and
//!   [`flagged_runs`] to obtain the builder's input.
//! - Python bindings expose `compute_derivative`, `find_extrema`, and
//!   `find_minima` directly.
//!
//! Testing notes
//! -------------
//! - Unit tests live next to each submodule; the analytic derivative
//!   identities and the sin² extremum spacing are in `finite_diff` and
//!   `extrema`.

pub mod errors;
pub mod extrema;
pub mod finite_diff;
pub mod grid;
pub mod validation;

// ---- Re-exports (primary surface) -----------------------------------------

pub use self::errors::{DerivError, DerivResult};
pub use self::extrema::{
    find_extrema, find_maxima, find_maxima_from_derivative, find_minima,
    find_minima_from_derivative, flagged_runs,
};
pub use self::finite_diff::compute_derivative;
pub use self::grid::Grid;

// ---- Optional convenience prelude for downstream crates -------------------

pub mod prelude {
    pub use super::errors::{DerivError, DerivResult};
    pub use super::extrema::{find_extrema, find_minima};
    pub use super::finite_diff::compute_derivative;
    pub use super::grid::Grid;
}
