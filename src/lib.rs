//! dendro — extremum detection and dendrograms for gridded scalar fields.
//!
//! Purpose
//! -------
//! Serve as the crate root for Rust callers and as the PyO3 bridge that
//! exposes the derivative engine and the dendrogram builder to Python via the
//! `_dendro` extension module.
//!
//! Key behaviors
//! -------------
//! - Re-export the core Rust modules (`derivative`, `dendrogram`, `signals`)
//!   as the public crate surface.
//! - With the `python-bindings` feature, define the `#[pyfunction]`s, the
//!   `DendrogramNode` `#[pyclass]`, and the `#[pymodule]` initializer.
//!
//! Invariants & assumptions
//! ------------------------
//! - All numerical work lives in the inner modules; this file performs only
//!   FFI glue, input conversion, and error mapping.
//! - Python-visible functions keep the signatures and defaults of their Rust
//!   counterparts (`axis = 0`, default dendrogram options).
//!
//! Conventions
//! -----------
//! - Core errors (`DerivError`, `DendroError`) convert to `ValueError`;
//!   malformed Python objects raise `TypeError` during extraction.
//! - Arrays are returned as fresh NumPy arrays; masks are `bool` arrays.
//!
//! Downstream usage
//! ----------------
//! - Rust code should depend on `derivative` and `dendrogram` directly and
//!   can ignore the items gated behind `python-bindings`.
//! - The Python package imports `_dendro` and re-exports its functions.
//!
//! Testing notes
//! -------------
//! - Core behaviour is covered by unit tests in the inner modules and by
//!   `tests/integration_dendrogram_pipeline.rs`.

pub mod dendrogram;
pub mod derivative;
pub mod signals;
pub mod utils;

pub use crate::dendrogram::{
    DendroError, DendroResult, DendrogramBuilder, DendrogramNode, DendrogramOptions, Minima,
    TieBreak, build_dendrogram, build_from_signal,
};
pub use crate::derivative::{
    DerivError, DerivResult, Grid, compute_derivative, find_extrema, find_minima,
};

#[cfg(feature = "python-bindings")]
use numpy::{IntoPyArray, PyArray1, PyArrayDyn};

#[cfg(feature = "python-bindings")]
use pyo3::{prelude::*, types::PyAny};

#[cfg(feature = "python-bindings")]
use crate::utils::{extract_dendrogram_options, extract_f64_field, extract_f64_vector, extract_grid};

/// DendrogramNode — Python-facing view of one dendrogram structure.
///
/// Fields
/// ------
/// - `inner`: [`dendrogram::DendrogramNode`]
///   The Rust subtree rooted at this node.
///
/// Notes
/// -----
/// - `children` returns copies of the subtrees; nodes are immutable on both
///   sides of the boundary.
#[cfg(feature = "python-bindings")]
#[pyclass(name = "DendrogramNode", module = "dendro._dendro", frozen)]
#[derive(Clone)]
pub struct PyDendrogramNode {
    inner: dendrogram::DendrogramNode,
}

#[cfg(feature = "python-bindings")]
#[pymethods]
impl PyDendrogramNode {
    /// Boolean mask of the samples claimed directly by this node.
    #[getter]
    pub fn mask<'py>(&self, py: Python<'py>) -> Bound<'py, PyArray1<bool>> {
        self.inner.mask().as_array().to_owned().into_pyarray(py)
    }

    /// Child structures, left before right.
    #[getter]
    pub fn children(&self) -> Vec<PyDendrogramNode> {
        self.inner.children().iter().cloned().map(|inner| PyDendrogramNode { inner }).collect()
    }

    #[getter]
    pub fn is_leaf(&self) -> bool {
        self.inner.is_leaf()
    }

    /// Number of nodes in this subtree.
    pub fn node_count(&self) -> usize {
        self.inner.node_count()
    }

    /// Leaves of this subtree, left to right.
    pub fn leaves(&self) -> Vec<PyDendrogramNode> {
        self.inner.leaves().into_iter().cloned().map(|inner| PyDendrogramNode { inner }).collect()
    }

    pub fn __repr__(&self) -> String {
        format!(
            "DendrogramNode(claimed={}, children={})",
            self.inner.mask().count(),
            self.inner.children().len()
        )
    }
}

/// First derivative of `field` along `axis` over the coordinate `grids`.
#[cfg(feature = "python-bindings")]
#[pyfunction(name = "compute_derivative")]
#[pyo3(signature = (grids, field, axis = 0), text_signature = "(grids, field, /, axis=0)")]
fn py_compute_derivative<'py>(
    py: Python<'py>, grids: &Bound<'py, PyAny>, field: &Bound<'py, PyAny>, axis: usize,
) -> PyResult<Bound<'py, PyArrayDyn<f64>>> {
    let grid = extract_grid(py, grids)?;
    let field = extract_f64_field(py, field)?;
    let derivative = crate::derivative::compute_derivative(&grid, &field, axis)?;
    Ok(derivative.into_pyarray(py))
}

/// Sign-change extremum mask of a precomputed derivative.
#[cfg(feature = "python-bindings")]
#[pyfunction(name = "find_extrema")]
#[pyo3(signature = (derivative, axis = 0), text_signature = "(derivative, /, axis=0)")]
fn py_find_extrema<'py>(
    py: Python<'py>, derivative: &Bound<'py, PyAny>, axis: usize,
) -> PyResult<Bound<'py, PyArrayDyn<bool>>> {
    let derivative = extract_f64_field(py, derivative)?;
    let mask = crate::derivative::find_extrema(&derivative, axis)?;
    Ok(mask.into_pyarray(py))
}

/// Local-minimum mask of `field` along `axis`.
#[cfg(feature = "python-bindings")]
#[pyfunction(name = "find_minima")]
#[pyo3(signature = (grids, field, axis = 0), text_signature = "(grids, field, /, axis=0)")]
fn py_find_minima<'py>(
    py: Python<'py>, grids: &Bound<'py, PyAny>, field: &Bound<'py, PyAny>, axis: usize,
) -> PyResult<Bound<'py, PyArrayDyn<bool>>> {
    let grid = extract_grid(py, grids)?;
    let field = extract_f64_field(py, field)?;
    let mask = crate::derivative::find_minima(&grid, &field, axis)?;
    Ok(mask.into_pyarray(py))
}

/// Dendrogram of a 1-D signal given its local minima.
///
/// Parameters
/// ----------
/// - `x`, `data`: 1-D coordinates and values of equal length.
/// - `minima_x`, `minima_y`: coordinates and values of local minima.
/// - `match_tolerance`: optional fraction of the smallest grid spacing
///   within which a minimum matches a sample.
/// - `tie_break`: optional `"first"` or `"leftmost"`.
#[cfg(feature = "python-bindings")]
#[pyfunction(name = "build_dendrogram")]
#[pyo3(
    signature = (x, data, minima_x, minima_y, match_tolerance = None, tie_break = None),
    text_signature = "(x, data, minima_x, minima_y, /, match_tolerance=None, tie_break=None)"
)]
fn py_build_dendrogram<'py>(
    py: Python<'py>, x: &Bound<'py, PyAny>, data: &Bound<'py, PyAny>, minima_x: &Bound<'py, PyAny>,
    minima_y: &Bound<'py, PyAny>, match_tolerance: Option<f64>, tie_break: Option<&str>,
) -> PyResult<PyDendrogramNode> {
    let opts = extract_dendrogram_options(match_tolerance, tie_break)?;
    let x = extract_f64_vector(py, x)?;
    let data = extract_f64_vector(py, data)?;
    let minima_x = extract_f64_vector(py, minima_x)?.to_vec();
    let minima_y = extract_f64_vector(py, minima_y)?.to_vec();

    let inner = DendrogramBuilder::new(opts).build(x.view(), data.view(), &minima_x, &minima_y)?;
    Ok(PyDendrogramNode { inner })
}

/// _dendro — PyO3 module initializer for the Python extension.
///
/// Key behaviors
/// -------------
/// - Register the derivative functions, `build_dendrogram`, and the
///   `DendrogramNode` class on the `_dendro` module.
///
/// Errors
/// ------
/// - `PyErr` if registering a function or class fails.
#[cfg(feature = "python-bindings")]
#[pymodule]
fn _dendro<'py>(_py: Python<'py>, m: &Bound<'py, PyModule>) -> PyResult<()> {
    m.add_function(wrap_pyfunction!(py_compute_derivative, m)?)?;
    m.add_function(wrap_pyfunction!(py_find_extrema, m)?)?;
    m.add_function(wrap_pyfunction!(py_find_minima, m)?)?;
    m.add_function(wrap_pyfunction!(py_build_dendrogram, m)?)?;
    m.add_class::<PyDendrogramNode>()?;
    Ok(())
}
