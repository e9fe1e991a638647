//! utils — conversion helpers for the Python bindings.
//!
//! Everything here is compiled only with the `python-bindings` feature and
//! turns loosely typed Python inputs (NumPy arrays, pandas objects, nested
//! sequences of float) into the `ndarray` values the core modules expect.

#[cfg(feature = "python-bindings")]
use ndarray::{Array1, ArrayD, Ix1};

#[cfg(feature = "python-bindings")]
use pyo3::{exceptions::PyTypeError, prelude::*, types::PyAny};

#[cfg(feature = "python-bindings")]
use numpy::{PyReadonlyArrayDyn, PyUntypedArrayMethods};

#[cfg(feature = "python-bindings")]
use crate::{
    dendrogram::{DendrogramOptions, TieBreak},
    derivative::Grid,
};

/// Copy an N-D float64 input into an owned dynamic-dimensional array.
///
/// `numpy.ndarray`s of any memory layout are read directly. Other inputs
/// (pandas objects, nested lists) go through `numpy.asarray(..., float64)`.
#[cfg(feature = "python-bindings")]
pub fn extract_f64_field<'py>(py: Python<'py>, raw_field: &Bound<'py, PyAny>) -> PyResult<ArrayD<f64>> {
    if let Ok(arr_ro) = raw_field.extract::<PyReadonlyArrayDyn<f64>>() {
        return Ok(arr_ro.as_array().to_owned());
    }

    let converted = py
        .import("numpy")?
        .call_method1("asarray", (raw_field, "float64"))
        .map_err(|_| PyTypeError::new_err("expected an N-D numpy.ndarray or nested sequence of float64"))?;
    let arr_ro = converted.extract::<PyReadonlyArrayDyn<f64>>()?;
    if arr_ro.ndim() == 0 {
        return Err(PyTypeError::new_err("field must have at least one dimension"));
    }
    Ok(arr_ro.as_array().to_owned())
}

/// Copy a 1-D float64 input (signal, coordinates, or minima list).
///
/// Accepts everything [`extract_f64_field`] does, then insists on exactly
/// one dimension.
#[cfg(feature = "python-bindings")]
pub fn extract_f64_vector<'py>(py: Python<'py>, raw: &Bound<'py, PyAny>) -> PyResult<Array1<f64>> {
    let field = extract_f64_field(py, raw)?;
    let ndim = field.ndim();
    field
        .into_dimensionality::<Ix1>()
        .map_err(|_| PyTypeError::new_err(format!("expected a 1-D array, got {ndim} dimensions")))
}

/// Build a validated [`Grid`] from one coordinate array per field dimension.
///
/// Each entry may be a 1-D axis or a full-shape meshgrid array
/// (`numpy.meshgrid(..., indexing="ij")`); see
/// [`Grid::from_coordinate_arrays`].
#[cfg(feature = "python-bindings")]
pub fn extract_grid<'py>(py: Python<'py>, grids: &Bound<'py, PyAny>) -> PyResult<Grid> {
    let items: Vec<Bound<'py, PyAny>> = grids.extract().map_err(|_| {
        PyTypeError::new_err("grids must be a sequence of coordinate arrays, one per axis")
    })?;

    let arrays = items.iter().map(|item| extract_f64_field(py, item)).collect::<PyResult<Vec<_>>>()?;
    Ok(Grid::from_coordinate_arrays(arrays)?)
}

/// Assemble [`DendrogramOptions`] from the optional keyword arguments of
/// `build_dendrogram`.
#[cfg(feature = "python-bindings")]
pub fn extract_dendrogram_options(
    match_tolerance: Option<f64>, tie_break: Option<&str>,
) -> PyResult<DendrogramOptions> {
    let tie_break = tie_break.map(str::parse::<TieBreak>).transpose()?;
    Ok(DendrogramOptions::new(match_tolerance, tie_break)?)
}
