//! derivative::grid — validated coordinate axes for gridded fields.
//!
//! Purpose
//! -------
//! Hold one coordinate array per field dimension and guarantee, once
//! constructed, that every axis is non-empty, finite, and strictly monotonic.
//! Downstream finite differences divide by coordinate differences, so these
//! guarantees are what keep the derivative free of zero divisions.
//!
//! Key behaviors
//! -------------
//! - [`Grid::new`] validates a list of 1-D axes and takes ownership of them.
//! - [`Grid::from_coordinate_arrays`] also accepts full-shape meshgrid
//!   arrays (ij indexing) and recovers the 1-D axis from each.
//! - [`Grid::mesh`] broadcasts one axis over the full grid shape (ij
//!   indexing), which is how callers build fields such as `X * Y`.
//! - [`Grid::min_spacing`] reports the smallest absolute step along an axis;
//!   the dendrogram builder scales its coordinate-matching tolerance by it.
//!
//! Invariants & assumptions
//! ------------------------
//! - `ndim() >= 1` and every axis has at least one sample.
//! - Along each axis, consecutive differences share one strict sign.
//! - A `Grid` is immutable after construction.

use crate::derivative::errors::{DerivError, DerivResult};
use ndarray::{Array1, ArrayD, Axis, IxDyn};

/// Grid — strictly monotonic coordinate axes, one per field dimension.
///
/// Fields
/// ------
/// - `axes`: `Vec<Array1<f64>>`
///   Coordinate arrays in field-dimension order. Spacing may be non-uniform.
#[derive(Debug, Clone, PartialEq)]
pub struct Grid {
    axes: Vec<Array1<f64>>,
}

impl Grid {
    /// Construct a grid from its coordinate axes.
    ///
    /// Errors
    /// ------
    /// - `DerivError::EmptyGrid` when `axes` is empty.
    /// - `DerivError::EmptyAxis` when an axis has no samples.
    /// - `DerivError::NonFiniteCoordinate` for NaN or ±∞ coordinates.
    /// - `DerivError::NonMonotonicAxis` when an axis repeats a coordinate or
    ///   changes direction.
    ///
    /// Examples
    /// --------
    /// ```rust
    /// # use dendro::derivative::Grid;
    /// # use ndarray::Array1;
    /// let grid = Grid::new(vec![Array1::linspace(0.0, 1.0, 5)]).unwrap();
    /// assert_eq!(grid.shape(), vec![5]);
    /// ```
    pub fn new(axes: Vec<Array1<f64>>) -> DerivResult<Self> {
        if axes.is_empty() {
            return Err(DerivError::EmptyGrid);
        }
        for (axis, coords) in axes.iter().enumerate() {
            validate_axis_coords(axis, coords)?;
        }
        Ok(Grid { axes })
    }

    /// Convenience constructor for the common single-axis case.
    pub fn from_axis(coords: Array1<f64>) -> DerivResult<Self> {
        Grid::new(vec![coords])
    }

    /// Construct a grid from per-dimension coordinate arrays that are either
    /// 1-D axes or full-shape ij meshgrid arrays.
    ///
    /// Parameters
    /// ----------
    /// - `arrays`: `Vec<ArrayD<f64>>`
    ///   One array per field dimension. A 1-D array is taken as the axis
    ///   itself. An array with `arrays.len()` dimensions is taken as
    ///   `mesh(k)` of some grid: its lanes along dimension `k` must all be
    ///   equal, and that common lane becomes axis `k`. Both forms may be
    ///   mixed.
    ///
    /// Errors
    /// ------
    /// - `DerivError::GridDimMismatch` when an array is neither 1-D nor has
    ///   one dimension per array.
    /// - `DerivError::InconsistentMesh` when the lanes of a full-shape array
    ///   differ.
    /// - Any error of [`Grid::new`] for the recovered axes.
    ///
    /// Examples
    /// --------
    /// ```rust
    /// # use dendro::derivative::Grid;
    /// # use ndarray::Array1;
    /// let grid = Grid::new(vec![Array1::linspace(0.0, 1.0, 3), Array1::linspace(5.0, 6.0, 4)]).unwrap();
    /// let meshed = Grid::from_coordinate_arrays(vec![grid.mesh(0).unwrap(), grid.mesh(1).unwrap()]).unwrap();
    /// assert_eq!(meshed, grid);
    /// ```
    pub fn from_coordinate_arrays(arrays: Vec<ArrayD<f64>>) -> DerivResult<Self> {
        let ndim = arrays.len();
        let mut axes = Vec::with_capacity(ndim);
        for (axis, coords) in arrays.into_iter().enumerate() {
            axes.push(axis_from_coordinate_array(axis, ndim, coords)?);
        }
        Grid::new(axes)
    }

    pub fn ndim(&self) -> usize {
        self.axes.len()
    }

    /// Number of samples along each axis, in axis order.
    pub fn shape(&self) -> Vec<usize> {
        self.axes.iter().map(|a| a.len()).collect()
    }

    /// Coordinates along `axis`.
    ///
    /// Errors
    /// ------
    /// - `DerivError::InvalidAxis` when `axis >= ndim()`.
    pub fn axis(&self, axis: usize) -> DerivResult<&Array1<f64>> {
        self.axes.get(axis).ok_or(DerivError::InvalidAxis { axis, ndim: self.ndim() })
    }

    pub fn axes(&self) -> &[Array1<f64>] {
        &self.axes
    }

    /// Smallest absolute coordinate step along `axis`, or `None` for a
    /// single-sample axis.
    pub fn min_spacing(&self, axis: usize) -> DerivResult<Option<f64>> {
        let coords = self.axis(axis)?;
        Ok(coords
            .windows(2)
            .into_iter()
            .map(|w| (w[1] - w[0]).abs())
            .fold(None, |acc: Option<f64>, step| Some(acc.map_or(step, |m| m.min(step)))))
    }

    /// Broadcast the coordinates of `axis` over the full grid shape.
    ///
    /// The result is the `axis`-th array of an ij-indexed meshgrid: element
    /// `[i_0, ..., i_{n-1}]` equals `axes[axis][i_axis]`.
    ///
    /// Errors
    /// ------
    /// - `DerivError::InvalidAxis` when `axis >= ndim()`.
    ///
    /// Examples
    /// --------
    /// ```rust
    /// # use dendro::derivative::Grid;
    /// # use ndarray::Array1;
    /// let grid = Grid::new(vec![
    ///     Array1::from(vec![0.0, 1.0, 2.0]),
    ///     Array1::from(vec![10.0, 20.0]),
    /// ])
    /// .unwrap();
    /// let y = grid.mesh(1).unwrap();
    /// assert_eq!(y[[2, 1]], 20.0);
    /// ```
    pub fn mesh(&self, axis: usize) -> DerivResult<ArrayD<f64>> {
        let coords = self.axis(axis)?;
        let shape = self.shape();
        let mut out = ArrayD::<f64>::zeros(IxDyn(&shape));
        for mut lane in out.lanes_mut(Axis(axis)) {
            lane.assign(coords);
        }
        Ok(out)
    }
}

// ---- Helper methods ----

fn axis_from_coordinate_array(axis: usize, ndim: usize, coords: ArrayD<f64>) -> DerivResult<Array1<f64>> {
    if coords.ndim() == 1 {
        return Ok(coords.iter().copied().collect());
    }
    if coords.ndim() != ndim {
        return Err(DerivError::GridDimMismatch { grid_ndim: ndim, field_ndim: coords.ndim() });
    }

    let mut lanes = coords.lanes(Axis(axis)).into_iter();
    let first = lanes.next().ok_or(DerivError::EmptyAxis { axis })?;
    if first.is_empty() {
        return Err(DerivError::EmptyAxis { axis });
    }
    // Exact comparison: meshgrid copies coordinates without arithmetic.
    if lanes.any(|lane| lane != first) {
        return Err(DerivError::InconsistentMesh { axis });
    }
    Ok(first.to_owned())
}

fn validate_axis_coords(axis: usize, coords: &Array1<f64>) -> DerivResult<()> {
    if coords.is_empty() {
        return Err(DerivError::EmptyAxis { axis });
    }
    if let Some((index, &value)) = coords.iter().enumerate().find(|(_, v)| !v.is_finite()) {
        return Err(DerivError::NonFiniteCoordinate { axis, index, value });
    }
    if coords.len() < 2 {
        return Ok(());
    }

    let increasing = coords[1] > coords[0];
    for index in 1..coords.len() {
        let step = coords[index] - coords[index - 1];
        let ordered = if increasing { step > 0.0 } else { step < 0.0 };
        if !ordered {
            return Err(DerivError::NonMonotonicAxis { axis, index });
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use ndarray::array;

    // -------------------------------------------------------------------------
    // Scope
    // -----
    // These tests cover:
    // - Acceptance of increasing, decreasing, and single-sample axes.
    // - Each rejection branch of `Grid::new`.
    // - Meshgrid broadcasting and minimum spacing.
    // - Recovering axes from full-shape meshgrid arrays.
    // -------------------------------------------------------------------------

    #[test]
    // Purpose
    // -------
    // Strictly increasing and strictly decreasing axes, including
    // non-uniform spacing, are both valid.
    fn grid_new_accepts_monotonic_axes_in_either_direction() {
        // Arrange
        let up = array![0.0, 0.1, 0.5, 2.0];
        let down = array![3.0, 1.0, -4.0];

        // Act
        let grid = Grid::new(vec![up, down]);

        // Assert
        let grid = grid.expect("monotonic axes should be accepted");
        assert_eq!(grid.ndim(), 2);
        assert_eq!(grid.shape(), vec![4, 3]);
    }

    #[test]
    // Purpose
    // -------
    // A repeated coordinate breaks strict monotonicity and is reported at
    // the index where the repeat occurs.
    //
    // Given
    // -----
    // - Axis `[0, 1, 1, 2]`.
    //
    // Expect
    // ------
    // - `Err(NonMonotonicAxis { axis: 0, index: 2 })`.
    fn grid_new_rejects_repeated_coordinate() {
        // Arrange
        let coords = array![0.0, 1.0, 1.0, 2.0];

        // Act
        let result = Grid::from_axis(coords);

        // Assert
        assert_eq!(result, Err(DerivError::NonMonotonicAxis { axis: 0, index: 2 }));
    }

    #[test]
    // Purpose
    // -------
    // An axis that changes direction is rejected.
    fn grid_new_rejects_direction_change() {
        let coords = array![0.0, 1.0, 0.5];
        assert_eq!(
            Grid::from_axis(coords),
            Err(DerivError::NonMonotonicAxis { axis: 0, index: 2 })
        );
    }

    #[test]
    // Purpose
    // -------
    // Empty grids, empty axes, and non-finite coordinates each map to their
    // own variant.
    fn grid_new_rejects_empty_and_non_finite_inputs() {
        // Act / Assert
        assert_eq!(Grid::new(vec![]), Err(DerivError::EmptyGrid));
        assert_eq!(
            Grid::new(vec![array![0.0, 1.0], Array1::from(Vec::<f64>::new())]),
            Err(DerivError::EmptyAxis { axis: 1 })
        );
        match Grid::from_axis(array![0.0, f64::INFINITY]) {
            Err(DerivError::NonFiniteCoordinate { axis: 0, index: 1, value }) => {
                assert!(value.is_infinite());
            }
            other => panic!("expected NonFiniteCoordinate, got {other:?}"),
        }
    }

    #[test]
    // Purpose
    // -------
    // `mesh` reproduces ij-indexed meshgrid semantics.
    //
    // Given
    // -----
    // - x = [0, 1, 2], y = [10, 20].
    //
    // Expect
    // ------
    // - mesh(0)[i, j] == x[i] and mesh(1)[i, j] == y[j] for all i, j.
    fn grid_mesh_broadcasts_axis_coordinates() {
        // Arrange
        let x = array![0.0, 1.0, 2.0];
        let y = array![10.0, 20.0];
        let grid = Grid::new(vec![x.clone(), y.clone()]).unwrap();

        // Act
        let mx = grid.mesh(0).unwrap();
        let my = grid.mesh(1).unwrap();

        // Assert
        assert_eq!(mx.shape(), &[3, 2]);
        for i in 0..3 {
            for j in 0..2 {
                assert_eq!(mx[[i, j]], x[i]);
                assert_eq!(my[[i, j]], y[j]);
            }
        }
        assert_eq!(grid.mesh(2), Err(DerivError::InvalidAxis { axis: 2, ndim: 2 }));
    }

    #[test]
    // Purpose
    // -------
    // `min_spacing` returns the smallest absolute step and `None` for a
    // single-sample axis.
    fn grid_min_spacing_handles_non_uniform_and_single_sample_axes() {
        let grid = Grid::new(vec![array![5.0, 3.0, 2.5, 0.0], array![1.0]]).unwrap();

        assert_eq!(grid.min_spacing(0).unwrap(), Some(0.5));
        assert_eq!(grid.min_spacing(1).unwrap(), None);
    }

    #[test]
    // Purpose
    // -------
    // Full-shape meshgrid arrays, as produced by `numpy.meshgrid(x, y,
    // indexing="ij")`, give back the grid they were built from.
    //
    // Given
    // -----
    // - Axes x = [0, 0.5, 2] (non-uniform) and y = [3, 2, 1, 0] (decreasing).
    // - Their `mesh` arrays, plus a mixed form with 1-D x and meshed y.
    //
    // Expect
    // ------
    // - Both forms equal the original grid.
    fn from_coordinate_arrays_recovers_axes_from_meshgrid() {
        // Arrange
        let grid = Grid::new(vec![array![0.0, 0.5, 2.0], array![3.0, 2.0, 1.0, 0.0]]).unwrap();
        let xx = grid.mesh(0).unwrap();
        let yy = grid.mesh(1).unwrap();

        // Act
        let meshed = Grid::from_coordinate_arrays(vec![xx, yy.clone()]).unwrap();
        let mixed = Grid::from_coordinate_arrays(vec![array![0.0, 0.5, 2.0].into_dyn(), yy]).unwrap();

        // Assert
        assert_eq!(meshed, grid);
        assert_eq!(mixed, grid);
    }

    #[test]
    // Purpose
    // -------
    // Full-shape arrays that are not meshgrids, or that have the wrong
    // dimensionality, are rejected.
    //
    // Given
    // -----
    // - A meshed y array with one element perturbed.
    // - A 2-D coordinate array supplied for a 3-D grid.
    //
    // Expect
    // ------
    // - `InconsistentMesh { axis: 1 }` and `GridDimMismatch` respectively.
    fn from_coordinate_arrays_rejects_non_meshgrid_input() {
        // Arrange
        let grid = Grid::new(vec![array![0.0, 1.0, 2.0], array![10.0, 20.0]]).unwrap();
        let xx = grid.mesh(0).unwrap();
        let mut yy = grid.mesh(1).unwrap();
        yy[[2, 1]] = 21.0;
        let z = array![0.0, 1.0].into_dyn();

        // Act
        let bad_mesh = Grid::from_coordinate_arrays(vec![xx.clone(), yy]);
        let bad_ndim = Grid::from_coordinate_arrays(vec![xx.clone(), grid.mesh(1).unwrap(), z]);

        // Assert
        assert_eq!(bad_mesh, Err(DerivError::InconsistentMesh { axis: 1 }));
        assert_eq!(bad_ndim, Err(DerivError::GridDimMismatch { grid_ndim: 3, field_ndim: 2 }));
    }
}
