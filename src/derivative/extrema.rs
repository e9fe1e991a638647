//! derivative::extrema — sign-change extrema and local minima/maxima masks.
//!
//! Purpose
//! -------
//! Turn a derivative array into boolean masks marking where the underlying
//! field has an extremum along one axis. Detection is a discrete analogue of
//! root finding: a sample is flagged when the derivative at its two
//! neighbours has strictly opposite signs.
//!
//! Key behaviors
//! -------------
//! - [`find_extrema`] flags interior `i` when
//!   `sign(d[i-1]) * sign(d[i+1]) == -1`.
//! - [`find_minima_from_derivative`] keeps only decreasing→increasing
//!   transitions (`-1` before, `+1` after); [`find_maxima_from_derivative`]
//!   keeps increasing→decreasing ones.
//! - [`find_minima`] / [`find_maxima`] compute the derivative first from a
//!   grid and field.
//! - The first and last sample along the axis are always `true` in every
//!   mask, since no interior comparison is possible there.
//!
//! Invariants & assumptions
//! ------------------------
//! - `sign(0) == 0` and `sign(NaN) == 0`, so zero-derivative plateaus never
//!   count as sign changes. This is an approximation, not exact root finding.
//! - Because the rule compares `i-1` with `i+1`, a single sign flip of the
//!   derivative between `j` and `j+1` usually flags both `j` and `j+1`.
//!   [`flagged_runs`] groups such adjacent flags for downstream consumers.
//!
//! Downstream usage
//! ----------------
//! - `dendrogram::Minima::from_mask` reduces a minimum mask to one
//!   coordinate per run before building a dendrogram.

use crate::derivative::{
    errors::DerivResult, finite_diff::compute_derivative, grid::Grid,
    validation::validate_axis,
};
use ndarray::{Array, ArrayBase, ArrayView1, Axis, Data, Dimension, Zip};
use std::ops::Range;

/// Mark sign-change extrema of the field whose derivative is `derivative`.
///
/// Errors
/// ------
/// - `DerivError::InvalidAxis` when `axis >= derivative.ndim()`.
///
/// Examples
/// --------
/// ```rust
/// # use dendro::derivative::find_extrema;
/// # use ndarray::array;
/// let d = array![1.0, 1.0, 0.5, -0.5, -1.0, -1.0];
/// let mask = find_extrema(&d, 0).unwrap();
/// assert_eq!(mask, array![true, false, true, true, false, true]);
/// ```
pub fn find_extrema<S, D>(derivative: &ArrayBase<S, D>, axis: usize) -> DerivResult<Array<bool, D>>
where
    S: Data<Elem = f64>,
    D: Dimension,
{
    mark_along_axis(derivative, axis, |before, after| before * after == -1)
}

/// Mark local minima given a precomputed derivative.
///
/// Errors
/// ------
/// - `DerivError::InvalidAxis` when `axis >= derivative.ndim()`.
pub fn find_minima_from_derivative<S, D>(
    derivative: &ArrayBase<S, D>, axis: usize,
) -> DerivResult<Array<bool, D>>
where
    S: Data<Elem = f64>,
    D: Dimension,
{
    mark_along_axis(derivative, axis, |before, after| before == -1 && after == 1)
}

/// Mark local maxima given a precomputed derivative.
pub fn find_maxima_from_derivative<S, D>(
    derivative: &ArrayBase<S, D>, axis: usize,
) -> DerivResult<Array<bool, D>>
where
    S: Data<Elem = f64>,
    D: Dimension,
{
    mark_along_axis(derivative, axis, |before, after| before == 1 && after == -1)
}

/// find_minima — local-minimum mask of `field` along `axis`.
///
/// Purpose
/// -------
/// Compute the flanking-secant derivative of `field` and keep the samples
/// where it changes from negative to positive. Boundaries are always
/// flagged.
///
/// Errors
/// ------
/// - Any error of [`compute_derivative`].
///
/// Examples
/// --------
/// ```rust
/// # use dendro::derivative::{Grid, find_minima};
/// # use ndarray::array;
/// let x = array![0.0, 1.0, 2.0, 3.0, 4.0, 5.0, 6.0];
/// let f = array![3.0, 2.0, 1.0, 0.0, 1.0, 2.0, 3.0];
/// let mask = find_minima(&Grid::from_axis(x).unwrap(), &f, 0).unwrap();
/// assert_eq!(mask, array![true, false, false, true, false, false, true]);
/// ```
pub fn find_minima<S, D>(
    grid: &Grid, field: &ArrayBase<S, D>, axis: usize,
) -> DerivResult<Array<bool, D>>
where
    S: Data<Elem = f64>,
    D: Dimension,
{
    let derivative = compute_derivative(grid, field, axis)?;
    find_minima_from_derivative(&derivative, axis)
}

/// find_maxima — local-maximum mask of `field` along `axis`.
pub fn find_maxima<S, D>(
    grid: &Grid, field: &ArrayBase<S, D>, axis: usize,
) -> DerivResult<Array<bool, D>>
where
    S: Data<Elem = f64>,
    D: Dimension,
{
    let derivative = compute_derivative(grid, field, axis)?;
    find_maxima_from_derivative(&derivative, axis)
}

/// Group the flagged *interior* samples of a 1-D mask into maximal runs of
/// consecutive indices. The two boundary entries are ignored.
///
/// Examples
/// --------
/// ```rust
/// # use dendro::derivative::flagged_runs;
/// # use ndarray::array;
/// let mask = array![true, false, true, true, false, true, true];
/// assert_eq!(flagged_runs(mask.view()), vec![2..4, 5..6]);
/// ```
pub fn flagged_runs(mask: ArrayView1<bool>) -> Vec<Range<usize>> {
    let n = mask.len();
    let mut runs = Vec::new();
    let mut start: Option<usize> = None;
    for i in 1..n.saturating_sub(1) {
        match (mask[i], start) {
            (true, None) => start = Some(i),
            (false, Some(s)) => {
                runs.push(s..i);
                start = None;
            }
            _ => {}
        }
    }
    if let Some(s) = start {
        runs.push(s..n - 1);
    }
    runs
}

// ---- Helper methods ----

#[inline]
fn sign(value: f64) -> i8 {
    if value > 0.0 {
        1
    } else if value < 0.0 {
        -1
    } else {
        0
    }
}

fn mark_along_axis<S, D, F>(
    derivative: &ArrayBase<S, D>, axis: usize, rule: F,
) -> DerivResult<Array<bool, D>>
where
    S: Data<Elem = f64>,
    D: Dimension,
    F: Fn(i8, i8) -> bool,
{
    validate_axis(axis, derivative.ndim())?;

    let mut mask = Array::<bool, D>::from_elem(derivative.raw_dim(), true);
    Zip::from(mask.lanes_mut(Axis(axis))).and(derivative.lanes(Axis(axis))).for_each(
        |mut flags, d| {
            for i in 1..d.len().saturating_sub(1) {
                flags[i] = rule(sign(d[i - 1]), sign(d[i + 1]));
            }
        },
    );
    Ok(mask)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::derivative::errors::DerivError;
    use ndarray::{Array1, Array2, array};
    use std::f64::consts::PI;

    // -------------------------------------------------------------------------
    // Scope
    // -----
    // These tests cover:
    // - The boundary convention and the zero-sign rule.
    // - Spacing of extrema and minima detected on sin²(f·x).
    // - Minima vs maxima classification and run grouping.
    // - Lane-wise behaviour on a 2-D derivative and axis validation.
    // -------------------------------------------------------------------------

    fn run_centres(x: &Array1<f64>, mask: &Array1<bool>) -> Vec<f64> {
        flagged_runs(mask.view())
            .into_iter()
            .map(|run| run.clone().map(|i| x[i]).sum::<f64>() / run.len() as f64)
            .collect()
    }

    #[test]
    // Purpose
    // -------
    // Boundary samples are extrema regardless of the data, and zeros never
    // count as a sign change.
    //
    // Given
    // -----
    // - A derivative that is positive, then exactly zero, then positive.
    //
    // Expect
    // ------
    // - Only the two boundary entries are flagged.
    fn find_extrema_zero_plateau_is_not_flagged() {
        // Arrange
        let d = array![1.0, 0.0, 0.0, 0.0, 2.0];

        // Act
        let mask = find_extrema(&d, 0).unwrap();

        // Assert
        assert_eq!(mask, array![true, false, false, false, true]);
    }

    #[test]
    // Purpose
    // -------
    // Extrema of sin²(f·x) are a quarter period apart and minima half a
    // period apart, within the grid resolution.
    //
    // Given
    // -----
    // - x = linspace(0, 2π, 256), f ∈ {1, 2, 4}.
    //
    // Expect
    // ------
    // - 4f − 1 interior extremum runs spaced π/(2f) ± 2Δx.
    // - 2f − 1 interior minimum runs spaced π/f ± 2Δx, each at a run centre
    //   where sin²(f·x) is close to zero.
    fn find_extrema_and_minima_on_squared_sine() {
        for f in [1.0_f64, 2.0, 4.0] {
            // Arrange
            let x = Array1::linspace(0.0, 2.0 * PI, 256);
            let dx = x[1] - x[0];
            let data = x.mapv(|v| (f * v).sin().powi(2));
            let grid = Grid::from_axis(x.clone()).unwrap();

            // Act
            let deriv = compute_derivative(&grid, &data, 0).unwrap();
            let extrema = find_extrema(&deriv, 0).unwrap();
            let minima = find_minima(&grid, &data, 0).unwrap();

            // Assert
            let ext_centres = run_centres(&x, &extrema);
            assert_eq!(ext_centres.len(), (4.0 * f) as usize - 1, "f = {f}");
            for pair in ext_centres.windows(2) {
                let gap = pair[1] - pair[0];
                assert!((gap - PI / (2.0 * f)).abs() <= 2.0 * dx, "f = {f}, gap = {gap}");
            }

            let min_centres = run_centres(&x, &minima);
            assert_eq!(min_centres.len(), (2.0 * f) as usize - 1, "f = {f}");
            for pair in min_centres.windows(2) {
                let gap = pair[1] - pair[0];
                assert!((gap - PI / f).abs() <= 2.0 * dx, "f = {f}, gap = {gap}");
            }
            for c in &min_centres {
                assert!((f * c).sin().powi(2) < 0.01, "minimum at {c} is not near a zero");
            }
            assert!(extrema[0] && extrema[255] && minima[0] && minima[255]);
        }
    }

    #[test]
    // Purpose
    // -------
    // Minima and maxima masks split the interior extrema between them.
    //
    // Given
    // -----
    // - A derivative with one negative→positive and one positive→negative
    //   transition.
    //
    // Expect
    // ------
    // - Interior minima ∪ maxima equals interior extrema, with no overlap.
    fn minima_and_maxima_partition_interior_extrema() {
        // Arrange
        let d = array![-1.0, -1.0, -0.5, 0.5, 1.0, 1.0, 0.2, -0.3, -1.0, -1.0];

        // Act
        let ext = find_extrema(&d, 0).unwrap();
        let min = find_minima_from_derivative(&d, 0).unwrap();
        let max = find_maxima_from_derivative(&d, 0).unwrap();

        // Assert
        assert_eq!(flagged_runs(min.view()), vec![2..4]);
        assert_eq!(flagged_runs(max.view()), vec![6..8]);
        for i in 1..d.len() - 1 {
            assert_eq!(ext[i], min[i] || max[i], "index {i}");
            assert!(!(min[i] && max[i]), "index {i} flagged as both");
        }
    }

    #[test]
    // Purpose
    // -------
    // On a 2-D derivative each lane along the chosen axis is processed
    // independently, and boundaries are set along that axis only.
    fn find_extrema_operates_lane_wise_on_2d_input() {
        // Arrange: rows differ; sign change only in row 1 along axis 1.
        let d = Array2::from_shape_vec(
            (2, 4),
            vec![
                1.0, 1.0, 1.0, 1.0, //
                1.0, 1.0, -1.0, -1.0,
            ],
        )
        .unwrap();

        // Act
        let along_cols = find_extrema(&d, 1).unwrap();
        let along_rows = find_extrema(&d, 0).unwrap();

        // Assert
        assert_eq!(along_cols.row(0).to_vec(), vec![true, false, false, true]);
        assert_eq!(along_cols.row(1).to_vec(), vec![true, true, true, true]);
        assert!(along_rows.iter().all(|&b| b), "two rows are both boundaries");
    }

    #[test]
    // Purpose
    // -------
    // Out-of-range axes are rejected by every mask routine.
    fn extrema_routines_reject_invalid_axis() {
        let d = array![1.0, -1.0, 1.0];
        let grid = Grid::from_axis(array![0.0, 1.0, 2.0]).unwrap();

        assert_eq!(find_extrema(&d, 1), Err(DerivError::InvalidAxis { axis: 1, ndim: 1 }));
        assert_eq!(find_minima(&grid, &d, 2), Err(DerivError::InvalidAxis { axis: 2, ndim: 1 }));
        assert_eq!(find_maxima(&grid, &d, 1), Err(DerivError::InvalidAxis { axis: 1, ndim: 1 }));
    }

    #[test]
    // Purpose
    // -------
    // Run grouping ignores boundaries and closes a run touching the last
    // interior sample.
    fn flagged_runs_skips_boundaries() {
        assert_eq!(flagged_runs(array![true, true, false, true, true].view()), vec![1..2, 3..4]);
        assert!(flagged_runs(array![true, true].view()).is_empty());
        assert!(flagged_runs(Array1::<bool>::from_elem(0, true).view()).is_empty());
    }
}
