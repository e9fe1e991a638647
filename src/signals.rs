//! signals — synthetic Gaussian-peak fields for tests and demos.
//!
//! Purpose
//! -------
//! Generate reproducible scalar fields made of isotropic Gaussian bumps,
//! `Σ h · exp(-|p - c|² / s)`, in one and two dimensions, together with the
//! canonical four-peak signals used to exercise the dendrogram pipeline.
//!
//! Conventions
//! -----------
//! - `spread` is the denominator `s` of the exponent, not a standard
//!   deviation (`s = 2σ²`). It must be positive for a finite result.
//! - 2-D fields are ij-indexed: `field[[i, j]]` sits at
//!   `(axis0[i], axis1[j])`.

use crate::derivative::{DerivError, DerivResult, Grid};
use ndarray::{Array1, Array2, ArrayView1};

/// Peak centres of the canonical 1-D four-peak signal.
pub const FOUR_PEAK_CENTERS: [f64; 4] = [0.25, 0.4, 0.5, 0.65];
/// Peak heights of the canonical 1-D four-peak signal.
pub const FOUR_PEAK_HEIGHTS: [f64; 4] = [0.2, 0.8, 0.6, 0.7];
/// Spread of the canonical 1-D four-peak signal.
pub const FOUR_PEAK_SPREAD: f64 = 0.003;

/// Peak centres of the canonical 2-D four-peak field.
pub const FOUR_PEAK_CENTERS_2D: [[f64; 2]; 4] = [[0.25, 0.25], [0.47, 0.4], [0.65, 0.65], [0.3, 0.7]];
/// Peak heights of the canonical 2-D four-peak field.
pub const FOUR_PEAK_HEIGHTS_2D: [f64; 4] = [0.2, 0.65, 0.6, 0.7];
/// Spread of the canonical 2-D four-peak field.
pub const FOUR_PEAK_SPREAD_2D: f64 = 0.03;

/// Sum of Gaussian bumps `(center, height)` evaluated at `x`.
///
/// Examples
/// --------
/// ```rust
/// # use dendro::signals::gaussian_peaks;
/// # use ndarray::array;
/// let x = array![0.0, 0.5, 1.0];
/// let f = gaussian_peaks(x.view(), &[(0.5, 2.0)], 0.02);
/// assert_eq!(f[1], 2.0);
/// assert!(f[0] < 1e-2 && (f[0] - f[2]).abs() < 1e-15);
/// ```
pub fn gaussian_peaks(x: ArrayView1<f64>, peaks: &[(f64, f64)], spread: f64) -> Array1<f64> {
    x.mapv(|xi| {
        peaks
            .iter()
            .map(|&(center, height)| height * (-(xi - center).powi(2) / spread).exp())
            .sum()
    })
}

/// Sum of 2-D Gaussian bumps `([c0, c1], height)` over a two-axis grid.
///
/// Errors
/// ------
/// - `DerivError::GridDimMismatch` when `grid` does not have exactly two
///   axes.
pub fn gaussian_peaks_2d(grid: &Grid, peaks: &[([f64; 2], f64)], spread: f64) -> DerivResult<Array2<f64>> {
    if grid.ndim() != 2 {
        return Err(DerivError::GridDimMismatch { grid_ndim: grid.ndim(), field_ndim: 2 });
    }
    let (a0, a1) = (grid.axis(0)?, grid.axis(1)?);
    Ok(Array2::from_shape_fn((a0.len(), a1.len()), |(i, j)| {
        peaks
            .iter()
            .map(|&([c0, c1], height)| {
                let r2 = (a0[i] - c0).powi(2) + (a1[j] - c1).powi(2);
                height * (-r2 / spread).exp()
            })
            .sum()
    }))
}

/// The four-peak test signal on `n` evenly spaced samples of `[0, 1]`.
///
/// Returns `(x, data)`.
pub fn four_peak_signal(n: usize) -> (Array1<f64>, Array1<f64>) {
    let x = Array1::linspace(0.0, 1.0, n);
    let peaks: Vec<(f64, f64)> = FOUR_PEAK_CENTERS.into_iter().zip(FOUR_PEAK_HEIGHTS).collect();
    let data = gaussian_peaks(x.view(), &peaks, FOUR_PEAK_SPREAD);
    (x, data)
}

/// The four-peak test field on an `n × n` grid over `[0, 1]²`.
///
/// Errors
/// ------
/// - `DerivError::EmptyAxis` when `n == 0`.
pub fn four_peak_field_2d(n: usize) -> DerivResult<(Grid, Array2<f64>)> {
    let axis = Array1::linspace(0.0, 1.0, n);
    let grid = Grid::new(vec![axis.clone(), axis])?;
    let peaks: Vec<([f64; 2], f64)> =
        FOUR_PEAK_CENTERS_2D.into_iter().zip(FOUR_PEAK_HEIGHTS_2D).collect();
    let field = gaussian_peaks_2d(&grid, &peaks, FOUR_PEAK_SPREAD_2D)?;
    Ok((grid, field))
}

#[cfg(test)]
mod tests {
    use super::*;
    use ndarray::array;

    #[test]
    // Purpose
    // -------
    // The four-peak signal spans [0, 1] and peaks at its tallest bump.
    //
    // Expect
    // ------
    // - 256 samples from 0 to 1, all non-negative.
    // - Global maximum within one grid step of x = 0.4, height ≈ 0.8 plus
    //   the tail of the 0.5 bump.
    fn four_peak_signal_has_expected_layout() {
        // Act
        let (x, data) = four_peak_signal(256);

        // Assert
        assert_eq!(x.len(), 256);
        assert_eq!((x[0], x[255]), (0.0, 1.0));
        assert!(data.iter().all(|&v| v >= 0.0));
        let (argmax, &max) = data
            .iter()
            .enumerate()
            .fold((0, &data[0]), |best, cur| if cur.1 > best.1 { cur } else { best });
        assert!((x[argmax] - 0.4).abs() <= 1.0 / 255.0);
        assert!(max > 0.8 && max < 0.9);
    }

    #[test]
    // Purpose
    // -------
    // A single 2-D bump peaks at its centre and is symmetric about it.
    //
    // Given
    // -----
    // - Axes [0, 0.5, 1] × [0, 0.5, 1], one bump of height 3 at (0.5, 0.5).
    fn gaussian_peaks_2d_single_bump_is_symmetric() {
        // Arrange
        let axis = array![0.0, 0.5, 1.0];
        let grid = Grid::new(vec![axis.clone(), axis]).unwrap();

        // Act
        let f = gaussian_peaks_2d(&grid, &[([0.5, 0.5], 3.0)], 0.2).unwrap();

        // Assert
        assert_eq!(f.dim(), (3, 3));
        assert_eq!(f[[1, 1]], 3.0);
        assert_eq!(f[[0, 1]], f[[1, 0]]);
        assert_eq!(f[[0, 0]], f[[2, 2]]);
        assert!(f[[0, 0]] < f[[0, 1]]);
    }

    #[test]
    // Purpose
    // -------
    // 2-D generation rejects one-axis grids; the canonical field has the
    // requested shape.
    fn gaussian_peaks_2d_requires_two_axes() {
        let grid = Grid::from_axis(array![0.0, 1.0]).unwrap();
        assert_eq!(
            gaussian_peaks_2d(&grid, &[], 0.1),
            Err(DerivError::GridDimMismatch { grid_ndim: 1, field_ndim: 2 })
        );

        let (grid, field) = four_peak_field_2d(16).unwrap();
        assert_eq!(grid.shape(), vec![16, 16]);
        assert_eq!(field.dim(), (16, 16));
    }
}
