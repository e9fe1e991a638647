//! dendrogram::minima — local-minimum lists consumed by the builder.
//!
//! Purpose
//! -------
//! Hold the paired `(x, y)` coordinates and values of local minima, and
//! derive them from a boolean minimum mask or directly from a 1-D signal.
//!
//! Key behaviors
//! -------------
//! - [`Minima::new`] pairs caller-supplied coordinates and values, checking
//!   lengths and finiteness.
//! - [`Minima::from_mask`] reduces every run of adjacent interior flags to
//!   its lowest-valued sample and ignores the two boundary flags, which are
//!   set by convention rather than detected.
//! - [`Minima::from_signal`] runs `derivative::find_minima` and then
//!   [`Minima::from_mask`].
//!
//! Invariants & assumptions
//! ------------------------
//! - `x.len() == y.len()` and all entries are finite.
//! - Entries keep their input order; for masks that is ascending index
//!   order.

use crate::{
    dendrogram::errors::{DendroError, DendroResult},
    derivative::{Grid, find_minima, flagged_runs},
};
use ndarray::ArrayView1;

/// Minima — coordinates and field values of local minima.
#[derive(Debug, Clone, PartialEq)]
pub struct Minima {
    x: Vec<f64>,
    y: Vec<f64>,
}

impl Minima {
    /// Pair minimum coordinates `x` with their field values `y`.
    ///
    /// Errors
    /// ------
    /// - `DendroError::MinimaLengthMismatch` when the lengths differ.
    /// - `DendroError::NonFiniteMinimum` for the first NaN or ±∞ entry,
    ///   coordinates checked before values.
    pub fn new(x: Vec<f64>, y: Vec<f64>) -> DendroResult<Self> {
        if x.len() != y.len() {
            return Err(DendroError::MinimaLengthMismatch { x_len: x.len(), y_len: y.len() });
        }
        for (index, (&xi, &yi)) in x.iter().zip(&y).enumerate() {
            if !xi.is_finite() {
                return Err(DendroError::NonFiniteMinimum { index, value: xi });
            }
            if !yi.is_finite() {
                return Err(DendroError::NonFiniteMinimum { index, value: yi });
            }
        }
        Ok(Minima { x, y })
    }

    /// Extract one minimum per run of flagged interior samples.
    ///
    /// Parameters
    /// ----------
    /// - `x`: sample coordinates.
    /// - `data`: field values, same length as `x`.
    /// - `mask`: minimum mask over the same samples, typically from
    ///   `derivative::find_minima`.
    ///
    /// Errors
    /// ------
    /// - `DendroError::LengthMismatch` when `x` and `data` differ in length.
    /// - `DendroError::MaskLengthMismatch` when `mask` differs from `data`.
    /// - `DendroError::NonFiniteMinimum` when a selected sample is not finite.
    ///
    /// Examples
    /// --------
    /// ```rust
    /// # use dendro::dendrogram::Minima;
    /// # use ndarray::array;
    /// let x = array![0.0, 1.0, 2.0, 3.0, 4.0, 5.0];
    /// let data = array![1.0, 0.5, 0.2, 0.4, 0.9, 1.0];
    /// let mask = array![true, false, true, true, false, true];
    /// let minima = Minima::from_mask(x.view(), data.view(), mask.view()).unwrap();
    /// assert_eq!(minima.x(), &[2.0]);
    /// assert_eq!(minima.y(), &[0.2]);
    /// ```
    pub fn from_mask(
        x: ArrayView1<f64>, data: ArrayView1<f64>, mask: ArrayView1<bool>,
    ) -> DendroResult<Self> {
        if x.len() != data.len() {
            return Err(DendroError::LengthMismatch { x_len: x.len(), data_len: data.len() });
        }
        if mask.len() != data.len() {
            return Err(DendroError::MaskLengthMismatch { expected: data.len(), found: mask.len() });
        }

        let (mut mx, mut my) = (Vec::new(), Vec::new());
        for run in flagged_runs(mask) {
            let lowest = run.clone().fold(run.start, |best, i| if data[i] < data[best] { i } else { best });
            mx.push(x[lowest]);
            my.push(data[lowest]);
        }
        Minima::new(mx, my)
    }

    /// Locate the local minima of a 1-D signal.
    ///
    /// Errors
    /// ------
    /// - `DendroError::Derivative` for an invalid coordinate axis or a
    ///   signal too short to differentiate.
    /// - Any error of [`Minima::from_mask`].
    pub fn from_signal(x: ArrayView1<f64>, data: ArrayView1<f64>) -> DendroResult<Self> {
        let grid = Grid::from_axis(x.to_owned())?;
        let mask = find_minima(&grid, &data, 0)?;
        Minima::from_mask(x, data, mask.view())
    }

    pub fn x(&self) -> &[f64] {
        &self.x
    }

    pub fn y(&self) -> &[f64] {
        &self.y
    }

    pub fn len(&self) -> usize {
        self.x.len()
    }

    pub fn is_empty(&self) -> bool {
        self.x.is_empty()
    }

    /// `(x, y)` pairs in stored order.
    pub fn iter(&self) -> impl Iterator<Item = (f64, f64)> + '_ {
        self.x.iter().copied().zip(self.y.iter().copied())
    }
}
