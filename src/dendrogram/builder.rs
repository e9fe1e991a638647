//! dendrogram::builder — recursive structure decomposition of a 1-D signal.
//!
//! Purpose
//! -------
//! Turn a sampled signal and its local minima into a [`DendrogramNode`] tree
//! whose nodes partition the sample indices. Leaves are the regions around
//! local maxima; branches claim the samples at or below the minimum where
//! their sub-structures merge.
//!
//! Key behaviors
//! -------------
//! - Input is validated up front: matching lengths, finite values, and a
//!   strictly monotonic coordinate axis.
//! - Minimum coordinates are resolved to grid indices once, before the
//!   recursion. A coordinate resolves to the nearest sample when it lies
//!   within `match_tolerance` times the smallest grid spacing; otherwise the
//!   minimum is dropped with a warning on the options' logger.
//! - Each recursion step picks the lowest candidate minimum among the
//!   remaining samples, claims every remaining sample at or below its value
//!   (plus the minimum's own sample), and recurses on what is left on either
//!   side of it.
//!
//! Invariants & assumptions
//! ------------------------
//! - Every sample is claimed by exactly one node of the returned tree.
//! - Each split claims the sample of the chosen minimum, so that minimum is
//!   never a candidate again and recursion depth is at most one more than
//!   the number of resolved minima.
//! - The caller's minimum values are used as thresholds as given; they are
//!   not required to equal the field at the resolved sample.
//!
//! Conventions
//! -----------
//! - "Left" means `x < x*` and "right" means `x > x*`, whatever the
//!   direction of the coordinate axis. On a decreasing axis the left child
//!   therefore holds the higher sample indices.
//! - Children are pushed left before right; an empty side produces no child.
//! - The decomposition recurses once per split, so stack depth grows with
//!   the number of resolved minima, and every level holds a few masks of the
//!   full domain length. Inputs with very many nested minima (tens of
//!   thousands) should be built on a thread with an enlarged stack.
//!
//! Downstream usage
//! ----------------
//! - [`build_dendrogram`] builds with default options.
//! - [`build_from_signal`] derives the minima with
//!   [`Minima::from_signal`] and builds in one call.

use crate::{
    dendrogram::{
        errors::{DendroError, DendroResult},
        mask::IndexMask,
        minima::Minima,
        node::DendrogramNode,
        options::{DendrogramOptions, TieBreak},
    },
    derivative::Grid,
};
use ndarray::ArrayView1;
use slog::{debug, warn};

/// DendrogramBuilder — builds dendrograms under a fixed configuration.
#[derive(Debug, Clone, Default)]
pub struct DendrogramBuilder {
    opts: DendrogramOptions,
}

/// A minimum matched to a grid sample.
#[derive(Debug, Clone, Copy, PartialEq)]
struct ResolvedMinimum {
    index: usize,
    value: f64,
}

/// Borrowed input shared by every recursion step.
struct Context<'x, 'd> {
    x: ArrayView1<'x, f64>,
    data: ArrayView1<'d, f64>,
    minima: Vec<ResolvedMinimum>,
    /// Coordinates fall with the index, so the lower-index side lies at
    /// larger `x`.
    decreasing: bool,
}

impl DendrogramBuilder {
    pub fn new(opts: DendrogramOptions) -> Self {
        DendrogramBuilder { opts }
    }

    pub fn options(&self) -> &DendrogramOptions {
        &self.opts
    }

    /// Build the dendrogram of `data` sampled at `x`.
    ///
    /// Parameters
    /// ----------
    /// - `x`: strictly monotonic, finite sample coordinates.
    /// - `data`: finite field values, `data.len() == x.len()`.
    /// - `minima_x`, `minima_y`: coordinates and values of local minima in
    ///   the caller's preferred order (this order drives
    ///   `TieBreak::FirstListed`).
    ///
    /// Returns
    /// -------
    /// The root [`DendrogramNode`]. With no resolvable minima the root is a
    /// single leaf claiming the whole domain.
    ///
    /// Panics
    /// ------
    /// - Never on user input. Recursion depth is one more than the number of
    ///   resolved minima; extremely deep nestings can exhaust the default
    ///   thread stack.
    ///
    /// Errors
    /// ------
    /// - `DendroError::LengthMismatch` when `x` and `data` differ in length.
    /// - `DendroError::MinimaLengthMismatch` when the minima lists differ in
    ///   length.
    /// - `DendroError::NonFiniteData` / `DendroError::NonFiniteMinimum` for
    ///   NaN or infinite entries.
    /// - `DendroError::Derivative` when `x` is empty, non-finite, or not
    ///   strictly monotonic.
    ///
    /// Examples
    /// --------
    /// ```rust
    /// # use dendro::dendrogram::DendrogramBuilder;
    /// # use ndarray::array;
    /// let x = array![0.0, 1.0, 2.0, 3.0, 4.0];
    /// let data = array![0.0, 2.0, 1.0, 2.0, 0.0];
    /// let root = DendrogramBuilder::default()
    ///     .build(x.view(), data.view(), &[2.0], &[1.0])
    ///     .unwrap();
    /// assert_eq!(root.mask().indices(), vec![0, 2, 4]);
    /// assert_eq!(root.leaves().len(), 2);
    /// ```
    pub fn build(
        &self, x: ArrayView1<f64>, data: ArrayView1<f64>, minima_x: &[f64], minima_y: &[f64],
    ) -> DendroResult<DendrogramNode> {
        let minima = Minima::new(minima_x.to_vec(), minima_y.to_vec())?;
        self.build_with_minima(x, data, &minima)
    }

    /// Same as [`DendrogramBuilder::build`] with pre-validated [`Minima`].
    pub fn build_with_minima(
        &self, x: ArrayView1<f64>, data: ArrayView1<f64>, minima: &Minima,
    ) -> DendroResult<DendrogramNode> {
        if x.len() != data.len() {
            return Err(DendroError::LengthMismatch { x_len: x.len(), data_len: data.len() });
        }
        if let Some((index, &value)) = data.iter().enumerate().find(|(_, v)| !v.is_finite()) {
            return Err(DendroError::NonFiniteData { index, value });
        }
        let grid = Grid::from_axis(x.to_owned())?;

        let decreasing = x.len() > 1 && x[x.len() - 1] < x[0];
        let ctx = Context { x, data, minima: self.resolve_minima(&grid, minima)?, decreasing };
        debug!(self.opts.logger(), "building dendrogram";
            "samples" => data.len(), "minima" => ctx.minima.len());
        Ok(self.add_structure(&ctx, IndexMask::full(data.len())))
    }

    // ---- Helper methods ----

    /// Match every minimum to its nearest sample, dropping the ones farther
    /// than the tolerance. Input order is preserved.
    fn resolve_minima(&self, grid: &Grid, minima: &Minima) -> DendroResult<Vec<ResolvedMinimum>> {
        let coords = grid.axis(0)?.view();
        let max_dist = self.opts.match_tolerance() * grid.min_spacing(0)?.unwrap_or(0.0);

        let mut resolved = Vec::with_capacity(minima.len());
        for (position, (mx, my)) in minima.iter().enumerate() {
            let index = nearest_index(coords, mx);
            if (coords[index] - mx).abs() <= max_dist {
                resolved.push(ResolvedMinimum { index, value: my });
            } else {
                warn!(self.opts.logger(), "minimum does not match a grid sample; dropped";
                    "position" => position, "x" => mx, "nearest" => coords[index]);
            }
        }
        Ok(resolved)
    }

    fn add_structure(&self, ctx: &Context<'_, '_>, remaining: IndexMask) -> DendrogramNode {
        let logger = self.opts.logger();
        let Some(chosen) = self.select_minimum(&ctx.minima, &remaining) else {
            if let Some((lo, hi)) = remaining.span() {
                debug!(logger, "leaf";
                    "x_lo" => ctx.x[lo], "x_hi" => ctx.x[hi], "samples" => remaining.count());
            }
            return DendrogramNode::leaf(remaining);
        };

        let mut structure = remaining.and(&IndexMask::below(ctx.data, chosen.value));
        structure.insert(chosen.index);
        let rest = remaining.and_not(&structure);
        debug!(logger, "split";
            "x" => ctx.x[chosen.index], "level" => chosen.value, "claimed" => structure.count());

        let (mut left, mut right) = (rest.before(chosen.index), rest.after(chosen.index));
        if ctx.decreasing {
            std::mem::swap(&mut left, &mut right);
        }
        let children = [left, right]
            .into_iter()
            .filter(|side| side.any())
            .map(|side| self.add_structure(ctx, side))
            .collect();
        DendrogramNode::branch(structure, children)
    }

    /// Lowest-valued minimum whose sample is still in `remaining`.
    fn select_minimum(&self, minima: &[ResolvedMinimum], remaining: &IndexMask) -> Option<ResolvedMinimum> {
        let tie_break = self.opts.tie_break();
        minima.iter().copied().filter(|m| remaining.contains(m.index)).reduce(|best, m| {
            let better = match tie_break {
                TieBreak::FirstListed => m.value < best.value,
                TieBreak::Leftmost => {
                    m.value < best.value || (m.value == best.value && m.index < best.index)
                }
            };
            if better { m } else { best }
        })
    }
}

/// Index of the sample nearest to `target` on a strictly monotonic axis.
/// Equidistant neighbours resolve to the lower index. `coords` is non-empty.
fn nearest_index(coords: ArrayView1<f64>, target: f64) -> usize {
    let n = coords.len();
    let increasing = n < 2 || coords[n - 1] > coords[0];

    // first index at or past `target` in the axis direction
    let (mut lo, mut hi) = (0, n);
    while lo < hi {
        let mid = lo + (hi - lo) / 2;
        let past = if increasing { coords[mid] >= target } else { coords[mid] <= target };
        if past {
            hi = mid;
        } else {
            lo = mid + 1;
        }
    }

    let after = lo.min(n - 1);
    let before = lo.saturating_sub(1);
    if (coords[before] - target).abs() <= (coords[after] - target).abs() { before } else { after }
}

/// build_dendrogram — [`DendrogramBuilder::build`] with default options.
pub fn build_dendrogram(
    x: ArrayView1<f64>, data: ArrayView1<f64>, minima_x: &[f64], minima_y: &[f64],
) -> DendroResult<DendrogramNode> {
    DendrogramBuilder::default().build(x, data, minima_x, minima_y)
}

/// build_from_signal — locate the local minima of `data` and build its
/// dendrogram with default options.
///
/// Errors
/// ------
/// - Any error of [`Minima::from_signal`] or [`DendrogramBuilder::build`].
pub fn build_from_signal(x: ArrayView1<f64>, data: ArrayView1<f64>) -> DendroResult<DendrogramNode> {
    if x.len() != data.len() {
        return Err(DendroError::LengthMismatch { x_len: x.len(), data_len: data.len() });
    }
    let minima = Minima::from_signal(x, data)?;
    DendrogramBuilder::default().build_with_minima(x, data, &minima)
}
