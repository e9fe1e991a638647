//! dendrogram::mask — boolean index sets over a 1-D domain.
//!
//! Purpose
//! -------
//! Own the boolean algebra the dendrogram builder performs on sample sets
//! (intersection, difference, threshold selection, index-range restriction)
//! and the check that a family of masks partitions the domain.
//!
//! Key behaviors
//! -------------
//! - [`IndexMask`] wraps an `Array1<bool>` with a fixed length; every binary
//!   operation requires both operands to share that length.
//! - [`IndexMask::below`] selects samples whose value is `<=` a threshold.
//! - [`IndexMask::before`] / [`IndexMask::after`] restrict a mask to the
//!   samples strictly left or right of an index.
//! - [`check_partition`] verifies that every sample is claimed exactly once.
//!
//! Invariants & assumptions
//! ------------------------
//! - Masks are values: operations return new masks, except for
//!   [`IndexMask::insert`], which the builder uses before a mask is frozen
//!   into a node.
//!
//! Panics
//! ------
//! - Binary operations panic when lengths differ. Masks produced by the
//!   builder always share the domain length, so a mismatch indicates a
//!   programming error rather than bad input.

use crate::dendrogram::errors::{DendroError, DendroResult};
use ndarray::{Array1, ArrayView1, Zip};

/// IndexMask — set of sample indices over a domain of fixed length.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct IndexMask {
    bits: Array1<bool>,
}

impl IndexMask {
    /// All samples selected.
    pub fn full(len: usize) -> Self {
        IndexMask { bits: Array1::from_elem(len, true) }
    }

    /// No sample selected.
    pub fn empty(len: usize) -> Self {
        IndexMask { bits: Array1::from_elem(len, false) }
    }

    pub fn from_array(bits: Array1<bool>) -> Self {
        IndexMask { bits }
    }

    pub fn from_fn<F: FnMut(usize) -> bool>(len: usize, f: F) -> Self {
        IndexMask { bits: Array1::from_shape_fn(len, f) }
    }

    /// Samples whose value is `<= threshold`. NaN values are never selected.
    pub fn below(values: ArrayView1<f64>, threshold: f64) -> Self {
        IndexMask { bits: values.mapv(|v| v <= threshold) }
    }

    /// Domain length (selected or not).
    pub fn len(&self) -> usize {
        self.bits.len()
    }

    /// Number of selected samples.
    pub fn count(&self) -> usize {
        self.bits.iter().filter(|&&b| b).count()
    }

    pub fn any(&self) -> bool {
        self.bits.iter().any(|&b| b)
    }

    /// `true` when no sample is selected.
    pub fn is_empty(&self) -> bool {
        !self.any()
    }

    pub fn contains(&self, index: usize) -> bool {
        self.bits.get(index).copied().unwrap_or(false)
    }

    /// Select `index`. Out-of-range indices are ignored.
    pub fn insert(&mut self, index: usize) {
        if let Some(b) = self.bits.get_mut(index) {
            *b = true;
        }
    }

    pub fn and(&self, other: &IndexMask) -> IndexMask {
        self.zip_with(other, |a, b| a && b)
    }

    pub fn or(&self, other: &IndexMask) -> IndexMask {
        self.zip_with(other, |a, b| a || b)
    }

    /// Samples in `self` but not in `other`.
    pub fn and_not(&self, other: &IndexMask) -> IndexMask {
        self.zip_with(other, |a, b| a && !b)
    }

    pub fn not(&self) -> IndexMask {
        IndexMask { bits: self.bits.mapv(|b| !b) }
    }

    /// Selected samples with index `< index`.
    pub fn before(&self, index: usize) -> IndexMask {
        IndexMask {
            bits: Array1::from_shape_fn(self.len(), |i| i < index && self.bits[i]),
        }
    }

    /// Selected samples with index `> index`.
    pub fn after(&self, index: usize) -> IndexMask {
        IndexMask {
            bits: Array1::from_shape_fn(self.len(), |i| i > index && self.bits[i]),
        }
    }

    pub fn is_disjoint(&self, other: &IndexMask) -> bool {
        self.and(other).is_empty()
    }

    /// Selected indices in ascending order.
    pub fn indices(&self) -> Vec<usize> {
        self.bits.iter().enumerate().filter_map(|(i, &b)| b.then_some(i)).collect()
    }

    /// First and last selected index, or `None` for an empty selection.
    pub fn span(&self) -> Option<(usize, usize)> {
        let first = self.bits.iter().position(|&b| b)?;
        let last = self.bits.iter().rposition(|&b| b)?;
        Some((first, last))
    }

    pub fn as_array(&self) -> &Array1<bool> {
        &self.bits
    }

    pub fn into_array(self) -> Array1<bool> {
        self.bits
    }

    fn zip_with<F: Fn(bool, bool) -> bool>(&self, other: &IndexMask, op: F) -> IndexMask {
        assert_eq!(self.len(), other.len(), "IndexMask length mismatch");
        let mut bits = Array1::from_elem(self.len(), false);
        Zip::from(&mut bits)
            .and(&self.bits)
            .and(&other.bits)
            .for_each(|out, &a, &b| *out = op(a, b));
        IndexMask { bits }
    }
}

/// check_partition — verify that `masks` cover `0..len` exactly once.
///
/// Errors
/// ------
/// - `DendroError::MaskLengthMismatch` when a mask's length differs from
///   `len`.
/// - `DendroError::PartitionViolation` for the first sample claimed by zero
///   or by more than one mask.
///
/// Examples
/// --------
/// ```rust
/// # use dendro::dendrogram::mask::{IndexMask, check_partition};
/// let left = IndexMask::from_fn(4, |i| i < 2);
/// let right = left.not();
/// assert!(check_partition([&left, &right], 4).is_ok());
/// assert!(check_partition([&left], 4).is_err());
/// ```
pub fn check_partition<'a, I>(masks: I, len: usize) -> DendroResult<()>
where
    I: IntoIterator<Item = &'a IndexMask>,
{
    let mut counts = vec![0usize; len];
    for mask in masks {
        if mask.len() != len {
            return Err(DendroError::MaskLengthMismatch { expected: len, found: mask.len() });
        }
        for i in mask.indices() {
            counts[i] += 1;
        }
    }
    match counts.iter().position(|&c| c != 1) {
        Some(index) => Err(DendroError::PartitionViolation { index, count: counts[index] }),
        None => Ok(()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use ndarray::array;

    // -------------------------------------------------------------------------
    // Scope
    // -----
    // These tests cover:
    // - Threshold selection, including NaN handling.
    // - Set algebra and index-range restriction.
    // - Partition checking for covers, gaps, and overlaps.
    // -------------------------------------------------------------------------

    #[test]
    // Purpose
    // -------
    // `below` uses an inclusive threshold and never selects NaN.
    fn below_is_inclusive_and_skips_nan() {
        // Arrange
        let values = array![0.5, 1.0, 1.5, f64::NAN];

        // Act
        let mask = IndexMask::below(values.view(), 1.0);

        // Assert
        assert_eq!(mask.indices(), vec![0, 1]);
    }

    #[test]
    // Purpose
    // -------
    // The builder's claim/remove/split sequence expressed with mask algebra
    // yields three disjoint pieces that re-assemble the original set.
    //
    // Given
    // -----
    // - remaining = {1..=6} over a domain of 8.
    // - structure = remaining ∩ {0, 3, 4}.
    // - Split at index 4.
    //
    // Expect
    // ------
    // - left = {1, 2}, right = {5, 6}, and structure ∪ left ∪ right equals
    //   remaining with no overlap.
    fn claim_and_split_pieces_reassemble_remaining() {
        // Arrange
        let remaining = IndexMask::from_fn(8, |i| (1..=6).contains(&i));
        let low = IndexMask::from_fn(8, |i| [0, 3, 4].contains(&i));

        // Act
        let structure = remaining.and(&low);
        let rest = remaining.and_not(&structure);
        let left = rest.before(4);
        let right = rest.after(4);

        // Assert
        assert_eq!(structure.indices(), vec![3, 4]);
        assert_eq!(left.indices(), vec![1, 2]);
        assert_eq!(right.indices(), vec![5, 6]);
        assert!(structure.is_disjoint(&left) && structure.is_disjoint(&right));
        assert_eq!(structure.or(&left).or(&right), remaining);
    }

    #[test]
    // Purpose
    // -------
    // Basic queries behave on empty and out-of-range input.
    fn queries_handle_empty_and_out_of_range() {
        let mut mask = IndexMask::empty(5);
        assert!(mask.is_empty());
        assert_eq!(mask.span(), None);
        assert!(!mask.contains(10));

        mask.insert(3);
        mask.insert(10);
        assert_eq!(mask.count(), 1);
        assert_eq!(mask.span(), Some((3, 3)));
        assert_eq!(mask.not().count(), 4);
        assert_eq!(IndexMask::full(5).count(), 5);
    }

    #[test]
    // Purpose
    // -------
    // `check_partition` reports gaps, overlaps, and foreign lengths.
    //
    // Given
    // -----
    // - A gap at index 2, an overlap at index 1, and a mask of length 3
    //   checked against a domain of 4.
    //
    // Expect
    // ------
    // - `PartitionViolation { index: 2, count: 0 }`,
    //   `PartitionViolation { index: 1, count: 2 }`, and
    //   `MaskLengthMismatch { expected: 4, found: 3 }`.
    fn check_partition_reports_gaps_overlaps_and_length() {
        // Arrange
        let a = IndexMask::from_fn(4, |i| i < 2);
        let b = IndexMask::from_fn(4, |i| i == 3);
        let c = IndexMask::from_fn(4, |i| i >= 1);
        let short = IndexMask::full(3);

        // Act / Assert
        assert_eq!(
            check_partition([&a, &b], 4),
            Err(DendroError::PartitionViolation { index: 2, count: 0 })
        );
        assert_eq!(
            check_partition([&a, &c], 4),
            Err(DendroError::PartitionViolation { index: 1, count: 2 })
        );
        assert_eq!(
            check_partition([&short], 4),
            Err(DendroError::MaskLengthMismatch { expected: 4, found: 3 })
        );
    }
}
