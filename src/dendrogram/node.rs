//! dendrogram::node — immutable tree of claimed index sets.
//!
//! Purpose
//! -------
//! Represent a dendrogram as an explicit tree: each [`DendrogramNode`] owns
//! the [`IndexMask`] of samples it claims directly and an ordered list of
//! owned children. A node without children is a leaf (a region around one
//! local maximum); a node with children is a branch that splits at a local
//! minimum.
//!
//! Key behaviors
//! -------------
//! - Nodes are built bottom-up by the builder and have no mutating API.
//! - Traversal helpers: [`DendrogramNode::iter`] (pre-order),
//!   [`DendrogramNode::leaves`], [`DendrogramNode::node_count`],
//!   [`DendrogramNode::height`].
//! - [`DendrogramNode::claimed`] unions the masks of a subtree and
//!   [`DendrogramNode::verify_partition`] checks the exactly-once cover.
//!
//! Conventions
//! -----------
//! - Children are ordered left (lower indices) before right.
//! - A branch has one or two children; a side with no remaining samples is
//!   omitted rather than represented by an empty node.

use crate::dendrogram::{
    errors::DendroResult,
    mask::{IndexMask, check_partition},
};

/// DendrogramNode — one structure of the dendrogram.
///
/// Fields
/// ------
/// - `mask`: samples claimed directly by this node.
/// - `children`: sub-structures, left before right; empty for a leaf.
#[derive(Debug, Clone, PartialEq)]
pub struct DendrogramNode {
    mask: IndexMask,
    children: Vec<DendrogramNode>,
}

impl DendrogramNode {
    pub(crate) fn leaf(mask: IndexMask) -> Self {
        DendrogramNode { mask, children: Vec::new() }
    }

    pub(crate) fn branch(mask: IndexMask, children: Vec<DendrogramNode>) -> Self {
        DendrogramNode { mask, children }
    }

    pub fn mask(&self) -> &IndexMask {
        &self.mask
    }

    pub fn children(&self) -> &[DendrogramNode] {
        &self.children
    }

    pub fn is_leaf(&self) -> bool {
        self.children.is_empty()
    }

    /// Pre-order traversal: a node is yielded before its children, left
    /// subtree before right.
    pub fn iter(&self) -> Iter<'_> {
        Iter { stack: vec![self] }
    }

    /// Leaves of this subtree, left to right.
    pub fn leaves(&self) -> Vec<&DendrogramNode> {
        self.iter().filter(|node| node.is_leaf()).collect()
    }

    /// Number of nodes in this subtree, including `self`.
    pub fn node_count(&self) -> usize {
        self.iter().count()
    }

    /// Edges on the longest path down to a leaf (0 for a leaf).
    pub fn height(&self) -> usize {
        self.children.iter().map(|c| c.height() + 1).max().unwrap_or(0)
    }

    /// Union of all masks in this subtree.
    pub fn claimed(&self) -> IndexMask {
        self.children.iter().fold(self.mask.clone(), |acc, child| acc.or(&child.claimed()))
    }

    /// Check that the masks of this subtree cover a domain of `len` samples
    /// with every sample claimed by exactly one node.
    ///
    /// Errors
    /// ------
    /// - `DendroError::PartitionViolation` for the first unclaimed or
    ///   multiply claimed sample.
    /// - `DendroError::MaskLengthMismatch` when `len` is not the mask length.
    pub fn verify_partition(&self, len: usize) -> DendroResult<()> {
        check_partition(self.iter().map(|node| &node.mask), len)
    }
}

/// Pre-order iterator over a [`DendrogramNode`] subtree.
pub struct Iter<'a> {
    stack: Vec<&'a DendrogramNode>,
}

impl<'a> Iterator for Iter<'a> {
    type Item = &'a DendrogramNode;

    fn next(&mut self) -> Option<Self::Item> {
        let node = self.stack.pop()?;
        self.stack.extend(node.children.iter().rev());
        Some(node)
    }
}

impl<'a> IntoIterator for &'a DendrogramNode {
    type Item = &'a DendrogramNode;
    type IntoIter = Iter<'a>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}
