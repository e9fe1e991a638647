//! dendrogram — hierarchical structure decomposition of 1-D signals.
//!
//! Purpose
//! -------
//! Identify the nested "structures" of a sampled signal: regions around
//! local maxima (leaves) and the regions where neighbouring structures merge
//! at a local minimum (branches). The result is an explicit tree of index
//! masks over the samples.
//!
//! Key behaviors
//! -------------
//! - [`Minima`] carries the `(x, y)` lists of local minima, built directly or
//!   extracted from a signal via the derivative engine.
//! - [`DendrogramBuilder`] recursively claims samples at or below the lowest
//!   remaining minimum and splits the rest at that minimum.
//! - [`DendrogramNode`] is the immutable result; [`IndexMask`] supplies the
//!   set algebra and [`check_partition`] the exactly-once cover check.
//! - [`DendrogramOptions`] configures minimum matching, tie-breaking, and
//!   logging.
//!
//! Invariants & assumptions
//! ------------------------
//! - Every sample of the input is claimed by exactly one node.
//! - Leaves are exactly the nodes with no children.
//! - Construction is single-threaded and pure apart from log records.
//!
//! Conventions
//! -----------
//! - Masks are indexed by sample position, not by coordinate.
//! - Minimum coordinates are matched to samples with a tolerance relative to
//!   the smallest grid spacing; unmatched minima are dropped and logged.
//!
//! Downstream usage
//! ----------------
//! - Typical call chain:
//!   `Minima::from_signal(x, data)` → `DendrogramBuilder::build_with_minima`,
//!   or simply [`build_from_signal`].
//! - Python bindings expose `build_dendrogram` and the node type.
//!
//! Testing notes
//! -------------
//! - Unit tests cover each submodule; the end-to-end four-peak scenario is
//!   in `tests/integration_dendrogram_pipeline.rs`.

pub mod builder;
pub mod errors;
pub mod mask;
pub mod minima;
pub mod node;
pub mod options;

// ---- Re-exports (primary surface) -----------------------------------------

pub use self::builder::{DendrogramBuilder, build_dendrogram, build_from_signal};
pub use self::errors::{DendroError, DendroResult};
pub use self::mask::{IndexMask, check_partition};
pub use self::minima::Minima;
pub use self::node::DendrogramNode;
pub use self::options::{DendrogramOptions, TieBreak};

// ---- Optional convenience prelude for downstream crates -------------------

pub mod prelude {
    pub use super::builder::{DendrogramBuilder, build_dendrogram, build_from_signal};
    pub use super::errors::{DendroError, DendroResult};
    pub use super::minima::Minima;
    pub use super::node::DendrogramNode;
    pub use super::options::{DendrogramOptions, TieBreak};
}
