//! dendrogram::options — configuration for dendrogram construction.
//!
//! Purpose
//! -------
//! Collect the knobs of the dendrogram builder in one validated value: how
//! minimum coordinates are matched to grid samples, how equal-valued minima
//! are ranked, and where progress is logged.
//!
//! Key behaviors
//! -------------
//! - [`DendrogramOptions::new`] validates the coordinate matching tolerance.
//! - [`TieBreak`] makes the choice between equal-valued minima explicit and
//!   parses from the names used by the Python bindings.
//! - A `slog::Logger` travels with the options; the default discards all
//!   records. With the `obs_slog` feature,
//!   [`DendrogramOptions::with_terminal_logger`] attaches an asynchronous
//!   terminal drain.
//!
//! Invariants & assumptions
//! ------------------------
//! - `0 <= match_tolerance < 0.5`. The tolerance is a fraction of the
//!   smallest grid spacing, so below one half a coordinate can resolve to at
//!   most one sample.
//!
//! Conventions
//! -----------
//! - Consuming `with_*` setters return the updated options, so
//!   configurations read as a single expression.

use crate::dendrogram::errors::{DendroError, DendroResult};
use slog::{Discard, Logger, o};
use std::str::FromStr;

/// Rule for choosing among candidate minima that share the lowest value.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum TieBreak {
    /// The minimum listed first in the caller's input wins.
    #[default]
    FirstListed,
    /// The minimum at the smallest grid index wins.
    Leftmost,
}

impl FromStr for TieBreak {
    type Err = DendroError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "first" | "first_listed" | "firstlisted" => Ok(TieBreak::FirstListed),
            "leftmost" | "left" => Ok(TieBreak::Leftmost),
            _ => Err(DendroError::InvalidTieBreak { name: s.to_string() }),
        }
    }
}

/// DendrogramOptions — builder configuration.
///
/// Fields
/// ------
/// - `match_tolerance`: `f64`
///   Maximum distance between a minimum coordinate and a grid sample, as a
///   fraction of the grid's smallest spacing. `0.0` demands exact equality.
/// - `tie_break`: [`TieBreak`]
///   Ranking of equal-valued candidate minima.
/// - `logger`: `slog::Logger`
///   Receives debug records for leaves and splits and a warning for each
///   minimum that does not resolve to a grid sample.
#[derive(Debug, Clone)]
pub struct DendrogramOptions {
    match_tolerance: f64,
    tie_break: TieBreak,
    logger: Logger,
}

impl DendrogramOptions {
    pub const DEFAULT_MATCH_TOLERANCE: f64 = 1e-6;

    /// Construct validated options; `None` selects the default.
    ///
    /// Errors
    /// ------
    /// - `DendroError::InvalidMatchTolerance` when the tolerance is not
    ///   finite or lies outside `[0, 0.5)`.
    ///
    /// Examples
    /// --------
    /// ```rust
    /// # use dendro::dendrogram::{DendrogramOptions, TieBreak};
    /// let opts = DendrogramOptions::new(Some(1e-3), Some(TieBreak::Leftmost)).unwrap();
    /// assert_eq!(opts.tie_break(), TieBreak::Leftmost);
    /// assert!(DendrogramOptions::new(Some(0.5), None).is_err());
    /// ```
    pub fn new(match_tolerance: Option<f64>, tie_break: Option<TieBreak>) -> DendroResult<Self> {
        let tol = match_tolerance.unwrap_or(Self::DEFAULT_MATCH_TOLERANCE);
        validate_match_tolerance(tol)?;
        Ok(DendrogramOptions {
            match_tolerance: tol,
            tie_break: tie_break.unwrap_or_default(),
            logger: discard_logger(),
        })
    }

    pub fn match_tolerance(&self) -> f64 {
        self.match_tolerance
    }

    pub fn tie_break(&self) -> TieBreak {
        self.tie_break
    }

    pub fn logger(&self) -> &Logger {
        &self.logger
    }

    pub fn with_tie_break(mut self, tie_break: TieBreak) -> Self {
        self.tie_break = tie_break;
        self
    }

    /// Replace the matching tolerance, re-validating it.
    pub fn with_match_tolerance(mut self, tol: f64) -> DendroResult<Self> {
        validate_match_tolerance(tol)?;
        self.match_tolerance = tol;
        Ok(self)
    }

    pub fn with_logger(mut self, logger: Logger) -> Self {
        self.logger = logger;
        self
    }

    /// Log to stderr through an asynchronous `slog-term` drain.
    #[cfg(feature = "obs_slog")]
    pub fn with_terminal_logger(self) -> Self {
        use slog::Drain;

        let decorator = slog_term::TermDecorator::new().stderr().build();
        let drain = slog_term::FullFormat::new(decorator).build().fuse();
        let drain = slog_async::Async::new(drain).build().fuse();
        self.with_logger(Logger::root(drain, o!("component" => "dendrogram")))
    }
}

impl Default for DendrogramOptions {
    fn default() -> Self {
        DendrogramOptions {
            match_tolerance: Self::DEFAULT_MATCH_TOLERANCE,
            tie_break: TieBreak::default(),
            logger: discard_logger(),
        }
    }
}

// ---- Helper methods ----

fn discard_logger() -> Logger {
    Logger::root(Discard, o!())
}

fn validate_match_tolerance(tol: f64) -> DendroResult<()> {
    if !tol.is_finite() || !(0.0..0.5).contains(&tol) {
        return Err(DendroError::InvalidMatchTolerance { tol });
    }
    Ok(())
}
