//! Session options — settings fixed when a session starts.
//!
//! | Option            | Type          | Default     |
//! |-------------------|---------------|-------------|
//! | `fill_strategy`   | strategy name | `iterative` |
//! | `recursion_limit` | cells         | `4096`      |
//!
//! The binary fills these in from command-line flags. They are handed to
//! [`Session::new`](crate::Session::new) and never change afterwards; the
//! grid itself knows nothing about them.

use std::fmt;

use n_grid::RegionFiller;
use n_grid::fill::{DEFAULT_RECURSION_LIMIT, FillStrategy};

/// Configuration for a [`Session`](crate::Session).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Options {
    /// How region fills traverse the grid.
    pub fill_strategy: FillStrategy,

    /// Largest grid, in cells, on which the recursive strategy may run.
    /// Bigger grids fall back to the iterative walk. The filler clamps it to
    /// [`MAX_RECURSION_LIMIT`](n_grid::fill::MAX_RECURSION_LIMIT).
    pub recursion_limit: usize,
}

impl Options {
    /// Default options: iterative fill, default recursion limit.
    #[must_use]
    pub const fn new() -> Self {
        Self {
            fill_strategy: FillStrategy::Iterative,
            recursion_limit: DEFAULT_RECURSION_LIMIT,
        }
    }

    /// Set the fill strategy.
    #[must_use]
    pub const fn with_fill_strategy(mut self, strategy: FillStrategy) -> Self {
        self.fill_strategy = strategy;
        self
    }

    /// Set the recursion limit.
    #[must_use]
    pub const fn with_recursion_limit(mut self, limit: usize) -> Self {
        self.recursion_limit = limit;
        self
    }

    /// The region filler these options describe.
    #[must_use]
    pub const fn filler(&self) -> RegionFiller {
        RegionFiller::new(self.fill_strategy).with_recursion_limit(self.recursion_limit)
    }
}

impl Default for Options {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Display for Options {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "fill={} recursion-limit={}",
            self.fill_strategy, self.recursion_limit
        )
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
