// SPDX-License-Identifier: MIT
//
// Error types for grid operations.
//
// Every failure is local and synchronous: a bad size, a coordinate off the
// canvas, malformed persisted text, or a write that didn't complete. None
// of them are worth retrying.

use std::io;

use thiserror::Error;

/// Errors returned by [`Grid`](crate::Grid) and
/// [`RegionFiller`](crate::RegionFiller).
#[derive(Debug, Error)]
pub enum GridError {
    /// A dimension was zero, negative, or too large to allocate.
    #[error("invalid grid size {width}x{height}: both dimensions must be at least 1")]
    InvalidSize { width: i64, height: i64 },

    /// A 1-based coordinate fell outside `[1, width] × [1, height]`.
    #[error("coordinate ({x}, {y}) is outside the {width}x{height} grid")]
    OutOfBounds {
        x: i32,
        y: i32,
        width: usize,
        height: usize,
    },

    /// Persisted text whose rows disagree on length.
    #[error("row {row} has {found} cells, expected {expected}")]
    RaggedRow {
        row: usize,
        expected: usize,
        found: usize,
    },

    /// Writing the serialized grid failed.
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),
}

/// Result alias for grid operations.
pub type Result<T> = std::result::Result<T, GridError>;
