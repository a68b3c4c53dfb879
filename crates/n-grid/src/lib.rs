// SPDX-License-Identifier: MIT
//
// n-grid — Grid core for n-paint.
//
// A rectangular canvas of single-character colors with bounds-checked
// access, solid drawing primitives, a plain-text serialization, and a
// 4-connected region fill with two interchangeable traversal strategies.
//
// The crate never parses user input, prints, or logs. Callers hand it
// already-parsed 1-based coordinates and colors; every failure comes back
// as a `GridError` for the session layer to report.

pub mod color;
pub mod error;
pub mod fill;
pub mod grid;

pub use color::Color;
pub use error::{GridError, Result};
pub use fill::{FillStrategy, ParseStrategyError, RegionFiller};
pub use grid::Grid;
