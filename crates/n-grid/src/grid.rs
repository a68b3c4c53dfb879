// SPDX-License-Identifier: MIT
//
// Grid — the 2D canvas of colors that every command paints to.
//
// Design:
//
//   - Flat `Vec<Color>` with row-major indexing (`y * width + x`). A row's
//     cells are contiguous, so serialization is a linear scan and a
//     horizontal run is a single slice fill.
//
//   - The public contract is 1-based and signed: valid coordinates are
//     `x ∈ [1, width]`, `y ∈ [1, height]`. Zero and negatives are
//     representable so they can be rejected with `OutOfBounds` instead of
//     wrapping. The `x - 1`, `y - 1` translation happens in `index` and
//     nowhere else.
//
//   - Multi-cell draws check both corners before writing anything. Two
//     in-bounds corners of an axis-aligned box put every cell of the box in
//     bounds, so a draw either paints the whole shape or fails untouched.
//
//   - An inverted range (`y1 > y2`, `x1 > x2`) is empty. Arguments are never
//     reordered behind the caller's back.
//
// Persisted format:
//
//   `height` lines of exactly `width` color characters, each ending in
//   `\n`, top row first. No header, no trailing metadata.

use std::fmt;
use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::Path;
use std::str::FromStr;

use crate::color::Color;
use crate::error::{GridError, Result};

// ─── Grid ───────────────────────────────────────────────────────────────────────

/// A `width × height` canvas of [`Color`]s addressed with 1-based coordinates.
///
/// # Examples
///
/// ```
/// use n_grid::{Color, Grid};
///
/// let mut grid = Grid::new(5, 6).unwrap();
/// grid.set(1, 1, Color::new('F')).unwrap();
/// grid.set(3, 1, Color::new('F')).unwrap();
/// grid.set(2, 3, Color::new('A')).unwrap();
/// grid.set(5, 6, Color::new('A')).unwrap();
///
/// assert_eq!(
///     grid.serialize(),
///     "F0F00\n00000\n0A000\n00000\n00000\n0000A\n"
/// );
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Grid {
    width: usize,
    height: usize,
    cells: Vec<Color>,
}

impl Grid {
    // ─── Construction ────────────────────────────────────────────────────

    /// Create a grid with every cell set to [`Color::BLANK`].
    ///
    /// # Errors
    ///
    /// [`GridError::InvalidSize`] if either dimension is below 1, or if
    /// `width × height` overflows `usize`.
    pub fn new(width: i32, height: i32) -> Result<Self> {
        let invalid = || GridError::InvalidSize {
            width: i64::from(width),
            height: i64::from(height),
        };
        let w = dimension(width).ok_or_else(invalid)?;
        let h = dimension(height).ok_or_else(invalid)?;
        let size = w.checked_mul(h).ok_or_else(invalid)?;
        Ok(Self {
            width: w,
            height: h,
            cells: vec![Color::BLANK; size],
        })
    }

    /// Parse the persisted text format back into a grid.
    ///
    /// Accepts `\n` or `\r\n` line endings and a missing final newline.
    /// Every character of a row becomes one cell.
    ///
    /// # Errors
    ///
    /// - [`GridError::InvalidSize`] for empty input or an empty first row.
    /// - [`GridError::RaggedRow`] when a row's length differs from the first.
    pub fn from_text(text: &str) -> Result<Self> {
        let mut width = 0;
        let mut height = 0;
        let mut cells = Vec::new();

        for (row, line) in text.lines().enumerate() {
            let before = cells.len();
            cells.extend(line.chars().map(Color::new));
            let found = cells.len() - before;
            if row == 0 {
                width = found;
            } else if found != width {
                return Err(GridError::RaggedRow {
                    row: row + 1,
                    expected: width,
                    found,
                });
            }
            height += 1;
        }

        if width == 0 || height == 0 || i32::try_from(width.max(height)).is_err() {
            return Err(GridError::InvalidSize {
                width: i64::try_from(width).unwrap_or(i64::MAX),
                height: i64::try_from(height).unwrap_or(i64::MAX),
            });
        }

        Ok(Self {
            width,
            height,
            cells,
        })
    }

    // ─── Accessors ───────────────────────────────────────────────────────

    /// Grid width in columns.
    #[inline]
    #[must_use]
    pub const fn width(&self) -> usize {
        self.width
    }

    /// Grid height in rows.
    #[inline]
    #[must_use]
    pub const fn height(&self) -> usize {
        self.height
    }

    /// Total number of cells (`width × height`).
    #[inline]
    #[must_use]
    pub fn cell_count(&self) -> usize {
        self.cells.len()
    }

    /// Whether 1-based `(x, y)` lies on the grid. Never fails.
    #[inline]
    #[must_use]
    pub fn is_in_bounds(&self, x: i32, y: i32) -> bool {
        self.index(x, y).is_some()
    }

    /// The color at `(x, y)`, or `None` off the grid.
    ///
    /// The non-failing twin of [`get`](Self::get), for probing neighbours.
    #[inline]
    #[must_use]
    pub fn color_at(&self, x: i32, y: i32) -> Option<Color> {
        self.index(x, y).map(|idx| self.cells[idx])
    }

    /// The color at 1-based `(x, y)`.
    ///
    /// # Errors
    ///
    /// [`GridError::OutOfBounds`] if `x ∉ [1, width]` or `y ∉ [1, height]`.
    pub fn get(&self, x: i32, y: i32) -> Result<Color> {
        let idx = self.checked_index(x, y)?;
        Ok(self.cells[idx])
    }

    /// Rows top to bottom, each a slice of `width` colors.
    pub fn rows(&self) -> impl Iterator<Item = &[Color]> {
        self.cells.chunks_exact(self.width)
    }

    /// Convert 1-based `(x, y)` to a flat index, or `None` off the grid.
    fn index(&self, x: i32, y: i32) -> Option<usize> {
        let col = usize::try_from(x).ok()?.checked_sub(1)?;
        let row = usize::try_from(y).ok()?.checked_sub(1)?;
        (col < self.width && row < self.height).then(|| row * self.width + col)
    }

    fn checked_index(&self, x: i32, y: i32) -> Result<usize> {
        self.index(x, y).ok_or(GridError::OutOfBounds {
            x,
            y,
            width: self.width,
            height: self.height,
        })
    }

    // ─── Mutation ────────────────────────────────────────────────────────

    /// Reset every cell to [`Color::BLANK`], keeping the dimensions.
    pub fn reset(&mut self) {
        self.cells.fill(Color::BLANK);
    }

    /// Write `color` into the single cell at `(x, y)`.
    ///
    /// # Errors
    ///
    /// [`GridError::OutOfBounds`] under the same contract as [`get`](Self::get).
    /// Nothing is written on error.
    pub fn set(&mut self, x: i32, y: i32, color: Color) -> Result<()> {
        let idx = self.checked_index(x, y)?;
        self.cells[idx] = color;
        Ok(())
    }

    /// Paint column `x` from row `y1` through `y2` inclusive.
    ///
    /// `y1 > y2` is an empty range: nothing is drawn and no error is raised.
    ///
    /// # Errors
    ///
    /// [`GridError::OutOfBounds`] if either endpoint is off the grid. The
    /// check runs before any cell is written.
    pub fn draw_vertical_segment(&mut self, x: i32, y1: i32, y2: i32, color: Color) -> Result<()> {
        self.draw_rectangle(x, y1, x, y2, color)
    }

    /// Paint row `y` from column `x1` through `x2` inclusive.
    ///
    /// `x1 > x2` is an empty range: nothing is drawn and no error is raised.
    ///
    /// # Errors
    ///
    /// [`GridError::OutOfBounds`] if either endpoint is off the grid. The
    /// check runs before any cell is written.
    pub fn draw_horizontal_segment(
        &mut self,
        x1: i32,
        x2: i32,
        y: i32,
        color: Color,
    ) -> Result<()> {
        self.draw_rectangle(x1, y, x2, y, color)
    }

    /// Fill every cell of `[x1, x2] × [y1, y2]` with `color`.
    ///
    /// The rectangle is solid, not an outline. An inverted axis makes it
    /// empty.
    ///
    /// # Errors
    ///
    /// [`GridError::OutOfBounds`] if either corner is off the grid. The
    /// check runs before any cell is written.
    pub fn draw_rectangle(
        &mut self,
        x1: i32,
        y1: i32,
        x2: i32,
        y2: i32,
        color: Color,
    ) -> Result<()> {
        if x1 > x2 || y1 > y2 {
            return Ok(());
        }

        let top_left = self.checked_index(x1, y1)?;
        let bottom_right = self.checked_index(x2, y2)?;

        let first_row = top_left / self.width;
        let last_row = bottom_right / self.width;
        let left = top_left % self.width;
        let right = bottom_right % self.width;

        for row in first_row..=last_row {
            let row_start = row * self.width;
            self.cells[row_start + left..=row_start + right].fill(color);
        }
        Ok(())
    }

    // ─── Serialization ───────────────────────────────────────────────────

    /// The persisted text form: one `\n`-terminated line per row.
    #[must_use]
    pub fn serialize(&self) -> String {
        let mut out = String::with_capacity((self.width + 1) * self.height);
        for row in self.rows() {
            out.extend(row.iter().map(|c| c.as_char()));
            out.push('\n');
        }
        out
    }

    /// Write the serialized grid into any writer.
    ///
    /// # Errors
    ///
    /// [`GridError::Io`] if the writer fails.
    pub fn write_to<W: Write>(&self, mut writer: W) -> Result<()> {
        writer.write_all(self.serialize().as_bytes())?;
        Ok(())
    }

    /// Save the serialized grid to `path`, creating or truncating the file.
    ///
    /// The file is flushed explicitly so a failed final write surfaces here
    /// instead of being swallowed on drop. The handle is closed on every
    /// return path.
    ///
    /// # Errors
    ///
    /// [`GridError::Io`] if the file can't be created or written.
    pub fn save(&self, path: impl AsRef<Path>) -> Result<()> {
        let mut writer = BufWriter::new(File::create(path)?);
        self.write_to(&mut writer)?;
        writer.flush()?;
        Ok(())
    }
}

impl fmt::Display for Grid {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.serialize())
    }
}

impl FromStr for Grid {
    type Err = GridError;

    fn from_str(s: &str) -> Result<Self> {
        Self::from_text(s)
    }
}

/// A positive dimension as `usize`, or `None` for zero and negatives.
fn dimension(value: i32) -> Option<usize> {
    usize::try_from(value).ok().filter(|&n| n > 0)
}

// ─── Tests ──────────────────────────────────────────────────────────────────────
