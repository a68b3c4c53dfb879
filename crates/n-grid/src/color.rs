// SPDX-License-Identifier: MIT
//
// Color — the token stored in every grid cell.
//
// A color is one `char`. The grid compares colors for equality and copies
// them around; it never looks inside. Deciding which characters are
// acceptable as colors (printable, single column) is the command parser's
// job, not ours.

use std::fmt;

/// A single-character cell color.
///
/// # Examples
///
/// ```
/// use n_grid::Color;
///
/// let c = Color::new('A');
/// assert_eq!(c.as_char(), 'A');
/// assert_eq!(Color::default(), Color::BLANK);
/// assert_ne!(c, Color::BLANK);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Color(char);

impl Color {
    /// The fill every fresh or reset grid starts with: `'0'`.
    pub const BLANK: Self = Self('0');

    /// Wrap a character as a color.
    #[inline]
    #[must_use]
    pub const fn new(ch: char) -> Self {
        Self(ch)
    }

    /// The character this color renders as.
    #[inline]
    #[must_use]
    pub const fn as_char(self) -> char {
        self.0
    }
}

impl Default for Color {
    fn default() -> Self {
        Self::BLANK
    }
}

impl From<char> for Color {
    fn from(ch: char) -> Self {
        Self(ch)
    }
}

impl From<Color> for char {
    fn from(color: Color) -> Self {
        color.0
    }
}

impl fmt::Display for Color {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}
