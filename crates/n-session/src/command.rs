//! Command language — one line, one drawing command.
//!
//! Each line starts with a single upper-case letter followed by
//! whitespace-separated arguments. Coordinates are 1-based integers; a color
//! is exactly one printable, single-column character.
//!
//! # Supported commands
//!
//! | Command           | Action                                          |
//! |-------------------|-------------------------------------------------|
//! | `I W H`           | Create a new `W × H` grid (replaces any current) |
//! | `C`               | Clear the grid back to `0`                      |
//! | `L X Y C`         | Color the cell at `(X, Y)`                      |
//! | `V X Y1 Y2 C`     | Vertical segment in column `X`, rows `Y1..=Y2`  |
//! | `H X1 X2 Y C`     | Horizontal segment in row `Y`, columns `X1..=X2` |
//! | `K X1 Y1 X2 Y2 C` | Solid rectangle                                 |
//! | `F X Y C`         | Fill the region containing `(X, Y)`             |
//! | `S NAME`          | Save the grid to file `NAME`                    |
//! | `P`               | Print the grid                                  |
//! | `X`               | Exit                                            |
//!
//! Blank lines and lines starting with `#` are ignored by [`parse_line`], so
//! command scripts can carry comments.
//!
//! # Architecture
//!
//! Parsing is a plain `match` on the command letter. Each arm checks its
//! argument count, converts the arguments, and builds a [`Command`]. The
//! session matches on the result to execute it.

use std::path::PathBuf;

use n_grid::Color;
use thiserror::Error;
use unicode_width::UnicodeWidthChar;

// ---------------------------------------------------------------------------
// Command
// ---------------------------------------------------------------------------

/// A parsed drawing command.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    /// `I W H` — create a new grid.
    Create { width: i32, height: i32 },

    /// `C` — reset every cell to the blank color.
    Clear,

    /// `L X Y C` — color one cell.
    Pixel { x: i32, y: i32, color: Color },

    /// `V X Y1 Y2 C` — vertical segment.
    Vertical {
        x: i32,
        y1: i32,
        y2: i32,
        color: Color,
    },

    /// `H X1 X2 Y C` — horizontal segment.
    Horizontal {
        x1: i32,
        x2: i32,
        y: i32,
        color: Color,
    },

    /// `K X1 Y1 X2 Y2 C` — solid rectangle.
    Rectangle {
        x1: i32,
        y1: i32,
        x2: i32,
        y2: i32,
        color: Color,
    },

    /// `F X Y C` — region fill.
    Fill { x: i32, y: i32, color: Color },

    /// `S NAME` — save to a file. The name is the rest of the line, so it
    /// may contain spaces.
    Save(PathBuf),

    /// `P` — print the serialized grid.
    Show,

    /// `X` — end the session.
    Exit,
}

/// Why a line could not be parsed into a [`Command`].
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CommandError {
    /// The first token isn't a known command letter.
    #[error("unknown command '{0}'")]
    UnknownCommand(String),

    /// Fewer arguments than the command takes.
    #[error("'{command}' takes {expected} argument(s), got {found}")]
    MissingArgument {
        command: char,
        expected: usize,
        found: usize,
    },

    /// More arguments than the command takes.
    #[error("'{command}' takes {expected} argument(s), got {found}")]
    TooManyArguments {
        command: char,
        expected: usize,
        found: usize,
    },

    /// An argument that should be an integer isn't one.
    #[error("'{0}' is not a valid integer")]
    InvalidNumber(String),

    /// A color argument that isn't one printable, single-column character.
    #[error("'{0}' is not a valid color (expected one printable character)")]
    InvalidColor(String),
}

impl Command {
    /// Parse one command line (already known to be non-blank).
    ///
    /// # Errors
    ///
    /// Returns a [`CommandError`] describing the first problem found.
    pub fn parse(input: &str) -> Result<Self, CommandError> {
        let trimmed = input.trim();

        // Split into command letter and the raw argument text.
        let (name, rest) = trimmed
            .split_once(char::is_whitespace)
            .map_or((trimmed, ""), |(name, rest)| (name, rest.trim_start()));
        let args: Vec<&str> = rest.split_whitespace().collect();

        match name {
            "I" => {
                let [w, h] = arguments::<2>('I', &args)?;
                Ok(Self::Create {
                    width: number(w)?,
                    height: number(h)?,
                })
            }
            "C" => {
                let [] = arguments::<0>('C', &args)?;
                Ok(Self::Clear)
            }
            "L" => {
                let [x, y, c] = arguments::<3>('L', &args)?;
                Ok(Self::Pixel {
                    x: number(x)?,
                    y: number(y)?,
                    color: color(c)?,
                })
            }
            "V" => {
                let [x, y1, y2, c] = arguments::<4>('V', &args)?;
                Ok(Self::Vertical {
                    x: number(x)?,
                    y1: number(y1)?,
                    y2: number(y2)?,
                    color: color(c)?,
                })
            }
            "H" => {
                let [x1, x2, y, c] = arguments::<4>('H', &args)?;
                Ok(Self::Horizontal {
                    x1: number(x1)?,
                    x2: number(x2)?,
                    y: number(y)?,
                    color: color(c)?,
                })
            }
            "K" => {
                let [x1, y1, x2, y2, c] = arguments::<5>('K', &args)?;
                Ok(Self::Rectangle {
                    x1: number(x1)?,
                    y1: number(y1)?,
                    x2: number(x2)?,
                    y2: number(y2)?,
                    color: color(c)?,
                })
            }
            "F" => {
                let [x, y, c] = arguments::<3>('F', &args)?;
                Ok(Self::Fill {
                    x: number(x)?,
                    y: number(y)?,
                    color: color(c)?,
                })
            }
            "S" => {
                if rest.is_empty() {
                    return Err(CommandError::MissingArgument {
                        command: 'S',
                        expected: 1,
                        found: 0,
                    });
                }
                Ok(Self::Save(PathBuf::from(rest)))
            }
            "P" => {
                let [] = arguments::<0>('P', &args)?;
                Ok(Self::Show)
            }
            "X" => {
                let [] = arguments::<0>('X', &args)?;
                Ok(Self::Exit)
            }
            _ => Err(CommandError::UnknownCommand(name.to_string())),
        }
    }

    /// The letter that introduces this command.
    #[must_use]
    pub const fn letter(&self) -> char {
        match self {
            Self::Create { .. } => 'I',
            Self::Clear => 'C',
            Self::Pixel { .. } => 'L',
            Self::Vertical { .. } => 'V',
            Self::Horizontal { .. } => 'H',
            Self::Rectangle { .. } => 'K',
            Self::Fill { .. } => 'F',
            Self::Save(_) => 'S',
            Self::Show => 'P',
            Self::Exit => 'X',
        }
    }
}

// ---------------------------------------------------------------------------
// Parsing helpers
// ---------------------------------------------------------------------------

/// Parse a full input line.
///
/// Returns `Ok(None)` for blank lines and `#` comments.
///
/// # Errors
///
/// Propagates the [`CommandError`] from [`Command::parse`].
pub fn parse_line(line: &str) -> Result<Option<Command>, CommandError> {
    let trimmed = line.trim();
    if trimmed.is_empty() || trimmed.starts_with('#') {
        return Ok(None);
    }
    Command::parse(trimmed).map(Some)
}

/// Check that `args` has exactly `N` entries and return them as an array.
fn arguments<'a, const N: usize>(
    command: char,
    args: &[&'a str],
) -> Result<[&'a str; N], CommandError> {
    args.try_into().map_err(|_| {
        let found = args.len();
        if found < N {
            CommandError::MissingArgument {
                command,
                expected: N,
                found,
            }
        } else {
            CommandError::TooManyArguments {
                command,
                expected: N,
                found,
            }
        }
    })
}

/// Parse a signed decimal integer.
fn number(token: &str) -> Result<i32, CommandError> {
    token
        .parse()
        .map_err(|_| CommandError::InvalidNumber(token.to_string()))
}

/// Parse a color: exactly one character that occupies one terminal column.
///
/// Control characters (width `None`) and wide characters (width 2) are
/// rejected, since either would break the rectangular text format.
fn color(token: &str) -> Result<Color, CommandError> {
    let mut chars = token.chars();
    match (chars.next(), chars.next()) {
        (Some(ch), None) if !ch.is_control() && ch.width() == Some(1) => Ok(Color::new(ch)),
        _ => Err(CommandError::InvalidColor(token.to_string())),
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
