//! Editing session — the one owner of the current grid.
//!
//! A session starts with no grid. `I W H` creates one (replacing any
//! previous grid); every other drawing command needs a grid to exist and
//! fails with [`SessionError::NoGrid`] otherwise. That failure is distinct
//! from a grid's own bounds errors, which pass through as
//! [`SessionError::Grid`].
//!
//! The session also owns the [`RegionFiller`] built from its [`Options`],
//! so the fill strategy is a property of the session rather than the grid.

use log::{debug, info};
use n_grid::{FillStrategy, Grid, GridError, RegionFiller};
use thiserror::Error;

use crate::command::Command;
use crate::options::Options;

// ---------------------------------------------------------------------------
// Outcome & errors
// ---------------------------------------------------------------------------

/// What the dispatcher should do after a command ran.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Outcome {
    /// Command done, nothing to show.
    Continue,

    /// Command produced text for the user (e.g. `P`).
    Output(String),

    /// The session is over.
    Quit,
}

/// Why a command could not be executed.
#[derive(Debug, Error)]
pub enum SessionError {
    /// A drawing command arrived before any grid was created.
    #[error("no grid yet: create one with 'I <width> <height>'")]
    NoGrid,

    /// The grid rejected the operation.
    #[error(transparent)]
    Grid(#[from] GridError),
}

// ---------------------------------------------------------------------------
// Session
// ---------------------------------------------------------------------------

/// Holds at most one [`Grid`] and executes [`Command`]s against it.
#[derive(Debug)]
pub struct Session {
    grid: Option<Grid>,
    filler: RegionFiller,
}

impl Session {
    /// A session with no grid.
    #[must_use]
    pub const fn new(options: &Options) -> Self {
        Self {
            grid: None,
            filler: options.filler(),
        }
    }

    /// A session that starts out editing `grid`.
    #[must_use]
    pub fn with_grid(options: &Options, grid: Grid) -> Self {
        Self {
            grid: Some(grid),
            filler: options.filler(),
        }
    }

    /// The current grid, if one has been created.
    #[inline]
    #[must_use]
    pub const fn grid(&self) -> Option<&Grid> {
        self.grid.as_ref()
    }

    /// The filler used for `F` commands.
    #[inline]
    #[must_use]
    pub const fn filler(&self) -> RegionFiller {
        self.filler
    }

    /// Execute one command.
    ///
    /// Multi-cell draws check their corners before writing, so a failed
    /// command leaves the grid as it was.
    ///
    /// # Errors
    ///
    /// - [`SessionError::NoGrid`] for drawing commands before `I`.
    /// - [`SessionError::Grid`] for invalid sizes, out-of-bounds
    ///   coordinates, and failed saves.
    pub fn execute(&mut self, command: Command) -> Result<Outcome, SessionError> {
        debug!("executing {command:?}");

        match command {
            Command::Create { width, height } => {
                let grid = Grid::new(width, height)?;
                info!("created {width}x{height} grid");
                self.grid = Some(grid);
            }
            Command::Clear => self.current_mut()?.reset(),
            Command::Pixel { x, y, color } => self.current_mut()?.set(x, y, color)?,
            Command::Vertical { x, y1, y2, color } => {
                self.current_mut()?.draw_vertical_segment(x, y1, y2, color)?;
            }
            Command::Horizontal { x1, x2, y, color } => {
                self.current_mut()?.draw_horizontal_segment(x1, x2, y, color)?;
            }
            Command::Rectangle {
                x1,
                y1,
                x2,
                y2,
                color,
            } => self.current_mut()?.draw_rectangle(x1, y1, x2, y2, color)?,
            Command::Fill { x, y, color } => {
                let filler = self.filler;
                let grid = self.current_mut()?;
                let strategy = filler.effective_strategy(grid);
                if strategy != filler.strategy() {
                    debug!(
                        "{} cells exceed recursion limit {}, filling with {strategy}",
                        grid.cell_count(),
                        filler.recursion_limit()
                    );
                }
                let painted = filler.fill_region(grid, x, y, color)?;
                debug!("filled {painted} cells from ({x}, {y}) with '{color}' ({strategy})");
            }
            Command::Save(path) => {
                self.current()?.save(&path)?;
                info!("saved grid to {}", path.display());
            }
            Command::Show => return Ok(Outcome::Output(self.current()?.serialize())),
            Command::Exit => return Ok(Outcome::Quit),
        }
        Ok(Outcome::Continue)
    }

    /// The fill strategy a `F` command would use right now.
    ///
    /// `None` while there is no grid.
    #[must_use]
    pub fn effective_fill_strategy(&self) -> Option<FillStrategy> {
        self.grid
            .as_ref()
            .map(|grid| self.filler.effective_strategy(grid))
    }

    fn current(&self) -> Result<&Grid, SessionError> {
        self.grid.as_ref().ok_or(SessionError::NoGrid)
    }

    fn current_mut(&mut self) -> Result<&mut Grid, SessionError> {
        self.grid.as_mut().ok_or(SessionError::NoGrid)
    }
}

impl Default for Session {
    fn default() -> Self {
        Self::new(&Options::default())
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
