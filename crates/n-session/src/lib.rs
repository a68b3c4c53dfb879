//! # n-session — Editing session for n-paint
//!
//! Everything between a line of user text and the grid core:
//!
//! - **[`command`]** — `Command` enum and the single-letter command parser
//! - **[`options`]** — `Options` chosen when a session starts (fill strategy,
//!   recursion bound)
//! - **[`session`]** — `Session`, the sole owner of the current `Grid`
//! - **[`repl`]** — the line dispatcher that reads commands, runs them, and
//!   reports errors
//!
//! The grid crate never logs or prints; this crate is where user-facing
//! messages and `log` records come from.

pub mod command;
pub mod options;
pub mod repl;
pub mod session;

pub use command::{Command, CommandError};
pub use options::Options;
pub use repl::{RunSummary, run};
pub use session::{Outcome, Session, SessionError};
