// SPDX-License-Identifier: MIT
//
// n-paint — a text-mode bitmap editor.
//
// This is the binary that wires the crates together:
//
//   n-grid    → the grid, drawing primitives, region fill
//   n-session → command parsing, the session that owns the grid, the
//               line dispatcher
//
// Each input line flows through:
//
//   stdin / script → parse_line → Session::execute → Grid → stdout
//
// Logging goes to stderr through env_logger (`RUST_LOG`, default `warn`),
// so it never mixes with grid output on stdout.

use std::fs::File;
use std::io::{self, BufReader, IsTerminal};
use std::path::PathBuf;

use anyhow::Context;
use clap::Parser;
use clap::builder::RangedU64ValueParser;
use log::info;

use n_grid::Grid;
use n_grid::fill::{DEFAULT_RECURSION_LIMIT, FillStrategy, MAX_RECURSION_LIMIT};
use n_session::{Options, Session};

// ─── Command line ───────────────────────────────────────────────────────────

#[derive(Parser, Debug)]
#[command(name = "n-paint", version, about = "A text-mode bitmap editor")]
struct Cli {
    #[arg(
        help = "Region fill strategy: iterative or recursive.",
        long,
        default_value_t = FillStrategy::Iterative
    )]
    fill: FillStrategy,

    #[arg(
        help = "Largest grid (in cells) the recursive fill runs on before falling back to iterative (at most 4096).",
        long,
        default_value_t = DEFAULT_RECURSION_LIMIT,
        value_parser = RangedU64ValueParser::<usize>::new().range(0..=MAX_RECURSION_LIMIT as u64)
    )]
    recursion_limit: usize,

    #[arg(help = "Start by editing a previously saved grid.", long)]
    open: Option<PathBuf>,

    #[arg(help = "Read commands from this file instead of stdin.")]
    script: Option<PathBuf>,
}

impl Cli {
    fn options(&self) -> Options {
        Options::new()
            .with_fill_strategy(self.fill)
            .with_recursion_limit(self.recursion_limit)
    }

    /// Build the session, loading `--open` if given.
    fn session(&self) -> anyhow::Result<Session> {
        let options = self.options();
        info!("session options: {options}");

        let Some(path) = &self.open else {
            return Ok(Session::new(&options));
        };
        let text = std::fs::read_to_string(path)
            .with_context(|| format!("failed to read {}", path.display()))?;
        let grid = Grid::from_text(&text)
            .with_context(|| format!("{} is not a valid grid", path.display()))?;
        info!(
            "opened {} ({}x{})",
            path.display(),
            grid.width(),
            grid.height()
        );
        Ok(Session::with_grid(&options, grid))
    }
}

// ─── Entry point ────────────────────────────────────────────────────────────

fn main() -> anyhow::Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("warn")).init();

    let cli = Cli::parse();
    let mut session = cli.session()?;
    let stdout = io::stdout().lock();

    let summary = if let Some(path) = &cli.script {
        let file =
            File::open(path).with_context(|| format!("failed to open {}", path.display()))?;
        n_session::run(&mut session, BufReader::new(file), stdout, false)?
    } else {
        let stdin = io::stdin();
        let prompt = stdin.is_terminal();
        n_session::run(&mut session, stdin.lock(), stdout, prompt)?
    };

    info!(
        "finished: {} command(s), {} error(s)",
        summary.executed, summary.errors
    );
    Ok(())
}

// ─── Tests ──────────────────────────────────────────────────────────────────
