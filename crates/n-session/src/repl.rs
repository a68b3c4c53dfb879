//! Line dispatcher — read commands, run them, report what went wrong.
//!
//! The loop is deliberately forgiving: a line that fails to parse or a
//! command the session rejects prints `error: <message>` and the loop moves
//! on to the next line. Only `X`, end of input, or an I/O failure on the
//! streams themselves stop it.
//!
//! Input and output are generic (`BufRead` / `Write`) so the same loop runs
//! against stdin and stdout, a script file, or in-memory buffers in tests.

use std::io::{self, BufRead, Write};

use log::warn;

use crate::command::parse_line;
use crate::session::{Outcome, Session};

/// Counters for one [`run`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct RunSummary {
    /// Commands that executed successfully (including the final `X`).
    pub executed: usize,

    /// Lines that failed to parse or execute.
    pub errors: usize,

    /// Whether the run ended with `X` rather than end of input.
    pub quit: bool,
}

/// Drive `session` with commands read line by line from `input`.
///
/// Command output (`P`) and error messages go to `output`. With `prompt`
/// set, `> ` is written before each line is read.
///
/// # Errors
///
/// Only I/O failures on `input` or `output` are returned. Command errors are
/// reported on `output` and counted in the summary.
pub fn run<R: BufRead, W: Write>(
    session: &mut Session,
    mut input: R,
    mut output: W,
    prompt: bool,
) -> io::Result<RunSummary> {
    let mut summary = RunSummary::default();
    let mut buf = Vec::new();
    let mut line_no = 0;

    loop {
        if prompt {
            output.write_all(b"> ")?;
            output.flush()?;
        }

        buf.clear();
        if input.read_until(b'\n', &mut buf)? == 0 {
            if prompt {
                writeln!(output)?;
            }
            break;
        }
        line_no += 1;

        let result = match decode_line(&buf) {
            Err(e) => Err(e),
            Ok(line) => match parse_line(line) {
                Ok(None) => continue,
                Ok(Some(command)) => session.execute(command).map_err(|e| e.to_string()),
                Err(e) => Err(e.to_string()),
            },
        };

        match result {
            Ok(Outcome::Continue) => summary.executed += 1,
            Ok(Outcome::Output(text)) => {
                summary.executed += 1;
                output.write_all(text.as_bytes())?;
            }
            Ok(Outcome::Quit) => {
                summary.executed += 1;
                summary.quit = true;
                break;
            }
            Err(message) => {
                summary.errors += 1;
                warn!("line {line_no}: {message}");
                writeln!(output, "error: {message}")?;
            }
        }
    }

    output.flush()?;
    Ok(summary)
}

/// The text of one raw input line, without its `\n` or `\r\n` terminator.
fn decode_line(raw: &[u8]) -> Result<&str, String> {
    let raw = raw.strip_suffix(b"\n").unwrap_or(raw);
    let raw = raw.strip_suffix(b"\r").unwrap_or(raw);
    std::str::from_utf8(raw).map_err(|e| format!("line is not valid UTF-8: {e}"))
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;
    use crate::options::Options;
    use n_grid::FillStrategy;
    use pretty_assertions::assert_eq;

    /// Run `script` through a fresh session and return (output, summary, session).
    fn drive(script: &str, prompt: bool) -> (String, RunSummary, Session) {
        let mut session = Session::default();
        let mut out = Vec::new();
        let summary = run(&mut session, script.as_bytes(), &mut out, prompt).unwrap();
        (String::from_utf8(out).unwrap(), summary, session)
    }

    #[test]
    fn prints_grid_on_show() {
        let (out, summary, _) = drive("I 5 6\nL 1 1 F\nL 3 1 F\nL 2 3 A\nL 5 6 A\nP\n", false);
        assert_eq!(out, "F0F00\n00000\n0A000\n00000\n00000\n0000A\n");
        assert_eq!(
            summary,
            RunSummary {
                executed: 6,
                errors: 0,
                quit: false
            }
        );
    }

    #[test]
    fn errors_are_reported_and_skipped() {
        let script = "L 1 1 A\nI 3 2\nL 9 9 A\nZ\nL 1 1 B\nP\n";
        let (out, summary, _) = drive(script, false);
        assert_eq!(
            out,
            "error: no grid yet: create one with 'I <width> <height>'\n\
             error: coordinate (9, 9) is outside the 3x2 grid\n\
             error: unknown command 'Z'\n\
             B00\n000\n"
        );
        assert_eq!(summary.errors, 3);
        assert_eq!(summary.executed, 3);
    }

    #[test]
    fn exit_stops_reading() {
        let (out, summary, session) = drive("I 2 1\nX\nL 1 1 Q\nP\n", false);
        assert_eq!(out, "");
        assert!(summary.quit);
        assert_eq!(summary.executed, 2);
        assert_eq!(session.grid().unwrap().serialize(), "00\n");
    }

    #[test]
    fn blank_lines_and_comments_are_ignored() {
        let (out, summary, _) = drive("\n# setup\nI 1 1\n\n   \nP\n", false);
        assert_eq!(out, "0\n");
        assert_eq!(summary.executed, 2);
        assert_eq!(summary.errors, 0);
    }

    #[test]
    fn invalid_utf8_line_is_reported_and_skipped() {
        let mut session = Session::default();
        let mut out = Vec::new();
        let input: &[u8] = b"I 2 1\nL 1 1 \xff\nL 2 1 Q\nP\n";
        let summary = run(&mut session, input, &mut out, false).unwrap();

        let out = String::from_utf8(out).unwrap();
        assert!(out.starts_with("error: line is not valid UTF-8"), "{out}");
        assert!(out.ends_with("\n0Q\n"), "{out}");
        assert_eq!(
            summary,
            RunSummary {
                executed: 3,
                errors: 1,
                quit: false
            }
        );
    }

    #[test]
    fn crlf_and_unterminated_last_line() {
        let (out, summary, _) = drive("I 2 1\r\nL 2 1 Q\r\nP", false);
        assert_eq!(out, "0Q\n");
        assert_eq!(summary.errors, 0);
    }

    #[test]
    fn prompt_is_written_per_line() {
        let (out, _, _) = drive("I 1 1\nP\n", true);
        assert_eq!(out, "> > 0\n> \n");
    }

    #[test]
    fn prompt_not_repeated_after_exit() {
        let (out, _, _) = drive("X\nP\n", true);
        assert_eq!(out, "> ");
    }

    #[test]
    fn fill_scenario_through_dispatcher() {
        let script = "I 10 9\nK 1 1 4 2 X\nK 2 7 8 8 E\nK 1 3 2 6 R\nF 2 2 K\nF 3 8 J\nP\nX\n";
        let expected = "KKKK000000\nKKKK000000\nRR00000000\nRR00000000\nRR00000000\n\
                        RR00000000\n0JJJJJJJ00\n0JJJJJJJ00\n0000000000\n";

        for strategy in [FillStrategy::Iterative, FillStrategy::Recursive] {
            let mut session = Session::new(&Options::new().with_fill_strategy(strategy));
            let mut out = Vec::new();
            let summary = run(&mut session, script.as_bytes(), &mut out, false).unwrap();
            assert_eq!(String::from_utf8(out).unwrap(), expected);
            assert!(summary.quit);
        }
    }

    #[test]
    fn save_command_writes_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("art.txt");
        let script = format!("I 3 1\nH 1 3 1 =\nS {}\n", path.display());

        let (out, summary, _) = drive(&script, false);
        assert_eq!(out, "");
        assert_eq!(summary.errors, 0);
        assert_eq!(std::fs::read_to_string(&path).unwrap(), "===\n");
    }
}
