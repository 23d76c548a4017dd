//! Line-oriented console driver and the per-exercise command shells.
//!
//! A [`Shell`] interprets one non-blank input line at a time and writes its
//! replies; the [`Console`] owns the read loop, prompts, and end-of-input
//! handling. Shells never see blank lines or trailing newlines.
//!
//! # Usage
//!
//! ```
//! use queue_desk::shell::{Console, TrolleyShell};
//!
//! let input = "CREATE_TRL t1 Park Depot\nTRLS\n";
//! let mut output = Vec::new();
//! Console::new()
//!     .with_prompts(false)
//!     .run(&mut TrolleyShell::new(), input.as_bytes(), &mut output)
//!     .unwrap();
//! assert_eq!(String::from_utf8(output).unwrap(), "TRL t1: Park Depot\n");
//! ```

mod queue;
mod roster;
mod trolley;
mod warehouse;

pub use queue::{QueueShell, ReportFormat};
pub use roster::RosterShell;
pub use trolley::TrolleyShell;
pub use warehouse::WarehouseShell;

use std::io::{self, BufRead, Write};

use tracing::debug;

/// Prompt written before each read when prompts are enabled.
pub const PROMPT: &str = "<<< ";

/// Whether the console keeps reading after a command.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Flow {
    Continue,
    Finish,
}

/// A command interpreter driven by [`Console`].
pub trait Shell {
    /// Short name used in logs.
    fn name(&self) -> &'static str;

    /// Instruction shown once before the first prompt.
    fn greeting(&self) -> Option<&'static str> {
        None
    }

    /// Handles one trimmed, non-blank line.
    fn execute(&mut self, line: &str, out: &mut dyn Write) -> io::Result<Flow>;

    /// Called once after [`Flow::Finish`] or end of input.
    fn finish(&mut self, _out: &mut dyn Write) -> io::Result<()> {
        Ok(())
    }
}

/// Read-eval-print loop over any buffered reader and writer.
#[derive(Debug, Clone)]
pub struct Console {
    prompts: bool,
}

impl Console {
    /// Creates a console that shows prompts.
    pub fn new() -> Self {
        Self { prompts: true }
    }

    /// Enables or disables prompts and greetings.
    pub fn with_prompts(mut self, prompts: bool) -> Self {
        self.prompts = prompts;
        self
    }

    /// Runs `shell` until it finishes or `input` is exhausted.
    ///
    /// Only I/O failures are returned; command errors are reported by the
    /// shell on `output` and the loop continues.
    pub fn run<S, R, W>(&self, shell: &mut S, mut input: R, mut output: W) -> io::Result<()>
    where
        S: Shell + ?Sized,
        R: BufRead,
        W: Write,
    {
        if self.prompts {
            if let Some(greeting) = shell.greeting() {
                writeln!(output, "{greeting}")?;
            }
        }

        let mut line = String::new();
        loop {
            if self.prompts {
                write!(output, "{PROMPT}")?;
                output.flush()?;
            }
            line.clear();
            if input.read_line(&mut line)? == 0 {
                debug!(shell = shell.name(), "end of input");
                break;
            }
            let command = line.trim();
            if command.is_empty() {
                continue;
            }
            if shell.execute(command, &mut output)? == Flow::Finish {
                debug!(shell = shell.name(), "finished by command");
                break;
            }
        }

        shell.finish(&mut output)?;
        output.flush()
    }
}

impl Default for Console {
    fn default() -> Self {
        Self::new()
    }
}

/// Splits a command line into whitespace-separated tokens.
pub(crate) fn tokens(line: &str) -> Vec<&str> {
    line.split_whitespace().collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    /// Echoes lines until `STOP`, then reports how many it saw.
    struct Echo {
        seen: usize,
    }

    impl Shell for Echo {
        fn name(&self) -> &'static str {
            "echo"
        }

        fn greeting(&self) -> Option<&'static str> {
            Some("hello")
        }

        fn execute(&mut self, line: &str, out: &mut dyn Write) -> io::Result<Flow> {
            if line == "STOP" {
                return Ok(Flow::Finish);
            }
            self.seen += 1;
            writeln!(out, "{line}")?;
            Ok(Flow::Continue)
        }

        fn finish(&mut self, out: &mut dyn Write) -> io::Result<()> {
            writeln!(out, "seen {}", self.seen)
        }
    }

    fn run(console: Console, input: &str) -> String {
        let mut out = Vec::new();
        let mut shell = Echo { seen: 0 };
        console.run(&mut shell, input.as_bytes(), &mut out).unwrap();
        String::from_utf8(out).unwrap()
    }

    #[test]
    fn test_skips_blank_lines_and_trims() {
        let out = run(Console::new().with_prompts(false), "  a  \n\n   \nb\n");
        assert_eq!(out, "a\nb\nseen 2\n");
    }

    #[test]
    fn test_finish_stops_reading() {
        let out = run(Console::new().with_prompts(false), "a\nSTOP\nb\n");
        assert_eq!(out, "a\nseen 1\n");
    }

    #[test]
    fn test_prompts_and_greeting() {
        let out = run(Console::new(), "a\n");
        assert_eq!(out, "hello\n<<< a\n<<< seen 1\n");
    }

    #[test]
    fn test_missing_trailing_newline() {
        let out = run(Console::new().with_prompts(false), "a\nb");
        assert_eq!(out, "a\nb\nseen 2\n");
    }
}
