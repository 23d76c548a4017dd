//! Queue exercise: read the window count, take `ENQUEUE` commands, then
//! balance the queue on `DISTRIBUTE`.

use std::io::{self, Write};
use std::mem;
use std::num::NonZeroUsize;

use serde::Serialize;
use tracing::{debug, info, warn};

use super::{tokens, Flow, Shell};
use crate::balancer::{BalanceStrategy, DistributionKpi};
use crate::models::{Distribution, Ticket, Window};
use crate::session::QueueSession;
use crate::validation::{parse_window_count, require_arg, ValidationError, ValidationResult};

const ENQUEUE_USAGE: &str = "ENQUEUE <minutes>";

/// How the final distribution is printed.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum ReportFormat {
    /// One `Window N (T min): ...` line per window.
    #[default]
    Text,
    /// A single JSON document with windows and KPIs.
    Json,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Command<'a> {
    Enqueue(&'a str),
    Distribute,
}

fn parse_command(line: &str) -> ValidationResult<Command<'_>> {
    let args = tokens(line);
    match args.first().copied() {
        Some("ENQUEUE") => Ok(Command::Enqueue(require_arg(&args, 1, ENQUEUE_USAGE)?)),
        Some("DISTRIBUTE") => Ok(Command::Distribute),
        other => Err(ValidationError::UnknownCommand(
            other.unwrap_or_default().to_string(),
        )),
    }
}

/// Shell for the window-balancing exercise.
#[derive(Debug, Default)]
pub struct QueueShell {
    session: QueueSession,
    windows: Option<NonZeroUsize>,
    format: ReportFormat,
    distributed: bool,
}

impl QueueShell {
    /// Creates a shell that first asks for the window count.
    pub fn new() -> Self {
        Self::default()
    }

    /// Starts with a known window count, skipping the first question.
    pub fn with_windows(mut self, windows: NonZeroUsize) -> Self {
        self.windows = Some(windows);
        self
    }

    /// Sets the balancing strategy.
    pub fn with_strategy(mut self, strategy: BalanceStrategy) -> Self {
        self.session = self.session.with_strategy(strategy);
        self
    }

    /// Replaces the session (e.g. one pre-filled with a workload).
    pub fn with_session(mut self, session: QueueSession) -> Self {
        self.session = session;
        self
    }

    /// Sets the report format.
    pub fn with_format(mut self, format: ReportFormat) -> Self {
        self.format = format;
        self
    }

    fn read_windows(&mut self, line: &str, out: &mut dyn Write) -> io::Result<Flow> {
        let token = tokens(line).first().copied().unwrap_or_default();
        match parse_window_count(token) {
            Ok(windows) => {
                info!(windows = windows.get(), "window count set");
                self.windows = Some(windows);
            }
            Err(e) => {
                debug!(error = %e, "rejected window count");
                writeln!(out, "error: {e}")?;
            }
        }
        Ok(Flow::Continue)
    }

    fn enqueue(&mut self, token: &str, out: &mut dyn Write) -> io::Result<()> {
        match self.session.enqueue_token(token) {
            Ok(ticket) => writeln!(out, "{ticket}"),
            Err(e) => {
                debug!(error = %e, "rejected enqueue");
                writeln!(out, "error: {e}")
            }
        }
    }
}

impl Shell for QueueShell {
    fn name(&self) -> &'static str {
        "queue"
    }

    fn greeting(&self) -> Option<&'static str> {
        match self.windows {
            None => Some("Enter the number of windows"),
            Some(_) => None,
        }
    }

    fn execute(&mut self, line: &str, out: &mut dyn Write) -> io::Result<Flow> {
        if self.windows.is_none() {
            return self.read_windows(line, out);
        }

        match parse_command(line) {
            Ok(Command::Enqueue(token)) => {
                self.enqueue(token, out)?;
                Ok(Flow::Continue)
            }
            Ok(Command::Distribute) => Ok(Flow::Finish),
            Err(e) => {
                debug!(error = %e, "rejected command");
                writeln!(out, "error: {e}")?;
                Ok(Flow::Continue)
            }
        }
    }

    /// Distributes on `DISTRIBUTE` and at end of input alike.
    fn finish(&mut self, out: &mut dyn Write) -> io::Result<()> {
        let Some(windows) = self.windows else {
            warn!("input ended before a window count was given");
            return Ok(());
        };
        if self.distributed {
            return Ok(());
        }
        self.distributed = true;

        let distribution = mem::take(&mut self.session).distribute(windows);
        match self.format {
            ReportFormat::Text => write_text(&distribution, out),
            ReportFormat::Json => write_json(&distribution, out),
        }
    }
}

/// Renders `Window 1 (10 min): T001, T002`.
fn write_text(distribution: &Distribution, out: &mut dyn Write) -> io::Result<()> {
    for (idx, window) in distribution.windows.iter().enumerate() {
        write!(out, "Window {} ({} min):", idx + 1, window.total_time)?;
        if !window.is_empty() {
            let tickets: Vec<&str> = window.tickets().map(Ticket::as_str).collect();
            write!(out, " {}", tickets.join(", "))?;
        }
        writeln!(out)?;
    }
    Ok(())
}

#[derive(Serialize)]
struct Report<'a> {
    windows: &'a [Window],
    kpi: DistributionKpi,
}

fn write_json(distribution: &Distribution, out: &mut dyn Write) -> io::Result<()> {
    let report = Report {
        windows: &distribution.windows,
        kpi: DistributionKpi::calculate(&distribution.windows),
    };
    serde_json::to_writer_pretty(&mut *out, &report)?;
    writeln!(out)
}
