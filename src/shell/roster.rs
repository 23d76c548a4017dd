//! Roster exercise: a command count followed by exactly that many commands.
//!
//! Every rejected command, whatever the reason, is answered with
//! `Incorrect`; the reason goes to the log.

use std::io::{self, Write};

use tracing::{debug, info};

use super::{tokens, Flow, Shell};
use crate::roster::{Enrollment, Roster, RosterError, Suspicion};
use crate::validation::{
    parse_count, parse_positive, parse_signed, require_arg, ValidationError, ValidationResult,
};

const INCORRECT: &str = "Incorrect";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Command {
    NewStudents(i64),
    Suspicious(u32),
    Immortal(u32),
    TopList,
    Count,
}

fn parse_command(args: &[&str]) -> ValidationResult<Command> {
    let student = |usage| require_arg(args, 1, usage).and_then(|t| parse_positive("student", t));
    match args.first().copied().unwrap_or_default() {
        "NEW_STUDENTS" => {
            let token = require_arg(args, 1, "NEW_STUDENTS <count>")?;
            Ok(Command::NewStudents(parse_signed("student count", token)?))
        }
        "SUSPICIOUS" => Ok(Command::Suspicious(student("SUSPICIOUS <student>")?)),
        "IMMORTIAL" | "IMMORTAL" => Ok(Command::Immortal(student("IMMORTIAL <student>")?)),
        "TOP-LIST" => Ok(Command::TopList),
        "SCOUNT" => Ok(Command::Count),
        other => Err(ValidationError::UnknownCommand(other.to_string())),
    }
}

/// Shell over a [`Roster`].
#[derive(Debug, Default)]
pub struct RosterShell {
    roster: Roster,
    /// Commands still to read; `None` until the count line arrives.
    remaining: Option<u32>,
}

impl RosterShell {
    /// Creates a shell that first asks for the command count.
    pub fn new() -> Self {
        Self::default()
    }

    /// The underlying roster.
    pub fn roster(&self) -> &Roster {
        &self.roster
    }

    fn read_count(&mut self, line: &str, out: &mut dyn Write) -> io::Result<Flow> {
        let token = tokens(line).first().copied().unwrap_or_default();
        match parse_count("command count", token) {
            Ok(0) => Ok(Flow::Finish),
            Ok(count) => {
                info!(count, "command count set");
                self.remaining = Some(count);
                Ok(Flow::Continue)
            }
            Err(e) => {
                debug!(error = %e, "rejected command count");
                writeln!(out, "{INCORRECT}")?;
                Ok(Flow::Continue)
            }
        }
    }

    /// Runs a parsed command. The inner `Err` means `Incorrect`.
    fn apply(
        &mut self,
        command: Command,
        out: &mut dyn Write,
    ) -> io::Result<Result<(), RosterError>> {
        match command {
            Command::NewStudents(delta) => match self.roster.change(delta) {
                Ok(Enrollment::Enrolled(n)) => writeln!(out, "Welcome {n} clever students!")?,
                Ok(Enrollment::Expelled(n)) => writeln!(out, "GoodBye {n} clever students!")?,
                Ok(Enrollment::Unchanged) => {}
                Err(e) => return Ok(Err(e)),
            },
            Command::Suspicious(student) => match self.roster.suspect(student) {
                Ok(Suspicion::Marked) => writeln!(out, "The suspected student {student}")?,
                Ok(Suspicion::Ignored) => {}
                Err(e) => return Ok(Err(e)),
            },
            Command::Immortal(student) => match self.roster.make_immortal(student) {
                Ok(()) => writeln!(out, "Student {student} is immortal!")?,
                Err(e) => return Ok(Err(e)),
            },
            Command::TopList => {
                let entries: Vec<String> = self
                    .roster
                    .expulsion_list()
                    .map(|s| format!(" Student {s}"))
                    .collect();
                writeln!(out, "List of students for expulsion:{}", entries.join(","))?;
            }
            Command::Count => writeln!(
                out,
                "List of students for expulsion consists of {} students",
                self.roster.suspicious_count()
            )?,
        }
        Ok(Ok(()))
    }
}

impl Shell for RosterShell {
    fn name(&self) -> &'static str {
        "roster"
    }

    fn greeting(&self) -> Option<&'static str> {
        Some("Enter the number of commands")
    }

    fn execute(&mut self, line: &str, out: &mut dyn Write) -> io::Result<Flow> {
        let Some(remaining) = self.remaining else {
            return self.read_count(line, out);
        };

        let outcome = match parse_command(&tokens(line)) {
            Ok(command) => self.apply(command, out)?.map_err(|e| e.to_string()),
            Err(e) => Err(e.to_string()),
        };
        if let Err(reason) = outcome {
            debug!(%reason, "command rejected");
            writeln!(out, "{INCORRECT}")?;
        }

        let remaining = remaining - 1;
        self.remaining = Some(remaining);
        Ok(if remaining == 0 {
            Flow::Finish
        } else {
            Flow::Continue
        })
    }
}
