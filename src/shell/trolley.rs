//! Trolley exercise: `CREATE_TRL`, `TRL_IN_STOP`, `STOPS_IN_TRL`, `TRLS`.

use std::io::{self, Write};

use tracing::debug;

use super::{tokens, Flow, Shell};
use crate::trolley::{RouteLookup, StopLookup, TrolleyRegistry};

/// Shell over a [`TrolleyRegistry`].
#[derive(Debug, Default)]
pub struct TrolleyShell {
    registry: TrolleyRegistry,
}

impl TrolleyShell {
    /// Creates a shell with an empty registry.
    pub fn new() -> Self {
        Self::default()
    }

    /// The underlying registry.
    pub fn registry(&self) -> &TrolleyRegistry {
        &self.registry
    }

    fn create(&mut self, args: &[&str], out: &mut dyn Write) -> io::Result<()> {
        if args.len() < 3 {
            return writeln!(out, "Invalid command format");
        }
        if let Err(e) = self.registry.create(args[1], &args[2..]) {
            debug!(error = %e, "create rejected");
            writeln!(out, "Error: {e}")?;
        }
        Ok(())
    }

    fn trolleys_in_stop(&self, stop: &str, out: &mut dyn Write) -> io::Result<()> {
        match self.registry.trolleys_at(stop) {
            StopLookup::NoStops => writeln!(out, "Stops is absent"),
            StopLookup::Unknown => writeln!(out, "Stop {stop}: 0"),
            StopLookup::Served(trolleys) => writeln!(out, "{stop}: {}", trolleys.join(" ")),
        }
    }

    fn stops_in_trolley(&self, trolley: &str, out: &mut dyn Write) -> io::Result<()> {
        match self.registry.transfers(trolley) {
            RouteLookup::NoTrolleys => writeln!(out, "Trolleys is absent"),
            RouteLookup::Unknown => writeln!(out, "Trolley {trolley} is absent"),
            RouteLookup::Transfers(route) => {
                for (stop, others) in route {
                    if others.is_empty() {
                        writeln!(out, "Stop {stop}: 0")?;
                    } else {
                        writeln!(out, "Stop {stop}: {}", others.join(" "))?;
                    }
                }
                Ok(())
            }
        }
    }

    fn all_trolleys(&self, out: &mut dyn Write) -> io::Result<()> {
        let mut any = false;
        for (name, route) in self.registry.all() {
            any = true;
            writeln!(out, "TRL {name}: {}", route.join(" "))?;
        }
        if !any {
            writeln!(out, "Trolleys is absent")?;
        }
        Ok(())
    }
}

impl Shell for TrolleyShell {
    fn name(&self) -> &'static str {
        "trolley"
    }

    fn execute(&mut self, line: &str, out: &mut dyn Write) -> io::Result<Flow> {
        let args = tokens(line);
        match args.as_slice() {
            ["CREATE_TRL", ..] => self.create(&args, out)?,
            ["TRL_IN_STOP", stop] => self.trolleys_in_stop(stop, out)?,
            ["STOPS_IN_TRL", trolley] => self.stops_in_trolley(trolley, out)?,
            ["TRLS", ..] => self.all_trolleys(out)?,
            ["TRL_IN_STOP" | "STOPS_IN_TRL", ..] => writeln!(out, "Invalid command format")?,
            _ => writeln!(out, "Error: Unknown command")?,
        }
        Ok(Flow::Continue)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::shell::Console;

    fn run(input: &str) -> String {
        let mut out = Vec::new();
        Console::new()
            .with_prompts(false)
            .run(&mut TrolleyShell::new(), input.as_bytes(), &mut out)
            .unwrap();
        String::from_utf8(out).unwrap()
    }

    #[test]
    fn test_empty_queries() {
        let out = run("TRLS\nTRL_IN_STOP Park\nSTOPS_IN_TRL t1\n");
        assert_eq!(out, "Trolleys is absent\nStops is absent\nTrolleys is absent\n");
    }

    #[test]
    fn test_registry_session() {
        let out = run(
            "CREATE_TRL t1 Central Park Depot\n\
             CREATE_TRL t2 Park Harbor\n\
             TRL_IN_STOP Park\n\
             TRL_IN_STOP Moon\n\
             STOPS_IN_TRL t1\n\
             STOPS_IN_TRL t9\n\
             TRLS\n",
        );
        assert_eq!(
            out,
            "Park: t1 t2\n\
             Stop Moon: 0\n\
             Stop Central: 0\n\
             Stop Park: t2\n\
             Stop Depot: 0\n\
             Trolley t9 is absent\n\
             TRL t1: Central Park Depot\n\
             TRL t2: Park Harbor\n"
        );
    }

    #[test]
    fn test_malformed_commands() {
        let out = run("CREATE_TRL t1\nTRL_IN_STOP\nSTOPS_IN_TRL a b\nFOO\n");
        assert_eq!(
            out,
            "Invalid command format\n\
             Invalid command format\n\
             Invalid command format\n\
             Error: Unknown command\n"
        );
    }

    #[test]
    fn test_duplicate_trolley() {
        let out = run("CREATE_TRL t1 A B\nCREATE_TRL t1 C\nTRLS\n");
        assert_eq!(out, "Error: Trolley t1 already exists\nTRL t1: A B\n");
    }
}
