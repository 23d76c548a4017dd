//! Warehouse exercise: `ADD`, `REMOVE`, `INFO`, `EXIT`.

use std::io::{self, Write};

use tracing::debug;

use super::{tokens, Flow, Shell};
use crate::validation::{parse_positive, require_arg, ValidationResult};
use crate::warehouse::Warehouse;

const ADD_USAGE: &str = "ADD <product> <quantity> <address>";
const REMOVE_USAGE: &str = "REMOVE <product> <quantity> <address>";

/// Shell over a [`Warehouse`].
#[derive(Debug)]
pub struct WarehouseShell {
    warehouse: Warehouse,
}

/// `<product> <quantity> <address>` shared by `ADD` and `REMOVE`.
struct Movement<'a> {
    product: &'a str,
    quantity: u32,
    address: &'a str,
}

fn parse_movement<'a>(args: &[&'a str], usage: &'static str) -> ValidationResult<Movement<'a>> {
    let product = require_arg(args, 1, usage)?;
    let quantity = require_arg(args, 2, usage)?;
    let address = require_arg(args, 3, usage)?;
    Ok(Movement {
        product,
        quantity: parse_positive("quantity", quantity)?,
        address,
    })
}

impl WarehouseShell {
    /// Wraps a warehouse.
    pub fn new(warehouse: Warehouse) -> Self {
        Self { warehouse }
    }

    /// The underlying inventory.
    pub fn warehouse(&self) -> &Warehouse {
        &self.warehouse
    }

    fn add(&mut self, args: &[&str], out: &mut dyn Write) -> io::Result<()> {
        let m = match parse_movement(args, ADD_USAGE) {
            Ok(m) => m,
            Err(e) => return writeln!(out, "Error: {e}"),
        };
        match self.warehouse.add(m.product, m.quantity, m.address) {
            Ok(addr) => writeln!(out, "Added {} units of {} to {addr}", m.quantity, m.product),
            Err(e) => {
                debug!(error = %e, "add rejected");
                writeln!(out, "Error: {e}")
            }
        }
    }

    fn remove(&mut self, args: &[&str], out: &mut dyn Write) -> io::Result<()> {
        let m = match parse_movement(args, REMOVE_USAGE) {
            Ok(m) => m,
            Err(e) => return writeln!(out, "Error: {e}"),
        };
        match self.warehouse.remove(m.product, m.quantity, m.address) {
            Ok(addr) => writeln!(
                out,
                "Removed {} units of {} from {addr}",
                m.quantity, m.product
            ),
            Err(e) => {
                debug!(error = %e, "remove rejected");
                writeln!(out, "Error: {e}")
            }
        }
    }
}

impl Shell for WarehouseShell {
    fn name(&self) -> &'static str {
        "warehouse"
    }

    fn execute(&mut self, line: &str, out: &mut dyn Write) -> io::Result<Flow> {
        let args = tokens(line);
        match args.first().copied().unwrap_or_default() {
            "ADD" => self.add(&args, out)?,
            "REMOVE" => self.remove(&args, out)?,
            "INFO" => writeln!(out, "{}", self.warehouse.report())?,
            "EXIT" => return Ok(Flow::Finish),
            other => writeln!(
                out,
                "Error: unknown command `{other}`. Available commands: ADD, REMOVE, INFO, EXIT"
            )?,
        }
        Ok(Flow::Continue)
    }
}
