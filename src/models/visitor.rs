//! Visitor and ticket models.
//!
//! A visitor is a single arrival at the service desk: a generated ticket
//! plus the number of minutes its service is expected to take. Tickets come
//! from a [`TicketGenerator`] owned by the session, so numbering is explicit
//! state rather than a process-wide counter.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Minimum number of digits in a ticket number (`T001`).
const TICKET_WIDTH: usize = 3;

/// A ticket identifier, e.g. `T001`.
///
/// The numeric part is zero-padded to three digits; the width is a minimum,
/// so the thousandth ticket is `T1000`.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Ticket(String);

impl Ticket {
    /// Formats the ticket for the given sequence number.
    pub fn from_number(number: u64) -> Self {
        Self(format!("T{:0width$}", number, width = TICKET_WIDTH))
    }

    /// The identifier as a string slice.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for Ticket {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl PartialEq<&str> for Ticket {
    fn eq(&self, other: &&str) -> bool {
        self.0 == *other
    }
}

/// Monotonic ticket source.
///
/// Starts at 1 unless seeded with [`TicketGenerator::starting_at`]. Never
/// restarts; every call to [`next_ticket`](Self::next_ticket) consumes a
/// number. Once `u64::MAX` has been issued the generator is exhausted and
/// yields `None`.
#[derive(Debug, Clone)]
pub struct TicketGenerator {
    next: Option<u64>,
}

impl TicketGenerator {
    /// Creates a generator whose first ticket is `T001`.
    pub fn new() -> Self {
        Self { next: Some(1) }
    }

    /// Creates a generator whose first ticket carries `number`.
    pub fn starting_at(number: u64) -> Self {
        Self { next: Some(number) }
    }

    /// Issues the next ticket and advances the counter.
    pub fn next_ticket(&mut self) -> Option<Ticket> {
        let number = self.next?;
        self.next = number.checked_add(1);
        Some(Ticket::from_number(number))
    }

    /// Number the next issued ticket will carry, `None` when exhausted.
    pub fn peek_number(&self) -> Option<u64> {
        self.next
    }
}

impl Default for TicketGenerator {
    fn default() -> Self {
        Self::new()
    }
}

impl Iterator for TicketGenerator {
    type Item = Ticket;

    fn next(&mut self) -> Option<Ticket> {
        self.next_ticket()
    }
}

/// A visitor waiting for service.
///
/// Immutable once created; `duration_min` is validated to be positive before
/// a visitor is ever constructed by the session.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Visitor {
    /// Ticket handed out on arrival.
    pub ticket: Ticket,
    /// Expected service time (minutes).
    pub duration_min: u32,
}

impl Visitor {
    /// Creates a visitor.
    pub fn new(ticket: Ticket, duration_min: u32) -> Self {
        Self {
            ticket,
            duration_min,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_ticket_padding() {
        assert_eq!(Ticket::from_number(1).as_str(), "T001");
        assert_eq!(Ticket::from_number(42).as_str(), "T042");
        assert_eq!(Ticket::from_number(999).as_str(), "T999");
        assert_eq!(Ticket::from_number(1000).as_str(), "T1000");
    }

    #[test]
    fn test_generator_sequence() {
        let mut gen = TicketGenerator::new();
        assert_eq!(gen.next_ticket().unwrap(), "T001");
        assert_eq!(gen.next_ticket().unwrap(), "T002");
        assert_eq!(gen.peek_number(), Some(3));
    }

    #[test]
    fn test_generator_exhausts_at_max() {
        let mut gen = TicketGenerator::starting_at(u64::MAX - 1);
        assert_eq!(gen.next_ticket(), Some(Ticket::from_number(u64::MAX - 1)));
        assert_eq!(gen.next_ticket(), Some(Ticket::from_number(u64::MAX)));
        assert_eq!(gen.peek_number(), None);
        assert_eq!(gen.next_ticket(), None);
        assert_eq!(gen.next(), None);
    }

    #[test]
    fn test_generator_seeded() {
        let tickets: Vec<Ticket> = TicketGenerator::starting_at(998).take(3).collect();
        assert_eq!(tickets, vec!["T998", "T999", "T1000"]);
    }

    #[test]
    fn test_ticket_serializes_as_string() {
        let visitor = Visitor::new(Ticket::from_number(7), 15);
        let json = serde_json::to_string(&visitor).unwrap();
        assert_eq!(json, r#"{"ticket":"T007","duration_min":15}"#);
    }
}
