//! Random visitor streams for demos and load experiments.

use rand::Rng;

use crate::models::Ticket;
use crate::session::QueueSession;
use crate::validation::{ValidationError, ValidationResult};

/// Enqueues `count` visitors with durations uniform in `1..=max_duration`.
///
/// Returns the issued tickets in order. Fails only when `max_duration` is 0.
pub fn random_visitors<R: Rng>(
    session: &mut QueueSession,
    count: usize,
    max_duration: u32,
    rng: &mut R,
) -> ValidationResult<Vec<Ticket>> {
    if max_duration == 0 {
        return Err(ValidationError::NotPositive {
            field: "max duration",
            value: max_duration.to_string(),
        });
    }

    let mut tickets = Vec::with_capacity(count);
    for _ in 0..count {
        tickets.push(session.enqueue(rng.random_range(1..=max_duration))?);
    }
    Ok(tickets)
}
