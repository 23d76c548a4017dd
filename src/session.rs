//! Queue session: the enqueue phase followed by a single distribution.
//!
//! The session owns the ticket counter and the pending queue, so two
//! sessions never share numbering. Enqueue failures leave both untouched.

use std::collections::VecDeque;
use std::num::NonZeroUsize;

use tracing::{debug, info, warn};

use crate::balancer::{BalanceStrategy, DistributionKpi, GreedyBalancer};
use crate::models::{Distribution, Ticket, TicketGenerator, Visitor};
use crate::validation::{parse_positive, ValidationError, ValidationResult};

/// Pending visitors and the ticket source for one run.
#[derive(Debug, Clone, Default)]
pub struct QueueSession {
    tickets: TicketGenerator,
    pending: VecDeque<Visitor>,
    balancer: GreedyBalancer,
}

impl QueueSession {
    /// Creates an empty session issuing tickets from `T001`.
    pub fn new() -> Self {
        Self::default()
    }

    /// Uses a pre-seeded ticket generator.
    pub fn with_tickets(mut self, tickets: TicketGenerator) -> Self {
        self.tickets = tickets;
        self
    }

    /// Sets the balancing strategy.
    pub fn with_strategy(mut self, strategy: BalanceStrategy) -> Self {
        self.balancer = self.balancer.with_strategy(strategy);
        self
    }

    /// Queues a visitor needing `duration_min` minutes and returns its ticket.
    pub fn enqueue(&mut self, duration_min: u32) -> ValidationResult<Ticket> {
        if duration_min == 0 {
            return Err(ValidationError::NotPositive {
                field: "duration",
                value: duration_min.to_string(),
            });
        }
        let ticket = self
            .tickets
            .next_ticket()
            .ok_or(ValidationError::TicketsExhausted)?;
        debug!(ticket = %ticket, duration_min, "enqueued");
        self.pending
            .push_back(Visitor::new(ticket.clone(), duration_min));
        Ok(ticket)
    }

    /// Parses a duration token and queues it.
    pub fn enqueue_token(&mut self, token: &str) -> ValidationResult<Ticket> {
        let duration_min = parse_positive("duration", token)?;
        self.enqueue(duration_min)
    }

    /// Visitors waiting, in arrival order.
    pub fn pending(&self) -> impl Iterator<Item = &Visitor> {
        self.pending.iter()
    }

    /// Number of visitors waiting.
    pub fn pending_len(&self) -> usize {
        self.pending.len()
    }

    /// Number the next ticket will carry, `None` once numbering is exhausted.
    pub fn next_ticket_number(&self) -> Option<u64> {
        self.tickets.peek_number()
    }

    /// Ends the enqueue phase and balances the queue over `windows`.
    pub fn distribute(self, windows: NonZeroUsize) -> Distribution {
        let longest = self
            .pending
            .iter()
            .map(|v| u64::from(v.duration_min))
            .max()
            .unwrap_or(0);
        let windows = self.balancer.balance(self.pending, windows.get());
        let kpi = DistributionKpi::calculate(&windows);
        // greedy placement keeps the spread within the longest single visit
        let within_longest = kpi.is_balanced_within(longest);
        if !within_longest {
            warn!(imbalance = kpi.imbalance, longest, "distribution wider than longest visit");
        }
        info!(
            windows = kpi.window_count,
            visitors = kpi.visitor_count,
            makespan = kpi.makespan,
            imbalance = kpi.imbalance,
            within_longest,
            strategy = ?self.balancer.strategy(),
            "queue distributed"
        );
        Distribution::new(windows)
    }
}
