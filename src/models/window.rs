//! Service window and distribution (solution) models.

use serde::{Deserialize, Serialize};

use super::{Ticket, Visitor};

/// A service window and the visitors routed to it.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Window {
    /// Sum of assigned visitor durations (minutes).
    pub total_time: u64,
    /// Assigned visitors, in arrival order.
    pub visitors: Vec<Visitor>,
}

impl Window {
    /// Creates an empty window.
    pub fn new() -> Self {
        Self::default()
    }

    /// Appends a visitor and accounts for its duration.
    pub fn assign(&mut self, visitor: Visitor) {
        self.total_time += u64::from(visitor.duration_min);
        self.visitors.push(visitor);
    }

    /// Whether no visitor was routed here.
    pub fn is_empty(&self) -> bool {
        self.visitors.is_empty()
    }

    /// Tickets in service order.
    pub fn tickets(&self) -> impl Iterator<Item = &Ticket> {
        self.visitors.iter().map(|v| &v.ticket)
    }
}

/// Result of balancing a queue across windows.
///
/// Window `i` in [`windows`](Self::windows) is presented to users as
/// window `i + 1`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Distribution {
    /// Windows in index order.
    pub windows: Vec<Window>,
}

impl Distribution {
    /// Wraps balanced windows.
    pub fn new(windows: Vec<Window>) -> Self {
        Self { windows }
    }

    /// Number of windows.
    pub fn window_count(&self) -> usize {
        self.windows.len()
    }

    /// Number of visitors across all windows.
    pub fn visitor_count(&self) -> usize {
        self.windows.iter().map(|w| w.visitors.len()).sum()
    }

    /// Sum of all window totals (minutes).
    pub fn total_time(&self) -> u64 {
        self.windows.iter().map(|w| w.total_time).sum()
    }

    /// Zero-based index of the window serving `ticket`.
    pub fn window_of(&self, ticket: &Ticket) -> Option<usize> {
        self.windows
            .iter()
            .position(|w| w.visitors.iter().any(|v| &v.ticket == ticket))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_window_assign() {
        let mut w = Window::new();
        assert!(w.is_empty());
        w.assign(Visitor::new(Ticket::from_number(1), 10));
        w.assign(Visitor::new(Ticket::from_number(2), 5));

        assert_eq!(w.total_time, 15);
        let tickets: Vec<&str> = w.tickets().map(Ticket::as_str).collect();
        assert_eq!(tickets, vec!["T001", "T002"]);
    }

    #[test]
    fn test_distribution_queries() {
        let mut w1 = Window::new();
        w1.assign(Visitor::new(Ticket::from_number(1), 10));
        let mut w2 = Window::new();
        w2.assign(Visitor::new(Ticket::from_number(2), 3));
        w2.assign(Visitor::new(Ticket::from_number(3), 4));
        let dist = Distribution::new(vec![w1, w2, Window::new()]);

        assert_eq!(dist.window_count(), 3);
        assert_eq!(dist.visitor_count(), 3);
        assert_eq!(dist.total_time(), 17);
        assert_eq!(dist.window_of(&Ticket::from_number(3)), Some(1));
        assert_eq!(dist.window_of(&Ticket::from_number(9)), None);
    }
}
