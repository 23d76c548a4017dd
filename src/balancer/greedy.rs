//! Least-loaded window assignment.
//!
//! # Complexity
//! `Linear`: O(V * W). `Heap`: O(V log W), for V visitors and W windows.

use std::cmp::Reverse;
use std::collections::BinaryHeap;

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::models::{Visitor, Window};

/// How the least-loaded window is located for each visitor.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum BalanceStrategy {
    /// Scan every window left to right (default).
    #[default]
    #[serde(alias = "scan")]
    Linear,
    /// Pop the lightest window from a min-heap.
    Heap,
}

/// Greedy balancer over a fixed number of windows.
///
/// # Example
///
/// ```
/// use queue_desk::balancer::GreedyBalancer;
/// use queue_desk::models::{TicketGenerator, Visitor};
///
/// let visitors: Vec<Visitor> = [10, 1, 1, 1]
///     .into_iter()
///     .zip(TicketGenerator::new())
///     .map(|(d, ticket)| Visitor::new(ticket, d))
///     .collect();
///
/// let windows = GreedyBalancer::new().balance(visitors, 2);
/// assert_eq!(windows[0].total_time, 10);
/// assert_eq!(windows[1].total_time, 3);
/// ```
#[derive(Debug, Clone, Default)]
pub struct GreedyBalancer {
    strategy: BalanceStrategy,
}

impl GreedyBalancer {
    /// Creates a linear-scan balancer.
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the search strategy.
    pub fn with_strategy(mut self, strategy: BalanceStrategy) -> Self {
        self.strategy = strategy;
        self
    }

    /// The configured strategy.
    pub fn strategy(&self) -> BalanceStrategy {
        self.strategy
    }

    /// Assigns every visitor, in order, to the currently lightest window.
    ///
    /// Returns `windows_count` windows. A zero count yields no windows and
    /// drops the visitors; callers reject zero before getting here.
    pub fn balance<I>(&self, visitors: I, windows_count: usize) -> Vec<Window>
    where
        I: IntoIterator<Item = Visitor>,
    {
        let mut windows: Vec<Window> = (0..windows_count).map(|_| Window::new()).collect();
        if windows.is_empty() {
            return windows;
        }

        match self.strategy {
            BalanceStrategy::Linear => {
                for visitor in visitors {
                    let idx = lightest_window(&windows);
                    debug!(ticket = %visitor.ticket, window = idx + 1, "assigned");
                    windows[idx].assign(visitor);
                }
            }
            BalanceStrategy::Heap => {
                // (load, index): equal loads pop the lower index first
                let mut heap: BinaryHeap<Reverse<(u64, usize)>> =
                    (0..windows.len()).map(|idx| Reverse((0, idx))).collect();
                for visitor in visitors {
                    let Some(Reverse((_, idx))) = heap.pop() else {
                        break;
                    };
                    debug!(ticket = %visitor.ticket, window = idx + 1, "assigned");
                    windows[idx].assign(visitor);
                    heap.push(Reverse((windows[idx].total_time, idx)));
                }
            }
        }

        windows
    }
}

/// Balances with the default linear scan.
pub fn distribute<I>(visitors: I, windows_count: usize) -> Vec<Window>
where
    I: IntoIterator<Item = Visitor>,
{
    GreedyBalancer::new().balance(visitors, windows_count)
}

/// Index of the first window with the strictly smallest load.
fn lightest_window(windows: &[Window]) -> usize {
    let mut best = 0;
    for (idx, window) in windows.iter().enumerate().skip(1) {
        if window.total_time < windows[best].total_time {
            best = idx;
        }
    }
    best
}
