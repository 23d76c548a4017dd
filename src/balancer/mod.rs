//! Greedy window balancing and distribution KPIs.
//!
//! # Algorithm
//!
//! Every visitor, in arrival order, goes to the window with the smallest
//! accumulated service time. Ties go to the lowest window index. Placements
//! are never revisited, so the result is a deterministic heuristic rather
//! than an optimal partition.
//!
//! Two interchangeable strategies are provided: a left-to-right linear scan
//! and a binary heap keyed by `(total_time, index)`. Both produce identical
//! output for identical input.
//!
//! # References
//!
//! - Graham (1969), "Bounds on Multiprocessing Timing Anomalies" (list scheduling)
//! - Pinedo (2016), "Scheduling: Theory, Algorithms, and Systems", Ch. 5

mod greedy;
mod kpi;

pub use greedy::{distribute, BalanceStrategy, GreedyBalancer};
pub use kpi::DistributionKpi;
