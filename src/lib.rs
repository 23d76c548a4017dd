//! Line-oriented service-desk exercises.
//!
//! Small interactive programs that read one command per line, mutate an
//! in-memory collection, and print results. The centrepiece is the queue
//! exercise: visitors receive tickets and are balanced across service
//! windows by a greedy least-loaded heuristic.
//!
//! # Modules
//!
//! - **`models`**: `Ticket`, `TicketGenerator`, `Visitor`, `Window`, `Distribution`
//! - **`balancer`**: greedy window assignment (linear scan or heap) and KPIs
//! - **`session`**: enqueue phase state (ticket counter + pending queue)
//! - **`validation`**: numeric argument parsing with user-facing errors
//! - **`warehouse`**, **`trolley`**, **`roster`**: the peripheral exercises
//! - **`shell`**: the console loop and one command shell per exercise
//! - **`config`**: TOML configuration
//! - **`workload`**: seeded random visitor streams
//!
//! # References
//!
//! - Graham (1969), "Bounds on Multiprocessing Timing Anomalies"
//! - Pinedo (2016), "Scheduling: Theory, Algorithms, and Systems"

pub mod balancer;
pub mod config;
pub mod models;
pub mod roster;
pub mod session;
pub mod shell;
pub mod trolley;
pub mod validation;
pub mod warehouse;
pub mod workload;
