//! Service-desk domain models.
//!
//! Provides the data types shared by the queue session and the balancer:
//! tickets, visitors, windows, and the finished distribution.
//!
//! # Mappings
//!
//! | queue-desk | Scheduling term |
//! |------------|-----------------|
//! | Visitor | Job |
//! | Window | Machine |
//! | Distribution | Schedule |
//! | total_time | Machine load |

mod visitor;
mod window;

pub use visitor::{Ticket, TicketGenerator, Visitor};
pub use window::{Distribution, Window};
