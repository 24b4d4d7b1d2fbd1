//! Data models for trips, routes, duty events and log sheets.
//!
//! Data flows one way through these types:
//!
//! ```text
//! Location ──▶ RouteLeg ──▶ DutyEvent ──▶ DailyLog ──▶ TripPlan
//!  (stops)     (provider)    (engine)     (assembler)  (aggregator)
//! ```
//!
//! Display implementations for these models live in
//! [`crate::display::models`] and render markdown for terminal output.
//!
//! # Examples
//!
//! ```rust
//! use hoslog_core::models::{DutyEvent, DutyStatus, DutyTotals};
//!
//! let events = vec![
//!     DutyEvent::new(DutyStatus::OffDuty, 0.0, 6.0, "Off duty - rest before trip"),
//!     DutyEvent::new(DutyStatus::Driving, 6.0, 8.0, "Driving Richmond, VA → Newark, NJ"),
//!     DutyEvent::new(DutyStatus::OffDuty, 14.0, 10.0, "Off duty"),
//! ];
//! let totals: DutyTotals = events.iter().collect();
//! assert_eq!(totals.driving, 8.0);
//! assert_eq!(totals.sum(), 24.0);
//! ```

pub mod event;
pub mod location;
pub mod log;
pub mod route;
pub mod status;
pub mod trip;


pub use event::DutyEvent;
pub use location::{Coordinates, Location, StopRole};
pub use log::{DailyLog, DutyTotals};
pub use route::{Route, RouteLeg};
pub use status::DutyStatus;
pub use trip::{DriverInfo, TripPlan};
