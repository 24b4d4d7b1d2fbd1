//! Core library for the hoslog trip planner.
//!
//! This crate plans commercial-driving trips (current location → pickup →
//! dropoff) under the FMCSA property-carrier Hours-of-Service rules and
//! breaks the result into 24-hour log sheets.
//!
//! # Pipeline
//!
//! ```text
//! routing ──▶ engine ──▶ logs ──▶ aggregate
//!  Route      Schedule   DailyLog   TripPlan
//! ```
//!
//! - [`routing`]: resolves stops into legs, falling back to estimates
//! - [`engine`]: the HOS rule engine (11-hour driving, 14-hour window,
//!   30-minute break, 10-hour rest, 70-hour/8-day cycle with 34-hour restart)
//! - [`logs`]: splits the event stream into daily log sheets
//! - [`aggregate`]: summarizes route, verdict and sheets into a [`TripPlan`]
//! - [`audit`]: independently re-checks any event stream
//!
//! The [`Planner`] façade wires these together asynchronously.
//!
//! # Display Architecture
//!
//! - **Domain Models** ([`models`]): Implement [`std::fmt::Display`] for direct
//!   formatting
//! - **Display Wrappers** ([`display`]): Collections, verdicts and clock
//!   formatting
//! - **Terminal Rendering**: Rich markdown output via the CLI's terminal
//!   renderer
//!
//! # Quick Start
//!
//! ```rust
//! use hoslog_core::{
//!     config::HosRules,
//!     engine::HosEngine,
//!     logs,
//!     models::{Location, RouteLeg, StopRole},
//! };
//!
//! # fn main() -> Result<(), Box<dyn std::error::Error>> {
//! let legs = vec![RouteLeg::new(
//!     Location::new("Richmond, VA", StopRole::Current),
//!     Location::new("Newark, NJ", StopRole::Dropoff),
//!     540.0,
//!     9.0,
//! )];
//!
//! let schedule = HosEngine::new(HosRules::default())?.plan(&legs, 0.0)?;
//! assert_eq!(schedule.breaks, 1);
//!
//! let sheets = logs::split(&schedule.events, jiff::civil::date(2024, 3, 1));
//! for sheet in &sheets {
//!     println!("{sheet}");
//! }
//! # Ok(())
//! # }
//! ```

pub mod aggregate;
pub mod audit;
pub mod config;
pub mod display;
pub mod engine;
pub mod error;
pub mod logs;
pub mod models;
pub mod params;
pub mod planner;
pub mod routing;

// Re-export commonly used types
pub use config::{HosRules, PlannerConfig, RoutingConfig, RuleKind};
pub use display::{ClockTime, LogSheets, OperationStatus, Violations};
pub use engine::{HosEngine, Schedule};
pub use error::{PlannerError, Result};
pub use models::{
    Coordinates, DailyLog, DriverInfo, DutyEvent, DutyStatus, DutyTotals, Location, Route,
    RouteLeg, StopRole, TripPlan,
};
pub use params::PlanTrip;
pub use planner::{Planner, PlannerBuilder};
pub use routing::{ManualRouteProvider, OsrmRouteProvider, RouteProvider};
