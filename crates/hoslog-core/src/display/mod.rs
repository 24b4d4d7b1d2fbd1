//! Display formatting functions and result types.
//!
//! Domain models implement [`std::fmt::Display`] directly (see [`models`]);
//! this module adds the wrappers needed for collections, verdicts and clock
//! formatting. Everything renders markdown, which the CLI passes through its
//! terminal renderer.
//!
//! ```text
//! ┌─────────────────┐    ┌─────────────────┐    ┌─────────────────┐
//! │  Domain Models  │    │    Wrappers     │    │   Formatted     │
//! │ (TripPlan, Log) │───▶│ (Violations,    │───▶│    Output       │
//! │                 │    │  ClockTime)     │    │   (Terminal)    │
//! └─────────────────┘    └─────────────────┘    └─────────────────┘
//! ```
//!
//! ## Module Organization
//!
//! - [`collections`]: Collection wrapper types (Violations, LogSheets)
//! - [`status`]: Status and confirmation messages (OperationStatus)
//! - [`clock`]: Hour offsets as `HH:MM` and durations as `Hh MMm`
//! - [`models`]: Display implementations for domain models
//!
//! ## Usage Examples
//!
//! ```rust
//! use hoslog_core::{
//!     display::{OperationStatus, Violations},
//!     models::{DutyEvent, DutyStatus},
//! };
//!
//! let event = DutyEvent::new(DutyStatus::OnDuty, 6.0, 0.5, "Pre-trip inspection");
//! assert!(event.to_string().contains("| 06:00 | 06:30 | On Duty (Not Driving) |"));
//!
//! let status = OperationStatus::from_audit(&Violations::default());
//! assert_eq!(status.to_string(), "Success: Plan complies with all HOS regulations\n");
//! ```

pub mod clock;
pub mod collections;
pub mod models;
pub mod status;

// Re-export commonly used types for convenience
pub use clock::{ClockTime, HoursMinutes};
pub use collections::{LogSheets, Violations};
pub use status::OperationStatus;
