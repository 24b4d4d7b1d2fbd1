//! Parameter structures for trip planning operations
//!
//! These structures are shared by every interface (the CLI today, any service
//! layer later) without framework-specific derives. Interface layers wrap
//! them with their own attributes and convert via `From`:
//!
//! ```text
//! ┌─────────────────┐    ┌─────────────────┐
//! │   CLI Args      │    │  Core Params    │
//! │  (clap derives) │───▶│ (serde derives) │
//! └─────────────────┘    └─────────────────┘
//! ```
//!
//! ```ignore
//! #[derive(Args)]
//! pub struct PlanArgs {
//!     #[arg(long)]
//!     pub from: String,
//!     // ... clap-specific attributes
//! }
//!
//! impl From<PlanArgs> for PlanTrip {
//!     fn from(args: PlanArgs) -> Self { /* ... */ }
//! }
//! ```

use jiff::civil::Date;
use serde::{Deserialize, Serialize};

use crate::{
    error::{PlannerError, Result},
    models::{DriverInfo, Location, StopRole},
};

/// Parameters for planning one trip.
///
/// The driver starts at `current_location`, collects the load at
/// `pickup_location` and delivers it to `dropoff_location`.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct PlanTrip {
    /// Where the driver is now (e.g. "Richmond, VA")
    pub current_location: String,
    /// Where the load is picked up
    pub pickup_location: String,
    /// Where the load is delivered
    pub dropoff_location: String,
    /// Hours already used in the current 70-hour/8-day cycle
    #[serde(default)]
    pub current_cycle_hours: f64,
    /// Date of the first log sheet; today when omitted
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub start_date: Option<Date>,
    /// Log sheet header details
    #[serde(default)]
    pub driver: DriverInfo,
}

impl PlanTrip {
    /// Validate trip parameters against the cycle limit in force.
    ///
    /// # Errors
    ///
    /// * `PlannerError::InvalidInput` - When a location is blank
    /// * `PlannerError::InvalidInput` - When `current_cycle_hours` is outside
    ///   `[0, max_cycle_hours]`
    ///
    /// # Examples
    ///
    /// ```rust
    /// use hoslog_core::params::PlanTrip;
    ///
    /// let trip = PlanTrip {
    ///     current_location: "Richmond, VA".to_string(),
    ///     pickup_location: "Baltimore, MD".to_string(),
    ///     dropoff_location: "Newark, NJ".to_string(),
    ///     current_cycle_hours: 12.0,
    ///     ..Default::default()
    /// };
    /// assert!(trip.validate(70.0).is_ok());
    ///
    /// let tired = PlanTrip { current_cycle_hours: 71.0, ..trip };
    /// assert!(tired.validate(70.0).is_err());
    /// ```
    pub fn validate(&self, max_cycle_hours: f64) -> Result<()> {
        let names = [
            ("current_location", &self.current_location),
            ("pickup_location", &self.pickup_location),
            ("dropoff_location", &self.dropoff_location),
        ];
        for (field, value) in names {
            if value.trim().is_empty() {
                return Err(PlannerError::invalid_input(field).with_reason("must not be empty"));
            }
        }

        if !self.current_cycle_hours.is_finite()
            || !(0.0..=max_cycle_hours).contains(&self.current_cycle_hours)
        {
            return Err(
                PlannerError::invalid_input("current_cycle_hours").with_reason(format!(
                    "must be between 0 and {max_cycle_hours}, got {}",
                    self.current_cycle_hours
                )),
            );
        }

        Ok(())
    }

    /// The trip's stops in travel order, not yet resolved to coordinates.
    pub fn stops(&self) -> Vec<Location> {
        vec![
            Location::new(self.current_location.trim(), StopRole::Current),
            Location::new(self.pickup_location.trim(), StopRole::Pickup),
            Location::new(self.dropoff_location.trim(), StopRole::Dropoff),
        ]
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn trip() -> PlanTrip {
        PlanTrip {
            current_location: " Richmond, VA ".to_string(),
            pickup_location: "Baltimore, MD".to_string(),
            dropoff_location: "Newark, NJ".to_string(),
            current_cycle_hours: 0.0,
            ..Default::default()
        }
    }

    #[test]
    fn test_validate_rejects_blank_location() {
        let blank = PlanTrip {
            pickup_location: "   ".to_string(),
            ..trip()
        };
        let err = blank.validate(70.0).unwrap_err();
        assert!(matches!(err, PlannerError::InvalidInput { ref field, .. } if field == "pickup_location"));
    }

    #[test]
    fn test_validate_cycle_bounds() {
        assert!(PlanTrip { current_cycle_hours: 70.0, ..trip() }.validate(70.0).is_ok());
        assert!(PlanTrip { current_cycle_hours: -0.5, ..trip() }.validate(70.0).is_err());
        assert!(PlanTrip { current_cycle_hours: f64::INFINITY, ..trip() }.validate(70.0).is_err());
    }

    #[test]
    fn test_stops_are_trimmed_and_ordered() {
        let stops = trip().stops();
        assert_eq!(stops[0].name, "Richmond, VA");
        assert_eq!(stops[0].role, StopRole::Current);
        assert_eq!(stops[1].role, StopRole::Pickup);
        assert_eq!(stops[2].role, StopRole::Dropoff);
    }

    #[test]
    fn test_deserializes_with_defaults() {
        let trip: PlanTrip = serde_json::from_str(
            r#"{"current_location": "A", "pickup_location": "B", "dropoff_location": "C"}"#,
        )
        .unwrap();
        assert_eq!(trip.current_cycle_hours, 0.0);
        assert!(trip.start_date.is_none());
        assert_eq!(trip.driver, DriverInfo::default());
    }
}
