//! Duty events, the unit of the simulated timeline.

use serde::{Deserialize, Serialize};

use super::DutyStatus;

/// One contiguous stretch of time spent in a single duty status.
///
/// Inside the engine's output `start_offset_hours` counts from the start of
/// the simulation; inside a [`super::DailyLog`] it counts from that sheet's
/// midnight.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct DutyEvent {
    /// Duty status for the whole event
    pub status: DutyStatus,

    /// Offset of the event start in hours
    #[serde(rename = "start_hour")]
    pub start_offset_hours: f64,

    /// Length of the event in hours (always positive)
    #[serde(rename = "duration")]
    pub duration_hours: f64,

    /// Free text shown on the log grid (e.g. "Driving Richmond → Newark")
    pub description: String,

    /// Stop name or leg label where the event happens
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub location: Option<String>,

    /// Miles covered during the event (driving only)
    #[serde(default, skip_serializing_if = "is_zero")]
    pub distance_miles: f64,

    /// Annotation carried into the daily log remarks
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub remark: Option<String>,
}

fn is_zero(value: &f64) -> bool {
    *value == 0.0
}

impl DutyEvent {
    pub fn new(
        status: DutyStatus,
        start_offset_hours: f64,
        duration_hours: f64,
        description: impl Into<String>,
    ) -> Self {
        Self {
            status,
            start_offset_hours,
            duration_hours,
            description: description.into(),
            location: None,
            distance_miles: 0.0,
            remark: None,
        }
    }

    pub fn with_location(mut self, location: impl Into<String>) -> Self {
        self.location = Some(location.into());
        self
    }

    pub fn with_distance(mut self, miles: f64) -> Self {
        self.distance_miles = miles;
        self
    }

    pub fn with_remark(mut self, remark: impl Into<String>) -> Self {
        self.remark = Some(remark.into());
        self
    }

    /// Offset at which the event ends.
    pub fn end_offset_hours(&self) -> f64 {
        self.start_offset_hours + self.duration_hours
    }
}
