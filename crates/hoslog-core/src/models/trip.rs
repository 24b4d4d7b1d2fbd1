//! The trip plan handed back to callers.

use jiff::civil::Date;
use serde::{Deserialize, Serialize};

use super::{Coordinates, DailyLog, DutyEvent, Location, RouteLeg};

/// Driver, carrier and vehicle details printed on every log sheet header.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct DriverInfo {
    #[serde(default = "default_driver_name")]
    pub driver_name: String,
    #[serde(default = "default_carrier_name")]
    pub carrier_name: String,
    #[serde(default = "default_carrier_address")]
    pub carrier_address: String,
    #[serde(default)]
    pub vehicle_number: String,
}

fn default_driver_name() -> String {
    "Driver Name".to_string()
}

fn default_carrier_name() -> String {
    "FMCSA Carrier".to_string()
}

fn default_carrier_address() -> String {
    "City, State".to_string()
}

impl Default for DriverInfo {
    fn default() -> Self {
        Self {
            driver_name: default_driver_name(),
            carrier_name: default_carrier_name(),
            carrier_address: default_carrier_address(),
            vehicle_number: String::new(),
        }
    }
}

/// Complete, immutable result of one planning request.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct TripPlan {
    /// Sum of leg distances
    pub total_distance_miles: f64,

    /// Sum of leg driving hours
    pub total_driving_hours: f64,

    /// Driving plus on-duty (not driving) hours across all sheets
    pub total_on_duty_hours: f64,

    /// Number of daily log sheets
    pub num_days_required: u32,

    /// Whether the engine resolved every rule trigger
    pub is_compliant: bool,

    /// Compliance verdict and rule annotations
    pub compliance_notes: String,

    /// True when the route fell back to estimated distances
    #[serde(default)]
    pub estimated_route: bool,

    /// Cycle hours already used when the trip started
    #[serde(default)]
    pub starting_cycle_hours: f64,

    /// Date of the first log sheet
    pub start_date: Date,

    /// Stops in travel order
    #[serde(default)]
    pub locations: Vec<Location>,

    /// Route legs in travel order
    #[serde(default)]
    pub legs: Vec<RouteLeg>,

    /// Route path for map display
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub geometry: Vec<Coordinates>,

    /// Log sheet header details
    #[serde(default)]
    pub driver: DriverInfo,

    /// One sheet per 24-hour window
    pub log_sheets: Vec<DailyLog>,
}

impl TripPlan {
    /// Flattens the log sheets back into one simulation-time event stream.
    pub fn events(&self) -> Vec<DutyEvent> {
        self.log_sheets
            .iter()
            .flat_map(DailyLog::absolute_events)
            .collect()
    }
}
