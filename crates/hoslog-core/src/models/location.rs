//! Trip stops and their coordinates.

use serde::{Deserialize, Serialize};

/// Mean Earth radius in statute miles.
const EARTH_RADIUS_MILES: f64 = 3958.8;

/// A WGS84 coordinate pair.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq)]
pub struct Coordinates {
    /// Latitude in decimal degrees
    pub lat: f64,
    /// Longitude in decimal degrees
    pub lon: f64,
}

impl Coordinates {
    pub fn new(lat: f64, lon: f64) -> Self {
        Self { lat, lon }
    }

    /// Great-circle distance to `other` in statute miles.
    pub fn haversine_miles(&self, other: &Coordinates) -> f64 {
        let lat1 = self.lat.to_radians();
        let lat2 = other.lat.to_radians();
        let delta_lat = (other.lat - self.lat).to_radians();
        let delta_lon = (other.lon - self.lon).to_radians();

        let a = (delta_lat / 2.0).sin().powi(2)
            + lat1.cos() * lat2.cos() * (delta_lon / 2.0).sin().powi(2);
        let c = 2.0 * a.sqrt().atan2((1.0 - a).sqrt());

        EARTH_RADIUS_MILES * c
    }
}

/// The part a stop plays in the trip.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum StopRole {
    /// Where the driver is when planning starts
    Current,
    /// Where the load is picked up
    Pickup,
    /// Where the load is delivered
    Dropoff,
}

impl StopRole {
    pub fn as_str(&self) -> &'static str {
        match self {
            StopRole::Current => "current",
            StopRole::Pickup => "pickup",
            StopRole::Dropoff => "dropoff",
        }
    }
}

/// A named trip stop, optionally resolved to coordinates.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Location {
    /// Place name as entered (e.g. "Richmond, VA")
    pub name: String,

    /// Resolved coordinates, if known
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub coordinates: Option<Coordinates>,

    /// Role of the stop within the trip
    pub role: StopRole,
}

impl Location {
    /// Creates an unresolved location.
    pub fn new(name: impl Into<String>, role: StopRole) -> Self {
        Self {
            name: name.into(),
            coordinates: None,
            role,
        }
    }

    /// Returns a copy resolved to the given coordinates.
    pub fn with_coordinates(mut self, coordinates: Coordinates) -> Self {
        self.coordinates = Some(coordinates);
        self
    }
}
