//! Route legs as produced by a route provider.

use serde::{Deserialize, Serialize};

use super::{Coordinates, Location};

/// A single point-to-point segment of the route.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct RouteLeg {
    /// Stop the leg departs from
    pub from: Location,

    /// Stop the leg arrives at
    pub to: Location,

    /// Road distance in statute miles
    pub distance_miles: f64,

    /// Expected driving time in hours
    pub drive_hours: f64,

    /// Path of the leg for map display
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub geometry: Vec<Coordinates>,
}

impl RouteLeg {
    pub fn new(from: Location, to: Location, distance_miles: f64, drive_hours: f64) -> Self {
        Self {
            from,
            to,
            distance_miles,
            drive_hours,
            geometry: Vec::new(),
        }
    }

    /// Average speed over the leg, or zero for a leg without driving time.
    pub fn average_speed_mph(&self) -> f64 {
        if self.drive_hours > 0.0 {
            self.distance_miles / self.drive_hours
        } else {
            0.0
        }
    }

    /// Short "A → B" label used in event descriptions.
    pub fn label(&self) -> String {
        format!("{} → {}", self.from.name, self.to.name)
    }
}

/// The resolved route for a whole trip.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Route {
    /// Legs in travel order
    pub legs: Vec<RouteLeg>,

    /// Full path for map display
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub geometry: Vec<Coordinates>,

    /// True when distances are estimates rather than provider results
    #[serde(default)]
    pub estimated: bool,
}

impl Route {
    pub fn total_distance_miles(&self) -> f64 {
        self.legs.iter().map(|leg| leg.distance_miles).sum()
    }

    pub fn total_drive_hours(&self) -> f64 {
        self.legs.iter().map(|leg| leg.drive_hours).sum()
    }

    /// The stops visited, in order: the first leg's origin followed by every
    /// leg's destination.
    pub fn stops(&self) -> Vec<Location> {
        let mut stops = Vec::with_capacity(self.legs.len() + 1);
        if let Some(first) = self.legs.first() {
            stops.push(first.from.clone());
        }
        stops.extend(self.legs.iter().map(|leg| leg.to.clone()));
        stops
    }
}
