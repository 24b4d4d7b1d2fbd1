//! Caller-supplied leg distances.

use super::{legs_between, require_stops, RouteProvider};
use crate::{
    error::{PlannerError, Result},
    models::{Location, Route},
};

/// Route provider that uses known mileage per leg and a fixed average speed.
#[derive(Debug, Clone, PartialEq)]
pub struct ManualRouteProvider {
    leg_miles: Vec<f64>,
    average_speed_mph: f64,
}

impl ManualRouteProvider {
    /// Creates a provider for the given per-leg mileage.
    ///
    /// # Errors
    ///
    /// Returns `PlannerError::InvalidInput` for a negative or non-finite
    /// distance or a non-positive speed.
    pub fn new(leg_miles: Vec<f64>, average_speed_mph: f64) -> Result<Self> {
        if let Some(bad) = leg_miles.iter().find(|m| !m.is_finite() || **m < 0.0) {
            return Err(PlannerError::invalid_input("leg_miles")
                .with_reason(format!("distances must be zero or positive, got {bad}")));
        }
        if !average_speed_mph.is_finite() || average_speed_mph <= 0.0 {
            return Err(PlannerError::invalid_input("average_speed_mph")
                .with_reason(format!("must be positive, got {average_speed_mph}")));
        }
        Ok(Self {
            leg_miles,
            average_speed_mph,
        })
    }

    pub fn leg_miles(&self) -> &[f64] {
        &self.leg_miles
    }
}

impl RouteProvider for ManualRouteProvider {
    fn name(&self) -> &str {
        "manual"
    }

    fn resolve(&self, stops: &[Location]) -> Result<Route> {
        require_stops(stops)?;
        if self.leg_miles.len() != stops.len() - 1 {
            return Err(PlannerError::route_provider(format!(
                "{} leg distance(s) given for {} leg(s)",
                self.leg_miles.len(),
                stops.len() - 1
            )));
        }

        let legs = legs_between(stops, |index, _, _| {
            let miles = self.leg_miles[index];
            (miles, miles / self.average_speed_mph)
        });
        Ok(Route {
            legs,
            geometry: stops.iter().filter_map(|stop| stop.coordinates).collect(),
            estimated: false,
        })
    }
}
