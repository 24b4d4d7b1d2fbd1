//! Route providers: turning trip stops into legs with distance and duration.
//!
//! The [`RouteProvider`] trait is the only I/O boundary of planning. Providers
//! are blocking and object-safe; the planner runs them on a blocking task
//! with a timeout and replaces any failure with [`estimate_route`]. Stops
//! are located first and routed second, so a routing failure still leaves
//! the planner with coordinates to estimate from.
//!
//! - [`OsrmRouteProvider`] geocodes stop names with Nominatim and routes them
//!   with OSRM.
//! - [`ManualRouteProvider`] takes leg distances from the caller.

mod manual;
mod osrm;

use log::debug;

pub use manual::ManualRouteProvider;
pub use osrm::OsrmRouteProvider;

use crate::{
    config::RoutingConfig,
    error::{PlannerError, Result},
    models::{Location, Route, RouteLeg},
};

/// Resolves an ordered list of stops into a route.
pub trait RouteProvider: Send + Sync {
    /// Short provider name for log messages.
    fn name(&self) -> &str;

    /// Attaches coordinates to `stops`, keeping any they already carry.
    ///
    /// The default leaves the stops unchanged.
    ///
    /// # Errors
    ///
    /// Returns `PlannerError::RouteProvider` when a stop cannot be located.
    fn locate(&self, stops: &[Location]) -> Result<Vec<Location>> {
        Ok(stops.to_vec())
    }

    /// Resolves `stops` (at least two) into one leg per consecutive pair.
    ///
    /// # Errors
    ///
    /// Returns `PlannerError::RouteProvider` when the stops cannot be
    /// resolved.
    fn resolve(&self, stops: &[Location]) -> Result<Route>;
}

/// Checks that a provider was given something to route.
pub(crate) fn require_stops(stops: &[Location]) -> Result<()> {
    if stops.len() < 2 {
        return Err(PlannerError::route_provider(format!(
            "at least two stops are required, got {}",
            stops.len()
        )));
    }
    Ok(())
}

/// Builds one leg per consecutive stop pair with `measure` supplying the
/// distance in miles and drive hours.
pub(crate) fn legs_between<F>(stops: &[Location], mut measure: F) -> Vec<RouteLeg>
where
    F: FnMut(usize, &Location, &Location) -> (f64, f64),
{
    stops
        .windows(2)
        .enumerate()
        .map(|(index, pair)| {
            let (miles, hours) = measure(index, &pair[0], &pair[1]);
            RouteLeg::new(pair[0].clone(), pair[1].clone(), miles, hours)
        })
        .collect()
}

/// Degraded-mode route used when the provider fails or times out.
///
/// When every stop has coordinates, each leg is the straight-line distance
/// scaled by `road_factor`; otherwise `fallback_trip_miles` is split evenly
/// over the legs. Drive time assumes `average_speed_mph`. The route is always
/// marked as estimated.
pub fn estimate_route(stops: &[Location], routing: &RoutingConfig) -> Route {
    let leg_count = stops.len().saturating_sub(1).max(1);
    let all_located = stops.iter().all(|stop| stop.coordinates.is_some());

    let legs = legs_between(stops, |_, from, to| {
        let miles = match (from.coordinates, to.coordinates) {
            (Some(a), Some(b)) if all_located => a.haversine_miles(&b) * routing.road_factor,
            _ => routing.fallback_trip_miles / leg_count as f64,
        };
        (miles, miles / routing.average_speed_mph)
    });
    debug!(
        "Estimated {} leg(s) from {}",
        legs.len(),
        if all_located { "coordinates" } else { "fallback distance" }
    );

    let geometry = stops.iter().filter_map(|stop| stop.coordinates).collect();
    Route {
        legs,
        geometry,
        estimated: true,
    }
}
