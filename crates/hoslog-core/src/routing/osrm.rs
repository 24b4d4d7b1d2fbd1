//! Nominatim geocoding plus OSRM routing over HTTP.

use std::time::Duration;

use log::{debug, info};
use reqwest::blocking::Client;
use serde::Deserialize;

use super::{legs_between, require_stops, RouteProvider};
use crate::{
    config::RoutingConfig,
    error::{PlannerError, Result, ResultExt},
    models::{Coordinates, Location, Route},
};

const MILES_PER_METER: f64 = 0.000_621_371;
const SECONDS_PER_HOUR: f64 = 3600.0;

/// Route provider backed by public Nominatim and OSRM endpoints.
///
/// The HTTP client is created per call, so the provider itself holds only
/// configuration and is cheap to share.
#[derive(Debug, Clone)]
pub struct OsrmRouteProvider {
    config: RoutingConfig,
}

#[derive(Debug, Deserialize)]
struct Place {
    lat: String,
    lon: String,
}

#[derive(Debug, Deserialize)]
struct OsrmResponse {
    code: String,
    #[serde(default)]
    message: Option<String>,
    #[serde(default)]
    routes: Vec<OsrmRoute>,
}

#[derive(Debug, Deserialize)]
struct OsrmRoute {
    geometry: Option<LineString>,
    #[serde(default)]
    legs: Vec<OsrmLeg>,
}

#[derive(Debug, Deserialize)]
struct OsrmLeg {
    /// Meters
    distance: f64,
    /// Seconds
    duration: f64,
}

#[derive(Debug, Deserialize)]
struct LineString {
    /// `[lon, lat]` pairs
    coordinates: Vec<[f64; 2]>,
}

impl OsrmRouteProvider {
    pub fn new(config: RoutingConfig) -> Self {
        Self { config }
    }

    fn client(&self) -> Result<Client> {
        Client::builder()
            .timeout(Duration::from_secs(self.config.timeout_secs))
            .user_agent(self.config.user_agent.clone())
            .build()
            .route_context("Failed to build HTTP client")
    }

    fn geocode(&self, client: &Client, stop: &Location) -> Result<Coordinates> {
        if let Some(coordinates) = stop.coordinates {
            return Ok(coordinates);
        }

        let url = format!("{}/search", self.config.geocoder_url.trim_end_matches('/'));
        let places: Vec<Place> = client
            .get(&url)
            .query(&[("q", stop.name.as_str()), ("format", "json"), ("limit", "1")])
            .send()
            .and_then(|response| response.error_for_status())
            .and_then(|response| response.json())
            .route_context(format!("Geocoding '{}' failed", stop.name))?;

        let coordinates = first_place(&stop.name, &places)?;
        debug!("Geocoded '{}' to {:?}", stop.name, coordinates);
        Ok(coordinates)
    }
}

fn first_place(name: &str, places: &[Place]) -> Result<Coordinates> {
    let place = places
        .first()
        .ok_or_else(|| PlannerError::route_provider(format!("No geocoding match for '{name}'")))?;
    let lat = place
        .lat
        .parse::<f64>()
        .route_context(format!("Bad latitude for '{name}'"))?;
    let lon = place
        .lon
        .parse::<f64>()
        .route_context(format!("Bad longitude for '{name}'"))?;
    Ok(Coordinates::new(lat, lon))
}

/// Converts an OSRM response into a route over `stops`, which must already
/// carry coordinates.
fn route_from_response(stops: &[Location], response: OsrmResponse) -> Result<Route> {
    if response.code != "Ok" {
        return Err(PlannerError::route_provider(format!(
            "OSRM returned {}: {}",
            response.code,
            response.message.unwrap_or_default()
        )));
    }
    let route = response
        .routes
        .into_iter()
        .next()
        .ok_or_else(|| PlannerError::route_provider("OSRM returned no routes"))?;
    if route.legs.len() != stops.len() - 1 {
        return Err(PlannerError::route_provider(format!(
            "OSRM returned {} leg(s) for {} stop(s)",
            route.legs.len(),
            stops.len()
        )));
    }

    let legs = legs_between(stops, |index, _, _| {
        let leg = &route.legs[index];
        (
            leg.distance * MILES_PER_METER,
            leg.duration / SECONDS_PER_HOUR,
        )
    });
    let geometry = route
        .geometry
        .map(|line| {
            line.coordinates
                .into_iter()
                .map(|[lon, lat]| Coordinates::new(lat, lon))
                .collect()
        })
        .unwrap_or_default();

    Ok(Route {
        legs,
        geometry,
        estimated: false,
    })
}

impl RouteProvider for OsrmRouteProvider {
    fn name(&self) -> &str {
        "osrm"
    }

    fn locate(&self, stops: &[Location]) -> Result<Vec<Location>> {
        let client = self.client()?;
        stops
            .iter()
            .map(|stop| {
                let coordinates = self.geocode(&client, stop)?;
                Ok(stop.clone().with_coordinates(coordinates))
            })
            .collect()
    }

    fn resolve(&self, stops: &[Location]) -> Result<Route> {
        require_stops(stops)?;
        let located = self.locate(stops)?;
        let client = self.client()?;

        let waypoints: Vec<String> = located
            .iter()
            .filter_map(|stop| stop.coordinates)
            .map(|c| format!("{},{}", c.lon, c.lat))
            .collect();
        let url = format!(
            "{}/route/v1/driving/{}",
            self.config.router_url.trim_end_matches('/'),
            waypoints.join(";")
        );

        let response: OsrmResponse = client
            .get(&url)
            .query(&[("overview", "full"), ("geometries", "geojson")])
            .send()
            .and_then(|response| response.error_for_status())
            .and_then(|response| response.json())
            .route_context("Route lookup failed")?;

        let route = route_from_response(&located, response)?;
        info!(
            "Resolved route over {} stops: {:.1} miles, {:.2} hours",
            located.len(),
            route.total_distance_miles(),
            route.total_drive_hours()
        );
        Ok(route)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::StopRole;

    fn located_stops() -> Vec<Location> {
        vec![
            Location::new("Richmond, VA", StopRole::Current)
                .with_coordinates(Coordinates::new(37.5407, -77.4360)),
            Location::new("Baltimore, MD", StopRole::Pickup)
                .with_coordinates(Coordinates::new(39.2904, -76.6122)),
            Location::new("Newark, NJ", StopRole::Dropoff)
                .with_coordinates(Coordinates::new(40.7357, -74.1724)),
        ]
    }

    #[test]
    fn test_route_from_response_converts_units() {
        let response: OsrmResponse = serde_json::from_str(
            r#"{
                "code": "Ok",
                "routes": [{
                    "distance": 531000.0,
                    "duration": 19800.0,
                    "geometry": {"type": "LineString", "coordinates": [[-77.436, 37.5407], [-74.1724, 40.7357]]},
                    "legs": [
                        {"distance": 241402.0, "duration": 9000.0},
                        {"distance": 289682.0, "duration": 10800.0}
                    ]
                }]
            }"#,
        )
        .unwrap();

        let route = route_from_response(&located_stops(), response).unwrap();

        assert!(!route.estimated);
        assert!((route.legs[0].distance_miles - 150.0).abs() < 0.01);
        assert_eq!(route.legs[0].drive_hours, 2.5);
        assert_eq!(route.legs[1].drive_hours, 3.0);
        assert_eq!(route.geometry[0], Coordinates::new(37.5407, -77.436));
    }

    #[test]
    fn test_route_from_error_response() {
        let response: OsrmResponse =
            serde_json::from_str(r#"{"code": "NoRoute", "message": "Impossible route"}"#).unwrap();
        let err = route_from_response(&located_stops(), response).unwrap_err();
        assert!(err.to_string().contains("Impossible route"));
    }

    #[test]
    fn test_first_place_parses_string_coordinates() {
        let places: Vec<Place> =
            serde_json::from_str(r#"[{"lat": "37.5407", "lon": "-77.4360", "display_name": "Richmond"}]"#)
                .unwrap();
        assert_eq!(
            first_place("Richmond, VA", &places).unwrap(),
            Coordinates::new(37.5407, -77.436)
        );
        assert!(first_place("Nowhere", &[]).is_err());
    }

    #[test]
    fn test_provider_rejects_single_stop() {
        let provider = OsrmRouteProvider::new(RoutingConfig::default());
        let err = provider.resolve(&located_stops()[..1]).unwrap_err();
        assert!(matches!(err, PlannerError::RouteProvider { .. }));
    }

    #[test]
    fn test_locate_keeps_known_coordinates() {
        let provider = OsrmRouteProvider::new(RoutingConfig::default());
        let located = provider.locate(&located_stops()).unwrap();
        assert_eq!(located, located_stops());
    }
}
