//! Tests for the planner module.

use std::{sync::Arc, thread, time::Duration};

use jiff::civil::date;

use super::*;
use crate::{
    config::RoutingConfig,
    error::{PlannerError, Result},
    models::{Coordinates, DutyStatus, Location, Route},
    params::PlanTrip,
    routing::ManualRouteProvider,
};

/// Provider that always fails, to exercise the estimated fallback.
struct FailingProvider;

impl RouteProvider for FailingProvider {
    fn name(&self) -> &str {
        "failing"
    }

    fn resolve(&self, _stops: &[Location]) -> Result<Route> {
        Err(PlannerError::route_provider("service unavailable"))
    }
}

/// Provider that locates every stop but cannot route between them.
struct GeocodeOnlyProvider;

impl GeocodeOnlyProvider {
    const COORDINATES: [Coordinates; 3] = [
        Coordinates { lat: 37.5407, lon: -77.4360 },
        Coordinates { lat: 39.2904, lon: -76.6122 },
        Coordinates { lat: 40.7357, lon: -74.1724 },
    ];
}

impl RouteProvider for GeocodeOnlyProvider {
    fn name(&self) -> &str {
        "geocode-only"
    }

    fn locate(&self, stops: &[Location]) -> Result<Vec<Location>> {
        Ok(stops
            .iter()
            .zip(Self::COORDINATES)
            .map(|(stop, coordinates)| stop.clone().with_coordinates(coordinates))
            .collect())
    }

    fn resolve(&self, _stops: &[Location]) -> Result<Route> {
        Err(PlannerError::route_provider("router unavailable"))
    }
}

/// Provider slower than the configured timeout.
struct SlowProvider;

impl RouteProvider for SlowProvider {
    fn name(&self) -> &str {
        "slow"
    }

    fn resolve(&self, stops: &[Location]) -> Result<Route> {
        thread::sleep(Duration::from_secs(2));
        ManualRouteProvider::new(vec![1.0; stops.len() - 1], 60.0)?.resolve(stops)
    }
}

/// Helper function to create a test planner
async fn create_test_planner(provider: Arc<dyn RouteProvider>) -> Planner {
    PlannerBuilder::new()
        .with_config(PlannerConfig::default())
        .with_route_provider(provider)
        .build()
        .await
        .expect("Failed to create planner")
}

fn trip(cycle: f64) -> PlanTrip {
    PlanTrip {
        current_location: "Richmond, VA".to_string(),
        pickup_location: "Baltimore, MD".to_string(),
        dropoff_location: "Newark, NJ".to_string(),
        current_cycle_hours: cycle,
        start_date: Some(date(2024, 3, 1)),
        ..Default::default()
    }
}

#[tokio::test]
async fn test_plan_trip_with_manual_route() {
    let provider = ManualRouteProvider::new(vec![150.0, 180.0], 60.0).unwrap();
    let planner = create_test_planner(Arc::new(provider)).await;

    let plan = planner.plan_trip(&trip(0.0)).await.expect("Failed to plan trip");

    assert!(!plan.estimated_route);
    assert!(plan.is_compliant);
    assert_eq!(plan.total_distance_miles, 330.0);
    assert_eq!(plan.total_driving_hours, 5.5);
    assert_eq!(plan.num_days_required, 1);
    assert_eq!(plan.log_sheets[0].date, date(2024, 3, 1));
    assert_eq!(plan.locations.len(), 3);
    // 5.5 driving + 2 x 1.0 dwell + 2 x 0.5 inspection
    assert!((plan.total_on_duty_hours - 8.5).abs() < 1e-9);
    assert!(planner.audit_plan(&plan).is_empty());
}

#[tokio::test]
async fn test_provider_failure_falls_back_to_estimate() {
    let planner = create_test_planner(Arc::new(FailingProvider)).await;

    let plan = planner.plan_trip(&trip(0.0)).await.expect("Failed to plan trip");

    assert!(plan.estimated_route);
    assert_eq!(plan.total_distance_miles, 400.0);
    assert!(plan.compliance_notes.contains("estimated"));
}

#[tokio::test]
async fn test_routing_failure_estimates_from_located_stops() {
    let planner = create_test_planner(Arc::new(GeocodeOnlyProvider)).await;
    let road_factor = planner.config().routing.road_factor;

    let route = planner.resolve_route(trip(0.0).stops()).await;

    let [richmond, baltimore, newark] = GeocodeOnlyProvider::COORDINATES;
    assert!(route.estimated);
    assert_eq!(route.geometry.len(), 3);
    assert!(
        (route.legs[0].distance_miles - richmond.haversine_miles(&baltimore) * road_factor).abs()
            < 1e-9
    );
    assert!(
        (route.legs[1].distance_miles - baltimore.haversine_miles(&newark) * road_factor).abs()
            < 1e-9
    );
    assert_ne!(route.total_distance_miles(), 400.0);
}

#[tokio::test]
async fn test_provider_timeout_falls_back_to_estimate() {
    let config = PlannerConfig {
        routing: RoutingConfig {
            timeout_secs: 1,
            ..RoutingConfig::default()
        },
        ..PlannerConfig::default()
    };
    let planner = PlannerBuilder::new()
        .with_config(config)
        .with_route_provider(Arc::new(SlowProvider))
        .build()
        .await
        .expect("Failed to create planner");

    let route = planner.resolve_route(trip(0.0).stops()).await;
    assert!(route.estimated);
}

#[tokio::test]
async fn test_offline_planner_never_calls_provider() {
    let planner = PlannerBuilder::new()
        .with_config(PlannerConfig::default())
        .with_route_provider(Arc::new(SlowProvider))
        .offline(true)
        .build()
        .await
        .expect("Failed to create planner");

    let route = planner.resolve_route(trip(0.0).stops()).await;
    assert!(route.estimated);
    assert_eq!(route.legs.len(), 2);
    assert_eq!(route.total_distance_miles(), 400.0);
}

#[tokio::test]
async fn test_leg_miles_take_precedence_over_provider() {
    let planner = PlannerBuilder::new()
        .with_config(PlannerConfig::default())
        .with_route_provider(Arc::new(FailingProvider))
        .with_leg_miles(vec![120.0, 60.0])
        .build()
        .await
        .expect("Failed to create planner");

    let route = planner.resolve_route(trip(0.0).stops()).await;
    assert!(!route.estimated);
    assert_eq!(route.total_distance_miles(), 180.0);
}

#[tokio::test]
async fn test_plan_trip_rejects_invalid_cycle_hours() {
    let planner = create_test_planner(Arc::new(FailingProvider)).await;

    let err = planner.plan_trip(&trip(75.0)).await.unwrap_err();
    assert!(matches!(err, PlannerError::InvalidInput { .. }));
}

#[tokio::test]
async fn test_plan_trip_reports_restart() {
    let provider = ManualRouteProvider::new(vec![60.0, 120.0], 60.0).unwrap();
    let planner = create_test_planner(Arc::new(provider)).await;

    let plan = planner.plan_trip(&trip(68.0)).await.expect("Failed to plan trip");

    assert!(plan.compliance_notes.contains("34-hour restart"));
    assert_eq!(plan.num_days_required, 2);
    assert!(plan.log_sheets[0]
        .events
        .iter()
        .any(|e| e.status == DutyStatus::OffDuty && e.remark.is_some()));
}

#[tokio::test]
async fn test_unschedulable_trip_is_an_error() {
    let provider = ManualRouteProvider::new(vec![30_000.0, 0.0], 60.0).unwrap();
    let planner = create_test_planner(Arc::new(provider)).await;

    let err = planner.plan_trip(&trip(0.0)).await.unwrap_err();
    assert!(matches!(err, PlannerError::Unschedulable { .. }));
}

#[tokio::test]
async fn test_builder_reads_config_file() {
    let dir = tempfile::TempDir::new().expect("Failed to create temp dir");
    let path = dir.path().join("config.toml");
    std::fs::write(&path, "[rules]\nrest_in_sleeper_berth = true\n").unwrap();

    let planner = PlannerBuilder::new()
        .with_config_path(Some(&path))
        .offline(true)
        .build()
        .await
        .expect("Failed to create planner");

    assert!(planner.rules().rest_in_sleeper_berth);
    assert_eq!(planner.rules().max_driving_hours, 11.0);
}

#[tokio::test]
async fn test_builder_rejects_invalid_rules() {
    let mut config = PlannerConfig::default();
    config.rules.max_driving_hours = 0.0;

    let err = PlannerBuilder::new()
        .with_config(config)
        .build()
        .await
        .unwrap_err();
    assert!(matches!(err, PlannerError::Configuration { .. }));
}

#[tokio::test]
async fn test_leg_miles_use_configured_speed() {
    let mut config = PlannerConfig::default();
    config.routing.average_speed_mph = 50.0;

    let planner = PlannerBuilder::new()
        .with_config(config)
        .with_leg_miles(vec![100.0, 250.0])
        .offline(true)
        .build()
        .await
        .expect("Failed to create planner");

    let route = planner.resolve_route(trip(0.0).stops()).await;
    assert!(!route.estimated);
    assert_eq!(route.legs[0].drive_hours, 2.0);
    assert_eq!(route.legs[1].drive_hours, 5.0);
}

#[tokio::test]
async fn test_builder_rejects_negative_leg_miles() {
    let err = PlannerBuilder::new()
        .with_config(PlannerConfig::default())
        .with_leg_miles(vec![-1.0, 10.0])
        .build()
        .await
        .unwrap_err();
    assert!(matches!(err, PlannerError::InvalidInput { .. }));
}
