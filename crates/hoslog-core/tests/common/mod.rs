#![allow(dead_code)]

use std::sync::Arc;

use hoslog_core::{
    params::PlanTrip, HosEngine, HosRules, Location, ManualRouteProvider, Planner, PlannerBuilder,
    PlannerConfig, RouteLeg, StopRole,
};
use jiff::civil::{date, Date};

pub const START_DATE: Date = date(2024, 3, 4);

/// Helper function to create a test planner with fixed leg mileage
pub async fn create_test_planner(leg_miles: Vec<f64>) -> Planner {
    let provider =
        ManualRouteProvider::new(leg_miles, 60.0).expect("Failed to create route provider");
    PlannerBuilder::new()
        .with_config(PlannerConfig::default())
        .with_route_provider(Arc::new(provider))
        .build()
        .await
        .expect("Failed to create planner")
}

/// Richmond → Baltimore → Newark with the given cycle hours already used
pub fn test_trip(current_cycle_hours: f64) -> PlanTrip {
    PlanTrip {
        current_location: "Richmond, VA".to_string(),
        pickup_location: "Baltimore, MD".to_string(),
        dropoff_location: "Newark, NJ".to_string(),
        current_cycle_hours,
        start_date: Some(START_DATE),
        ..Default::default()
    }
}

/// Current → pickup → dropoff legs with the given driving hours at 60 mph
pub fn pickup_dropoff_legs(to_pickup: f64, to_dropoff: f64) -> Vec<RouteLeg> {
    let current = Location::new("Chicago, IL", StopRole::Current);
    let pickup = Location::new("Omaha, NE", StopRole::Pickup);
    let dropoff = Location::new("Denver, CO", StopRole::Dropoff);
    vec![
        RouteLeg::new(current, pickup.clone(), to_pickup * 60.0, to_pickup),
        RouteLeg::new(pickup, dropoff, to_dropoff * 60.0, to_dropoff),
    ]
}

pub fn default_engine() -> HosEngine {
    HosEngine::new(HosRules::default()).expect("Failed to create engine")
}

/// Pickup and dropoff legs over a spread of driving hours, labelled for
/// assertion messages.
pub fn leg_grid() -> Vec<(String, Vec<RouteLeg>)> {
    const LEG_HOURS: [f64; 6] = [0.0, 2.5, 7.75, 11.0, 17.4, 30.0];

    let mut grid = Vec::new();
    for to_pickup in LEG_HOURS {
        for to_dropoff in LEG_HOURS {
            grid.push((
                format!("legs {to_pickup}h + {to_dropoff}h"),
                pickup_dropoff_legs(to_pickup, to_dropoff),
            ));
        }
    }
    grid
}
