//! The trip plan aggregator.
//!
//! A pure summarization pass over the route, the engine's verdict and the
//! assembled log sheets. It never evaluates HOS rules itself.

use jiff::civil::Date;

use crate::{
    engine::Schedule,
    models::{DailyLog, DriverInfo, Route, TripPlan},
};

/// Request details carried onto the plan unchanged.
#[derive(Debug, Clone, PartialEq)]
pub struct TripDetails {
    pub driver: DriverInfo,
    pub starting_cycle_hours: f64,
    pub start_date: Date,
}

/// Builds the final [`TripPlan`].
pub fn aggregate(
    route: Route,
    schedule: &Schedule,
    log_sheets: Vec<DailyLog>,
    details: TripDetails,
) -> TripPlan {
    let total_on_duty_hours = log_sheets
        .iter()
        .map(|sheet| sheet.totals.on_duty_total())
        .sum();
    let num_days_required = u32::try_from(log_sheets.len()).unwrap_or(u32::MAX);

    TripPlan {
        total_distance_miles: route.total_distance_miles(),
        total_driving_hours: route.total_drive_hours(),
        total_on_duty_hours,
        num_days_required,
        is_compliant: schedule.is_compliant,
        compliance_notes: compliance_notes(schedule, num_days_required, route.estimated),
        estimated_route: route.estimated,
        starting_cycle_hours: details.starting_cycle_hours,
        start_date: details.start_date,
        locations: route.stops(),
        legs: route.legs,
        geometry: route.geometry,
        driver: details.driver,
        log_sheets,
    }
}

fn compliance_notes(schedule: &Schedule, num_days: u32, estimated: bool) -> String {
    let mut notes = vec![if schedule.is_compliant {
        "Trip complies with all HOS regulations".to_string()
    } else {
        "Trip requires review for HOS compliance".to_string()
    }];

    if num_days > 1 {
        notes.push(format!(
            "Multi-day trip - {num_days} days required for HOS compliance"
        ));
    }
    notes.extend(schedule.notes.iter().cloned());
    if estimated {
        notes.push("Route distances are estimated (routing service unavailable)".to_string());
    }

    notes.join("; ")
}
