//! Trip planning operations for the Planner.

use std::{sync::Arc, time::Duration};

use jiff::Zoned;
use log::{info, warn};
use tokio::{task, time};

use super::Planner;
use crate::{
    aggregate::{aggregate, TripDetails},
    audit::{audit, Violation},
    engine::Schedule,
    error::{PlannerError, Result},
    logs,
    models::{Location, Route, RouteLeg, TripPlan},
    params::PlanTrip,
    routing::estimate_route,
};

impl Planner {
    /// Resolves `stops` through the route provider.
    ///
    /// Locating and routing each run on a blocking task bounded by the
    /// routing timeout. Any failure, panic or timeout is logged and replaced
    /// by an estimated route over whatever coordinates were found, so this
    /// never fails.
    pub async fn resolve_route(&self, stops: Vec<Location>) -> Route {
        let Some(provider) = self.provider.clone() else {
            return estimate_route(&stops, &self.config.routing);
        };
        let name = provider.name().to_string();

        let locate = {
            let (provider, stops) = (Arc::clone(&provider), stops.clone());
            move || provider.locate(&stops)
        };
        let stops = match self.within_timeout(locate).await {
            Ok(located) => located,
            Err(failure) => {
                warn!("Route provider '{name}' could not locate stops ({failure}); using estimated route");
                return estimate_route(&stops, &self.config.routing);
            }
        };

        let route = {
            let (provider, stops) = (Arc::clone(&provider), stops.clone());
            move || provider.resolve(&stops)
        };
        match self.within_timeout(route).await {
            Ok(route) => route,
            Err(failure) => {
                warn!("Route provider '{name}' failed ({failure}); using estimated route");
                estimate_route(&stops, &self.config.routing)
            }
        }
    }

    /// Runs a provider call on a blocking task, reporting failures as text.
    async fn within_timeout<T, F>(&self, call: F) -> std::result::Result<T, String>
    where
        F: FnOnce() -> Result<T> + Send + 'static,
        T: Send + 'static,
    {
        let limit = Duration::from_secs(self.config.routing.timeout_secs);
        match time::timeout(limit, task::spawn_blocking(call)).await {
            Ok(Ok(Ok(value))) => Ok(value),
            Ok(Ok(Err(e))) => Err(e.to_string()),
            Ok(Err(e)) => Err(format!("Task join error: {e}")),
            Err(_) => Err(format!("timed out after {}s", limit.as_secs())),
        }
    }

    /// Runs the HOS engine over `legs` on a blocking task.
    ///
    /// # Errors
    ///
    /// * `PlannerError::InvalidInput` - When the cycle hours or legs are invalid
    /// * `PlannerError::Unschedulable` - When no compliant schedule exists
    ///
    /// # Panics
    ///
    /// Re-raises a panic from the engine, which signals a broken invariant.
    pub async fn schedule(&self, legs: &[RouteLeg], starting_cycle_hours: f64) -> Result<Schedule> {
        let engine = self.engine.clone();
        let legs = legs.to_vec();

        task::spawn_blocking(move || engine.plan(&legs, starting_cycle_hours))
            .await
            .map_err(|e| {
                if e.is_panic() {
                    std::panic::resume_unwind(e.into_panic());
                }
                PlannerError::Configuration {
                    message: format!("Task join error: {e}"),
                }
            })?
    }

    /// Plans a complete trip: route, schedule, log sheets and summary.
    ///
    /// # Errors
    ///
    /// * `PlannerError::InvalidInput` - When a location is blank or the cycle
    ///   hours are out of range
    /// * `PlannerError::Unschedulable` - When the trip cannot be completed
    ///   under the hours-of-service limits
    ///
    /// # Examples
    ///
    /// ```rust,no_run
    /// # use hoslog_core::{params::PlanTrip, PlannerBuilder};
    /// # async {
    /// let planner = PlannerBuilder::new().offline(true).build().await?;
    /// let plan = planner
    ///     .plan_trip(&PlanTrip {
    ///         current_location: "Richmond, VA".to_string(),
    ///         pickup_location: "Baltimore, MD".to_string(),
    ///         dropoff_location: "Newark, NJ".to_string(),
    ///         ..Default::default()
    ///     })
    ///     .await?;
    /// assert!(plan.estimated_route);
    /// # Result::<(), hoslog_core::PlannerError>::Ok(())
    /// # };
    /// ```
    pub async fn plan_trip(&self, params: &PlanTrip) -> Result<TripPlan> {
        params.validate(self.rules().max_cycle_hours)?;

        let route = self.resolve_route(params.stops()).await;
        let schedule = self.schedule(&route.legs, params.current_cycle_hours).await?;

        let start_date = params.start_date.unwrap_or_else(|| Zoned::now().date());
        let log_sheets = logs::split(&schedule.events, start_date);
        let plan = aggregate(
            route,
            &schedule,
            log_sheets,
            TripDetails {
                driver: params.driver.clone(),
                starting_cycle_hours: params.current_cycle_hours,
                start_date,
            },
        );

        info!(
            "Planned {} → {} → {}: {:.1} miles over {} day(s)",
            params.current_location,
            params.pickup_location,
            params.dropoff_location,
            plan.total_distance_miles,
            plan.num_days_required
        );
        Ok(plan)
    }

    /// Re-checks a saved plan against this planner's rules.
    pub fn audit_plan(&self, plan: &TripPlan) -> Vec<Violation> {
        audit(&plan.events(), plan.starting_cycle_hours, self.rules())
    }
}
