//! High-level planner API for trip planning.
//!
//! This module provides the main [`Planner`] interface. The planner wires the
//! planning pipeline together and owns everything that may block:
//!
//! ```text
//! ┌───────────────┐   ┌─────────────┐   ┌────────────┐   ┌─────────────┐
//! │ RouteProvider │──▶│  HosEngine  │──▶│ logs::split│──▶│  aggregate  │
//! │ (timeout +    │   │ (blocking   │   │            │   │             │
//! │  fallback)    │   │  task)      │   │            │   │             │
//! └───────────────┘   └─────────────┘   └────────────┘   └─────────────┘
//!     Route              Schedule          DailyLog[]       TripPlan
//! ```
//!
//! ## Submodules
//!
//! - [`builder`]: Factory for creating [`Planner`] instances with configuration
//! - [`plan_ops`]: Route resolution, scheduling and trip planning
//!
//! No state is shared between calls: every operation builds its own
//! simulation, so one planner can serve concurrent requests.
//!
//! # Usage Examples
//!
//! ```rust
//! use std::sync::Arc;
//!
//! use hoslog_core::{params::PlanTrip, routing::ManualRouteProvider, PlannerBuilder};
//!
//! # async fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let planner = PlannerBuilder::new()
//!     .with_route_provider(Arc::new(ManualRouteProvider::new(vec![150.0, 180.0], 60.0)?))
//!     .build()
//!     .await?;
//!
//! let plan = planner
//!     .plan_trip(&PlanTrip {
//!         current_location: "Richmond, VA".to_string(),
//!         pickup_location: "Baltimore, MD".to_string(),
//!         dropoff_location: "Newark, NJ".to_string(),
//!         current_cycle_hours: 12.0,
//!         ..Default::default()
//!     })
//!     .await?;
//! assert_eq!(plan.num_days_required, plan.log_sheets.len() as u32);
//! # Ok(())
//! # }
//! ```

use std::{fmt, sync::Arc};

// Module declarations
pub mod builder;
pub mod plan_ops;

#[cfg(test)]
mod tests;

// Re-export the main types
pub use builder::PlannerBuilder;

use crate::{
    config::{HosRules, PlannerConfig},
    engine::HosEngine,
    routing::RouteProvider,
};

/// Main planner interface for planning trips.
#[derive(Clone)]
pub struct Planner {
    pub(crate) config: PlannerConfig,
    pub(crate) engine: Arc<HosEngine>,
    /// `None` plans with estimated routes only
    pub(crate) provider: Option<Arc<dyn RouteProvider>>,
}

impl Planner {
    pub(crate) fn new(
        config: PlannerConfig,
        engine: HosEngine,
        provider: Option<Arc<dyn RouteProvider>>,
    ) -> Self {
        Self {
            config,
            engine: Arc::new(engine),
            provider,
        }
    }

    /// The effective configuration.
    pub fn config(&self) -> &PlannerConfig {
        &self.config
    }

    /// The HOS rules the engine enforces.
    pub fn rules(&self) -> &HosRules {
        self.engine.rules()
    }
}

impl fmt::Debug for Planner {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Planner")
            .field("config", &self.config)
            .field(
                "provider",
                &self.provider.as_ref().map(|provider| provider.name()),
            )
            .finish()
    }
}
