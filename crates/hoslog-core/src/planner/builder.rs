//! Builder for creating and configuring Planner instances.

use std::{
    fmt,
    path::{Path, PathBuf},
    sync::Arc,
};

use log::debug;
use tokio::task;

use super::Planner;
use crate::{
    config::PlannerConfig,
    engine::HosEngine,
    error::{PlannerError, Result},
    routing::{ManualRouteProvider, OsrmRouteProvider, RouteProvider},
};

/// Builder for creating and configuring Planner instances.
#[derive(Clone, Default)]
pub struct PlannerBuilder {
    config: Option<PlannerConfig>,
    config_path: Option<PathBuf>,
    provider: Option<Arc<dyn RouteProvider>>,
    leg_miles: Option<Vec<f64>>,
    offline: bool,
}

impl PlannerBuilder {
    /// Creates a new builder with default settings.
    pub fn new() -> Self {
        Self::default()
    }

    /// Uses the given configuration instead of reading a file.
    pub fn with_config(mut self, config: PlannerConfig) -> Self {
        self.config = Some(config);
        self
    }

    /// Sets a custom configuration file path.
    ///
    /// If not specified, follows the XDG Base Directory conventions:
    /// `$XDG_CONFIG_HOME/hoslog/config.toml` or `~/.config/hoslog/config.toml`,
    /// falling back to built-in defaults when that file does not exist.
    pub fn with_config_path<P: AsRef<Path>>(mut self, path: Option<P>) -> Self {
        if let Some(path) = path {
            self.config_path = Some(path.as_ref().to_path_buf());
        }
        self
    }

    /// Sets the route provider. Defaults to OSRM with Nominatim geocoding.
    ///
    /// Ignored when [`PlannerBuilder::offline`] or
    /// [`PlannerBuilder::with_leg_miles`] is also set.
    pub fn with_route_provider(mut self, provider: Arc<dyn RouteProvider>) -> Self {
        self.provider = Some(provider);
        self
    }

    /// Routes with known per-leg mileage, timed at the configured average
    /// speed. Takes precedence over [`PlannerBuilder::offline`].
    pub fn with_leg_miles(mut self, leg_miles: Vec<f64>) -> Self {
        self.leg_miles = Some(leg_miles);
        self
    }

    /// Skips the route provider, including one given through
    /// [`PlannerBuilder::with_route_provider`], and always plans with
    /// estimated distances.
    pub fn offline(mut self, offline: bool) -> Self {
        self.offline = offline;
        self
    }

    /// Builds the configured planner instance.
    ///
    /// # Errors
    ///
    /// Returns `PlannerError::FileSystem` if the configuration file cannot be read
    /// Returns `PlannerError::ConfigParse` if it is not valid TOML
    /// Returns `PlannerError::Configuration` if the rules or routing options are invalid
    /// Returns `PlannerError::InvalidInput` if a leg distance is negative
    pub async fn build(self) -> Result<Planner> {
        let config = match (self.config, self.config_path) {
            (Some(config), _) => config,
            (None, Some(path)) => task::spawn_blocking(move || PlannerConfig::load(&path))
                .await
                .map_err(|e| PlannerError::Configuration {
                    message: format!("Task join error: {e}"),
                })??,
            (None, None) => task::spawn_blocking(PlannerConfig::load_default)
                .await
                .map_err(|e| PlannerError::Configuration {
                    message: format!("Task join error: {e}"),
                })??,
        };
        config.validate()?;

        let engine = HosEngine::new(config.rules.clone())?;
        // Leg miles beat offline, which beats any other provider.
        let provider: Option<Arc<dyn RouteProvider>> = match (self.leg_miles, self.provider) {
            (Some(leg_miles), _) => Some(Arc::new(ManualRouteProvider::new(
                leg_miles,
                config.routing.average_speed_mph,
            )?)),
            (None, _) if self.offline => None,
            (None, Some(provider)) => Some(provider),
            (None, None) => Some(Arc::new(OsrmRouteProvider::new(config.routing.clone()))),
        };
        debug!(
            "Planner built with provider {}",
            provider.as_ref().map_or("none (offline)", |p| p.name())
        );

        Ok(Planner::new(config, engine, provider))
    }
}

impl fmt::Debug for PlannerBuilder {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("PlannerBuilder")
            .field("config", &self.config)
            .field("config_path", &self.config_path)
            .field(
                "provider",
                &self.provider.as_ref().map(|provider| provider.name()),
            )
            .field("leg_miles", &self.leg_miles)
            .field("offline", &self.offline)
            .finish()
    }
}
