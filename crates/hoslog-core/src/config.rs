//! Planner configuration: HOS rule limits, rule priority and routing options.
//!
//! Configuration is read from `$XDG_CONFIG_HOME/hoslog/config.toml` when that
//! file exists, or from an explicit path. Every field has a default, so a
//! partial file only overrides what it names:
//!
//! ```toml
//! [rules]
//! pickup_dwell_hours = 1.5
//! rule_order = ["cycle_restart", "duty_window", "driving_limit", "daily_log_limit", "break"]
//!
//! [routing]
//! timeout_secs = 5
//! ```

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::error::{PlannerError, Result, ResultExt};

/// File name looked up under the XDG configuration directory.
pub const CONFIG_FILE_NAME: &str = "config.toml";

/// The guard conditions evaluated before every driving increment.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "snake_case")]
pub enum RuleKind {
    /// 70-hour/8-day cycle; resolved by a 34-hour restart
    CycleRestart,
    /// 11 hours of driving since the last 10-hour rest
    DrivingLimit,
    /// 14-hour on-duty window since the last 10-hour rest
    DutyWindow,
    /// 11 hours of driving on one calendar log sheet
    DailyLogLimit,
    /// 30-minute break after 8 cumulative driving hours
    Break,
}

impl RuleKind {
    pub const ALL: [RuleKind; 5] = [
        RuleKind::CycleRestart,
        RuleKind::DrivingLimit,
        RuleKind::DutyWindow,
        RuleKind::DailyLogLimit,
        RuleKind::Break,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            RuleKind::CycleRestart => "cycle_restart",
            RuleKind::DrivingLimit => "driving_limit",
            RuleKind::DutyWindow => "duty_window",
            RuleKind::DailyLogLimit => "daily_log_limit",
            RuleKind::Break => "break",
        }
    }
}

/// FMCSA property-carrier limits plus the operational constants the
/// simulation uses. All values are hours unless noted.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct HosRules {
    pub max_driving_hours: f64,
    pub max_duty_window_hours: f64,
    pub min_rest_hours: f64,
    pub break_after_driving_hours: f64,
    pub break_hours: f64,
    pub max_cycle_hours: f64,
    pub restart_hours: f64,
    pub pickup_dwell_hours: f64,
    pub dropoff_dwell_hours: f64,
    pub pre_trip_inspection_hours: f64,
    pub post_trip_inspection_hours: f64,
    /// Off-duty time before the driver reports for duty on day one
    pub start_of_day_hours: f64,
    /// Simulation horizon in days
    pub max_plan_days: u32,
    /// Log 10-hour rests as sleeper berth time instead of off duty
    pub rest_in_sleeper_berth: bool,
    /// Priority order of the guard conditions; first applicable wins
    pub rule_order: Vec<RuleKind>,
}

impl Default for HosRules {
    fn default() -> Self {
        Self {
            max_driving_hours: 11.0,
            max_duty_window_hours: 14.0,
            min_rest_hours: 10.0,
            break_after_driving_hours: 8.0,
            break_hours: 0.5,
            max_cycle_hours: 70.0,
            restart_hours: 34.0,
            pickup_dwell_hours: 1.0,
            dropoff_dwell_hours: 1.0,
            pre_trip_inspection_hours: 0.5,
            post_trip_inspection_hours: 0.5,
            start_of_day_hours: 6.0,
            max_plan_days: 14,
            rest_in_sleeper_berth: false,
            rule_order: RuleKind::ALL.to_vec(),
        }
    }
}

impl HosRules {
    /// Rules with no pre-trip rest, inspections or stop dwell time, so a
    /// schedule contains only driving and rule-inserted rest.
    pub fn driving_only() -> Self {
        Self {
            pickup_dwell_hours: 0.0,
            dropoff_dwell_hours: 0.0,
            pre_trip_inspection_hours: 0.0,
            post_trip_inspection_hours: 0.0,
            start_of_day_hours: 0.0,
            ..Self::default()
        }
    }

    /// Checks that every limit is usable and the rule order is a permutation
    /// of all rule kinds.
    ///
    /// # Errors
    ///
    /// Returns `PlannerError::Configuration` describing the first problem.
    pub fn validate(&self) -> Result<()> {
        let limits = [
            ("max_driving_hours", self.max_driving_hours),
            ("max_duty_window_hours", self.max_duty_window_hours),
            ("min_rest_hours", self.min_rest_hours),
            ("break_after_driving_hours", self.break_after_driving_hours),
            ("break_hours", self.break_hours),
            ("max_cycle_hours", self.max_cycle_hours),
            ("restart_hours", self.restart_hours),
        ];
        for (name, value) in limits {
            if !value.is_finite() || value <= 0.0 {
                return Err(PlannerError::configuration(format!(
                    "rules.{name} must be a positive number, got {value}"
                )));
            }
        }

        let durations = [
            ("pickup_dwell_hours", self.pickup_dwell_hours),
            ("dropoff_dwell_hours", self.dropoff_dwell_hours),
            ("pre_trip_inspection_hours", self.pre_trip_inspection_hours),
            ("post_trip_inspection_hours", self.post_trip_inspection_hours),
            ("start_of_day_hours", self.start_of_day_hours),
        ];
        for (name, value) in durations {
            if !value.is_finite() || value < 0.0 {
                return Err(PlannerError::configuration(format!(
                    "rules.{name} must be zero or positive, got {value}"
                )));
            }
        }

        if self.max_plan_days == 0 {
            return Err(PlannerError::configuration(
                "rules.max_plan_days must be at least 1",
            ));
        }

        let is_permutation = self.rule_order.len() == RuleKind::ALL.len()
            && RuleKind::ALL.iter().all(|kind| self.rule_order.contains(kind));
        if !is_permutation {
            let names: Vec<_> = RuleKind::ALL.iter().map(RuleKind::as_str).collect();
            return Err(PlannerError::configuration(format!(
                "rules.rule_order must list each of [{}] exactly once",
                names.join(", ")
            )));
        }

        Ok(())
    }

    /// Simulation horizon in hours.
    pub fn horizon_hours(&self) -> f64 {
        f64::from(self.max_plan_days) * 24.0
    }
}

/// Options for the route provider and the estimated-route fallback.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct RoutingConfig {
    /// Nominatim-compatible geocoding endpoint
    pub geocoder_url: String,
    /// OSRM-compatible routing endpoint
    pub router_url: String,
    /// Upper bound on one provider lookup, in seconds
    pub timeout_secs: u64,
    pub user_agent: String,
    /// Speed used to turn estimated miles into drive hours
    pub average_speed_mph: f64,
    /// Straight-line to road distance multiplier for the fallback
    pub road_factor: f64,
    /// Whole-trip distance assumed when no stop has coordinates
    pub fallback_trip_miles: f64,
}

impl Default for RoutingConfig {
    fn default() -> Self {
        Self {
            geocoder_url: "https://nominatim.openstreetmap.org".to_string(),
            router_url: "http://router.project-osrm.org".to_string(),
            timeout_secs: 15,
            user_agent: concat!("hoslog/", env!("CARGO_PKG_VERSION")).to_string(),
            average_speed_mph: 60.0,
            road_factor: 1.2,
            fallback_trip_miles: 400.0,
        }
    }
}

impl RoutingConfig {
    /// # Errors
    ///
    /// Returns `PlannerError::Configuration` for a zero timeout or
    /// non-positive speeds and distances.
    pub fn validate(&self) -> Result<()> {
        if self.timeout_secs == 0 {
            return Err(PlannerError::configuration(
                "routing.timeout_secs must be at least 1",
            ));
        }
        let values = [
            ("average_speed_mph", self.average_speed_mph),
            ("road_factor", self.road_factor),
            ("fallback_trip_miles", self.fallback_trip_miles),
        ];
        for (name, value) in values {
            if !value.is_finite() || value <= 0.0 {
                return Err(PlannerError::configuration(format!(
                    "routing.{name} must be a positive number, got {value}"
                )));
            }
        }
        Ok(())
    }
}

/// Complete planner configuration.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct PlannerConfig {
    pub rules: HosRules,
    pub routing: RoutingConfig,
}

impl PlannerConfig {
    /// Parses and validates a TOML document.
    ///
    /// # Errors
    ///
    /// Returns `PlannerError::ConfigParse` for malformed TOML and
    /// `PlannerError::Configuration` for invalid values.
    pub fn from_toml_str(text: &str) -> Result<Self> {
        let config: PlannerConfig = toml::from_str(text)?;
        config.validate()?;
        Ok(config)
    }

    /// Loads a configuration file.
    ///
    /// # Errors
    ///
    /// Returns `PlannerError::FileSystem` if the file cannot be read, plus
    /// the errors of [`PlannerConfig::from_toml_str`].
    pub fn load(path: &Path) -> Result<Self> {
        let text = std::fs::read_to_string(path).map_err(|e| PlannerError::FileSystem {
            path: path.to_path_buf(),
            source: e,
        })?;
        log::debug!("Loading configuration from {}", path.display());
        Self::from_toml_str(&text)
    }

    /// Loads the XDG configuration file if present, else the defaults.
    ///
    /// # Errors
    ///
    /// Same as [`PlannerConfig::load`] when the file exists.
    pub fn load_default() -> Result<Self> {
        match Self::default_path() {
            Some(path) => Self::load(&path),
            None => Ok(Self::default()),
        }
    }

    /// Path of an existing configuration file under the XDG config
    /// directories, if any.
    pub fn default_path() -> Option<PathBuf> {
        xdg::BaseDirectories::with_prefix("hoslog").find_config_file(CONFIG_FILE_NAME)
    }

    /// # Errors
    ///
    /// Returns the first validation error of the rules or routing section.
    pub fn validate(&self) -> Result<()> {
        self.rules.validate()?;
        self.routing.validate()
    }

    /// Serializes the configuration back to TOML.
    ///
    /// # Errors
    ///
    /// Returns `PlannerError::Configuration` if serialization fails.
    pub fn to_toml_string(&self) -> Result<String> {
        toml::to_string_pretty(self).with_context("Failed to serialize configuration")
    }
}
