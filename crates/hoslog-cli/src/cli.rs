//! Command argument wrappers and their handlers.
//!
//! Each clap wrapper converts into a core parameter type, so clap derives
//! never leak into `hoslog-core`:
//!
//! ```text
//! User Input → CLI Args (clap) → Core Params → Planner
//! ```

use std::path::PathBuf;

use anyhow::{bail, Context, Result};
use clap::Args;
use hoslog_core::{
    display::{OperationStatus, Violations},
    models::{DriverInfo, TripPlan},
    params::PlanTrip,
    Planner,
};
use jiff::civil::Date;
use log::debug;

use crate::renderer::TerminalRenderer;

/// Stops, cycle state and log sheet header details of a trip.
#[derive(Args)]
pub struct TripArgs {
    /// Where the driver is now
    #[arg(long)]
    pub from: String,
    /// Where the load is picked up
    #[arg(long)]
    pub pickup: String,
    /// Where the load is delivered
    #[arg(long)]
    pub dropoff: String,
    /// On-duty hours already used in the current 70-hour/8-day cycle
    #[arg(long, default_value_t = 0.0)]
    pub cycle_hours: f64,
    /// Date of the first log sheet (YYYY-MM-DD). Defaults to today
    #[arg(long)]
    pub start_date: Option<Date>,
    /// Driver name printed on each log sheet
    #[arg(long)]
    pub driver: Option<String>,
    /// Carrier name printed on each log sheet
    #[arg(long)]
    pub carrier: Option<String>,
    /// Carrier main office address
    #[arg(long)]
    pub carrier_address: Option<String>,
    /// Truck or trailer number
    #[arg(long)]
    pub vehicle: Option<String>,
}

impl From<TripArgs> for PlanTrip {
    fn from(val: TripArgs) -> Self {
        let defaults = DriverInfo::default();
        PlanTrip {
            current_location: val.from,
            pickup_location: val.pickup,
            dropoff_location: val.dropoff,
            current_cycle_hours: val.cycle_hours,
            start_date: val.start_date,
            driver: DriverInfo {
                driver_name: val.driver.unwrap_or(defaults.driver_name),
                carrier_name: val.carrier.unwrap_or(defaults.carrier_name),
                carrier_address: val.carrier_address.unwrap_or(defaults.carrier_address),
                vehicle_number: val.vehicle.unwrap_or(defaults.vehicle_number),
            },
        }
    }
}

/// Plan a trip
///
/// Resolves the route, schedules it under the HOS rules and prints one log
/// sheet per day. When the routing service is unreachable the plan falls
/// back to estimated distances and says so in its compliance notes.
#[derive(Args)]
pub struct PlanArgs {
    #[command(flatten)]
    pub trip: TripArgs,
    /// Known leg distances in miles (current→pickup,pickup→dropoff);
    /// skips the routing service
    #[arg(long, value_delimiter = ',')]
    pub leg_miles: Vec<f64>,
    /// Never call the routing service; estimate distances instead
    #[arg(long)]
    pub offline: bool,
    /// Print the plan as JSON instead of log sheets
    #[arg(long)]
    pub json: bool,
}

/// Audit a saved plan
///
/// Replays the log sheets of a plan written by `plan --json` against the
/// configured rules and lists every breach. Exits with an error when any
/// violation is found.
#[derive(Args)]
pub struct AuditArgs {
    /// JSON plan file to check
    pub file: PathBuf,
}

/// Command handlers sharing one planner and renderer.
pub struct Cli {
    planner: Planner,
    renderer: TerminalRenderer,
}

impl Cli {
    pub fn new(planner: Planner, renderer: TerminalRenderer) -> Self {
        Self { planner, renderer }
    }

    pub async fn plan(&self, args: PlanArgs) -> Result<()> {
        let json = args.json;
        let params = PlanTrip::from(args.trip);

        let plan = self
            .planner
            .plan_trip(&params)
            .await
            .context("Failed to plan trip")?;

        if json {
            let text = serde_json::to_string_pretty(&plan).context("Failed to serialize plan")?;
            self.renderer.raw(&text)
        } else {
            self.renderer.render(&plan.to_string())
        }
    }

    pub async fn audit(&self, args: AuditArgs) -> Result<()> {
        let path = args.file;
        let text = tokio::fs::read_to_string(&path)
            .await
            .with_context(|| format!("Failed to read plan file {}", path.display()))?;
        let plan: TripPlan = serde_json::from_str(&text)
            .with_context(|| format!("Failed to parse plan file {}", path.display()))?;
        debug!(
            "Auditing {} log sheet(s) from {}",
            plan.log_sheets.len(),
            path.display()
        );

        let violations = Violations::from(self.planner.audit_plan(&plan));
        let status = OperationStatus::from_audit(&violations);
        if status.success {
            self.renderer.render(&status.to_string())
        } else {
            self.renderer.render(&violations.to_string())?;
            bail!(status.message)
        }
    }

    pub fn rules(&self) -> Result<()> {
        let text = self
            .planner
            .config()
            .to_toml_string()
            .context("Failed to print rules")?;
        self.renderer.raw(text.trim_end())
    }
}
