use std::path::PathBuf;

use clap::{Parser, Subcommand};

use crate::cli::{AuditArgs, PlanArgs};

/// Plan FMCSA hours-of-service compliant trips
///
/// hoslog schedules a property-carrying trip from the driver's current
/// location through a pickup to a dropoff, inserting the breaks, 10-hour
/// rests and 34-hour restarts the HOS rules require, and prints one log
/// sheet per day. Saved JSON plans can be re-checked with `audit`.
#[derive(Parser)]
#[command(version, about, name = "hoslog")]
pub struct Args {
    /// Path to the configuration file. Defaults to
    /// $XDG_CONFIG_HOME/hoslog/config.toml, or built-in FMCSA defaults
    #[arg(long, global = true)]
    pub config: Option<PathBuf>,

    /// Disable colored output and use plain text
    #[arg(long, global = true)]
    pub no_color: bool,

    #[command(subcommand)]
    pub command: Commands,
}

/// Available commands for the hoslog CLI
#[derive(Subcommand)]
pub enum Commands {
    /// Plan a trip and print its daily log sheets
    #[command(alias = "p")]
    Plan(PlanArgs),
    /// Re-check a plan saved with `plan --json`
    #[command(alias = "a")]
    Audit(AuditArgs),
    /// Print the effective rules and routing options as TOML
    Rules,
}
