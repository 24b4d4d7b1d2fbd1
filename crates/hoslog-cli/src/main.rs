//! hoslog CLI Application
//!
//! Command-line interface for planning hours-of-service compliant trips.

mod args;
mod cli;
mod renderer;

use anyhow::{Context, Result};
use args::{Args, Commands};
use clap::Parser;
use cli::Cli;
use hoslog_core::PlannerBuilder;
use log::info;
use renderer::TerminalRenderer;
use Commands::*;

#[tokio::main]
async fn main() -> Result<()> {
    env_logger::init();

    let Args {
        config,
        no_color,
        command,
    } = Args::parse();

    let mut builder = PlannerBuilder::new().with_config_path(config);
    if let Plan(args) = &command {
        builder = builder.offline(args.offline);
        if !args.leg_miles.is_empty() {
            builder = builder.with_leg_miles(args.leg_miles.clone());
        }
    }
    let planner = builder
        .build()
        .await
        .context("Failed to initialize planner")?;

    let renderer = TerminalRenderer::new(!no_color);

    info!("hoslog started");

    let cli = Cli::new(planner, renderer);
    match command {
        Plan(args) => cli.plan(args).await,
        Audit(args) => cli.audit(args).await,
        Rules => cli.rules(),
    }
}
