//! Sprout CLI Application
//!
//! Command-line interface for the sprout plant care scheduler.

mod args;
mod cli;
mod handlers;
mod renderer;

use anyhow::{Context, Result};
use args::{Args, Commands};
use clap::Parser;
use handlers::CommandHandler;
use log::info;
use renderer::TerminalRenderer;
use sprout_core::{CareEngineBuilder, UserContext, WeekStart};
use Commands::*;

#[tokio::main]
async fn main() -> Result<()> {
    env_logger::init();

    let Args {
        database_file,
        user,
        week_start,
        no_color,
        command,
    } = Args::parse();

    let engine = CareEngineBuilder::new()
        .with_database_path(database_file)
        .with_week_start(WeekStart::from(week_start))
        .build()
        .await
        .context("Failed to initialize care engine")?;

    let renderer = TerminalRenderer::new(!no_color);
    let handler = CommandHandler::new(engine, renderer, UserContext::new(user));

    info!("Sprout started");

    match command {
        Some(Plant { command }) => handler.handle_plant_command(command).await,
        Some(Task { command }) => handler.handle_task_command(command).await,
        Some(Today(args)) => handler.show_day(args.date).await,
        Some(Week(args)) => handler.show_week(args.date).await,
        Some(Month(args)) => handler.show_month(args.date).await,
        Some(Metrics) => handler.show_metrics().await,
        None => handler.show_day(None).await,
    }
}
