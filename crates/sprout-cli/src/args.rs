use std::path::PathBuf;

use clap::{Parser, Subcommand};

use crate::cli::{DayArgs, PlantCommands, TaskCommands, WeekStartArg};

/// Plant care scheduler
///
/// Sprout keeps a collection of plants with recurring care tasks (watering,
/// fertilizing, pruning, ...) and shows what is due each day, week and
/// month. Running `sprout` without a command shows today's agenda.
#[derive(Parser)]
#[command(version, about, name = "sprout")]
pub struct Args {
    /// Path to the SQLite database file. Defaults to
    /// $XDG_DATA_HOME/sprout/sprout.db
    #[arg(long, global = true)]
    pub database_file: Option<PathBuf>,

    /// Whose collection to use
    #[arg(long, global = true, env = "SPROUT_USER", default_value = "default")]
    pub user: String,

    /// First column of week and month views
    #[arg(long, global = true, value_enum, default_value_t = WeekStartArg::Monday)]
    pub week_start: WeekStartArg,

    /// Disable colored output and use plain text
    #[arg(long, global = true)]
    pub no_color: bool,

    #[command(subcommand)]
    pub command: Option<Commands>,
}

/// Available commands for the Sprout CLI
#[derive(Subcommand)]
pub enum Commands {
    /// Manage plants
    #[command(alias = "p")]
    Plant {
        #[command(subcommand)]
        command: PlantCommands,
    },
    /// Manage care tasks of a plant
    #[command(alias = "t")]
    Task {
        #[command(subcommand)]
        command: TaskCommands,
    },
    /// Show the tasks of one day (today by default)
    Today(DayArgs),
    /// Show the week containing a day
    Week(DayArgs),
    /// Show the month containing a day
    Month(DayArgs),
    /// Show garden metrics
    Metrics,
}
