//! Command-line argument wrappers using clap
//!
//! Each command gets a clap-derived argument struct that converts into the
//! matching core parameter type, so clap attributes never leak into
//! `sprout-core`:
//!
//! ```text
//! User Input → CLI Args (clap) → Core Params → CareEngine
//! ```
//!
//! Tasks are addressed by plant id plus either the task id or the task
//! name; resolving a name to an id happens in the handler, since it needs
//! the loaded collection.

use clap::{Args, Subcommand, ValueEnum};
use jiff::civil::Date;
use sprout_core::{
    params::{CreateCareTask, NewPlant},
    PlantId, SunAmount, WeekStart,
};

/// Add a plant to the collection
#[derive(Args)]
pub struct AddPlantArgs {
    /// Display name of the plant
    pub name: String,
    /// Explicit plant ID; a random one is generated otherwise
    #[arg(long)]
    pub id: Option<String>,
    /// Botanical name
    #[arg(short, long)]
    pub species: Option<String>,
    /// Suggested days between waterings
    #[arg(short, long, value_name = "DAYS")]
    pub water_every: Option<u32>,
    /// Daily sunlight requirement
    #[arg(long, value_enum)]
    pub sun: Option<SunArg>,
    /// Mark the plant as kept indoors
    #[arg(long, conflicts_with = "outdoor")]
    pub indoor: bool,
    /// Mark the plant as kept outdoors
    #[arg(long)]
    pub outdoor: bool,
}

impl From<AddPlantArgs> for NewPlant {
    fn from(val: AddPlantArgs) -> Self {
        let indoor = match (val.indoor, val.outdoor) {
            (true, _) => Some(true),
            (_, true) => Some(false),
            _ => None,
        };

        NewPlant {
            id: val.id.map(PlantId::from),
            name: val.name,
            species: val.species,
            watering_frequency: val.water_every,
            sun_amount: val.sun.map(SunAmount::from),
            indoor,
        }
    }
}

/// Identify a plant by ID
#[derive(Args)]
pub struct PlantIdArgs {
    #[arg(help = "ID of the plant")]
    pub plant: String,
}

#[derive(Subcommand)]
pub enum PlantCommands {
    /// Add a new plant
    #[command(alias = "a")]
    Add(AddPlantArgs),
    /// List all plants
    #[command(alias = "l")]
    List,
    /// Show a plant with its care tasks
    #[command(alias = "s")]
    Show(PlantIdArgs),
    /// Remove a plant and all of its tasks
    #[command(alias = "rm")]
    Remove(PlantIdArgs),
}

/// Create a care task on a plant
#[derive(Args)]
pub struct AddTaskArgs {
    #[arg(help = "ID of the plant that receives the task")]
    pub plant: String,
    /// Task label, e.g. "Water"
    pub name: String,
    /// Days between occurrences (defaults to 7)
    #[arg(short, long, value_name = "DAYS")]
    pub every: Option<u32>,
    /// First due day as YYYY-MM-DD (defaults to today)
    #[arg(short, long)]
    pub start: Option<Date>,
}

impl From<AddTaskArgs> for CreateCareTask {
    fn from(val: AddTaskArgs) -> Self {
        CreateCareTask {
            plant_id: PlantId::from(val.plant),
            name: val.name,
            frequency: val.every,
            start_date: val.start,
        }
    }
}

/// Identify a task of a plant by ID or name
#[derive(Args)]
pub struct TaskTargetArgs {
    #[arg(help = "ID of the plant")]
    pub plant: String,
    #[arg(help = "Task ID, or task name (case-insensitive)")]
    pub task: String,
}

#[derive(Subcommand)]
pub enum TaskCommands {
    /// Create a care task
    #[command(alias = "a")]
    Add(AddTaskArgs),
    /// Mark a task done and schedule the next occurrence
    #[command(alias = "d")]
    Done(TaskTargetArgs),
    /// Push a task to tomorrow
    #[command(alias = "p")]
    Postpone(TaskTargetArgs),
    /// Delete a task and its history
    #[command(alias = "rm")]
    Delete(TaskTargetArgs),
}

/// Choose the day a view is anchored on
#[derive(Args)]
pub struct DayArgs {
    /// Day as YYYY-MM-DD (defaults to today)
    #[arg(short, long)]
    pub date: Option<Date>,
}

/// Command-line representation of sunlight requirements
#[derive(Copy, Clone, PartialEq, Eq, ValueEnum)]
pub enum SunArg {
    /// 6+ hours
    FullSun,
    /// 4-6 hours
    PartSun,
    /// 2-4 hours
    PartShade,
    /// 0-2 hours
    FullShade,
}

impl From<SunArg> for SunAmount {
    fn from(val: SunArg) -> Self {
        match val {
            SunArg::FullSun => SunAmount::FullSun,
            SunArg::PartSun => SunAmount::PartSun,
            SunArg::PartShade => SunAmount::PartShade,
            SunArg::FullShade => SunAmount::FullShade,
        }
    }
}

#[derive(Copy, Clone, PartialEq, Eq, ValueEnum)]
pub enum WeekStartArg {
    Monday,
    Sunday,
}

impl From<WeekStartArg> for WeekStart {
    fn from(val: WeekStartArg) -> Self {
        match val {
            WeekStartArg::Monday => WeekStart::Monday,
            WeekStartArg::Sunday => WeekStart::Sunday,
        }
    }
}
