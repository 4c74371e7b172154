//! Parameter structures for engine operations
//!
//! These structures carry request data from any caller (the CLI today, an API
//! layer tomorrow) into the engine without pulling framework derives into the
//! core. Interface layers define their own argument types and convert into
//! these with `From` impls:
//!
//! ```text
//! CLI Args (clap) ──From──▶ Core Params ──▶ CareEngine
//! ```

use jiff::civil::Date;
use serde::{Deserialize, Serialize};

use crate::models::{PlantId, SunAmount, TaskId};

/// Parameters for creating a care task on a plant.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateCareTask {
    /// Plant that receives the task
    pub plant_id: PlantId,
    /// Label of the task (required, non-blank)
    pub name: String,
    /// Days between occurrences; defaults to weekly
    pub frequency: Option<u32>,
    /// First due day; defaults to today
    pub start_date: Option<Date>,
}

/// Addresses one task of one plant.
///
/// Used by complete, postpone and delete.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TaskRef {
    pub plant_id: PlantId,
    pub task_id: TaskId,
}

impl TaskRef {
    pub fn new(plant_id: impl Into<PlantId>, task_id: impl Into<TaskId>) -> Self {
        Self {
            plant_id: plant_id.into(),
            task_id: task_id.into(),
        }
    }
}

/// Parameters for adding a plant to a collection.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewPlant {
    /// Explicit id; a random one is generated when absent
    pub id: Option<PlantId>,
    pub name: String,
    pub species: Option<String>,
    pub watering_frequency: Option<u32>,
    pub sun_amount: Option<SunAmount>,
    pub indoor: Option<bool>,
}
