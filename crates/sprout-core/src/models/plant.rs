//! Plant model definition and related functionality.

use std::str::FromStr;

use jiff::Timestamp;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use super::{CareTask, PlantId, TaskId};

/// Daily sunlight requirement of a plant.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "snake_case")]
pub enum SunAmount {
    /// 6+ hours
    FullSun,
    /// 4-6 hours
    PartSun,
    /// 2-4 hours
    PartShade,
    /// 0-2 hours
    FullShade,
}

impl FromStr for SunAmount {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().replace('-', "_").as_str() {
            "full_sun" => Ok(SunAmount::FullSun),
            "part_sun" => Ok(SunAmount::PartSun),
            "part_shade" => Ok(SunAmount::PartShade),
            "full_shade" => Ok(SunAmount::FullShade),
            _ => Err(format!("Invalid sun amount: {s}")),
        }
    }
}

impl SunAmount {
    pub fn as_str(&self) -> &'static str {
        match self {
            SunAmount::FullSun => "full_sun",
            SunAmount::PartSun => "part_sun",
            SunAmount::PartShade => "part_shade",
            SunAmount::FullShade => "full_shade",
        }
    }

    /// Human readable label with the hour range.
    pub fn label(&self) -> &'static str {
        match self {
            SunAmount::FullSun => "Full Sun (6+ hrs)",
            SunAmount::PartSun => "Part Sun (4-6 hrs)",
            SunAmount::PartShade => "Part Shade (2-4 hrs)",
            SunAmount::FullShade => "Full Shade (0-2 hrs)",
        }
    }
}

/// A tracked plant owned by one user, with its care tasks.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Plant {
    pub id: PlantId,

    pub name: String,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub species: Option<String>,

    /// Suggested days between waterings
    #[serde(skip_serializing_if = "Option::is_none")]
    pub watering_frequency: Option<u32>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub sun_amount: Option<SunAmount>,

    /// `Some(true)` indoor, `Some(false)` outdoor, `None` unspecified
    #[serde(skip_serializing_if = "Option::is_none")]
    pub indoor: Option<bool>,

    /// Ordered care tasks
    pub care_tasks: Vec<CareTask>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub created_at: Option<Timestamp>,

    /// Fields this engine does not interpret, kept so other clients' data
    /// survives a load/save cycle
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl Plant {
    pub fn new(id: PlantId, name: impl Into<String>) -> Self {
        Self {
            id,
            name: name.into(),
            species: None,
            watering_frequency: None,
            sun_amount: None,
            indoor: None,
            care_tasks: Vec::new(),
            created_at: None,
            extra: Map::new(),
        }
    }

    pub fn task(&self, task_id: &TaskId) -> Option<&CareTask> {
        self.care_tasks.iter().find(|task| &task.id == task_id)
    }

    pub fn task_mut(&mut self, task_id: &TaskId) -> Option<&mut CareTask> {
        self.care_tasks.iter_mut().find(|task| &task.id == task_id)
    }

    /// Looks a task up by id, then by case-insensitive name.
    pub fn find_task(&self, key: &str) -> Option<&CareTask> {
        self.care_tasks
            .iter()
            .find(|task| task.id.as_str() == key)
            .or_else(|| {
                self.care_tasks
                    .iter()
                    .find(|task| task.name.eq_ignore_ascii_case(key))
            })
    }
}
