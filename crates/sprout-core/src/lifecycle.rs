//! Task lifecycle transforms.
//!
//! Each function takes the full collection, changes it in place, and reports
//! what happened. Nothing here touches storage or the clock; the engine
//! supplies `now`/`today` and persists the result.
//!
//! An unknown plant or task is an error in every operation, and the
//! collection is left untouched when one is returned.

use jiff::{civil::Date, tz::TimeZone, Timestamp};

use crate::{
    error::{CareError, Result},
    models::{CareTask, Plant, PlantId, TaskId, DEFAULT_FREQUENCY_DAYS},
    params::{CreateCareTask, NewPlant},
};

/// Result of a single lifecycle transform.
#[derive(Debug, Clone, PartialEq)]
pub struct Outcome {
    pub plant_id: PlantId,
    /// Task as it stands after the change (or as it was, for a delete)
    pub task: Option<CareTask>,
    /// Confirmation shown to the user
    pub message: String,
}

fn plant_mut<'a>(plants: &'a mut [Plant], plant_id: &PlantId) -> Result<&'a mut Plant> {
    plants
        .iter_mut()
        .find(|plant| &plant.id == plant_id)
        .ok_or_else(|| CareError::PlantNotFound {
            id: plant_id.to_string(),
        })
}

fn task_mut<'a>(
    plants: &'a mut [Plant],
    plant_id: &PlantId,
    task_id: &TaskId,
) -> Result<&'a mut CareTask> {
    plant_mut(plants, plant_id)?
        .task_mut(task_id)
        .ok_or_else(|| CareError::TaskNotFound {
            plant_id: plant_id.to_string(),
            id: task_id.to_string(),
        })
}

fn validate_frequency(field: &str, days: u32) -> Result<u32> {
    if days == 0 {
        return Err(CareError::invalid_input(field).with_reason("must be at least 1 day"));
    }
    Ok(days)
}

fn validate_name(name: &str) -> Result<String> {
    let name = name.trim();
    if name.is_empty() {
        return Err(CareError::invalid_input("name").with_reason("cannot be empty"));
    }
    Ok(name.to_string())
}

/// Checks a whole collection before it replaces the stored one, so that
/// what is saved loads back unchanged.
pub fn validate_collection(plants: &[Plant]) -> Result<()> {
    for task in plants.iter().flat_map(|plant| &plant.care_tasks) {
        validate_frequency("frequency", task.frequency)?;
        validate_name(&task.name)?;
    }
    Ok(())
}

/// Appends a new task to the plant, first due on `start_date` or `today`.
pub fn create_task(
    plants: &mut [Plant],
    params: &CreateCareTask,
    now: Timestamp,
    today: Date,
) -> Result<Outcome> {
    let name = validate_name(&params.name)?;
    let frequency =
        validate_frequency("frequency", params.frequency.unwrap_or(DEFAULT_FREQUENCY_DAYS))?;
    let plant = plant_mut(plants, &params.plant_id)?;

    let task = CareTask::new(
        TaskId::generate(&plant.id),
        name,
        frequency,
        params.start_date.unwrap_or(today),
        now,
    );
    plant.care_tasks.push(task.clone());

    Ok(Outcome {
        plant_id: plant.id.clone(),
        message: format!("New care task \"{}\" created!", task.name),
        task: Some(task),
    })
}

/// Records a completion at `now` and reschedules from the completion day.
pub fn complete_task(
    plants: &mut [Plant],
    plant_id: &PlantId,
    task_id: &TaskId,
    now: Timestamp,
    tz: &TimeZone,
) -> Result<Outcome> {
    let task = task_mut(plants, plant_id, task_id)?;
    task.record_completion(now, tz)?;

    Ok(Outcome {
        plant_id: plant_id.clone(),
        message: format!("\"{}\" task completed!", task.name),
        task: Some(task.clone()),
    })
}

/// Pushes the task to tomorrow regardless of its current due day.
pub fn postpone_task(
    plants: &mut [Plant],
    plant_id: &PlantId,
    task_id: &TaskId,
    today: Date,
) -> Result<Outcome> {
    let task = task_mut(plants, plant_id, task_id)?;
    task.postpone(today)?;

    Ok(Outcome {
        plant_id: plant_id.clone(),
        message: format!("\"{}\" pushed to tomorrow", task.name),
        task: Some(task.clone()),
    })
}

/// Removes the task and its history.
pub fn delete_task(plants: &mut [Plant], plant_id: &PlantId, task_id: &TaskId) -> Result<Outcome> {
    let plant = plant_mut(plants, plant_id)?;
    let index = plant
        .care_tasks
        .iter()
        .position(|task| &task.id == task_id)
        .ok_or_else(|| CareError::TaskNotFound {
            plant_id: plant_id.to_string(),
            id: task_id.to_string(),
        })?;
    let task = plant.care_tasks.remove(index);

    Ok(Outcome {
        plant_id: plant_id.clone(),
        message: format!("\"{}\" task deleted", task.name),
        task: Some(task),
    })
}

/// Adds a plant without tasks. Ids must be unique within the collection.
pub fn add_plant(plants: &mut Vec<Plant>, params: &NewPlant, now: Timestamp) -> Result<Outcome> {
    let name = validate_name(&params.name)?;
    let watering_frequency = params
        .watering_frequency
        .map(|days| validate_frequency("watering_frequency", days))
        .transpose()?;

    let id = match &params.id {
        Some(id) if id.as_str().trim().is_empty() => {
            return Err(CareError::invalid_input("id").with_reason("cannot be empty"))
        }
        Some(id) => id.clone(),
        None => PlantId::generate(),
    };
    if plants.iter().any(|plant| plant.id == id) {
        return Err(CareError::invalid_input("id").with_reason(format!("plant {id} already exists")));
    }

    let mut plant = Plant::new(id.clone(), name);
    plant.species = params.species.clone().filter(|s| !s.trim().is_empty());
    plant.watering_frequency = watering_frequency;
    plant.sun_amount = params.sun_amount;
    plant.indoor = params.indoor;
    plant.created_at = Some(now);

    let message = format!("\"{}\" added to your garden", plant.name);
    plants.push(plant);

    Ok(Outcome {
        plant_id: id,
        task: None,
        message,
    })
}

/// Removes a plant together with all of its tasks.
pub fn remove_plant(plants: &mut Vec<Plant>, plant_id: &PlantId) -> Result<Outcome> {
    let index = plants
        .iter()
        .position(|plant| &plant.id == plant_id)
        .ok_or_else(|| CareError::PlantNotFound {
            id: plant_id.to_string(),
        })?;
    let plant = plants.remove(index);

    Ok(Outcome {
        plant_id: plant.id,
        task: None,
        message: format!("\"{}\" removed", plant.name),
    })
}
