//! Raw persisted records and their normalization.
//!
//! Stored collections come from several generations of clients: tasks may be
//! missing, frequencies may be strings, due dates may be full instants or
//! epoch milliseconds. Every field is read as a plain JSON value so that one
//! odd field never makes a whole record unreadable, and
//! [`StoredPlant::normalize`] turns each record into a fully populated
//! [`Plant`] exactly once, at load time.
//!
//! Plant-level values that can't be interpreted are moved into
//! [`Plant::extra`] under their original key, so they are written back
//! unchanged.

use jiff::{tz::TimeZone, Timestamp};
use log::{debug, warn};
use serde::Deserialize;
use serde_json::{Map, Value};

use super::{CareTask, Plant, PlantId, SunAmount, TaskId, DEFAULT_FREQUENCY_DAYS};
use crate::dates::{parse_day, start_of_day};

/// Time context used to fill in missing timestamps and due dates.
#[derive(Debug, Clone)]
pub struct NormalizeContext {
    pub now: Timestamp,
    pub tz: TimeZone,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StoredPlant {
    id: Option<Value>,
    name: Option<Value>,
    species: Option<Value>,
    watering_frequency: Option<Value>,
    sun_amount: Option<Value>,
    indoor: Option<Value>,
    care_tasks: Option<Value>,
    created_at: Option<Value>,
    #[serde(flatten)]
    extra: Map<String, Value>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StoredTask {
    id: Option<Value>,
    name: Option<Value>,
    frequency: Option<Value>,
    next_due_date: Option<Value>,
    completion_history: Option<Value>,
    created_at: Option<Value>,
}

impl StoredPlant {
    /// Builds a validated plant, or `None` when the record has no usable id.
    pub fn normalize(self, ctx: &NormalizeContext) -> Option<Plant> {
        let Some(id) = self.id.as_ref().and_then(as_text).map(PlantId::from) else {
            warn!("Skipping stored plant without an id");
            return None;
        };
        let mut extra = self.extra;

        let name = self.name.as_ref().and_then(as_text).unwrap_or_default();
        let species = interpret(&mut extra, "species", self.species, as_text);
        let watering_frequency =
            interpret(&mut extra, "wateringFrequency", self.watering_frequency, as_u32);
        let sun_amount = interpret(&mut extra, "sunAmount", self.sun_amount, |value| {
            value.as_str()?.parse::<SunAmount>().ok()
        });
        let indoor = interpret(&mut extra, "indoor", self.indoor, as_bool);
        let created_at = interpret(&mut extra, "createdAt", self.created_at, as_timestamp);

        let care_tasks = match self.care_tasks {
            None | Some(Value::Null) => Vec::new(),
            Some(Value::Array(records)) => records
                .into_iter()
                .filter_map(|record| match serde_json::from_value::<StoredTask>(record) {
                    Ok(task) => task.normalize(&id, ctx),
                    Err(e) => {
                        warn!("Skipping unreadable care task on plant {id}: {e}");
                        None
                    }
                })
                .collect(),
            Some(other) => {
                warn!("Plant {id} has careTasks that is not a list, ignoring {other}");
                Vec::new()
            }
        };

        Some(Plant {
            id,
            name,
            species,
            watering_frequency,
            sun_amount,
            indoor,
            care_tasks,
            created_at,
            extra,
        })
    }
}

impl StoredTask {
    fn normalize(self, plant_id: &PlantId, ctx: &NormalizeContext) -> Option<CareTask> {
        let name = match self.name.as_ref().and_then(as_text) {
            Some(name) if !name.trim().is_empty() => name,
            _ => {
                warn!("Skipping unnamed care task on plant {plant_id}");
                return None;
            }
        };

        let created_at = self
            .created_at
            .as_ref()
            .and_then(as_timestamp)
            .unwrap_or(ctx.now);

        let next_due = self
            .next_due_date
            .as_ref()
            .and_then(|value| match value {
                Value::String(raw) => parse_day(raw, &ctx.tz),
                other => as_timestamp(other).map(|at| start_of_day(at, &ctx.tz)),
            })
            .unwrap_or_else(|| start_of_day(created_at, &ctx.tz));

        let completion_history = match self.completion_history {
            Some(Value::Array(entries)) => entries.iter().filter_map(as_timestamp).collect(),
            _ => Vec::new(),
        };

        Some(CareTask {
            id: self
                .id
                .as_ref()
                .and_then(as_text)
                .map(TaskId::from)
                .unwrap_or_else(|| TaskId::generate(plant_id)),
            name,
            frequency: self
                .frequency
                .as_ref()
                .and_then(as_u32)
                .filter(|days| *days > 0)
                .unwrap_or(DEFAULT_FREQUENCY_DAYS),
            next_due,
            completion_history,
            created_at,
        })
    }
}

/// Applies `read` to a raw field. A value it rejects is kept in `extra`
/// under `key` so it survives the next save.
fn interpret<T>(
    extra: &mut Map<String, Value>,
    key: &str,
    raw: Option<Value>,
    read: impl FnOnce(&Value) -> Option<T>,
) -> Option<T> {
    let value = raw.filter(|value| !value.is_null())?;
    let parsed = read(&value);
    if parsed.is_none() {
        debug!("Keeping uninterpreted {key} value {value}");
        extra.insert(key.to_string(), value);
    }
    parsed
}

/// Strings as-is, numbers as their decimal text.
fn as_text(value: &Value) -> Option<String> {
    match value {
        Value::String(text) => Some(text.clone()),
        Value::Number(number) => Some(number.to_string()),
        _ => None,
    }
}

/// Accepts `7` or `"7"`.
fn as_u32(value: &Value) -> Option<u32> {
    match value {
        Value::Number(n) => n.as_u64().and_then(|n| u32::try_from(n).ok()),
        Value::String(s) => s.trim().parse().ok(),
        _ => None,
    }
}

/// Accepts `true` or `"true"` (and the `false` forms).
fn as_bool(value: &Value) -> Option<bool> {
    match value {
        Value::Bool(flag) => Some(*flag),
        Value::String(s) => s.trim().parse().ok(),
        _ => None,
    }
}

/// RFC 3339 text or epoch milliseconds.
fn as_timestamp(value: &Value) -> Option<Timestamp> {
    match value {
        Value::String(raw) => raw
            .trim()
            .parse::<Timestamp>()
            .map_err(|e| debug!("Ignoring unparseable timestamp {raw:?}: {e}"))
            .ok(),
        Value::Number(n) => n
            .as_i64()
            .and_then(|millis| Timestamp::from_millisecond(millis).ok()),
        _ => None,
    }
}
