//! Dashboard metrics projected from a collection.
//!
//! Everything is recomputed from scratch on each call; nothing is cached
//! between mutations.

use jiff::{civil::Date, tz::TimeZone};
use serde::Serialize;
use serde_json::Value;

use crate::{
    dates::{add_days, parse_day},
    error::Result,
    models::{Plant, SunAmount},
    resolver::tasks_due_on,
};

/// Days after today counted by [`CareMetrics::tasks_due_next_week`].
const LOOKAHEAD_DAYS: i64 = 7;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub struct SunlightDistribution {
    pub full_sun: usize,
    pub part_sun: usize,
    pub part_shade: usize,
    pub full_shade: usize,
}

impl SunlightDistribution {
    fn record(&mut self, amount: SunAmount) {
        match amount {
            SunAmount::FullSun => self.full_sun += 1,
            SunAmount::PartSun => self.part_sun += 1,
            SunAmount::PartShade => self.part_shade += 1,
            SunAmount::FullShade => self.full_shade += 1,
        }
    }

    pub fn count(&self, amount: SunAmount) -> usize {
        match amount {
            SunAmount::FullSun => self.full_sun,
            SunAmount::PartSun => self.part_sun,
            SunAmount::PartShade => self.part_shade,
            SunAmount::FullShade => self.full_shade,
        }
    }

    /// Share of `total` plants needing `amount`, rounded to whole percent.
    pub fn percentage(&self, amount: SunAmount, total: usize) -> u32 {
        if total == 0 {
            return 0;
        }
        ((self.count(amount) as f64 / total as f64) * 100.0).round() as u32
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CareMetrics {
    pub total_plants: usize,
    pub total_tasks: usize,
    /// Tasks with a completion on today's local day
    pub tasks_completed_today: usize,
    pub tasks_due_today: usize,
    /// Sum of due tasks over each of the next seven days. A task can be
    /// counted more than once.
    pub tasks_due_next_week: usize,
    pub watered_today: usize,
    pub indoor_plants: usize,
    pub outdoor_plants: usize,
    pub sunlight: SunlightDistribution,
}

impl CareMetrics {
    pub fn project(plants: &[Plant], today: Date, tz: &TimeZone) -> Result<Self> {
        let mut metrics = CareMetrics {
            total_plants: plants.len(),
            ..Default::default()
        };

        let upcoming = (1..=LOOKAHEAD_DAYS)
            .map(|offset| add_days(today, offset))
            .collect::<Result<Vec<_>>>()?;

        for plant in plants {
            metrics.total_tasks += plant.care_tasks.len();

            let mut watered = false;
            for task in plant.care_tasks.iter().filter(|t| t.was_completed_on(today, tz)) {
                metrics.tasks_completed_today += 1;
                if is_watering(&task.name) {
                    metrics.watered_today += 1;
                    watered = true;
                }
            }
            if !watered && legacy_watered_on(plant, today, tz) {
                metrics.watered_today += 1;
            }

            metrics.tasks_due_today += tasks_due_on(plant, today, today).len();
            metrics.tasks_due_next_week += upcoming
                .iter()
                .map(|day| tasks_due_on(plant, *day, today).len())
                .sum::<usize>();

            match indoor(plant) {
                Some(true) => metrics.indoor_plants += 1,
                Some(false) => metrics.outdoor_plants += 1,
                None => {}
            }

            if let Some(amount) = plant.sun_amount {
                metrics.sunlight.record(amount);
            }
        }

        Ok(metrics)
    }

    /// Plants that are neither marked indoor nor outdoor.
    pub fn unspecified_plants(&self) -> usize {
        self.total_plants
            .saturating_sub(self.indoor_plants + self.outdoor_plants)
    }
}

fn is_watering(name: &str) -> bool {
    name.trim().eq_ignore_ascii_case("water")
}

/// Older records track watering with a `lastWatered` field instead of a task.
fn legacy_watered_on(plant: &Plant, day: Date, tz: &TimeZone) -> bool {
    plant
        .extra
        .get("lastWatered")
        .and_then(Value::as_str)
        .and_then(|raw| parse_day(raw, tz))
        .is_some_and(|watered| watered == day)
}

/// Older records nest the flag under `plantDetails`.
fn indoor(plant: &Plant) -> Option<bool> {
    plant.indoor.or_else(|| {
        plant
            .extra
            .get("plantDetails")
            .and_then(|details| details.get("indoor"))
            .and_then(Value::as_bool)
    })
}
