//! Due-set resolution: which tasks surface on a given day.

use std::collections::HashSet;

use jiff::{civil::Date, tz::TimeZone};
use serde::Serialize;

use crate::models::{CareTask, Plant, PlantId, TaskId};

/// Tasks due on `date`. Overdue tasks appear only on `today`.
pub fn tasks_due_on(plant: &Plant, date: Date, today: Date) -> Vec<&CareTask> {
    plant
        .care_tasks
        .iter()
        .filter(|task| task.is_due_on(date, today))
        .collect()
}

pub fn has_tasks_due_on(plant: &Plant, date: Date, today: Date) -> bool {
    plant
        .care_tasks
        .iter()
        .any(|task| task.is_due_on(date, today))
}

/// Tasks with at least one completion on the local day `date`.
pub fn completed_on<'a>(plant: &'a Plant, date: Date, tz: &TimeZone) -> Vec<&'a CareTask> {
    plant
        .care_tasks
        .iter()
        .filter(|task| task.was_completed_on(date, tz))
        .collect()
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AgendaEntry {
    pub task: CareTask,
    pub is_completed: bool,
}

/// One plant's tasks for a day.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PlantAgenda {
    pub plant_id: PlantId,
    pub plant_name: String,
    pub entries: Vec<AgendaEntry>,
}

/// Due tasks followed by tasks completed that day, one entry per task id.
///
/// Plants with nothing on `date` are left out.
pub fn agenda_for_day(plants: &[Plant], date: Date, today: Date, tz: &TimeZone) -> Vec<PlantAgenda> {
    plants
        .iter()
        .filter_map(|plant| {
            let mut seen: HashSet<&TaskId> = HashSet::new();
            let entries: Vec<AgendaEntry> = tasks_due_on(plant, date, today)
                .into_iter()
                .chain(completed_on(plant, date, tz))
                .filter(|task| seen.insert(&task.id))
                .map(|task| AgendaEntry {
                    is_completed: task.was_completed_on(date, tz),
                    task: task.clone(),
                })
                .collect();

            (!entries.is_empty()).then(|| PlantAgenda {
                plant_id: plant.id.clone(),
                plant_name: plant.name.clone(),
                entries,
            })
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use jiff::{civil::date, Timestamp};

    use super::*;

    fn task(id: &str, next_due: Date) -> CareTask {
        CareTask::new(TaskId::new(id), id, 3, next_due, Timestamp::UNIX_EPOCH)
    }

    fn utc(day: Date, hour: i8) -> Timestamp {
        day.at(hour, 0, 0, 0)
            .to_zoned(TimeZone::UTC)
            .unwrap()
            .timestamp()
    }

    #[test]
    fn test_overdue_collapses_onto_today() {
        let today = date(2025, 6, 10);
        let mut plant = Plant::new(PlantId::new("p1"), "Fern");
        plant.care_tasks.push(task("a", date(2025, 6, 5)));

        assert_eq!(tasks_due_on(&plant, today, today).len(), 1);
        assert!(tasks_due_on(&plant, date(2025, 6, 9), today).is_empty());
        assert!(tasks_due_on(&plant, date(2025, 6, 11), today).is_empty());
        assert!(tasks_due_on(&plant, date(2025, 6, 5), today).is_empty());
    }

    #[test]
    fn test_future_task_only_on_its_day() {
        let today = date(2025, 6, 10);
        let mut plant = Plant::new(PlantId::new("p1"), "Fern");
        plant.care_tasks.push(task("a", date(2025, 6, 12)));

        assert!(!has_tasks_due_on(&plant, today, today));
        assert!(!has_tasks_due_on(&plant, date(2025, 6, 11), today));
        assert!(has_tasks_due_on(&plant, date(2025, 6, 12), today));
        assert!(!has_tasks_due_on(&plant, date(2025, 6, 13), today));
    }

    #[test]
    fn test_resolution_is_repeatable() {
        let today = date(2025, 6, 10);
        let mut plant = Plant::new(PlantId::new("p1"), "Fern");
        plant.care_tasks.push(task("a", today));
        plant.care_tasks.push(task("b", date(2025, 6, 1)));

        let first: Vec<_> = tasks_due_on(&plant, today, today).iter().map(|t| t.id.clone()).collect();
        let second: Vec<_> = tasks_due_on(&plant, today, today).iter().map(|t| t.id.clone()).collect();
        assert_eq!(first, second);
        assert_eq!(first.len(), 2);
    }

    #[test]
    fn test_completed_on_uses_local_day() {
        let tz = TimeZone::fixed(jiff::tz::offset(-5));
        let mut plant = Plant::new(PlantId::new("p1"), "Fern");
        let mut water = task("a", date(2025, 6, 20));
        // 02:00 UTC on the 11th is still the 10th at UTC-5
        water.completion_history.push(utc(date(2025, 6, 11), 2));
        plant.care_tasks.push(water);

        assert_eq!(completed_on(&plant, date(2025, 6, 10), &tz).len(), 1);
        assert!(completed_on(&plant, date(2025, 6, 11), &tz).is_empty());
    }

    #[test]
    fn test_agenda_merges_due_and_completed() {
        let tz = TimeZone::UTC;
        let today = date(2025, 6, 10);

        let mut fern = Plant::new(PlantId::new("p1"), "Fern");
        let mut water = task("water", today);
        water.completion_history.push(utc(today, 9));
        fern.care_tasks.push(water);
        let mut feed = task("feed", date(2025, 6, 13));
        feed.completion_history.push(utc(today, 10));
        fern.care_tasks.push(feed);
        fern.care_tasks.push(task("prune", date(2025, 6, 20)));

        let idle = Plant::new(PlantId::new("p2"), "Cactus");

        let agenda = agenda_for_day(&[fern, idle], today, today, &tz);
        assert_eq!(agenda.len(), 1);

        let entries = &agenda[0].entries;
        assert_eq!(entries.len(), 2);
        assert_eq!(entries[0].task.id.as_str(), "water");
        assert!(entries[0].is_completed);
        assert_eq!(entries[1].task.id.as_str(), "feed");
        assert!(entries[1].is_completed);
    }
}
