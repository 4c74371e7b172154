//! Collection wrapper types for displaying groups of domain objects.

use std::{fmt, ops::Index};

use jiff::civil::Date;

use super::datetime::DayLabel;
use crate::{models::Plant, resolver::PlantAgenda};

/// Newtype wrapper for a compact list of plants.
///
/// # Examples
///
/// ```rust
/// use sprout_core::{display::Plants, models::{Plant, PlantId}};
///
/// let plants = Plants(vec![Plant::new(PlantId::new("7"), "Monstera")]);
/// assert!(plants.to_string().contains("## Monstera (ID: 7)"));
/// ```
pub struct Plants(pub Vec<Plant>);

impl Plants {
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Plant> {
        self.0.iter()
    }
}

impl Index<usize> for Plants {
    type Output = Plant;

    fn index(&self, index: usize) -> &Self::Output {
        &self.0[index]
    }
}

impl<'a> IntoIterator for &'a Plants {
    type Item = &'a Plant;
    type IntoIter = std::slice::Iter<'a, Plant>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.iter()
    }
}

impl fmt::Display for Plants {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.0.is_empty() {
            return writeln!(f, "No plants found.");
        }

        for plant in &self.0 {
            let tasks = match plant.care_tasks.len() {
                1 => " (1 task)".to_string(),
                n => format!(" ({n} tasks)"),
            };
            writeln!(f, "## {} (ID: {}){tasks}", plant.name, plant.id)?;
            if let Some(species) = &plant.species {
                writeln!(f)?;
                writeln!(f, "- *{species}*")?;
            }
            writeln!(f)?;
        }
        Ok(())
    }
}

/// One day's tasks grouped by plant.
pub struct Agenda {
    pub day: Date,
    pub today: Date,
    pub plants: Vec<PlantAgenda>,
}

impl fmt::Display for Agenda {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(
            f,
            "# {}",
            DayLabel {
                day: self.day,
                today: self.today
            }
        )?;
        writeln!(f)?;

        if self.plants.is_empty() {
            return writeln!(f, "No care tasks scheduled.");
        }

        for plant in &self.plants {
            writeln!(f, "## {}", plant.plant_name)?;
            writeln!(f)?;
            for entry in &plant.entries {
                let mark = if entry.is_completed { "✓" } else { "○" };
                let overdue = if !entry.is_completed && entry.task.next_due < self.today {
                    format!(" (overdue since {})", entry.task.next_due)
                } else {
                    String::new()
                };
                writeln!(
                    f,
                    "- {mark} {} `{}`{overdue}",
                    entry.task.name, entry.task.id
                )?;
            }
            writeln!(f)?;
        }
        Ok(())
    }
}
