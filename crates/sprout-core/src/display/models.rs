//! Display implementations for domain models.
//!
//! The Display implementations produce markdown for rich terminal display.

use std::fmt;

use crate::{
    metrics::CareMetrics,
    models::{CareTask, Plant, SunAmount, TaskState},
};

impl fmt::Display for SunAmount {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

impl TaskState {
    pub fn as_str(&self) -> &'static str {
        match self {
            TaskState::Scheduled => "scheduled",
            TaskState::Overdue => "overdue",
        }
    }
}

impl fmt::Display for TaskState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

fn every(days: u32) -> String {
    if days == 1 {
        "every day".to_string()
    } else {
        format!("every {days} days")
    }
}

impl fmt::Display for CareTask {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "- **{}** {}, next due {} (ID: {})",
            self.name,
            every(self.frequency),
            self.next_due,
            self.id
        )?;
        match self.completion_history.len() {
            0 => writeln!(f),
            1 => writeln!(f, ", done once"),
            n => writeln!(f, ", done {n} times"),
        }
    }
}

impl fmt::Display for Plant {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "# {} (ID: {})", self.name, self.id)?;
        writeln!(f)?;

        if let Some(species) = &self.species {
            writeln!(f, "- Species: *{species}*")?;
        }
        if let Some(days) = self.watering_frequency {
            writeln!(f, "- Watering: {}", every(days))?;
        }
        if let Some(sun) = self.sun_amount {
            writeln!(f, "- Sunlight: {sun}")?;
        }
        match self.indoor {
            Some(true) => writeln!(f, "- Location: Indoor")?,
            Some(false) => writeln!(f, "- Location: Outdoor")?,
            None => {}
        }

        if self.care_tasks.is_empty() {
            writeln!(f, "\nNo care tasks yet.")?;
        } else {
            writeln!(f, "\n## Care Tasks")?;
            writeln!(f)?;
            for task in &self.care_tasks {
                write!(f, "{task}")?;
            }
        }

        Ok(())
    }
}

impl fmt::Display for CareMetrics {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "# Garden Overview")?;
        writeln!(f)?;
        writeln!(f, "- **Plants**: {}", self.total_plants)?;
        writeln!(f, "- **Care tasks**: {}", self.total_tasks)?;
        writeln!(f, "- **Completed today**: {}", self.tasks_completed_today)?;
        writeln!(f, "- **Watered today**: {}", self.watered_today)?;
        writeln!(f, "- **Due today**: {}", self.tasks_due_today)?;
        writeln!(f, "- **Due next 7 days**: {}", self.tasks_due_next_week)?;

        if self.total_plants > 0 {
            writeln!(f, "\n## Environment")?;
            writeln!(f)?;
            writeln!(f, "- Indoor: {}", self.indoor_plants)?;
            writeln!(f, "- Outdoor: {}", self.outdoor_plants)?;
            let unspecified = self.unspecified_plants();
            if unspecified > 0 {
                writeln!(f, "- Unspecified: {unspecified}")?;
            }

            writeln!(f, "\n## Sunlight")?;
            writeln!(f)?;
            for amount in [
                SunAmount::FullSun,
                SunAmount::PartSun,
                SunAmount::PartShade,
                SunAmount::FullShade,
            ] {
                writeln!(
                    f,
                    "- {amount}: {} ({}%)",
                    self.sunlight.count(amount),
                    self.sunlight.percentage(amount, self.total_plants)
                )?;
            }
        }

        Ok(())
    }
}
