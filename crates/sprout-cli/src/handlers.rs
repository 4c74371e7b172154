//! Command handlers that drive the engine and render results.

use anyhow::{anyhow, Result};
use jiff::civil::Date;
use log::debug;
use sprout_core::{
    display::{Agenda, MonthView, OperationStatus, Plants, WeekView},
    params::{CreateCareTask, NewPlant, TaskRef},
    CareEngine, MutationResult, PlantId, UserContext,
};

use crate::{
    cli::{PlantCommands, TaskCommands, TaskTargetArgs},
    renderer::TerminalRenderer,
};

/// Executes one CLI command for one user.
pub struct CommandHandler {
    engine: CareEngine,
    renderer: TerminalRenderer,
    user: UserContext,
}

impl CommandHandler {
    pub fn new(engine: CareEngine, renderer: TerminalRenderer, user: UserContext) -> Self {
        Self {
            engine,
            renderer,
            user,
        }
    }

    pub async fn handle_plant_command(&self, command: PlantCommands) -> Result<()> {
        match command {
            PlantCommands::Add(args) => {
                let result = self
                    .engine
                    .add_plant(&self.user, &NewPlant::from(args))
                    .await?;
                self.render_mutation(&result)?;
                self.renderer
                    .render(&format!("Plant ID: {}\n", result.plant_id))
            }
            PlantCommands::List => {
                let plants = self.engine.load_plants(&self.user).await;
                self.renderer.render(&Plants(plants).to_string())
            }
            PlantCommands::Show(args) => {
                let plant = self
                    .engine
                    .get_plant(&self.user, &PlantId::from(args.plant))
                    .await?;
                self.renderer.render(&plant.to_string())
            }
            PlantCommands::Remove(args) => {
                let result = self
                    .engine
                    .remove_plant(&self.user, &PlantId::from(args.plant))
                    .await?;
                self.render_mutation(&result)
            }
        }
    }

    pub async fn handle_task_command(&self, command: TaskCommands) -> Result<()> {
        let result = match command {
            TaskCommands::Add(args) => {
                self.engine
                    .create_care_task(&self.user, &CreateCareTask::from(args))
                    .await?
            }
            TaskCommands::Done(target) => {
                let target = self.resolve_task(target).await?;
                self.engine.complete_care_task(&self.user, &target).await?
            }
            TaskCommands::Postpone(target) => {
                let target = self.resolve_task(target).await?;
                self.engine.postpone_care_task(&self.user, &target).await?
            }
            TaskCommands::Delete(target) => {
                let target = self.resolve_task(target).await?;
                self.engine.delete_care_task(&self.user, &target).await?
            }
        };

        self.render_mutation(&result)?;
        if let Some(task) = &result.task {
            self.renderer.render(&format!("\n{task}"))?;
        }
        Ok(())
    }

    pub async fn show_day(&self, date: Option<Date>) -> Result<()> {
        let today = self.engine.today();
        let day = date.unwrap_or(today);
        let plants = self.engine.agenda(&self.user, day).await;
        self.renderer.render(
            &Agenda {
                day,
                today,
                plants,
            }
            .to_string(),
        )
    }

    pub async fn show_week(&self, date: Option<Date>) -> Result<()> {
        let anchor = date.unwrap_or_else(|| self.engine.today());
        let cells = self.engine.week(&self.user, anchor).await?;
        self.renderer.render(&WeekView(cells).to_string())
    }

    pub async fn show_month(&self, date: Option<Date>) -> Result<()> {
        let anchor = date.unwrap_or_else(|| self.engine.today());
        let rows = self.engine.month(&self.user, anchor).await?;
        self.renderer.render(&MonthView { anchor, rows }.to_string())
    }

    pub async fn show_metrics(&self) -> Result<()> {
        let metrics = self.engine.metrics(&self.user).await?;
        self.renderer.render(&metrics.to_string())
    }

    /// Turns a task given by ID or name into a [`TaskRef`].
    async fn resolve_task(&self, target: TaskTargetArgs) -> Result<TaskRef> {
        let plant_id = PlantId::from(target.plant);
        let plant = self.engine.get_plant(&self.user, &plant_id).await?;
        let task = plant.find_task(&target.task).ok_or_else(|| {
            anyhow!(
                "No task '{}' on plant {} ({})",
                target.task,
                plant.name,
                plant_id
            )
        })?;
        debug!("Resolved task '{}' to {}", target.task, task.id);
        Ok(TaskRef::new(plant_id, task.id.clone()))
    }

    fn render_mutation(&self, result: &MutationResult) -> Result<()> {
        self.renderer
            .render(&OperationStatus::from(result).to_string())
    }
}
