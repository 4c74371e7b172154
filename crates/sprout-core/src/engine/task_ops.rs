//! Care task operations for the CareEngine.

use super::{CareEngine, MutationResult};
use crate::{
    error::Result,
    lifecycle,
    models::UserContext,
    notify::ChangeAction,
    params::{CreateCareTask, TaskRef},
};

impl CareEngine {
    /// Adds a task to a plant. The task is first due on the requested start
    /// day, or today.
    ///
    /// # Errors
    ///
    /// `PlantNotFound` for an unknown plant, `InvalidInput` for a blank name
    /// or a zero frequency. Nothing is written in either case.
    pub async fn create_care_task(
        &self,
        user: &UserContext,
        params: &CreateCareTask,
    ) -> Result<MutationResult> {
        let params = params.clone();
        self.mutate(user, ChangeAction::Create, move |plants, clock| {
            lifecycle::create_task(plants, &params, clock.now(), clock.today())
        })
        .await
    }

    /// Marks a task done now and schedules the next occurrence
    /// `frequency` days after the local day of completion, regardless of
    /// the previous due date.
    pub async fn complete_care_task(
        &self,
        user: &UserContext,
        target: &TaskRef,
    ) -> Result<MutationResult> {
        let target = target.clone();
        self.mutate(user, ChangeAction::Complete, move |plants, clock| {
            lifecycle::complete_task(
                plants,
                &target.plant_id,
                &target.task_id,
                clock.now(),
                &clock.time_zone(),
            )
        })
        .await
    }

    /// Pushes a task to tomorrow.
    pub async fn postpone_care_task(
        &self,
        user: &UserContext,
        target: &TaskRef,
    ) -> Result<MutationResult> {
        let target = target.clone();
        self.mutate(user, ChangeAction::Postpone, move |plants, clock| {
            lifecycle::postpone_task(plants, &target.plant_id, &target.task_id, clock.today())
        })
        .await
    }

    /// Deletes a task together with its completion history.
    pub async fn delete_care_task(
        &self,
        user: &UserContext,
        target: &TaskRef,
    ) -> Result<MutationResult> {
        let target = target.clone();
        self.mutate(user, ChangeAction::Delete, move |plants, _| {
            lifecycle::delete_task(plants, &target.plant_id, &target.task_id)
        })
        .await
    }
}
