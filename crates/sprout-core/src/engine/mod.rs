//! High-level engine API for plant collections and their care tasks.
//!
//! [`CareEngine`] is the central coordinator between callers and a
//! [`PlantStore`]. Every mutation reads the full collection, applies one
//! [`lifecycle`](crate::lifecycle) transform and writes the full collection
//! back, then publishes a single [`ChangeEvent`].
//!
//! ```text
//! ┌─────────────────┐    ┌─────────────────┐    ┌─────────────────┐
//! │   CareEngine    │    │    lifecycle    │    │   PlantStore    │
//! │ (task_ops,      │───▶│ (pure, in-place │───▶│ (sqlite/memory) │
//! │  plant_ops)     │    │  transforms)    │    │                 │
//! └─────────────────┘    └─────────────────┘    └─────────────────┘
//!          │
//!          ▼
//!   ChangeNotifier ──▶ subscribers reload and recompute views
//! ```
//!
//! ## Submodules
//!
//! - [`builder`]: Factory for [`CareEngine`] instances with configuration
//! - [`task_ops`]: Create, complete, postpone and delete care tasks
//! - [`plant_ops`]: Whole-collection load/save and plant add/remove
//! - [`views`]: Agenda, calendar and metrics projections
//!
//! Mutations are serialized by a single-writer lock held across the
//! read-transform-write cycle, and every save carries the version that was
//! read so that a concurrent writer in another process is detected as
//! [`CareError::StaleWrite`](crate::error::CareError::StaleWrite).
//!
//! # Examples
//!
//! ```rust
//! use std::sync::Arc;
//!
//! use sprout_core::{
//!     params::{CreateCareTask, NewPlant},
//!     store::MemoryStore,
//!     CareEngineBuilder, UserContext,
//! };
//!
//! # async fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let engine = CareEngineBuilder::new()
//!     .with_store(Arc::new(MemoryStore::new()))
//!     .build()
//!     .await?;
//! let user = UserContext::new("alice");
//!
//! let added = engine
//!     .add_plant(&user, &NewPlant { name: "Fern".into(), ..Default::default() })
//!     .await?;
//!
//! let created = engine
//!     .create_care_task(&user, &CreateCareTask {
//!         plant_id: added.plant_id.clone(),
//!         name: "Water".into(),
//!         frequency: Some(3),
//!         start_date: None,
//!     })
//!     .await?;
//! assert_eq!(created.message, "New care task \"Water\" created!");
//! # Ok(())
//! # }
//! ```

use std::sync::Arc;

use jiff::{civil::Date, tz::TimeZone};
use log::debug;
use serde::Serialize;
use tokio::{sync::Mutex, task};

use crate::{
    calendar::WeekStart,
    dates::Clock,
    error::{CareError, Result},
    lifecycle::Outcome,
    models::{CareTask, Plant, PlantId, UserContext},
    notify::{ChangeAction, ChangeEvent, ChangeNotifier, Subscription},
    store::PlantStore,
};

pub mod builder;
pub mod plant_ops;
pub mod task_ops;
pub mod views;

#[cfg(test)]
mod tests;

pub use builder::CareEngineBuilder;

/// Default forward limit of calendar navigation, in months.
pub const DEFAULT_NAVIGATION_HORIZON_MONTHS: u32 = 3;

/// Presentation settings shared by the calendar helpers.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct EngineSettings {
    pub week_start: WeekStart,
    pub navigation_horizon_months: u32,
}

impl Default for EngineSettings {
    fn default() -> Self {
        Self {
            week_start: WeekStart::default(),
            navigation_horizon_months: DEFAULT_NAVIGATION_HORIZON_MONTHS,
        }
    }
}

/// What a successful mutation hands back to the caller.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct MutationResult {
    /// Collection as written
    pub plants: Vec<Plant>,
    pub message: String,
    pub plant_id: PlantId,
    /// Affected task, when the mutation targeted one
    pub task: Option<CareTask>,
    /// Store version after the write
    pub version: u64,
}

/// Main engine interface for plant collections and care tasks.
pub struct CareEngine {
    store: Arc<dyn PlantStore>,
    clock: Arc<dyn Clock>,
    notifier: ChangeNotifier,
    write_lock: Mutex<()>,
    settings: EngineSettings,
}

impl CareEngine {
    pub(crate) fn new(
        store: Arc<dyn PlantStore>,
        clock: Arc<dyn Clock>,
        notifier: ChangeNotifier,
        settings: EngineSettings,
    ) -> Self {
        Self {
            store,
            clock,
            notifier,
            write_lock: Mutex::new(()),
            settings,
        }
    }

    pub fn settings(&self) -> EngineSettings {
        self.settings
    }

    /// Local calendar day according to the engine clock.
    pub fn today(&self) -> Date {
        self.clock.today()
    }

    pub fn time_zone(&self) -> TimeZone {
        self.clock.time_zone()
    }

    /// Registers a listener for change events.
    pub fn subscribe(&self) -> Subscription {
        self.notifier.subscribe()
    }

    /// Runs one read-transform-write cycle under the writer lock and
    /// publishes its event.
    async fn mutate<F>(
        &self,
        user: &UserContext,
        action: ChangeAction,
        transform: F,
    ) -> Result<MutationResult>
    where
        F: FnOnce(&mut Vec<Plant>, &dyn Clock) -> Result<Outcome> + Send + 'static,
    {
        if !user.is_resolved() {
            return Err(CareError::invalid_input("user_id").with_reason("no user is signed in"));
        }

        let _guard = self.write_lock.lock().await;

        let store = Arc::clone(&self.store);
        let clock = Arc::clone(&self.clock);
        let owner = user.clone();

        let (plants, outcome, version) = task::spawn_blocking(move || {
            let mut snapshot = store.load(&owner)?;
            let outcome = transform(&mut snapshot.plants, clock.as_ref())?;
            let version = store.save(&owner, &snapshot.plants, Some(snapshot.version))?;
            Ok::<_, CareError>((snapshot.plants, outcome, version))
        })
        .await??;

        debug!(
            "{action} on plant {} for {} -> v{version}",
            outcome.plant_id, user.user_id
        );

        self.notifier.publish(ChangeEvent {
            user_id: user.user_id.clone(),
            plant_id: Some(outcome.plant_id.clone()),
            task_id: outcome.task.as_ref().map(|t| t.id.clone()),
            action,
            version,
        });

        Ok(MutationResult {
            plants,
            message: outcome.message,
            plant_id: outcome.plant_id,
            task: outcome.task,
            version,
        })
    }
}
