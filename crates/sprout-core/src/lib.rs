//! Core library for the Sprout plant care scheduler.
//!
//! This crate decides, for any plant and any calendar day, which recurring
//! care tasks (watering, fertilizing, pruning, ...) are due. It tracks
//! completion history, supports postponement, and produces the data behind
//! daily agendas, weekly and monthly calendars and dashboard metrics.
//!
//! # Layout
//!
//! - [`dates`]: calendar-day normalization and the [`Clock`] seam
//! - [`models`]: plants, care tasks and their lenient stored forms
//! - [`store`] / [`db`]: whole-collection persistence keyed by user
//! - [`lifecycle`]: pure create/complete/postpone/delete transforms
//! - [`engine`]: the async [`CareEngine`] that persists and notifies
//! - [`notify`]: typed change events with explicit subscriptions
//! - [`resolver`], [`calendar`], [`metrics`]: read-side projections
//! - [`display`]: markdown formatting for terminal output
//!
//! Projections are pure functions of `(plants, date, today, time zone)`, so
//! a view that receives a [`ChangeEvent`] simply reloads and recomputes.
//!
//! # Quick Start
//!
//! ```rust
//! use sprout_core::{
//!     params::{CreateCareTask, NewPlant, TaskRef},
//!     CareEngineBuilder, UserContext,
//! };
//!
//! # async fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let engine = CareEngineBuilder::new()
//!     .with_database_path(Some("garden.db"))
//!     .build()
//!     .await?;
//! let user = UserContext::new("alice");
//!
//! let fern = engine
//!     .add_plant(&user, &NewPlant { name: "Fern".into(), ..Default::default() })
//!     .await?
//!     .plant_id;
//!
//! let water = engine
//!     .create_care_task(&user, &CreateCareTask {
//!         plant_id: fern.clone(),
//!         name: "Water".into(),
//!         frequency: Some(3),
//!         start_date: None,
//!     })
//!     .await?;
//!
//! if let Some(task) = water.task {
//!     let done = engine.complete_care_task(&user, &TaskRef::new(fern, task.id)).await?;
//!     println!("{}", done.message);
//! }
//! # Ok(())
//! # }
//! ```

pub mod calendar;
pub mod dates;
pub mod db;
pub mod display;
pub mod engine;
pub mod error;
pub mod lifecycle;
pub mod metrics;
pub mod models;
pub mod notify;
pub mod params;
pub mod resolver;
pub mod store;

// Re-export commonly used types
pub use calendar::{completed_in_range, CalendarCell, Direction, ViewMode, WeekStart};
pub use dates::{Clock, FixedClock, SystemClock};
pub use db::Database;
pub use engine::{CareEngine, CareEngineBuilder, EngineSettings, MutationResult};
pub use error::{CareError, Result};
pub use metrics::CareMetrics;
pub use models::{CareTask, Plant, PlantId, SunAmount, TaskId, TaskState, UserContext};
pub use notify::{ChangeAction, ChangeEvent, Subscription};
pub use params::{CreateCareTask, NewPlant, TaskRef};
pub use resolver::{agenda_for_day, completed_on, tasks_due_on, AgendaEntry, PlantAgenda};
pub use store::{MemoryStore, PlantStore, Snapshot, SqliteStore};
