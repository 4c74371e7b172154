//! Data models for plants and their care tasks.
//!
//! [`Plant`] and [`CareTask`] are the validated in-memory forms used by every
//! engine component. They serialize to the persisted camelCase JSON layout
//! directly; loading goes through the lenient records in [`stored`], which
//! normalize missing or legacy fields once at the storage boundary.
//!
//! Due dates are [`jiff::civil::Date`] values. Completion events and creation
//! times are [`jiff::Timestamp`] instants.
//!
//! # Examples
//!
//! ```rust
//! use jiff::{civil::date, Timestamp};
//! use sprout_core::models::{CareTask, Plant, PlantId, TaskId};
//!
//! let mut plant = Plant::new(PlantId::new("7"), "Monstera");
//! plant.care_tasks.push(CareTask::new(
//!     TaskId::new("7-water"),
//!     "Water",
//!     3,
//!     date(2025, 6, 1),
//!     Timestamp::UNIX_EPOCH,
//! ));
//!
//! let task = &plant.care_tasks[0];
//! assert!(task.is_due_on(date(2025, 6, 1), date(2025, 6, 1)));
//! ```

pub mod ids;
pub mod plant;
pub mod stored;
pub mod task;


pub use ids::{PlantId, TaskId, UserContext};
pub use plant::{Plant, SunAmount};
pub use stored::{NormalizeContext, StoredPlant};
pub use task::{CareTask, TaskState, DEFAULT_FREQUENCY_DAYS};
