//! Display formatting functions and wrapper types.
//!
//! Domain models implement [`std::fmt::Display`] directly (see [`models`]);
//! collections and views that need extra context such as "today" or the
//! first day of the week get small wrapper types. Everything renders to
//! markdown so the CLI can pass it straight to the terminal renderer.
//!
//! ```text
//! ┌─────────────────┐    ┌─────────────────┐    ┌─────────────────┐
//! │  Domain Models  │    │ Wrapper Types   │    │   Markdown      │
//! │ (Plant, Task)   │───▶│ (Agenda, Week,  │───▶│    Output       │
//! │                 │    │  MonthView ...) │    │   (Terminal)    │
//! └─────────────────┘    └─────────────────┘    └─────────────────┘
//! ```
//!
//! ## Module Organization
//!
//! - [`collections`]: Plant lists and the daily agenda
//! - [`calendar`]: Week and month tables
//! - [`status`]: Confirmation messages (OperationStatus)
//! - [`datetime`]: Date/time formatting utilities
//! - [`models`]: Display implementations for domain models
//!
//! ## Usage Examples
//!
//! ```rust
//! use sprout_core::display::OperationStatus;
//!
//! let success = OperationStatus::success("\"Water\" task completed!");
//! assert_eq!(success.to_string(), "✓ \"Water\" task completed!\n");
//! ```

pub mod calendar;
pub mod collections;
pub mod datetime;
pub mod models;
pub mod status;

pub use calendar::{MonthView, WeekView};
pub use collections::{Agenda, Plants};
pub use datetime::DayLabel;
pub use status::OperationStatus;
