//! Task Store Adapter.
//!
//! A collection is the full list of a user's plants, persisted as one JSON
//! array under the user's id. Stores are synchronous and are driven from
//! `spawn_blocking` by the engine.
//!
//! Reading is forgiving: a blank user, a missing row, or a payload that is
//! not a JSON array all load as an empty collection. Writing is strict: a
//! whole-collection replace guarded by an optional expected version.

use crate::{
    error::{CareError, Result},
    models::{Plant, UserContext},
};

mod codec;
mod memory;
mod sqlite;

pub use memory::MemoryStore;
pub use sqlite::SqliteStore;

/// Raw row as held by a backing store.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StoredCollection {
    pub payload: String,
    pub version: u64,
}

/// A loaded collection together with the store version it was read at.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Snapshot {
    pub plants: Vec<Plant>,
    pub version: u64,
}

impl Snapshot {
    pub fn empty() -> Self {
        Self::default()
    }
}

/// Persistent key-value storage of plant collections.
pub trait PlantStore: Send + Sync {
    /// Loads and normalizes the user's collection.
    ///
    /// Malformed payloads are logged and come back empty; only failures of
    /// the backing store itself are returned as errors.
    fn load(&self, user: &UserContext) -> Result<Snapshot>;

    /// Replaces the user's collection and returns the new version.
    ///
    /// When `expected_version` is set and no longer matches, nothing is
    /// written and [`CareError::StaleWrite`] is returned.
    fn save(&self, user: &UserContext, plants: &[Plant], expected_version: Option<u64>)
        -> Result<u64>;

    /// Current version of the user's collection; 0 when nothing is stored.
    fn version(&self, user: &UserContext) -> Result<u64>;
}

fn require_user(user: &UserContext) -> Result<()> {
    if user.is_resolved() {
        Ok(())
    } else {
        Err(CareError::invalid_input("user_id").with_reason("no user is signed in"))
    }
}
