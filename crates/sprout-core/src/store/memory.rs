use std::{
    collections::HashMap,
    sync::{Arc, Mutex, PoisonError},
};

use super::{codec, require_user, PlantStore, Snapshot, StoredCollection};
use crate::{
    dates::{Clock, SystemClock},
    error::{CareError, Result},
    models::{Plant, UserContext},
};

/// In-process store keeping encoded payloads in a map.
///
/// Payloads go through the same codec as [`super::SqliteStore`], so the
/// load-time normalization behaves identically.
pub struct MemoryStore {
    rows: Mutex<HashMap<String, StoredCollection>>,
    clock: Arc<dyn Clock>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::with_clock(Arc::new(SystemClock))
    }

    pub fn with_clock(clock: Arc<dyn Clock>) -> Self {
        Self {
            rows: Mutex::new(HashMap::new()),
            clock,
        }
    }

    /// Stores `payload` verbatim for `user_id` and bumps the version.
    pub fn write_raw(&self, user_id: &str, payload: &str) -> u64 {
        let mut rows = self.rows.lock().unwrap_or_else(PoisonError::into_inner);
        let row = rows.entry(user_id.to_string()).or_insert(StoredCollection {
            payload: String::new(),
            version: 0,
        });
        row.payload = payload.to_string();
        row.version += 1;
        row.version
    }

    /// The payload currently stored for `user_id`.
    pub fn raw(&self, user_id: &str) -> Option<String> {
        let rows = self.rows.lock().unwrap_or_else(PoisonError::into_inner);
        rows.get(user_id).map(|row| row.payload.clone())
    }
}

impl Default for MemoryStore {
    fn default() -> Self {
        Self::new()
    }
}

impl PlantStore for MemoryStore {
    fn load(&self, user: &UserContext) -> Result<Snapshot> {
        if !user.is_resolved() {
            return Ok(Snapshot::empty());
        }

        let row = {
            let rows = self.rows.lock().unwrap_or_else(PoisonError::into_inner);
            rows.get(&user.user_id).cloned()
        };

        Ok(match row {
            Some(row) => Snapshot {
                plants: codec::decode(&user.user_id, &row.payload, self.clock.as_ref()),
                version: row.version,
            },
            None => Snapshot::empty(),
        })
    }

    fn save(
        &self,
        user: &UserContext,
        plants: &[Plant],
        expected_version: Option<u64>,
    ) -> Result<u64> {
        require_user(user)?;
        let payload = codec::encode(plants)?;

        let mut rows = self.rows.lock().unwrap_or_else(PoisonError::into_inner);
        let current = rows.get(&user.user_id).map_or(0, |row| row.version);

        if let Some(expected) = expected_version {
            if expected != current {
                return Err(CareError::StaleWrite {
                    expected,
                    found: current,
                });
            }
        }

        let version = current + 1;
        rows.insert(user.user_id.clone(), StoredCollection { payload, version });
        Ok(version)
    }

    fn version(&self, user: &UserContext) -> Result<u64> {
        let rows = self.rows.lock().unwrap_or_else(PoisonError::into_inner);
        Ok(rows.get(&user.user_id).map_or(0, |row| row.version))
    }
}
