//! SQLite-backed collection store.

use std::{
    path::{Path, PathBuf},
    sync::Arc,
};

use super::{codec, require_user, PlantStore, Snapshot};
use crate::{
    dates::{Clock, SystemClock},
    db::Database,
    error::{CareError, Result},
    models::{Plant, UserContext},
};

/// Stores each user's collection as a row of the `plant_collections` table.
///
/// A connection is opened per call, so one store can be shared freely
/// between blocking tasks and processes can share the same file.
pub struct SqliteStore {
    db_path: PathBuf,
    clock: Arc<dyn Clock>,
}

impl SqliteStore {
    /// Opens (creating if needed) the database at `path`.
    pub fn open<P: AsRef<Path>>(path: P) -> Result<Self> {
        let db_path = path.as_ref().to_path_buf();

        if let Some(parent) = db_path.parent().filter(|p| !p.as_os_str().is_empty()) {
            std::fs::create_dir_all(parent).map_err(|e| CareError::FileSystem {
                path: parent.to_path_buf(),
                source: e,
            })?;
        }

        Database::new(&db_path)?;

        Ok(Self {
            db_path,
            clock: Arc::new(SystemClock),
        })
    }

    /// Clock used to stamp writes and to fill in missing timestamps when
    /// normalizing on load.
    pub fn with_clock(mut self, clock: Arc<dyn Clock>) -> Self {
        self.clock = clock;
        self
    }

    pub fn path(&self) -> &Path {
        &self.db_path
    }

    /// Writes a raw payload, bypassing encoding. Used to import collections
    /// written by other clients.
    pub fn write_raw(&self, user: &UserContext, payload: &str) -> Result<u64> {
        require_user(user)?;
        Database::new(&self.db_path)?.write_collection(
            &user.user_id,
            payload,
            None,
            self.clock.now(),
        )
    }
}

impl PlantStore for SqliteStore {
    fn load(&self, user: &UserContext) -> Result<Snapshot> {
        if !user.is_resolved() {
            return Ok(Snapshot::empty());
        }

        let db = Database::new(&self.db_path)?;
        Ok(match db.read_collection(&user.user_id)? {
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
        let mut db = Database::new(&self.db_path)?;
        db.write_collection(&user.user_id, &payload, expected_version, self.clock.now())
    }

    fn version(&self, user: &UserContext) -> Result<u64> {
        if !user.is_resolved() {
            return Ok(0);
        }
        Database::new(&self.db_path)?.collection_version(&user.user_id)
    }
}
