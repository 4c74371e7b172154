//! Collection reads and versioned writes.

use jiff::Timestamp;
use rusqlite::{params, OptionalExtension, TransactionBehavior};

use crate::{
    error::{CareError, DatabaseResultExt, Result},
    store::StoredCollection,
};

const SELECT_COLLECTION_SQL: &str =
    "SELECT payload, version FROM plant_collections WHERE user_id = ?1";
const SELECT_VERSION_SQL: &str = "SELECT version FROM plant_collections WHERE user_id = ?1";
const UPSERT_COLLECTION_SQL: &str = "INSERT INTO plant_collections (user_id, payload, version, updated_at) VALUES (?1, ?2, ?3, ?4) \
     ON CONFLICT(user_id) DO UPDATE SET payload = excluded.payload, version = excluded.version, updated_at = excluded.updated_at";

impl super::Database {
    /// Reads the stored payload for a user, if any.
    pub fn read_collection(&self, user_id: &str) -> Result<Option<StoredCollection>> {
        self.connection
            .query_row(SELECT_COLLECTION_SQL, params![user_id], |row| {
                Ok(StoredCollection {
                    payload: row.get(0)?,
                    version: row.get::<_, i64>(1)? as u64,
                })
            })
            .optional()
            .db_context("Failed to read plant collection")
    }

    /// Current version of a user's collection; 0 when nothing is stored.
    pub fn collection_version(&self, user_id: &str) -> Result<u64> {
        let version: Option<i64> = self
            .connection
            .query_row(SELECT_VERSION_SQL, params![user_id], |row| row.get(0))
            .optional()
            .db_context("Failed to read collection version")?;
        Ok(version.unwrap_or(0) as u64)
    }

    /// Replaces a user's payload and returns the new version.
    ///
    /// With `expected_version` set, the write only happens if the stored
    /// version still matches; otherwise [`CareError::StaleWrite`] is returned
    /// and nothing changes. The check and the write share one immediate
    /// transaction, so writers in other processes are serialized too.
    /// `updated_at` is recorded alongside the payload.
    pub fn write_collection(
        &mut self,
        user_id: &str,
        payload: &str,
        expected_version: Option<u64>,
        updated_at: Timestamp,
    ) -> Result<u64> {
        let tx = self
            .connection
            .transaction_with_behavior(TransactionBehavior::Immediate)
            .db_context("Failed to begin transaction")?;

        let current: u64 = tx
            .query_row(SELECT_VERSION_SQL, params![user_id], |row| row.get::<_, i64>(0))
            .optional()
            .db_context("Failed to read collection version")?
            .unwrap_or(0) as u64;

        if let Some(expected) = expected_version {
            if expected != current {
                return Err(CareError::StaleWrite {
                    expected,
                    found: current,
                });
            }
        }

        let next = current + 1;
        tx.execute(
            UPSERT_COLLECTION_SQL,
            params![user_id, payload, next as i64, updated_at.to_string()],
        )
        .db_context("Failed to write plant collection")?;

        tx.commit().db_context("Failed to commit transaction")?;

        Ok(next)
    }
}
