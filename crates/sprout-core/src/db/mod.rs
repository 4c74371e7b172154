//! Database operations and SQLite management for plant collections.
//!
//! The database is a plain key-value table: one row per user holding the
//! serialized collection plus a version counter. The version is bumped on
//! every write and doubles as the change signal for other processes sharing
//! the same file.

use std::path::Path;

use rusqlite::Connection;

use crate::error::{DatabaseResultExt, Result};

pub mod collection_queries;
pub mod migrations;

/// Database connection and operations handler.
pub struct Database {
    connection: Connection,
}

impl Database {
    /// Creates a new database connection and initializes the schema.
    pub fn new<P: AsRef<Path>>(path: P) -> Result<Self> {
        let connection = Connection::open(path).db_context("Failed to open database connection")?;

        let db = Self { connection };
        db.initialize_schema()?;
        Ok(db)
    }
}
