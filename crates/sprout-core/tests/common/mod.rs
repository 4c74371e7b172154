use std::sync::Arc;

use jiff::{civil::Date, tz::TimeZone};
use sprout_core::{CareEngine, CareEngineBuilder, FixedClock};
use tempfile::TempDir;

/// Helper function to create a test engine on a fresh SQLite file, with the
/// clock at 09:00 UTC on `day`.
pub async fn create_test_engine(day: Date) -> (TempDir, Arc<FixedClock>, CareEngine) {
    let temp_dir = TempDir::new().expect("Failed to create temp dir");
    let db_path = temp_dir.path().join("test.db");
    let clock =
        Arc::new(FixedClock::at(day, 9, TimeZone::UTC).expect("Failed to create clock"));
    let engine = CareEngineBuilder::new()
        .with_database_path(Some(&db_path))
        .with_clock(clock.clone())
        .build()
        .await
        .expect("Failed to create engine");
    (temp_dir, clock, engine)
}
