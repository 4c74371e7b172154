//! JSON payload encoding shared by every store.

use log::warn;
use serde_json::Value;

use crate::{
    dates::Clock,
    error::Result,
    models::{NormalizeContext, Plant, StoredPlant},
};

/// Turns a stored payload into validated plants, dropping what can't be read.
pub(super) fn decode(user_id: &str, payload: &str, clock: &dyn Clock) -> Vec<Plant> {
    let value: Value = match serde_json::from_str(payload) {
        Ok(value) => value,
        Err(e) => {
            warn!("Stored collection for {user_id} is not valid JSON, loading empty: {e}");
            return Vec::new();
        }
    };

    let Value::Array(records) = value else {
        warn!("Stored collection for {user_id} is not an array, loading empty");
        return Vec::new();
    };

    let ctx = NormalizeContext {
        now: clock.now(),
        tz: clock.time_zone(),
    };

    records
        .into_iter()
        .filter_map(|record| match serde_json::from_value::<StoredPlant>(record) {
            Ok(raw) => raw.normalize(&ctx),
            Err(e) => {
                warn!("Skipping unreadable plant record for {user_id}: {e}");
                None
            }
        })
        .collect()
}

pub(super) fn encode(plants: &[Plant]) -> Result<String> {
    Ok(serde_json::to_string(plants)?)
}
