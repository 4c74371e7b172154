//! Collection-level operations for the CareEngine.

use std::sync::Arc;

use log::{debug, warn};
use tokio::task;

use super::{CareEngine, MutationResult};
use crate::{
    error::{CareError, Result},
    lifecycle,
    models::{Plant, PlantId, UserContext},
    notify::{ChangeAction, ChangeEvent},
    params::NewPlant,
};

impl CareEngine {
    /// Loads the user's plants.
    ///
    /// Never fails: an unreadable store is logged and yields an empty
    /// collection.
    pub async fn load_plants(&self, user: &UserContext) -> Vec<Plant> {
        let store = Arc::clone(&self.store);
        let owner = user.clone();

        let loaded = task::spawn_blocking(move || store.load(&owner))
            .await
            .map_err(CareError::from)
            .and_then(|result| result);

        match loaded {
            Ok(snapshot) => snapshot.plants,
            Err(e) => {
                warn!("Failed to load plants for {}: {e}", user.user_id);
                Vec::new()
            }
        }
    }

    /// Replaces the whole collection and notifies subscribers once.
    ///
    /// This write is unconditional: it overwrites whatever version is
    /// stored. Tasks with a zero frequency or a blank name are rejected
    /// with `InvalidInput` and nothing is written.
    pub async fn save_plants(&self, user: &UserContext, plants: Vec<Plant>) -> Result<u64> {
        lifecycle::validate_collection(&plants)?;

        let _guard = self.write_lock.lock().await;

        let store = Arc::clone(&self.store);
        let owner = user.clone();
        let version = task::spawn_blocking(move || store.save(&owner, &plants, None))
            .await??;

        debug!("replace for {} -> v{version}", user.user_id);
        self.notifier.publish(ChangeEvent {
            user_id: user.user_id.clone(),
            plant_id: None,
            task_id: None,
            action: ChangeAction::Replace,
            version,
        });

        Ok(version)
    }

    /// Version of the stored collection, for readers deciding whether to
    /// reload after an external change.
    pub async fn collection_version(&self, user: &UserContext) -> Result<u64> {
        let store = Arc::clone(&self.store);
        let owner = user.clone();

        task::spawn_blocking(move || store.version(&owner))
            .await?
    }

    pub async fn add_plant(&self, user: &UserContext, params: &NewPlant) -> Result<MutationResult> {
        let params = params.clone();
        self.mutate(user, ChangeAction::AddPlant, move |plants, clock| {
            lifecycle::add_plant(plants, &params, clock.now())
        })
        .await
    }

    /// Removes a plant and all of its tasks.
    pub async fn remove_plant(
        &self,
        user: &UserContext,
        plant_id: &PlantId,
    ) -> Result<MutationResult> {
        let plant_id = plant_id.clone();
        self.mutate(user, ChangeAction::RemovePlant, move |plants, _| {
            lifecycle::remove_plant(plants, &plant_id)
        })
        .await
    }

    /// Finds one plant of the collection.
    pub async fn get_plant(&self, user: &UserContext, plant_id: &PlantId) -> Result<Plant> {
        self.load_plants(user)
            .await
            .into_iter()
            .find(|plant| &plant.id == plant_id)
            .ok_or_else(|| CareError::PlantNotFound {
                id: plant_id.to_string(),
            })
    }
}
