//! Builder for creating and configuring CareEngine instances.

use std::{
    path::{Path, PathBuf},
    sync::Arc,
};

use log::info;
use tokio::task;

use super::{CareEngine, EngineSettings};
use crate::{
    calendar::WeekStart,
    dates::{Clock, SystemClock},
    error::{CareError, Result},
    notify::ChangeNotifier,
    store::{PlantStore, SqliteStore},
};

/// Builder for creating and configuring CareEngine instances.
#[derive(Default)]
pub struct CareEngineBuilder {
    database_path: Option<PathBuf>,
    store: Option<Arc<dyn PlantStore>>,
    clock: Option<Arc<dyn Clock>>,
    settings: EngineSettings,
}

impl CareEngineBuilder {
    /// Creates a new builder with default settings.
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets a custom database file path.
    ///
    /// If not specified, uses XDG Base Directory specification:
    /// `$XDG_DATA_HOME/sprout/sprout.db` or `~/.local/share/sprout/sprout.db`
    pub fn with_database_path<P: AsRef<Path>>(mut self, path: Option<P>) -> Self {
        if let Some(path) = path {
            self.database_path = Some(path.as_ref().to_path_buf());
        }
        self
    }

    /// Uses an already constructed store instead of SQLite. Takes
    /// precedence over [`Self::with_database_path`].
    pub fn with_store(mut self, store: Arc<dyn PlantStore>) -> Self {
        self.store = Some(store);
        self
    }

    pub fn with_clock(mut self, clock: Arc<dyn Clock>) -> Self {
        self.clock = Some(clock);
        self
    }

    pub fn with_week_start(mut self, week_start: WeekStart) -> Self {
        self.settings.week_start = week_start;
        self
    }

    /// How many months past today calendar navigation may go.
    pub fn with_navigation_horizon_months(mut self, months: u32) -> Self {
        self.settings.navigation_horizon_months = months;
        self
    }

    /// Builds the configured engine instance.
    ///
    /// # Errors
    ///
    /// Returns `CareError::XdgDirectory` if no default location can be found
    /// Returns `CareError::FileSystem` if the database directory can't be created
    /// Returns `CareError::Database` if database initialization fails
    pub async fn build(self) -> Result<CareEngine> {
        let clock = self.clock.unwrap_or_else(|| Arc::new(SystemClock));

        let store = match self.store {
            Some(store) => store,
            None => {
                let db_path = match self.database_path {
                    Some(path) => path,
                    None => Self::default_database_path()?,
                };
                info!("Opening plant database at {}", db_path.display());

                let store_clock = Arc::clone(&clock);
                let store = task::spawn_blocking(move || {
                    SqliteStore::open(&db_path).map(|store| store.with_clock(store_clock))
                })
                .await??;
                Arc::new(store) as Arc<dyn PlantStore>
            }
        };

        Ok(CareEngine::new(
            store,
            clock,
            ChangeNotifier::default(),
            self.settings,
        ))
    }

    /// Returns the default database path following XDG Base Directory
    /// specification.
    fn default_database_path() -> Result<PathBuf> {
        xdg::BaseDirectories::with_prefix("sprout")
            .place_data_file("sprout.db")
            .map_err(|e| CareError::XdgDirectory(e.to_string()))
    }
}
