use sea_orm::DatabaseConnection;
use std::sync::Arc;

use crate::config::Config;
use crate::crud::{CrudDispatcher, Registry};

#[derive(Clone)]
pub struct AppState {
    pub db: DatabaseConnection,
    pub config: Arc<Config>,
    pub registry: Arc<Registry>,
}

impl AppState {
    pub fn new(db: DatabaseConnection, config: Config) -> Self {
        Self {
            db,
            config: Arc::new(config),
            registry: Arc::new(Registry::with_catalog()),
        }
    }

    pub fn dispatcher(&self) -> CrudDispatcher<'_> {
        CrudDispatcher::new(&self.db, &self.registry)
    }
}
