use std::sync::Arc;

use notes_config::DatabaseConfig;
use notes_store::{NoteStore, SurrealNoteStore};

use crate::Result;

/// Shared handler state: one store handle for every request
#[derive(Clone)]
pub struct AppState {
    pub store: Arc<dyn NoteStore>,
}

impl AppState {
    pub fn new(store: Arc<dyn NoteStore>) -> Self {
        Self { store }
    }
}

pub async fn init_store(config: &DatabaseConfig) -> Result<AppState> {
    let store = SurrealNoteStore::connect(config).await?;
    Ok(AppState::new(Arc::new(store)))
}
