use std::sync::Arc;

use tokio::sync::Mutex;

use crate::models::Roster;
use crate::storage::MatchStore;

#[derive(Clone)]
pub struct AppState {
    pub store: Arc<MatchStore>,
    pub roster: Arc<Roster>,
    /// Serializes writes to the scores file within this process.
    pub write_lock: Arc<Mutex<()>>,
    pub cors_origin: String,
}

impl AppState {
    pub fn new(store: MatchStore, roster: Roster) -> Self {
        Self {
            store: Arc::new(store),
            roster: Arc::new(roster),
            write_lock: Arc::new(Mutex::new(())),
            cors_origin: "*".to_string(),
        }
    }

    pub fn with_cors_origin(mut self, origin: impl Into<String>) -> Self {
        self.cors_origin = origin.into();
        self
    }
}
