use std::sync::Arc;

use crate::models::PlayerRecord;

/// Shared API state: the dataset, loaded once at startup and immutable
/// for the life of the process.
#[derive(Clone)]
pub struct AppState {
    pub players: Arc<Vec<PlayerRecord>>,
}

impl AppState {
    pub fn new(players: Vec<PlayerRecord>) -> Self {
        Self {
            players: Arc::new(players),
        }
    }
}
