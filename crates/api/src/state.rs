use std::sync::Arc;

use crate::config::ServerConfig;

/// Shared application state available to all Axum handlers via `State<AppState>`.
///
/// This is cheaply cloneable (inner data is behind `Arc`).
#[derive(Clone)]
pub struct AppState {
    /// Document store holding sprints and backlogs.
    pub store: scrumboard_db::Store,
    /// Server configuration.
    pub config: Arc<ServerConfig>,
}
