use std::sync::Arc;

use crate::clients::context7::Context7Client;
use crate::clients::generation::GenerationClient;
use crate::config::ServerConfig;

/// Shared application state available to all Axum handlers via `State<AppState>`.
///
/// This is cheaply cloneable (inner data is behind `Arc` or is already `Clone`).
#[derive(Clone)]
pub struct AppState {
    /// Database connection pool.
    pub pool: inflio_db::DbPool,
    /// Server configuration.
    pub config: Arc<ServerConfig>,
    /// Object storage for uploaded videos and persona photos.
    pub storage: Arc<dyn inflio_storage::StorageProvider>,
    /// Outbound client for the AI generation provider.
    pub generation: Arc<GenerationClient>,
    /// Outbound client for the Context7 MCP service.
    pub context7: Arc<Context7Client>,
    /// Shared HTTP client for fetching user-supplied photo URLs.
    pub http: reqwest::Client,
}
