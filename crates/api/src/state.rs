use std::sync::Arc;

use intent_lens_core::catalog::RegionCatalog;

use crate::config::ServerConfig;
use crate::error::{AppError, AppResult};

/// Shared application state available to all Axum handlers via `State<AppState>`.
///
/// This is cheaply cloneable (inner data is behind `Arc`).
#[derive(Clone)]
pub struct AppState {
    /// Server configuration.
    pub config: Arc<ServerConfig>,
    /// Immutable region catalog used for every analysis.
    pub catalog: Arc<RegionCatalog>,
}

impl AppState {
    pub fn new(config: ServerConfig, catalog: RegionCatalog) -> Self {
        Self {
            config: Arc::new(config),
            catalog: Arc::new(catalog),
        }
    }
}

/// Load the region catalog named by `REGION_CATALOG_PATH`, or the built-in
/// catalog when none is configured.
pub fn load_catalog(config: &ServerConfig) -> AppResult<RegionCatalog> {
    let Some(path) = &config.region_catalog_path else {
        return Ok(RegionCatalog::builtin());
    };

    let json = std::fs::read_to_string(path).map_err(|e| {
        AppError::InternalError(format!("failed to read region catalog '{path}': {e}"))
    })?;
    Ok(RegionCatalog::from_json_str(&json)?)
}
