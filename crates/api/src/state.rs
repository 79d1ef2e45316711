use std::sync::Arc;

use shipyard_core::rules::Rules;
use shipyard_core::techs::TechStore;

use crate::config::ServerConfig;

/// Shared application state available to all Axum handlers via `State<AppState>`.
///
/// Cheaply cloneable: everything but the pool is behind an `Arc`.
#[derive(Clone)]
pub struct AppState {
    /// Database connection pool.
    pub pool: shipyard_db::DbPool,
    pub config: Arc<ServerConfig>,
    /// Hull and component catalog, loaded once at startup.
    pub techs: Arc<TechStore>,
    pub rules: Arc<Rules>,
}
