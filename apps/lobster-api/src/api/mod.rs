//! API routes module

pub mod diagnostics;
pub mod status;

use axum::Router;
use axum_helpers::health_router;
use domain_catalog::{CatalogService, handlers};

use crate::state::AppState;

/// Routes served at the root: liveness, readiness and diagnostics
pub fn root_routes(state: &AppState) -> Router {
    Router::new()
        .merge(status::root_router(state.clone()))
        .merge(diagnostics::router(state.clone()))
        .merge(health_router(state.config.app))
}

/// Routes mounted under `/api`
pub fn routes(state: &AppState) -> Router {
    let catalog = CatalogService::new(state.store.clone());

    Router::new()
        .merge(status::api_router())
        .merge(handlers::router(catalog))
}
