//! Axum router wiring.

use axum::{routing::get, Router};

use crate::{app_state::AppState, ops};

pub fn build_router(state: AppState) -> Router {
    let metrics_path = state.cfg().metrics_path.clone();

    Router::new()
        .route("/", get(ops::index))
        .route("/healthz", get(ops::healthz))
        .route(&metrics_path, get(ops::metrics))
        .with_state(state)
}
