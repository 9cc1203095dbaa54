//! Operational HTTP endpoints.
//!
//! - `/`        : landing page linking to the metrics path
//! - `/healthz` : liveness
//! - metrics path (default `/metrics`) : Prometheus text format

use axum::{
    extract::State,
    http::{header, StatusCode},
    response::{Html, IntoResponse, Response},
};

use qbridge_core::exposition::CONTENT_TYPE;

use crate::app_state::AppState;

pub async fn healthz() -> impl IntoResponse {
    (StatusCode::OK, "ok")
}

pub async fn index(State(state): State<AppState>) -> Html<String> {
    Html(landing_page(&state.cfg().metrics_path))
}

pub async fn metrics(State(state): State<AppState>) -> Response {
    let body = state.registry().gather().await;

    (StatusCode::OK, [(header::CONTENT_TYPE, CONTENT_TYPE)], body).into_response()
}

fn landing_page(metrics_path: &str) -> String {
    format!(
        "<html>\n\
         <head><title>AWS SQS exporter</title></head>\n\
         <body>\n\
         <h1>AWS SQS exporter</h1>\n\
         <p><a href=\"{metrics_path}\">Metrics</a></p>\n\
         </body>\n\
         </html>"
    )
}
