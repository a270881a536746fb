//! Axum router: maps URL paths to handlers.

use crate::app::handlers::{
    comparison::comparison_page,
    health,
    home::{index, start},
    predict::{predict_form, predict_submit},
    visualization::visualization_page,
};
use crate::app::state::{AppState, SharedState};
use axum::{
    routing::{get, post},
    Router,
};
use std::sync::Arc;
use tower_http::trace::TraceLayer;

pub fn build_router(state: AppState) -> Router {
    let shared: SharedState = Arc::new(state);

    Router::new()
        .route("/", get(index))
        .route("/start", post(start))
        .route("/predict", get(predict_form).post(predict_submit))
        .route("/visualization", get(visualization_page))
        .route("/comparison", get(comparison_page))
        .route("/health", get(health))
        .layer(TraceLayer::new_for_http())
        .with_state(shared)
}
