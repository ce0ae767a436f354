use axum::{routing::get, Json, Router};

use crate::models::MessageResponse;
use crate::state::AppState;

pub const RUNNING_MESSAGE: &str = "Contact relay API is running!";

/// Health routes
pub fn health_routes() -> Router<AppState> {
    Router::new().route("/", get(health_check))
}

/// GET / - Liveness check
async fn health_check() -> Json<MessageResponse> {
    Json(MessageResponse::new(RUNNING_MESSAGE))
}
