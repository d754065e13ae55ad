use crate::handlers;
use crate::state::AppState;
use axum::{
    routing::{get, post},
    Router,
};

pub fn router(state: AppState) -> Router {
    Router::new()
        .route("/", get(handlers::index))
        .route("/api/day", get(handlers::get_day))
        .route("/api/edit", post(handlers::save_edit))
        .with_state(state)
}
