use crate::handlers;
use crate::state::AppState;
use axum::{routing::get, Router};

pub fn router(state: AppState) -> Router {
    Router::new()
        .route("/", get(handlers::index))
        .route("/partial/garden/:handle", get(handlers::garden_fragment))
        .route("/api/garden/:handle", get(handlers::get_garden))
        .with_state(state)
}
