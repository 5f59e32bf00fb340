pub mod health;

use axum::{
    routing::{get, post},
    Router,
};

use crate::generation::handlers as generation;
use crate::resumes::handlers as resumes;
use crate::state::AppState;

pub fn build_router(state: AppState) -> Router {
    Router::new()
        .route("/health", get(health::health_handler))
        .route("/api/generate-resume", post(generation::handle_generate))
        .route("/api/resumes", post(resumes::handle_create))
        .route(
            "/api/resumes/:id",
            get(resumes::handle_get)
                .put(resumes::handle_update)
                .delete(resumes::handle_delete),
        )
        .route(
            "/api/resumes/owner/:owner_id",
            get(resumes::handle_list_by_owner),
        )
        .with_state(state)
}
