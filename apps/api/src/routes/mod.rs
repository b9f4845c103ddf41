pub mod health;

use axum::{
    extract::DefaultBodyLimit,
    routing::{get, post},
    Router,
};

use crate::resumes::handlers;
use crate::state::AppState;

pub fn build_router(state: AppState) -> Router {
    let max_upload_bytes = state.max_upload_bytes;
    Router::new()
        .route("/", get(health::root_handler))
        .route("/health", get(health::health_handler))
        .route("/save_resume/", post(handlers::handle_save_resume))
        .route("/get_resumes/", get(handlers::handle_get_resumes))
        .route(
            "/upload_resume/",
            post(handlers::handle_upload_resume).layer(DefaultBodyLimit::max(max_upload_bytes)),
        )
        .route("/parse_resume/", post(handlers::handle_parse_resume))
        .with_state(state)
}
