use crate::{handlers, AppState};
use axum::{routing::get, Router};
use tower_http::trace::TraceLayer;

pub fn create_router(state: AppState) -> Router {
    Router::new()
        // Sidebar list and search; posting creates a blank contact
        .route("/", get(handlers::index).post(handlers::create))
        // Detail; posting toggles favorite
        .route(
            "/contacts/:id",
            get(handlers::show).post(handlers::favorite),
        )
        .route(
            "/contacts/:id/edit",
            get(handlers::edit_form).post(handlers::edit),
        )
        .route(
            "/contacts/:id/destroy",
            get(handlers::confirm_destroy).post(handlers::destroy),
        )
        // Assets
        .route("/app.css", get(handlers::stylesheet))
        .route("/app.js", get(handlers::script))
        .route("/health", get(handlers::health))
        .fallback(handlers::not_found)
        .with_state(state)
        .layer(TraceLayer::new_for_http())
}
