use std::sync::Arc;

use axum::{routing::get, Router};
use tower_http::{
    cors::CorsLayer,
    trace::{DefaultMakeSpan, DefaultOnFailure, DefaultOnRequest, DefaultOnResponse, TraceLayer},
};
use tracing::Level;

use service::players::PlayerStore;

pub mod players;

/// Static greeting for liveness checks; no store interaction.
pub async fn health() -> &'static str {
    "Welcome to health route!"
}

/// Build the full application router: player CRUD at the root plus health.
pub fn build_router(store: Arc<dyn PlayerStore>, cors: CorsLayer) -> Router {
    Router::new()
        .route("/health", get(health))
        .route("/", get(players::list_players).post(players::create_player))
        .route(
            "/:id",
            get(players::get_player)
                .put(players::put_player)
                .patch(players::patch_player)
                .delete(players::delete_player),
        )
        .with_state(store)
        .layer(cors)
        .layer(
            TraceLayer::new_for_http()
                .make_span_with(
                    DefaultMakeSpan::new()
                        .level(Level::INFO)
                        .include_headers(false),
                )
                .on_request(DefaultOnRequest::new().level(Level::INFO))
                .on_response(
                    DefaultOnResponse::new()
                        .level(Level::INFO)
                        .include_headers(false),
                )
                .on_failure(DefaultOnFailure::new().level(Level::ERROR)),
        )
}
