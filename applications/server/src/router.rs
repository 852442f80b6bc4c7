/// Route table
use crate::{api, middleware, state::AppState};
use axum::{
    middleware as axum_middleware,
    routing::{get, patch, post},
    Router,
};
use tower_http::{
    cors::CorsLayer,
    trace::{DefaultMakeSpan, TraceLayer},
};

/// Build the full application router over `app_state`.
pub fn create_router(app_state: AppState) -> Router {
    // Reachable without the unlock cookie
    let open_routes = Router::new()
        .route("/auth/unlock", post(api::auth::unlock))
        .route("/auth/logout", post(api::auth::logout));

    // Everything else sits behind the password gate
    let gated_routes = Router::new()
        // Playlists
        .route(
            "/playlists",
            get(api::playlists::list_playlists).post(api::playlists::create_playlist),
        )
        .route(
            "/playlists/:id",
            get(api::playlists::get_playlist)
                .put(api::playlists::rename_playlist)
                .delete(api::playlists::delete_playlist),
        )
        .route(
            "/playlists/:id/tracks",
            post(api::playlists::add_track).delete(api::playlists::remove_track),
        )
        // Tracks
        .route("/tracks", get(api::tracks::list_tracks))
        .route(
            "/tracks/*public_id",
            patch(api::tracks::update_track).delete(api::tracks::delete_track),
        )
        // Uploads
        .route("/uploads/sign", post(api::uploads::sign))
        .layer(axum_middleware::from_fn(middleware::gate_middleware));

    Router::new()
        .route("/health", get(api::health::health))
        .nest("/api", open_routes.merge(gated_routes))
        .layer(
            TraceLayer::new_for_http()
                .make_span_with(DefaultMakeSpan::default().include_headers(false)),
        )
        .layer(CorsLayer::permissive())
        .with_state(app_state)
}
