use axum::middleware;
use axum::routing::{get, post};
use axum::Router;
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;

use super::auth::require_auth;
use super::handlers;
use crate::AppState;

pub fn create_router(state: AppState) -> Router {
    // Public routes — no authentication required
    let public = Router::new()
        .route("/health", get(handlers::health::health_check))
        .route("/metrics", get(handlers::metrics::render));

    // Protected API routes — require Bearer token when API_TOKEN is set
    let protected = Router::new()
        // Strategies & subscriptions
        .route(
            "/api/strategies",
            get(handlers::strategies::list).post(handlers::strategies::create),
        )
        .route(
            "/api/strategies/:id",
            get(handlers::strategies::detail).delete(handlers::strategies::deactivate),
        )
        .route(
            "/api/strategies/:id/subscribe",
            post(handlers::strategies::subscribe),
        )
        .route(
            "/api/strategies/:id/unsubscribe",
            post(handlers::strategies::unsubscribe),
        )
        .route(
            "/api/strategies/:id/subscribers",
            get(handlers::strategies::subscribers),
        )
        // Trade broadcast fan-out
        .route("/api/broadcast", post(handlers::broadcast::broadcast))
        // Confirmation lifecycle
        .route(
            "/api/confirmations/:id",
            get(handlers::confirmations::detail).patch(handlers::confirmations::mark_outcome),
        )
        // Consumer views
        .route(
            "/api/consumer/pending-trades",
            get(handlers::consumers::pending_trades),
        )
        // Live notification stream
        .route("/api/stream", get(handlers::stream::stream))
        .layer(middleware::from_fn(require_auth));

    // CORS: the dashboard is served from another origin in dev
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    public
        .merge(protected)
        .layer(cors)
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}
