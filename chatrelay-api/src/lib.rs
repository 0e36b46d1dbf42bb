use axum::routing::any;
use axum::Router;
use chatrelay_app::AppContext;
use tower_http::compression::CompressionLayer;

pub mod handlers;

pub fn router(ctx: AppContext) -> Router {
    Router::new()
        .route("/chatbot", any(handlers::chatbot))
        .route("/chatbot/", any(handlers::chatbot))
        .layer(CompressionLayer::new())
        .with_state(ctx)
}
