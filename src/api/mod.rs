pub mod handlers;
pub mod middleware;

pub use handlers::*;

use axum::{
    routing::{get, post},
    Router,
};
use tower::ServiceBuilder;

/// 构建路由
pub fn router(service: SharedService) -> Router {
    Router::new()
        .route("/health", get(health_check))
        .route("/receipts/process", post(process_receipt))
        .route("/receipts/:id/points", get(get_points))
        .layer(ServiceBuilder::new().layer(axum::middleware::from_fn(middleware::request_tracing)))
        .with_state(service)
}
