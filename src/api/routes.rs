use super::{handlers, AppState};
use axum::{
    routing::{get, post},
    Router,
};
use tower::ServiceBuilder;
use tower_http::trace::TraceLayer;

pub const BASE_PATH: &str = "/blackrock/challenge/v1";

/// 构建路由; 已知路径用错方法返回 405, 未知路径 404
pub fn build_router(state: AppState) -> Router {
    let challenge_routes = Router::new()
        .route("/transactions:parse", post(handlers::parse_transactions))
        .route("/transactions:validator", post(handlers::validate_transactions))
        .route("/transactions:filter", post(handlers::filter_transactions))
        .route("/returns:nps", post(handlers::returns_nps))
        .route("/returns:index", post(handlers::returns_index))
        .route("/performance", get(handlers::performance));

    Router::new()
        .route("/health", get(handlers::health_check))
        .nest(BASE_PATH, challenge_routes)
        .layer(ServiceBuilder::new().layer(TraceLayer::new_for_http()))
        .with_state(state)
}
