use axum::{
    routing::{get, post},
    Router,
};

use crate::handlers::{self, AppState};

/// Конфигурация всех роутов приложения
///
/// `api_prefix` задаётся в config.toml; пустой префикс монтирует
/// маршруты реестра в корень.
pub fn configure_routes(state: AppState, api_prefix: &str) -> Router {
    let farmers = Router::new()
        .route(
            "/:realm/:coop_id/farmers",
            post(handlers::a001_farmer_detail::admit).get(handlers::a001_farmer_detail::list),
        )
        .route(
            "/:realm/:coop_id/farmers/:farmer_id",
            get(handlers::a001_farmer_detail::get_one),
        )
        .with_state(state);

    let router = Router::new().route("/health", get(|| async { "ok" }));

    let prefix = api_prefix.trim_matches('/');
    if prefix.is_empty() {
        router.merge(farmers)
    } else {
        router.nest(&format!("/{prefix}"), farmers)
    }
}
