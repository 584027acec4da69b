/*
 * Responsibility
 * - v1 の URL 構造を定義
 * - 認証の適用は app 側 (middleware::auth::access::apply) で Router 全体に掛ける
 */
use axum::{Router, routing::get};

use crate::state::AppState;

use crate::api::v1::handlers::{health::health, me::me, orders::list_orders};

pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/public/health", get(health))
        .route("/orders", get(list_orders))
        .route("/me", get(me))
}
