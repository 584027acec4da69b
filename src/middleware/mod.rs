/*
 * Responsibility
 * - middleware の公開インターフェース
 * - 適用順 (外側から): http::apply → cors (preflight) → http::limit → auth::access
 */
pub mod auth;
pub mod cors;
pub mod http;
