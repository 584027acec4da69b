/*
 * Responsibility
 * - アプリ共通の AppError 定義
 * - IntoResponse 実装 (HTTP status / JSON error body)
 * - 認証失敗 (AuthFailure) の分類。レスポンス化は middleware::auth::failure 側
 */
use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde::Serialize;
use thiserror::Error;

use crate::repos::error::RepoError;

#[derive(Debug, Serialize)]
pub struct ErrorResponse {
    pub error: ErrorBody,
}

#[derive(Debug, Serialize)]
pub struct ErrorBody {
    pub code: &'static str,
    pub message: String,
}

#[derive(Debug, Error)]
pub enum AppError {
    #[error("unauthorized")]
    Unauthorized,
    #[error("internal server error")]
    Internal,
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, code, message) = match self {
            AppError::Unauthorized => (
                StatusCode::UNAUTHORIZED,
                "UNAUTHORIZED",
                "unauthorized".into(),
            ),
            AppError::Internal => (
                StatusCode::INTERNAL_SERVER_ERROR,
                "INTERNAL_SERVER_ERROR",
                "internal server error".into(),
            ),
        };

        let body = ErrorResponse {
            error: ErrorBody { code, message },
        };

        (status, Json(body)).into_response()
    }
}

/// Why a presented credential was rejected.
///
/// The variants are for server-side logs only; every one of them reaches the
/// client as the same identification-error envelope.
#[derive(Debug, Error)]
pub enum AuthFailure {
    #[error("token invalid")]
    TokenInvalid,
    #[error("token expired")]
    TokenExpired,
    #[error("principal not resolved")]
    PrincipalNotResolved,
    #[error("user store unavailable: {0}")]
    StoreUnavailable(#[source] RepoError),
}

impl From<RepoError> for AuthFailure {
    fn from(e: RepoError) -> Self {
        AuthFailure::StoreUnavailable(e)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn unauthorized_uses_application_error_shape() {
        let res = AppError::Unauthorized.into_response();
        assert_eq!(res.status(), StatusCode::UNAUTHORIZED);
    }

    #[test]
    fn store_failure_keeps_its_source() {
        let failure = AuthFailure::from(RepoError::Db(sqlx::Error::PoolClosed));
        assert!(matches!(failure, AuthFailure::StoreUnavailable(_)));
        assert!(std::error::Error::source(&failure).is_some());
    }
}
