/*
 * Responsibility
 * - GET /me
 * - 認証必須の endpoint。CurrentUser が無ければ extractor が 401 を返す
 */
use axum::Json;

use crate::api::v1::extractors::{CurrentUser, CurrentUserExtractor};

pub async fn me(CurrentUserExtractor(user): CurrentUserExtractor) -> Json<CurrentUser> {
    Json(user)
}
