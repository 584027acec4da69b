/*
 * Responsibility
 * - users テーブル向け SQLx 操作 (認証済みユーザーの読み込みのみ)
 * - PgPool を受け取り、見つからなければ None を返す
 * - DB エラーは RepoError で返す
 */
use serde::Serialize;
use sqlx::{FromRow, PgPool};

use crate::repos::error::RepoError;

/// The authenticated user's profile as attached to the request.
#[derive(Debug, Clone, PartialEq, Eq, FromRow, Serialize)]
pub struct UserRecord {
    #[sqlx(rename = "userNo")]
    #[serde(rename = "userNo")]
    pub user_no: String,
    #[sqlx(rename = "userName")]
    #[serde(rename = "userName")]
    pub user_name: String,
    #[sqlx(rename = "imageUrl")]
    #[serde(rename = "imageUrl")]
    pub image_url: Option<String>,
}

pub async fn get_by_user_no(db: &PgPool, user_no: &str) -> Result<Option<UserRecord>, RepoError> {
    let row = sqlx::query_as::<_, UserRecord>(
        r#"
        SELECT "userNo", "userName", "imageUrl"
        FROM users
        WHERE "userNo" = $1
        "#,
    )
    .bind(user_no)
    .fetch_optional(db)
    .await?;

    Ok(row)
}
