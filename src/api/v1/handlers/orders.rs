/*
 * Responsibility
 * - GET /orders
 * - 同じ endpoint で匿名と認証済みで内容を出し分ける (gate は匿名を拒否しない)
 */
use axum::{Extension, Json};
use serde::Serialize;

use crate::api::v1::extractors::{AccessOutcome, CurrentUser};

#[derive(Debug, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum OrdersScope {
    Public,
    Personal,
}

#[derive(Debug, Serialize)]
pub struct OrdersResponse {
    pub scope: OrdersScope,
    pub access: AccessOutcome,
    #[serde(rename = "currentUser", skip_serializing_if = "Option::is_none")]
    pub current_user: Option<CurrentUser>,
}

pub async fn list_orders(
    Extension(access): Extension<AccessOutcome>,
    user: Option<Extension<CurrentUser>>,
) -> Json<OrdersResponse> {
    let res = match user {
        Some(Extension(user)) => OrdersResponse {
            scope: OrdersScope::Personal,
            access,
            current_user: Some(user),
        },
        None => OrdersResponse {
            scope: OrdersScope::Public,
            access,
            current_user: None,
        },
    };

    Json(res)
}
