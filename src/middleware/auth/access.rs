//! access token 検証 → SecurityContext / CurrentUser を extensions に入れる
//!
//! - allow-list に載っている path は credential を一切見ない
//! - `Authorization` ヘッダなし: 拒否はせず `AccessOutcome::Anonymous` を載せて通す
//!   (認可は handler 側の extractor で行う)
//! - 検証/ユーザー解決に失敗: identification error (401) を返して打ち切る

use axum::{
    Router,
    body::Body,
    extract::{OriginalUri, State},
    http::Request,
    middleware::{self, Next},
    response::{IntoResponse, Response},
};

use crate::api::v1::extractors::{AccessOutcome, CurrentUser};
use crate::services::auth::{Credential, Decision, Denial, Grant};
use crate::state::AppState;

/// Put the access decision in front of every route of `router`.
///
/// ```ignore
/// let router = Router::new().nest("/api/v1", api::v1::routes());
/// let router = middleware::auth::access::apply(router, state.clone());
/// ```
pub fn apply(router: Router<AppState>, state: AppState) -> Router<AppState> {
    // axum 0.8 の from_fn は State extractor を受け取れないため、`from_fn_with_state` で明示的に state を渡す
    router.layer(middleware::from_fn_with_state(state, access_middleware))
}

async fn access_middleware(
    State(state): State<AppState>,
    OriginalUri(original_uri): OriginalUri,
    mut req: Request<Body>,
    next: Next,
) -> Response {
    let target = original_uri.path();
    let credential = Credential::from_headers(req.headers());

    let outcome = match state.gate.decide(target, credential.as_ref()).await {
        Decision::Permit(Grant::AllowListed) => AccessOutcome::AllowListed,
        Decision::Permit(Grant::Authenticated(auth)) => {
            tracing::debug!(
                subject = %auth.context.subject(),
                path = %target,
                "request authenticated"
            );
            if let Some(user) = auth.user {
                req.extensions_mut().insert(CurrentUser(user));
            }
            req.extensions_mut().insert(auth.context);
            AccessOutcome::Authenticated
        }
        Decision::Deny(Denial::NoCredential) => AccessOutcome::Anonymous,
        Decision::Deny(Denial::Failed(failure)) => {
            tracing::info!(error = %failure, path = %target, "authentication failed");
            return failure.into_response();
        }
    };

    // middleware → extractor への受け渡し
    req.extensions_mut().insert(outcome);

    next.run(req).await
}
