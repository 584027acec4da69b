//! Cross-origin preflight responder.
//!
//! Runs ahead of authentication on every request:
//! - echoes the request `Origin` as `Access-Control-Allow-Origin`
//! - advertises a fixed `Access-Control-Allow-Methods`
//! - echoes `Access-Control-Request-Headers` as `Access-Control-Allow-Headers`
//!
//! `OPTIONS` requests are answered here with 200 and an empty body; they never
//! reach the access decision. Everything else continues down the stack and the
//! headers are set on whatever response comes back (failure responses included).
//!
//! Note:
//! - Origins are echoed, not checked. Put an origin policy in front of this if
//!   one is needed.

use axum::{
    Router,
    body::Body,
    http::{
        HeaderMap, HeaderValue, Method, Request, StatusCode,
        header::{
            ACCESS_CONTROL_ALLOW_HEADERS, ACCESS_CONTROL_ALLOW_METHODS,
            ACCESS_CONTROL_ALLOW_ORIGIN, ACCESS_CONTROL_REQUEST_HEADERS, ORIGIN,
        },
    },
    middleware::{self, Next},
    response::{IntoResponse, Response},
};

pub const ALLOWED_METHODS: &str = "GET,POST,PUT,DELETE,OPTIONS";

/// Apply the preflight responder to the given Router.
pub fn apply(router: Router) -> Router {
    router.layer(middleware::from_fn(preflight_middleware))
}

#[derive(Debug, Clone, Default)]
struct CorsEcho {
    origin: Option<HeaderValue>,
    request_headers: Option<HeaderValue>,
}

impl CorsEcho {
    fn from_request(headers: &HeaderMap) -> Self {
        Self {
            origin: headers.get(ORIGIN).cloned(),
            request_headers: headers.get(ACCESS_CONTROL_REQUEST_HEADERS).cloned(),
        }
    }

    fn write(self, headers: &mut HeaderMap) {
        if let Some(origin) = self.origin {
            headers.insert(ACCESS_CONTROL_ALLOW_ORIGIN, origin);
        }
        headers.insert(
            ACCESS_CONTROL_ALLOW_METHODS,
            HeaderValue::from_static(ALLOWED_METHODS),
        );
        if let Some(requested) = self.request_headers {
            headers.insert(ACCESS_CONTROL_ALLOW_HEADERS, requested);
        }
    }
}

async fn preflight_middleware(req: Request<Body>, next: Next) -> Response {
    let echo = CorsEcho::from_request(req.headers());

    if req.method() == Method::OPTIONS {
        let mut res = StatusCode::OK.into_response();
        echo.write(res.headers_mut());
        return res;
    }

    let mut res = next.run(req).await;
    echo.write(res.headers_mut());
    res
}
