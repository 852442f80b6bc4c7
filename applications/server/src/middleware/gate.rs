/// Password-gate middleware
///
/// The whole app sits behind one shared password. Unlocking sets a plain
/// marker cookie; this middleware only checks for its presence. The auth
/// routes and the health probe are mounted outside the gate.
use axum::{
    extract::Request,
    http::StatusCode,
    middleware::Next,
    response::{IntoResponse, Json, Response},
};
use axum_extra::extract::cookie::CookieJar;
use serde_json::json;

/// Marker cookie the unlock endpoint sets.
pub const AUTH_COOKIE: &str = "ab_auth";
/// Its only accepted value.
pub const AUTH_COOKIE_VALUE: &str = "yes";

/// Reject requests that do not carry the unlock cookie.
pub async fn gate_middleware(request: Request, next: Next) -> Response {
    let jar = CookieJar::from_headers(request.headers());
    let unlocked = jar
        .get(AUTH_COOKIE)
        .is_some_and(|cookie| cookie.value() == AUTH_COOKIE_VALUE);

    if !unlocked {
        return (
            StatusCode::UNAUTHORIZED,
            Json(json!({ "error": "locked" })),
        )
            .into_response();
    }

    next.run(request).await
}
