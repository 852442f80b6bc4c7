/// Unlock API routes
use crate::{
    error::{Result, ServerError},
    middleware::{AUTH_COOKIE, AUTH_COOKIE_VALUE},
    state::AppState,
};
use axum::{extract::State, Json};
use axum_extra::extract::cookie::{Cookie, CookieJar, SameSite};
use serde::Deserialize;
use serde_json::json;

#[derive(Debug, Deserialize)]
pub struct UnlockRequest {
    pub password: String,
}

/// POST /api/auth/unlock
/// Check the shared password and set the unlock cookie.
pub async fn unlock(
    State(app_state): State<AppState>,
    jar: CookieJar,
    Json(req): Json<UnlockRequest>,
) -> Result<(CookieJar, Json<serde_json::Value>)> {
    if app_state.gate.password.is_empty() || req.password != app_state.gate.password {
        return Err(ServerError::Unauthorized("wrong password".to_string()));
    }

    let cookie = Cookie::build((AUTH_COOKIE, AUTH_COOKIE_VALUE))
        .path("/")
        .http_only(true)
        .same_site(SameSite::Lax)
        .max_age(time::Duration::days(app_state.gate.cookie_max_age_days))
        .build();

    Ok((jar.add(cookie), Json(json!({ "ok": true }))))
}

/// POST /api/auth/logout
/// Clear the unlock cookie.
pub async fn logout(jar: CookieJar) -> (CookieJar, Json<serde_json::Value>) {
    let cookie = Cookie::build((AUTH_COOKIE, ""))
        .path("/")
        .expires(time::OffsetDateTime::now_utc() - time::Duration::days(1))
        .same_site(SameSite::Lax)
        .build();

    (jar.add(cookie), Json(json!({ "ok": true })))
}
