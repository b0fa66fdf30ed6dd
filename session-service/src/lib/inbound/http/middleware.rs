use authkit::session_token_hash;
use axum::extract::Request;
use axum::extract::State;
use axum::http::StatusCode;
use axum::http;
use axum::middleware::Next;
use axum::response::IntoResponse;
use axum::response::Response;
use axum::Json;
use cookie::Cookie;
use serde_json::json;

use crate::auth::models::Login;
use crate::auth::models::SessionCookie;
use crate::inbound::http::router::AppState;

/// Extension type carrying the cookie-authenticated identity.
#[derive(Debug, Clone)]
pub struct AuthenticatedUser {
    pub login: Login,
    pub superuser_access: bool,
}

/// Middleware validating the hash-bound auth cookie.
///
/// The cookie carries `login:hash`; it is accepted only when the hash
/// equals the login-bound digest of the token currently stored for
/// that login, so a cookie lifted from one account cannot be replayed
/// against another and token rotation invalidates old cookies.
pub async fn authenticate_cookie(
    State(state): State<AppState>,
    mut req: Request,
    next: Next,
) -> Result<Response, Response> {
    let cookie_value = extract_auth_cookie(&req, &state.cookie_settings.name)?;

    let (login, submitted_hash) =
        SessionCookie::parse_value(&cookie_value).ok_or_else(|| unauthorized("Invalid session"))?;

    let user = state
        .user_store
        .find_by_login(&login)
        .await
        .map_err(|e| {
            tracing::error!(error = %e, "User lookup failed during cookie validation");
            (
                StatusCode::INTERNAL_SERVER_ERROR,
                Json(json!({
                    "error": "Authentication unavailable"
                })),
            )
                .into_response()
        })?
        .ok_or_else(|| unauthorized("Invalid session"))?;

    let expected = session_token_hash(user.login.as_str(), user.token_auth.as_str());
    if submitted_hash != expected {
        tracing::warn!(login = %login, "Auth cookie hash mismatch");
        return Err(unauthorized("Invalid session"));
    }

    req.extensions_mut().insert(AuthenticatedUser {
        login: user.login,
        superuser_access: user.superuser_access,
    });

    Ok(next.run(req).await)
}

fn extract_auth_cookie(req: &Request, cookie_name: &str) -> Result<String, Response> {
    let header = req
        .headers()
        .get(http::header::COOKIE)
        .ok_or_else(|| unauthorized("Missing session cookie"))?;

    let header = header
        .to_str()
        .map_err(|_| unauthorized("Invalid Cookie header"))?;

    for cookie in Cookie::split_parse(header.to_string()).flatten() {
        if cookie.name() == cookie_name {
            return Ok(cookie.value().to_string());
        }
    }

    Err(unauthorized("Missing session cookie"))
}

fn unauthorized(message: &str) -> Response {
    (
        StatusCode::UNAUTHORIZED,
        Json(json!({
            "error": message
        })),
    )
        .into_response()
}
