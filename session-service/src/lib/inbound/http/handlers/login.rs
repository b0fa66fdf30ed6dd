use std::sync::Arc;

use axum::extract::State;
use axum::http::header::SET_COOKIE;
use axum::http::HeaderMap;
use axum::http::HeaderValue;
use axum::http::StatusCode;
use axum::response::IntoResponse;
use axum::response::Response;
use axum::Json;
use cookie::Cookie;
use serde::Deserialize;
use serde::Serialize;

use super::ApiError;
use super::ApiSuccess;
use crate::auth::models::Login;
use crate::auth::ports::Transport;
use crate::inbound::http::router::AppState;
use crate::outbound::web::session::SESSION_ID_COOKIE_NAME;
use crate::outbound::web::RequestTransport;
use crate::outbound::web::ResponseCookies;
use crate::outbound::web::RotatingSessionId;

/// Interactive login: establishes the browser session.
///
/// The response carries the `Set-Cookie` headers produced by the flow
/// whichever way it went — the failure path writes a cookie removal,
/// so those headers are attached to error responses too.
pub async fn login(
    State(state): State<AppState>,
    headers: HeaderMap,
    Json(body): Json<LoginRequestBody>,
) -> Response {
    let login = match Login::new(body.login) {
        Ok(login) => login,
        Err(_) => {
            return ApiError::Unauthorized("Invalid credentials".to_string()).into_response()
        }
    };

    let session = Arc::new(RotatingSessionId::new());
    let cookies = Arc::new(ResponseCookies::new());
    let transport = Arc::new(RequestTransport::from_headers(&headers));

    let authenticator = state.authenticator(session.clone(), cookies.clone(), transport.clone());

    let outcome = authenticator
        .init_session(&login, &body.password, body.remember_me)
        .await;

    let mut response = match outcome {
        Ok(()) => ApiSuccess::new(
            StatusCode::OK,
            LoginResponseData {
                login: login.to_string(),
            },
        )
        .into_response(),
        Err(e) => ApiError::from(e).into_response(),
    };

    for header in cookies.take_headers() {
        if let Ok(value) = HeaderValue::from_str(&header) {
            response.headers_mut().append(SET_COOKIE, value);
        }
    }

    if let Some(session_id) = session.current() {
        let session_cookie = Cookie::build((SESSION_ID_COOKIE_NAME, session_id))
            .path(state.cookie_settings.path.clone())
            .http_only(true)
            .secure(transport.is_secure_connection())
            .build();
        if let Ok(value) = HeaderValue::from_str(&session_cookie.to_string()) {
            response.headers_mut().append(SET_COOKIE, value);
        }
    }

    response
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct LoginRequestBody {
    login: String,
    password: String,
    #[serde(default)]
    remember_me: bool,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct LoginResponseData {
    pub login: String,
}
