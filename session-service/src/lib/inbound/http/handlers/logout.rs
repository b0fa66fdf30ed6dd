use axum::extract::State;
use axum::http::header::SET_COOKIE;
use axum::http::HeaderValue;
use axum::http::StatusCode;
use axum::response::IntoResponse;
use axum::response::Response;
use serde::Serialize;

use super::ApiSuccess;
use crate::auth::ports::CookieStore;
use crate::inbound::http::router::AppState;
use crate::outbound::web::ResponseCookies;

/// End the browser session by expiring the auth cookie.
pub async fn logout(State(state): State<AppState>) -> Response {
    let cookies = ResponseCookies::new();

    // Buffering a removal cannot fail
    let _ = cookies.delete(&state.cookie_settings).await;

    let mut response =
        ApiSuccess::new(StatusCode::OK, LogoutResponseData { logged_out: true }).into_response();

    for header in cookies.take_headers() {
        if let Ok(value) = HeaderValue::from_str(&header) {
            response.headers_mut().append(SET_COOKIE, value);
        }
    }

    response
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct LogoutResponseData {
    pub logged_out: bool,
}
