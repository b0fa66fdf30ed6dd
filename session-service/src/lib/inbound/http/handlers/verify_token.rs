use std::sync::Arc;

use axum::extract::State;
use axum::http::StatusCode;
use axum::Json;
use serde::Deserialize;
use serde::Serialize;

use super::ApiError;
use super::ApiSuccess;
use crate::auth::models::AuthCode;
use crate::auth::models::Credential;
use crate::auth::models::Login;
use crate::auth::models::TokenAuth;
use crate::inbound::http::router::AppState;
use crate::outbound::web::RequestTransport;
use crate::outbound::web::ResponseCookies;
use crate::outbound::web::RotatingSessionId;

/// Bearer-token verification for API clients.
///
/// A bare `authenticate` call: no session is touched and no cookie is
/// issued. With a login present the token is checked against the
/// stored token or its login-bound hash; without one the token alone
/// resolves the user.
pub async fn verify_token(
    State(state): State<AppState>,
    Json(body): Json<VerifyTokenRequestBody>,
) -> Result<ApiSuccess<VerifyTokenResponseData>, ApiError> {
    let token_auth = TokenAuth::new(body.token_auth);
    let credential = match body.login {
        Some(login) => Credential::LoginToken {
            login: Login::new(login)
                .map_err(|_| ApiError::Unauthorized("Invalid credentials".to_string()))?,
            token_auth,
        },
        None => Credential::Token { token_auth },
    };

    let authenticator = state.authenticator(
        Arc::new(RotatingSessionId::new()),
        Arc::new(ResponseCookies::new()),
        Arc::new(RequestTransport::new(false)),
    );

    let result = authenticator
        .authenticate(&credential)
        .await
        .map_err(ApiError::from)?;

    match result.code {
        AuthCode::Failure => Err(ApiError::Unauthorized("Invalid credentials".to_string())),
        code => Ok(ApiSuccess::new(
            StatusCode::OK,
            VerifyTokenResponseData {
                code: match code {
                    AuthCode::SuccessSuperuser => "success_superuser".to_string(),
                    _ => "success".to_string(),
                },
                login: result.login.map(|l| l.to_string()),
                token_auth: result.token_auth.map(|t| t.as_str().to_string()),
            },
        )),
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct VerifyTokenRequestBody {
    token_auth: String,
    login: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct VerifyTokenResponseData {
    pub code: String,
    pub login: Option<String>,
    pub token_auth: Option<String>,
}
