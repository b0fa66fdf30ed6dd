use axum::http::StatusCode;
use axum::Extension;
use serde::Serialize;

use super::ApiSuccess;
use crate::inbound::http::middleware::AuthenticatedUser;

/// Identity of the cookie-authenticated caller.
pub async fn current_user(
    Extension(user): Extension<AuthenticatedUser>,
) -> ApiSuccess<CurrentUserResponseData> {
    ApiSuccess::new(
        StatusCode::OK,
        CurrentUserResponseData {
            login: user.login.to_string(),
            superuser_access: user.superuser_access,
        },
    )
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CurrentUserResponseData {
    pub login: String,
    pub superuser_access: bool,
}
