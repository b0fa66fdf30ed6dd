use std::fmt;

use authkit::session_token_hash;

use crate::auth::errors::LoginError;

/// Login value type.
///
/// Ensures the login is 2-100 characters drawn from alphanumerics plus
/// `_`, `-`, `.` and `@`. Colon is deliberately excluded because the
/// session-cookie value uses it as the field separator.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Login(String);

impl Login {
    const MIN_LENGTH: usize = 2;
    const MAX_LENGTH: usize = 100;

    /// Create a validated login.
    ///
    /// # Errors
    /// * `TooShort` - Login shorter than 2 characters
    /// * `TooLong` - Login longer than 100 characters
    /// * `InvalidCharacters` - Contains characters outside the allowed set
    pub fn new(login: String) -> Result<Self, LoginError> {
        // Character count, not byte length: multibyte logins are legal
        let length = login.chars().count();
        if length < Self::MIN_LENGTH {
            return Err(LoginError::TooShort {
                min: Self::MIN_LENGTH,
                actual: length,
            });
        }
        if length > Self::MAX_LENGTH {
            return Err(LoginError::TooLong {
                max: Self::MAX_LENGTH,
                actual: length,
            });
        }
        if !login
            .chars()
            .all(|c| c.is_alphanumeric() || matches!(c, '_' | '-' | '.' | '@'))
        {
            return Err(LoginError::InvalidCharacters);
        }

        Ok(Self(login))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for Login {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
    }
}

/// Persistent authentication token.
///
/// Long-lived secret identifying a user, distinct from their password.
/// No `Display` impl so it cannot end up in log output by accident.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TokenAuth(String);

impl TokenAuth {
    pub fn new(token: impl Into<String>) -> Self {
        Self(token.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

/// Submitted credential, one authentication mode per request.
///
/// Replaces the configure-then-call pair of mutable fields with a
/// single immutable value: token-only lookups and login-bound
/// comparisons cannot be mixed up by call ordering.
#[derive(Debug, Clone)]
pub enum Credential {
    /// Bearer-token mode: resolve the user by token alone.
    Token { token_auth: TokenAuth },
    /// Login-bound mode: the submitted token must match the stored
    /// token directly or via its login-bound hash.
    LoginToken { login: Login, token_auth: TokenAuth },
}

/// Immutable snapshot of a user as returned by the user store.
#[derive(Debug, Clone)]
pub struct UserRecord {
    pub login: Login,
    pub token_auth: TokenAuth,
    pub superuser_access: bool,
}

/// Outcome class of an authentication attempt.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AuthCode {
    Success,
    SuccessSuperuser,
    Failure,
}

/// Result of a single authentication attempt.
///
/// Produced fresh per attempt and never mutated. On failure the
/// submitted login/token are echoed back unchanged (either may be
/// absent); on success the token is the canonical stored token.
#[derive(Debug, Clone)]
pub struct AuthResult {
    pub code: AuthCode,
    pub login: Option<Login>,
    pub token_auth: Option<TokenAuth>,
}

impl AuthResult {
    pub fn success(superuser_access: bool, login: Login, token_auth: TokenAuth) -> Self {
        Self {
            code: if superuser_access {
                AuthCode::SuccessSuperuser
            } else {
                AuthCode::Success
            },
            login: Some(login),
            token_auth: Some(token_auth),
        }
    }

    pub fn failure(login: Option<Login>, token_auth: Option<TokenAuth>) -> Self {
        Self {
            code: AuthCode::Failure,
            login,
            token_auth,
        }
    }

    pub fn is_success(&self) -> bool {
        matches!(self.code, AuthCode::Success | AuthCode::SuccessSuperuser)
    }
}

/// Cookie options consumed from configuration.
#[derive(Debug, Clone)]
pub struct CookieSettings {
    pub name: String,
    pub path: String,
    /// Applied only when remember-me is requested.
    pub expiry_seconds: u64,
}

/// Browser session cookie issued on successful interactive login.
///
/// Carries the login and the login-bound token digest, never the raw
/// token. Superseded on each successful login; deleted on failure.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SessionCookie {
    pub name: String,
    pub path: String,
    /// None means a browser-session cookie with no fixed expiry.
    pub max_age_seconds: Option<u64>,
    pub login: Login,
    pub hashed_token_auth: String,
    pub secure: bool,
    pub http_only: bool,
}

impl SessionCookie {
    /// Build the cookie for a successful login.
    ///
    /// The token is hashed with the login before it goes anywhere near
    /// the client; `Max-Age` is set only under remember-me.
    pub fn issue(
        settings: &CookieSettings,
        login: Login,
        token_auth: &TokenAuth,
        remember_me: bool,
        secure: bool,
    ) -> Self {
        let hashed_token_auth = session_token_hash(login.as_str(), token_auth.as_str());

        Self {
            name: settings.name.clone(),
            path: settings.path.clone(),
            max_age_seconds: remember_me.then_some(settings.expiry_seconds),
            login,
            hashed_token_auth,
            secure,
            http_only: true,
        }
    }

    /// Wire encoding of the cookie value: `login:hashed_token`.
    pub fn encoded_value(&self) -> String {
        format!("{}:{}", self.login, self.hashed_token_auth)
    }

    /// Split a cookie value back into its login and token digest.
    ///
    /// Returns None when the value is malformed or the login part does
    /// not validate.
    pub fn parse_value(value: &str) -> Option<(Login, String)> {
        let (login, hash) = value.split_once(':')?;
        let login = Login::new(login.to_string()).ok()?;

        if hash.is_empty() {
            return None;
        }

        Some((login, hash.to_string()))
    }
}
