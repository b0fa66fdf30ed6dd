use thiserror::Error;

/// Error for Login validation failures
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum LoginError {
    #[error("Login too short: minimum {min} characters, got {actual}")]
    TooShort { min: usize, actual: usize },

    #[error("Login too long: maximum {max} characters, got {actual}")]
    TooLong { max: usize, actual: usize },

    #[error("Login contains invalid characters (only alphanumeric, '_', '-', '.', '@' allowed)")]
    InvalidCharacters,
}

/// Error for user-store lookups
#[derive(Debug, Clone, Error)]
pub enum UserStoreError {
    #[error("Corrupt user record: {0}")]
    InvalidLogin(#[from] LoginError),

    #[error("User store error: {0}")]
    Backend(String),
}

/// Error for the credential-exchange collaborator.
///
/// `PasswordMismatch` is the only variant the session flow translates
/// into its own user-facing failure; the others propagate unchanged.
#[derive(Debug, Clone, Error)]
pub enum CredentialError {
    #[error("No user found with login: {0}")]
    UnknownLogin(String),

    #[error("Submitted password does not match")]
    PasswordMismatch,

    #[error("Credential service error: {0}")]
    Backend(String),
}

/// Error for cookie persistence
#[derive(Debug, Clone, Error)]
pub enum CookieStoreError {
    #[error("Cookie write failed: {0}")]
    WriteFailed(String),
}

/// Error for password-reset bookkeeping
#[derive(Debug, Clone, Error)]
pub enum PasswordResetError {
    #[error("Password reset store error: {0}")]
    Backend(String),
}

/// Top-level error for authentication operations.
///
/// Bad credentials on a bare `authenticate` call are never an error;
/// they come back as `AuthResult::failure`. `PasswordNotCorrect` is
/// raised only by the session-initialization flow, after the auth
/// cookie has been deleted.
#[derive(Debug, Clone, Error)]
pub enum AuthError {
    #[error("Password is not correct")]
    PasswordNotCorrect,

    #[error(transparent)]
    CredentialExchange(CredentialError),

    #[error(transparent)]
    UserStore(#[from] UserStoreError),

    #[error(transparent)]
    CookieStore(#[from] CookieStoreError),

    #[error(transparent)]
    PasswordReset(#[from] PasswordResetError),
}
