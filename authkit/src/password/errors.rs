use thiserror::Error;

/// Error type for password hashing and verification.
#[derive(Debug, Clone, Error)]
pub enum PasswordError {
    #[error("Could not hash password: {0}")]
    HashingFailed(String),

    #[error("Stored hash is not a valid PHC string: {0}")]
    MalformedHash(String),
}
