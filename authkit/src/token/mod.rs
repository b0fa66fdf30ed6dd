//! Session-token hashing.
//!
//! A persistent `token_auth` secret must never travel to the browser
//! verbatim. The session cookie instead carries the digest of the
//! login concatenated with the token, which binds the cookie to one
//! specific login: changing either input changes the digest.

use sha2::Digest;
use sha2::Sha256;

/// Compute the login-bound digest of a token.
///
/// Deterministic: the same `(login, token_auth)` pair always produces
/// the same lowercase hex SHA-256 digest.
pub fn session_token_hash(login: &str, token_auth: &str) -> String {
    let mut hasher = Sha256::new();
    hasher.update(login.as_bytes());
    hasher.update(token_auth.as_bytes());

    hasher
        .finalize()
        .iter()
        .map(|byte| format!("{:02x}", byte))
        .collect()
}
