use async_trait::async_trait;

use crate::auth::errors::CookieStoreError;
use crate::auth::errors::CredentialError;
use crate::auth::errors::PasswordResetError;
use crate::auth::errors::UserStoreError;
use crate::auth::models::CookieSettings;
use crate::auth::models::Login;
use crate::auth::models::SessionCookie;
use crate::auth::models::TokenAuth;
use crate::auth::models::UserRecord;

/// Read-only user lookups.
///
/// Records are immutable snapshots; the authenticator never caches
/// them across calls.
#[async_trait]
pub trait UserStore: Send + Sync {
    /// Resolve a user by login.
    ///
    /// # Returns
    /// Optional user record (None if no such login)
    ///
    /// # Errors
    /// * `Backend` - Lookup failed
    /// * `InvalidLogin` - Stored record fails login validation
    async fn find_by_login(&self, login: &Login) -> Result<Option<UserRecord>, UserStoreError>;

    /// Resolve a user by their exact stored token.
    ///
    /// # Returns
    /// Optional user record (None if no user holds this token)
    ///
    /// # Errors
    /// * `Backend` - Lookup failed
    /// * `InvalidLogin` - Stored record fails login validation
    async fn find_by_token(&self, token_auth: &TokenAuth)
        -> Result<Option<UserRecord>, UserStoreError>;
}

/// Exchange of a login/password pair for the canonical token.
///
/// The exchange itself is the password verification step: it returns a
/// token only when the password checks out.
#[async_trait]
pub trait CredentialService: Send + Sync {
    /// Verify the password and return the user's stored token.
    ///
    /// # Errors
    /// * `UnknownLogin` - No user with this login
    /// * `PasswordMismatch` - Password does not match the stored hash
    /// * `Backend` - Verification could not be performed
    async fn exchange_credential(
        &self,
        login: &Login,
        password: &str,
    ) -> Result<TokenAuth, CredentialError>;
}

/// Session-identifier lifecycle.
#[async_trait]
pub trait SessionManager: Send + Sync {
    /// Replace the current session identifier with a fresh one.
    ///
    /// Must happen before any cookie write in the login flow so a
    /// pre-set session id can never be promoted to an authenticated
    /// one (session fixation).
    async fn regenerate_id(&self);
}

/// Persistence of the browser auth cookie.
#[async_trait]
pub trait CookieStore: Send + Sync {
    /// Write (or overwrite) the auth cookie.
    ///
    /// # Errors
    /// * `WriteFailed` - Cookie could not be written
    async fn save(&self, cookie: &SessionCookie) -> Result<(), CookieStoreError>;

    /// Remove any existing auth cookie with these settings.
    ///
    /// # Errors
    /// * `WriteFailed` - Removal could not be written
    async fn delete(&self, settings: &CookieSettings) -> Result<(), CookieStoreError>;
}

/// Pending password-reset bookkeeping.
#[async_trait]
pub trait PasswordResetStore: Send + Sync {
    /// Drop any outstanding reset request for the login.
    ///
    /// A no-op when none is pending.
    ///
    /// # Errors
    /// * `Backend` - Deletion failed
    async fn clear_reset_request(&self, login: &Login) -> Result<(), PasswordResetError>;
}

/// Properties of the transport the request arrived on.
pub trait Transport: Send + Sync {
    /// True when the current connection is HTTPS (directly or behind a
    /// terminating proxy).
    fn is_secure_connection(&self) -> bool;
}
