use std::sync::Arc;

use authkit::session_token_hash;

use crate::auth::errors::AuthError;
use crate::auth::errors::CredentialError;
use crate::auth::models::AuthResult;
use crate::auth::models::CookieSettings;
use crate::auth::models::Credential;
use crate::auth::models::Login;
use crate::auth::models::SessionCookie;
use crate::auth::ports::CookieStore;
use crate::auth::ports::CredentialService;
use crate::auth::ports::PasswordResetStore;
use crate::auth::ports::SessionManager;
use crate::auth::ports::Transport;
use crate::auth::ports::UserStore;

/// Authentication domain service.
///
/// Verifies a submitted credential against the user store and, for
/// interactive logins, establishes the hash-bound session cookie.
/// Request-scoped: instantiate one per incoming request and do not
/// share an instance across concurrent requests.
pub struct Authenticator {
    user_store: Arc<dyn UserStore>,
    credential_service: Arc<dyn CredentialService>,
    session: Arc<dyn SessionManager>,
    cookies: Arc<dyn CookieStore>,
    password_resets: Arc<dyn PasswordResetStore>,
    transport: Arc<dyn Transport>,
    cookie_settings: CookieSettings,
}

impl Authenticator {
    /// Create an authenticator with injected collaborators.
    ///
    /// All collaborators are explicit constructor parameters so tests
    /// can substitute doubles for any of them.
    #[allow(clippy::too_many_arguments)]
    pub fn new(
        user_store: Arc<dyn UserStore>,
        credential_service: Arc<dyn CredentialService>,
        session: Arc<dyn SessionManager>,
        cookies: Arc<dyn CookieStore>,
        password_resets: Arc<dyn PasswordResetStore>,
        transport: Arc<dyn Transport>,
        cookie_settings: CookieSettings,
    ) -> Self {
        Self {
            user_store,
            credential_service,
            session,
            cookies,
            password_resets,
            transport,
            cookie_settings,
        }
    }

    /// Verify a credential against the user store.
    ///
    /// Bad credentials are reported as `AuthResult::failure`, never as
    /// an error; `Err` means the user store itself failed. No side
    /// effects: cookies and sessions are only touched by
    /// [`Authenticator::init_session`].
    ///
    /// Token-only mode resolves the user by exact stored token.
    /// Login-bound mode accepts the stored token either verbatim or as
    /// its login-bound hash; on success the result carries the stored
    /// (unhashed) token so password-based logins can recover the
    /// canonical token.
    pub async fn authenticate(&self, credential: &Credential) -> Result<AuthResult, AuthError> {
        match credential {
            Credential::Token { token_auth } => {
                match self.user_store.find_by_token(token_auth).await? {
                    Some(user) => Ok(AuthResult::success(
                        user.superuser_access,
                        user.login,
                        token_auth.clone(),
                    )),
                    None => Ok(AuthResult::failure(None, Some(token_auth.clone()))),
                }
            }
            Credential::LoginToken { login, token_auth } => {
                let Some(user) = self.user_store.find_by_login(login).await? else {
                    return Ok(AuthResult::failure(
                        Some(login.clone()),
                        Some(token_auth.clone()),
                    ));
                };

                let hashed = session_token_hash(login.as_str(), user.token_auth.as_str());
                if token_auth.as_str() == user.token_auth.as_str()
                    || token_auth.as_str() == hashed
                {
                    Ok(AuthResult::success(
                        user.superuser_access,
                        user.login,
                        user.token_auth,
                    ))
                } else {
                    Ok(AuthResult::failure(
                        Some(login.clone()),
                        Some(token_auth.clone()),
                    ))
                }
            }
        }
    }

    /// Establish a browser session from a login/password pair.
    ///
    /// The session id is regenerated before anything else happens, on
    /// every call. The password check is delegated to the credential
    /// exchange; a mismatch (or a failed authentication on the
    /// exchanged token) deletes any existing auth cookie and surfaces
    /// as `PasswordNotCorrect`. Other exchange failures propagate
    /// unchanged without touching cookies. On success the auth cookie
    /// is overwritten with the login-bound token hash and any pending
    /// password-reset request for the login is cleared.
    ///
    /// # Errors
    /// * `PasswordNotCorrect` - Credentials rejected; cookie deleted
    /// * `CredentialExchange` - Unknown login or exchange backend fault
    /// * `UserStore` / `CookieStore` / `PasswordReset` - Collaborator faults
    pub async fn init_session(
        &self,
        login: &Login,
        password: &str,
        remember_me: bool,
    ) -> Result<(), AuthError> {
        // Rotate the session id before any credential handling so a
        // fixated id can never become an authenticated session.
        self.session.regenerate_id().await;

        let token_auth = match self
            .credential_service
            .exchange_credential(login, password)
            .await
        {
            Ok(token_auth) => token_auth,
            Err(CredentialError::PasswordMismatch) => {
                self.cookies.delete(&self.cookie_settings).await?;
                tracing::warn!(login = %login, "Login rejected: password mismatch");
                return Err(AuthError::PasswordNotCorrect);
            }
            Err(e) => return Err(AuthError::CredentialExchange(e)),
        };

        let credential = Credential::LoginToken {
            login: login.clone(),
            token_auth,
        };
        let result = self.authenticate(&credential).await?;

        if !result.is_success() {
            self.cookies.delete(&self.cookie_settings).await?;
            tracing::warn!(login = %login, "Login rejected: token authentication failed");
            return Err(AuthError::PasswordNotCorrect);
        }

        // authenticate() returned success, so the canonical token is present.
        let token_auth = result
            .token_auth
            .ok_or_else(|| AuthError::CredentialExchange(CredentialError::Backend(
                "successful authentication without a token".to_string(),
            )))?;

        let cookie = SessionCookie::issue(
            &self.cookie_settings,
            login.clone(),
            &token_auth,
            remember_me,
            self.transport.is_secure_connection(),
        );
        self.cookies.save(&cookie).await?;

        self.password_resets.clear_reset_request(login).await?;

        tracing::info!(login = %login, remember_me, "Session established");
        Ok(())
    }
}
