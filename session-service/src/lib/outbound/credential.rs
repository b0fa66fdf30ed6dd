use async_trait::async_trait;
use authkit::PasswordHasher;
use sqlx::PgPool;
use sqlx::Row;

use crate::auth::errors::CredentialError;
use crate::auth::models::Login;
use crate::auth::models::TokenAuth;
use crate::auth::ports::CredentialService;

/// Credential exchange backed by the users table.
///
/// Performs the actual password verification: the Argon2 check against
/// the stored hash happens here, and the stored token is released only
/// when it passes.
pub struct PgCredentialService {
    pool: PgPool,
    password_hasher: PasswordHasher,
}

impl PgCredentialService {
    pub fn new(pool: PgPool) -> Self {
        Self {
            pool,
            password_hasher: PasswordHasher::new(),
        }
    }
}

#[async_trait]
impl CredentialService for PgCredentialService {
    async fn exchange_credential(
        &self,
        login: &Login,
        password: &str,
    ) -> Result<TokenAuth, CredentialError> {
        let row = sqlx::query(
            r#"
            SELECT password_hash, token_auth
            FROM users
            WHERE login = $1
            "#,
        )
        .bind(login.as_str())
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| CredentialError::Backend(e.to_string()))?
        .ok_or_else(|| CredentialError::UnknownLogin(login.to_string()))?;

        let password_hash: String = row.get("password_hash");
        let matches = self
            .password_hasher
            .verify(password, &password_hash)
            .map_err(|e| CredentialError::Backend(e.to_string()))?;

        if !matches {
            return Err(CredentialError::PasswordMismatch);
        }

        Ok(TokenAuth::new(row.get::<String, _>("token_auth")))
    }
}
