use async_trait::async_trait;
use sqlx::PgPool;

use crate::auth::errors::PasswordResetError;
use crate::auth::models::Login;
use crate::auth::ports::PasswordResetStore;

pub struct PgPasswordResetStore {
    pool: PgPool,
}

impl PgPasswordResetStore {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl PasswordResetStore for PgPasswordResetStore {
    async fn clear_reset_request(&self, login: &Login) -> Result<(), PasswordResetError> {
        let result = sqlx::query(
            r#"
            DELETE FROM password_resets
            WHERE login = $1
            "#,
        )
        .bind(login.as_str())
        .execute(&self.pool)
        .await
        .map_err(|e| PasswordResetError::Backend(e.to_string()))?;

        if result.rows_affected() > 0 {
            tracing::debug!(login = %login, "Cleared pending password-reset request");
        }

        Ok(())
    }
}
