use async_trait::async_trait;
use sqlx::postgres::PgRow;
use sqlx::PgPool;
use sqlx::Row;

use crate::auth::errors::UserStoreError;
use crate::auth::models::Login;
use crate::auth::models::TokenAuth;
use crate::auth::models::UserRecord;
use crate::auth::ports::UserStore;

pub struct PgUserStore {
    pool: PgPool,
}

impl PgUserStore {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    fn record_from_row(row: PgRow) -> Result<UserRecord, UserStoreError> {
        Ok(UserRecord {
            login: Login::new(row.get::<String, _>("login"))?,
            token_auth: TokenAuth::new(row.get::<String, _>("token_auth")),
            superuser_access: row.get::<bool, _>("superuser_access"),
        })
    }
}

#[async_trait]
impl UserStore for PgUserStore {
    async fn find_by_login(&self, login: &Login) -> Result<Option<UserRecord>, UserStoreError> {
        let row = sqlx::query(
            r#"
            SELECT login, token_auth, superuser_access
            FROM users
            WHERE login = $1
            "#,
        )
        .bind(login.as_str())
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| UserStoreError::Backend(e.to_string()))?;

        row.map(Self::record_from_row).transpose()
    }

    async fn find_by_token(
        &self,
        token_auth: &TokenAuth,
    ) -> Result<Option<UserRecord>, UserStoreError> {
        let row = sqlx::query(
            r#"
            SELECT login, token_auth, superuser_access
            FROM users
            WHERE token_auth = $1
            "#,
        )
        .bind(token_auth.as_str())
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| UserStoreError::Backend(e.to_string()))?;

        row.map(Self::record_from_row).transpose()
    }
}
