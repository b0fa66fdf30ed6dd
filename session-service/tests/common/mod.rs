use std::sync::Arc;
use std::sync::Mutex;

use async_trait::async_trait;
use session_service::auth::errors::CredentialError;
use session_service::auth::errors::PasswordResetError;
use session_service::auth::errors::UserStoreError;
use session_service::auth::models::CookieSettings;
use session_service::auth::models::Login;
use session_service::auth::models::TokenAuth;
use session_service::auth::models::UserRecord;
use session_service::auth::ports::CredentialService;
use session_service::auth::ports::PasswordResetStore;
use session_service::auth::ports::UserStore;
use session_service::inbound::http::router::create_router;

/// Seeded account for a test run.
pub struct TestUser {
    pub login: String,
    pub password: String,
    pub token_auth: String,
    pub superuser_access: bool,
}

impl TestUser {
    pub fn new(login: &str, password: &str, token_auth: &str) -> Self {
        Self {
            login: login.to_string(),
            password: password.to_string(),
            token_auth: token_auth.to_string(),
            superuser_access: false,
        }
    }

    pub fn superuser(mut self) -> Self {
        self.superuser_access = true;
        self
    }
}

/// In-memory stand-in for the user store, credential service, and
/// password-reset store, so the full router can run without Postgres.
pub struct InMemoryDirectory {
    users: Vec<TestUser>,
    cleared_resets: Mutex<Vec<String>>,
}

impl InMemoryDirectory {
    pub fn new(users: Vec<TestUser>) -> Self {
        Self {
            users,
            cleared_resets: Mutex::new(Vec::new()),
        }
    }

    fn find(&self, login: &str) -> Option<&TestUser> {
        self.users.iter().find(|u| u.login == login)
    }

    fn record(user: &TestUser) -> UserRecord {
        UserRecord {
            login: Login::new(user.login.clone()).expect("test login must be valid"),
            token_auth: TokenAuth::new(user.token_auth.clone()),
            superuser_access: user.superuser_access,
        }
    }

    /// Logins whose pending reset requests were cleared.
    pub fn cleared_resets(&self) -> Vec<String> {
        self.cleared_resets.lock().unwrap().clone()
    }
}

#[async_trait]
impl UserStore for InMemoryDirectory {
    async fn find_by_login(&self, login: &Login) -> Result<Option<UserRecord>, UserStoreError> {
        Ok(self.find(login.as_str()).map(Self::record))
    }

    async fn find_by_token(
        &self,
        token_auth: &TokenAuth,
    ) -> Result<Option<UserRecord>, UserStoreError> {
        Ok(self
            .users
            .iter()
            .find(|u| u.token_auth == token_auth.as_str())
            .map(Self::record))
    }
}

#[async_trait]
impl CredentialService for InMemoryDirectory {
    async fn exchange_credential(
        &self,
        login: &Login,
        password: &str,
    ) -> Result<TokenAuth, CredentialError> {
        let user = self
            .find(login.as_str())
            .ok_or_else(|| CredentialError::UnknownLogin(login.to_string()))?;

        if user.password != password {
            return Err(CredentialError::PasswordMismatch);
        }

        Ok(TokenAuth::new(user.token_auth.clone()))
    }
}

#[async_trait]
impl PasswordResetStore for InMemoryDirectory {
    async fn clear_reset_request(&self, login: &Login) -> Result<(), PasswordResetError> {
        self.cleared_resets
            .lock()
            .unwrap()
            .push(login.to_string());
        Ok(())
    }
}

/// Test application that spawns the real router on a random port.
pub struct TestApp {
    pub address: String,
    pub api_client: reqwest::Client,
    pub directory: Arc<InMemoryDirectory>,
}

impl TestApp {
    pub async fn spawn(users: Vec<TestUser>) -> Self {
        let directory = Arc::new(InMemoryDirectory::new(users));

        let listener = tokio::net::TcpListener::bind("127.0.0.1:0")
            .await
            .expect("Failed to bind random port");
        let port = listener.local_addr().unwrap().port();
        let address = format!("http://127.0.0.1:{}", port);

        let router = create_router(
            directory.clone(),
            directory.clone(),
            directory.clone(),
            CookieSettings {
                name: "sl_auth".to_string(),
                path: "/".to_string(),
                expiry_seconds: 1_209_600,
            },
        );

        tokio::spawn(async move {
            axum::serve(listener, router).await.expect("Server error");
        });

        Self {
            address,
            api_client: reqwest::Client::builder()
                .cookie_store(true)
                .build()
                .expect("Failed to create reqwest client"),
            directory,
        }
    }

    pub fn get(&self, path: &str) -> reqwest::RequestBuilder {
        self.api_client.get(format!("{}{}", self.address, path))
    }

    pub fn post(&self, path: &str) -> reqwest::RequestBuilder {
        self.api_client.post(format!("{}{}", self.address, path))
    }
}
