use std::sync::Mutex;

use async_trait::async_trait;
use cookie::time::Duration;
use cookie::Cookie;

use crate::auth::errors::CookieStoreError;
use crate::auth::models::CookieSettings;
use crate::auth::models::SessionCookie;
use crate::auth::ports::CookieStore;

/// Cookie store buffering `Set-Cookie` values for the current response.
///
/// The domain service saves or deletes cookies through the port; the
/// handler drains the buffered header values into whatever response it
/// ends up producing, success or failure.
pub struct ResponseCookies {
    buffered: Mutex<Vec<String>>,
}

impl ResponseCookies {
    pub fn new() -> Self {
        Self {
            buffered: Mutex::new(Vec::new()),
        }
    }

    /// Drain the buffered `Set-Cookie` header values.
    pub fn take_headers(&self) -> Vec<String> {
        let mut buffered = self.buffered.lock().unwrap_or_else(|e| e.into_inner());
        std::mem::take(&mut *buffered)
    }

    fn push(&self, header: String) {
        self.buffered
            .lock()
            .unwrap_or_else(|e| e.into_inner())
            .push(header);
    }
}

impl Default for ResponseCookies {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl CookieStore for ResponseCookies {
    async fn save(&self, session_cookie: &SessionCookie) -> Result<(), CookieStoreError> {
        let mut builder = Cookie::build((
            session_cookie.name.clone(),
            session_cookie.encoded_value(),
        ))
        .path(session_cookie.path.clone())
        .http_only(session_cookie.http_only)
        .secure(session_cookie.secure);

        if let Some(max_age) = session_cookie.max_age_seconds {
            builder = builder.max_age(Duration::seconds(max_age as i64));
        }

        self.push(builder.build().to_string());
        Ok(())
    }

    async fn delete(&self, settings: &CookieSettings) -> Result<(), CookieStoreError> {
        let removal = Cookie::build((settings.name.clone(), String::new()))
            .path(settings.path.clone())
            .http_only(true)
            .max_age(Duration::ZERO)
            .build();

        self.push(removal.to_string());
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::auth::models::Login;
    use crate::auth::models::TokenAuth;

    fn settings() -> CookieSettings {
        CookieSettings {
            name: "sl_auth".to_string(),
            path: "/".to_string(),
            expiry_seconds: 3600,
        }
    }

    #[tokio::test]
    async fn test_save_buffers_header() {
        let cookies = ResponseCookies::new();
        let session_cookie = SessionCookie::issue(
            &settings(),
            Login::new("alice".to_string()).unwrap(),
            &TokenAuth::new("T1"),
            true,
            true,
        );

        cookies.save(&session_cookie).await.unwrap();

        let headers = cookies.take_headers();
        assert_eq!(headers.len(), 1);
        assert!(headers[0].starts_with("sl_auth=alice:"));
        assert!(headers[0].contains("HttpOnly"));
        assert!(headers[0].contains("Secure"));
        assert!(headers[0].contains("Max-Age=3600"));
        // Raw token never appears in the header
        assert!(!headers[0].contains("T1"));
    }

    #[tokio::test]
    async fn test_session_cookie_has_no_max_age() {
        let cookies = ResponseCookies::new();
        let session_cookie = SessionCookie::issue(
            &settings(),
            Login::new("alice".to_string()).unwrap(),
            &TokenAuth::new("T1"),
            false,
            false,
        );

        cookies.save(&session_cookie).await.unwrap();

        let headers = cookies.take_headers();
        assert!(!headers[0].contains("Max-Age"));
        assert!(!headers[0].contains("Secure"));
    }

    #[tokio::test]
    async fn test_delete_emits_removal() {
        let cookies = ResponseCookies::new();

        cookies.delete(&settings()).await.unwrap();

        let headers = cookies.take_headers();
        assert_eq!(headers.len(), 1);
        assert!(headers[0].starts_with("sl_auth="));
        assert!(headers[0].contains("Max-Age=0"));
    }

    #[tokio::test]
    async fn test_take_headers_drains() {
        let cookies = ResponseCookies::new();
        cookies.delete(&settings()).await.unwrap();

        assert_eq!(cookies.take_headers().len(), 1);
        assert!(cookies.take_headers().is_empty());
    }
}
