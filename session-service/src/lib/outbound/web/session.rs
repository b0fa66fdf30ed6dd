use std::sync::Mutex;

use async_trait::async_trait;
use uuid::Uuid;

use crate::auth::ports::SessionManager;

/// Name of the cookie carrying the rotated session identifier.
pub const SESSION_ID_COOKIE_NAME: &str = "sl_sessid";

/// Session-id manager for a single request.
///
/// Regeneration replaces whatever id the request arrived with; the
/// handler reads the fresh id back and emits it as the session cookie.
pub struct RotatingSessionId {
    current: Mutex<Option<String>>,
}

impl RotatingSessionId {
    pub fn new() -> Self {
        Self {
            current: Mutex::new(None),
        }
    }

    /// The id produced by the last regeneration, if any.
    pub fn current(&self) -> Option<String> {
        self.current
            .lock()
            .unwrap_or_else(|e| e.into_inner())
            .clone()
    }
}

impl Default for RotatingSessionId {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl SessionManager for RotatingSessionId {
    async fn regenerate_id(&self) {
        let fresh = Uuid::new_v4().simple().to_string();
        *self.current.lock().unwrap_or_else(|e| e.into_inner()) = Some(fresh);
    }
}
