use axum::http::HeaderMap;

use crate::auth::ports::Transport;

/// Transport properties captured from the incoming request.
pub struct RequestTransport {
    secure: bool,
}

impl RequestTransport {
    pub fn new(secure: bool) -> Self {
        Self { secure }
    }

    /// Derive transport security from proxy headers.
    ///
    /// The service normally sits behind a TLS-terminating proxy, so
    /// `x-forwarded-proto` is what decides whether the auth cookie is
    /// marked Secure.
    pub fn from_headers(headers: &HeaderMap) -> Self {
        let secure = headers
            .get("x-forwarded-proto")
            .and_then(|v| v.to_str().ok())
            .map(|proto| proto.eq_ignore_ascii_case("https"))
            .unwrap_or(false);

        Self { secure }
    }
}

impl Transport for RequestTransport {
    fn is_secure_connection(&self) -> bool {
        self.secure
    }
}
