//! Request-scoped adapters for the web delivery layer.
//!
//! One instance of each is created per request by the handlers and
//! discarded with the response.

pub mod cookies;
pub mod session;
pub mod transport;

pub use cookies::ResponseCookies;
pub use session::RotatingSessionId;
pub use transport::RequestTransport;
