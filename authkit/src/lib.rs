//! Credential primitives library
//!
//! Reusable building blocks for the session-authentication service:
//! - Password hashing (Argon2id)
//! - Deterministic session-token hashing (SHA-256)
//!
//! The service crate defines its own ports and adapts these primitives;
//! nothing in here knows about users, cookies, or storage.
//!
//! # Examples
//!
//! ## Password Hashing
//! ```
//! use authkit::PasswordHasher;
//!
//! let hasher = PasswordHasher::new();
//! let hash = hasher.hash("my_password").unwrap();
//! assert!(hasher.verify("my_password", &hash).unwrap());
//! ```
//!
//! ## Session-Token Hashing
//! ```
//! use authkit::session_token_hash;
//!
//! let bound = session_token_hash("alice", "2fd44e...");
//! // Same inputs always produce the same digest.
//! assert_eq!(bound, session_token_hash("alice", "2fd44e..."));
//! ```

pub mod password;
pub mod token;

// Re-export commonly used items
pub use password::PasswordError;
pub use password::PasswordHasher;
pub use token::session_token_hash;
