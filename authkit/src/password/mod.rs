//! Password hashing and verification.

mod errors;
mod hasher;

pub use errors::PasswordError;
pub use hasher::PasswordHasher;
