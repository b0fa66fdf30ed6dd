pub mod password_reset;
pub mod user;

pub use password_reset::PgPasswordResetStore;
pub use user::PgUserStore;
