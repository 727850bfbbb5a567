//! Authentication module
//!
//! Password hashing, the credential-verification strategy, and the
//! session-cookie authorization gate.

mod middleware;
mod password;
mod strategy;

pub use middleware::{
    flash_redirect, session_cookie, AuthRedirect, CurrentUser, SessionToken, SESSION_COOKIE,
};
pub use password::PasswordService;
pub use strategy::AuthStrategy;
