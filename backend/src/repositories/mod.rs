//! Data access layer
//!
//! Repositories own the SQL for their tables and return plain records.

mod user;

pub use user::{CreateUserOutcome, UserRecord, UserRepository};
