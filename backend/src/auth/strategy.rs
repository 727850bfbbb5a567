//! Authentication strategies
//!
//! A strategy turns submitted credentials into a verified identity or a
//! failure. Only local password verification exists today; the enum keeps
//! the set closed and compile-checked.

use crate::auth::PasswordService;
use crate::error::AuthError;
use crate::repositories::{UserRecord, UserRepository};
use sqlx::PgPool;

/// Credential verification strategy
#[derive(Debug, Clone, Copy, Default)]
pub enum AuthStrategy {
    /// Email + password against the local credential store
    #[default]
    LocalPassword,
}

impl AuthStrategy {
    /// Verify credentials and resolve the identity.
    ///
    /// An unknown email and a wrong password are indistinguishable to the
    /// caller; both yield `InvalidCredentials`.
    pub async fn authenticate(
        &self,
        pool: &PgPool,
        email: &str,
        password: &str,
    ) -> Result<UserRecord, AuthError> {
        match self {
            Self::LocalPassword => {
                let Some(user) = UserRepository::find_by_email(pool, email).await? else {
                    return Err(AuthError::InvalidCredentials);
                };

                let valid = PasswordService::verify_async(
                    password.to_string(),
                    user.password_hash.clone(),
                )
                .await?;

                if !valid {
                    return Err(AuthError::InvalidCredentials);
                }

                Ok(user)
            }
        }
    }
}

#[cfg(test)]
mod tests {
    // Authentication against real records is covered by the integration
    // tests in backend/tests, which require a database.
}
