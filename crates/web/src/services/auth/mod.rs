//! Authentication service.
//!
//! Validates credentials against the user store and reconstructs identities
//! for session resolution.

mod error;

pub use error::AuthError;

use sqlx::PgPool;

use quillpad_core::{UserId, Username};

use crate::db::RepositoryError;
use crate::db::users::UserRepository;
use crate::models::User;

/// Authentication service.
///
/// Handles user registration, login, and identity resolution.
pub struct AuthService<'a> {
    users: UserRepository<'a>,
}

impl<'a> AuthService<'a> {
    /// Create a new authentication service.
    #[must_use]
    pub const fn new(pool: &'a PgPool) -> Self {
        Self {
            users: UserRepository::new(pool),
        }
    }

    /// Register a new user with username and password.
    ///
    /// # Errors
    ///
    /// Returns `AuthError::InvalidUsername` if the username format is invalid.
    /// Returns `AuthError::UserAlreadyExists` if the username is taken.
    pub async fn register(&self, username: &str, password: &str) -> Result<User, AuthError> {
        let username = Username::parse(username)?;

        let user = self
            .users
            .create(&username, password)
            .await
            .map_err(|e| match e {
                RepositoryError::Conflict(_) => AuthError::UserAlreadyExists,
                other => AuthError::Repository(other),
            })?;

        Ok(user)
    }

    /// Authenticate with username and password.
    ///
    /// The password check is an exact byte-for-byte comparison against the
    /// stored value, performed in constant time.
    ///
    /// # Errors
    ///
    /// Returns `AuthError::InvalidCredentials` if the username is unknown or
    /// the password does not match.
    pub async fn authenticate(&self, username: &str, password: &str) -> Result<User, AuthError> {
        let username = Username::parse(username).map_err(|_| AuthError::InvalidCredentials)?;

        let user = self
            .users
            .get_by_username(&username)
            .await?
            .ok_or(AuthError::InvalidCredentials)?;

        if !constant_time_compare(password, &user.password) {
            return Err(AuthError::InvalidCredentials);
        }

        Ok(user)
    }

    /// Re-fetch a user by ID for session resolution.
    ///
    /// # Errors
    ///
    /// Returns `AuthError::UserNotFound` if the identity no longer exists.
    pub async fn resolve_user(&self, user_id: UserId) -> Result<User, AuthError> {
        self.users
            .get_by_id(user_id)
            .await?
            .ok_or(AuthError::UserNotFound)
    }
}

/// Constant-time string comparison to prevent timing attacks.
fn constant_time_compare(a: &str, b: &str) -> bool {
    if a.len() != b.len() {
        return false;
    }

    let mut diff = 0u8;
    for (x, y) in a.bytes().zip(b.bytes()) {
        diff |= x ^ y;
    }
    diff == 0
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_constant_time_compare_equal() {
        assert!(constant_time_compare("pw1", "pw1"));
        assert!(constant_time_compare("", ""));
    }

    #[test]
    fn test_constant_time_compare_unequal() {
        assert!(!constant_time_compare("pw1", "pw2"));
        assert!(!constant_time_compare("short", "longer"));
        assert!(!constant_time_compare("pw1", ""));
    }
}
