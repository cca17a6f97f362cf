//! Domain service for accounts and credentials.
//!
//! Handles registration, login (token issuance) and administrator provisioning.

use thiserror::Error;

use crate::config::BootstrapConfig;
use crate::db::User;
use crate::domain::Role;

/// Errors specific to authentication operations.
#[derive(Debug, Error)]
pub enum AuthError {
    #[error("Invalid email.")]
    InvalidEmail,

    #[error("Password too short (min {0}).")]
    PasswordTooShort(usize),

    #[error("Password too long (max {0}).")]
    PasswordTooLong(usize),

    #[error("{0}")]
    Validation(String),

    #[error("Email already in use.")]
    EmailInUse,

    #[error("Invalid credentials.")]
    InvalidCredentials,

    #[error("Database error: {0}")]
    Database(String),

    #[error("Internal error: {0}")]
    Internal(String),
}

impl From<sea_orm::DbErr> for AuthError {
    fn from(err: sea_orm::DbErr) -> Self {
        Self::Database(err.to_string())
    }
}

impl From<anyhow::Error> for AuthError {
    fn from(err: anyhow::Error) -> Self {
        Self::Internal(err.to_string())
    }
}

impl From<crate::services::token::TokenError> for AuthError {
    fn from(err: crate::services::token::TokenError) -> Self {
        Self::Internal(err.to_string())
    }
}

#[derive(Debug, Clone)]
pub struct RegisterRequest {
    pub email: String,
    pub password: String,
    pub username: String,
}

/// Successful login: the signed token plus who it was issued to.
#[derive(Debug, Clone)]
pub struct LoginResult {
    pub token: String,
    pub expires_at: i64,
    pub user_id: i32,
    pub role: Role,
}

/// What `create_admin` ended up doing.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AdminProvisioning {
    Created,
    Promoted,
    AlreadyAdmin,
}

/// Domain service trait for authentication.
#[async_trait::async_trait]
pub trait AuthService: Send + Sync {
    /// Creates a `User` account.
    ///
    /// # Errors
    ///
    /// Returns [`AuthError::InvalidEmail`], [`AuthError::PasswordTooShort`] or
    /// [`AuthError::EmailInUse`] when the request is rejected.
    async fn register(&self, request: RegisterRequest) -> Result<User, AuthError>;

    /// Verifies credentials and issues a token.
    ///
    /// # Errors
    ///
    /// Returns [`AuthError::InvalidCredentials`] for an unknown email or a wrong password.
    async fn login(&self, email: &str, password: &str) -> Result<LoginResult, AuthError>;

    /// Creates the configured administrator when the store has none.
    /// Returns `true` when an account was created.
    async fn ensure_bootstrap_admin(&self, bootstrap: &BootstrapConfig) -> Result<bool, AuthError>;

    /// Creates an administrator, or promotes the existing account with that email.
    async fn create_admin(
        &self,
        email: &str,
        username: &str,
        password: &str,
    ) -> Result<AdminProvisioning, AuthError>;
}
