//! `SeaORM` implementation of the `AuthService` trait.

use std::sync::Arc;

use async_trait::async_trait;
use tracing::info;

use crate::config::{BootstrapConfig, SecurityConfig};
use crate::db::{NewUser, Store, User};
use crate::domain::Role;
use crate::services::auth_service::{
    AdminProvisioning, AuthError, AuthService, LoginResult, RegisterRequest,
};
use crate::services::input;
use crate::services::logs::{AuditAction, LogService};
use crate::services::token::TokenService;

pub struct SeaOrmAuthService {
    store: Store,
    tokens: Arc<TokenService>,
    audit: Arc<LogService>,
    security: SecurityConfig,
}

impl SeaOrmAuthService {
    #[must_use]
    pub const fn new(
        store: Store,
        tokens: Arc<TokenService>,
        audit: Arc<LogService>,
        security: SecurityConfig,
    ) -> Self {
        Self {
            store,
            tokens,
            audit,
            security,
        }
    }

    fn check_password(&self, password: &str) -> Result<(), AuthError> {
        let len = password.chars().count();
        if password.trim().is_empty() || len < self.security.min_password_length {
            return Err(AuthError::PasswordTooShort(self.security.min_password_length));
        }
        if len > self.security.max_password_length {
            return Err(AuthError::PasswordTooLong(self.security.max_password_length));
        }
        Ok(())
    }

    async fn insert_user(
        &self,
        email: &str,
        username: &str,
        password: &str,
        role: Role,
    ) -> Result<User, AuthError> {
        let user = self
            .store
            .create_user(
                NewUser {
                    email,
                    username,
                    password,
                    role,
                },
                &self.security,
            )
            .await?;
        Ok(user)
    }
}

#[async_trait]
impl AuthService for SeaOrmAuthService {
    async fn register(&self, request: RegisterRequest) -> Result<User, AuthError> {
        let email = input::email(&request.email).map_err(|_| AuthError::InvalidEmail)?;
        self.check_password(&request.password)?;
        let username =
            input::required_text("Username", &request.username, input::MAX_USERNAME_LEN)
                .map_err(AuthError::Validation)?;

        if self.store.email_exists(email).await? {
            return Err(AuthError::EmailInUse);
        }

        let user = self
            .insert_user(email, &username, &request.password, Role::User)
            .await?;

        info!(user_id = user.id, "Registered new user");
        self.audit
            .record(
                Some(user.id),
                AuditAction::Register,
                &format!("Email={}", user.email),
            )
            .await;

        Ok(user)
    }

    async fn login(&self, email: &str, password: &str) -> Result<LoginResult, AuthError> {
        let email = email.trim();
        let Some(user) = self
            .store
            .verify_credentials(email, password, &self.security)
            .await?
        else {
            self.audit
                .record(
                    None,
                    AuditAction::LoginFailed,
                    &format!("Email={email}; Error={}", AuthError::InvalidCredentials),
                )
                .await;
            return Err(AuthError::InvalidCredentials);
        };

        let issued = self.tokens.issue(&user)?;

        self.audit
            .record(
                Some(user.id),
                AuditAction::LoginSuccess,
                &format!("Email={email}"),
            )
            .await;

        Ok(LoginResult {
            token: issued.token,
            expires_at: issued.expires_at,
            user_id: user.id,
            role: user.role,
        })
    }

    async fn ensure_bootstrap_admin(&self, bootstrap: &BootstrapConfig) -> Result<bool, AuthError> {
        if !bootstrap.enabled || self.store.has_admin().await? {
            return Ok(false);
        }

        let outcome = self
            .create_admin(
                &bootstrap.admin_email,
                &bootstrap.admin_username,
                &bootstrap.admin_password,
            )
            .await?;

        tracing::warn!(
            email = %bootstrap.admin_email,
            "No administrator found, provisioned one from the bootstrap config. Change its password."
        );

        Ok(outcome == AdminProvisioning::Created)
    }

    async fn create_admin(
        &self,
        email: &str,
        username: &str,
        password: &str,
    ) -> Result<AdminProvisioning, AuthError> {
        let email = input::email(email).map_err(|_| AuthError::InvalidEmail)?;

        if let Some(existing) = self.store.get_user_by_email(email).await? {
            if existing.role == Role::Admin {
                return Ok(AdminProvisioning::AlreadyAdmin);
            }
            self.store.set_user_role(existing.id, Role::Admin).await?;
            info!(user_id = existing.id, "Promoted user to administrator");
            return Ok(AdminProvisioning::Promoted);
        }

        self.check_password(password)?;
        let username = input::required_text("Username", username, input::MAX_USERNAME_LEN)
            .map_err(AuthError::Validation)?;

        let user = self
            .insert_user(email, &username, password, Role::Admin)
            .await?;
        info!(user_id = user.id, "Created administrator");

        Ok(AdminProvisioning::Created)
    }
}
