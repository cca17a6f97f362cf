use anyhow::{Context, Result};
use argon2::{
    Algorithm, Argon2, Params, Version,
    password_hash::{PasswordHash, PasswordHasher, PasswordVerifier, SaltString, rand_core::OsRng},
};
use sea_orm::{
    ActiveModelTrait, ColumnTrait, DatabaseConnection, EntityTrait, PaginatorTrait, QueryFilter,
    Set,
};
use std::sync::OnceLock;
use tokio::task;
use uuid::Uuid;

use crate::config::SecurityConfig;
use crate::domain::{Role, utc_timestamp};
use crate::entities::users;

/// User data returned from repository (without sensitive password hash)
#[derive(Debug, Clone)]
pub struct User {
    pub id: i32,
    pub email: String,
    pub username: String,
    pub role: Role,
    pub created_at: String,
}

impl From<users::Model> for User {
    fn from(model: users::Model) -> Self {
        Self {
            id: model.id,
            email: model.email,
            username: model.username,
            role: model.role,
            created_at: model.created_at,
        }
    }
}

/// Fields needed to create an account. The password is hashed before storage.
pub struct NewUser<'a> {
    pub email: &'a str,
    pub username: &'a str,
    pub password: &'a str,
    pub role: Role,
}

pub struct UserRepository {
    conn: DatabaseConnection,
}

impl UserRepository {
    #[must_use]
    pub const fn new(conn: DatabaseConnection) -> Self {
        Self { conn }
    }

    /// Get user by email (exact match)
    pub async fn get_by_email(&self, email: &str) -> Result<Option<User>> {
        let user = users::Entity::find()
            .filter(users::Column::Email.eq(email))
            .one(&self.conn)
            .await
            .context("Failed to query user by email")?;

        Ok(user.map(User::from))
    }

    pub async fn email_exists(&self, email: &str) -> Result<bool> {
        let count = users::Entity::find()
            .filter(users::Column::Email.eq(email))
            .count(&self.conn)
            .await
            .context("Failed to check email uniqueness")?;

        Ok(count > 0)
    }

    pub async fn has_admin(&self) -> Result<bool> {
        let count = users::Entity::find()
            .filter(users::Column::Role.eq(Role::Admin))
            .count(&self.conn)
            .await
            .context("Failed to count administrators")?;

        Ok(count > 0)
    }

    pub async fn count(&self) -> Result<u64> {
        users::Entity::find()
            .count(&self.conn)
            .await
            .context("Failed to count users")
    }

    /// Create a user, hashing the password with the configured Argon2 params.
    pub async fn create(&self, new_user: NewUser<'_>, config: &SecurityConfig) -> Result<User> {
        let password = new_user.password.to_string();
        let config = config.clone();
        let password_hash = task::spawn_blocking(move || hash_password(&password, &config))
            .await
            .context("Password hashing task panicked")??;

        let active = users::ActiveModel {
            email: Set(new_user.email.to_string()),
            username: Set(new_user.username.to_string()),
            password_hash: Set(password_hash),
            role: Set(new_user.role),
            created_at: Set(utc_timestamp()),
            ..Default::default()
        };

        let model = active
            .insert(&self.conn)
            .await
            .context("Failed to insert user")?;

        Ok(User::from(model))
    }

    /// Look up a user by email and check the password.
    ///
    /// Returns `None` for an unknown email and for a wrong password alike.
    /// An unknown email is still checked against a throwaway hash so both
    /// cases cost one Argon2 verification. That work runs on the blocking
    /// pool since it is CPU-bound.
    pub async fn verify_credentials(
        &self,
        email: &str,
        password: &str,
        config: &SecurityConfig,
    ) -> Result<Option<User>> {
        let user = users::Entity::find()
            .filter(users::Column::Email.eq(email))
            .one(&self.conn)
            .await
            .context("Failed to query user for password verification")?;

        let password_hash = match &user {
            Some(user) => user.password_hash.clone(),
            None => dummy_hash(config)?.to_string(),
        };
        let password = password.to_string();

        let is_valid = task::spawn_blocking(move || verify_password(&password_hash, &password))
            .await
            .context("Password verification task panicked")??;

        Ok(user.filter(|_| is_valid).map(User::from))
    }

    pub async fn set_role(&self, id: i32, role: Role) -> Result<User> {
        let user = users::Entity::find_by_id(id)
            .one(&self.conn)
            .await
            .context("Failed to query user for role change")?
            .ok_or_else(|| anyhow::anyhow!("User not found: {id}"))?;

        let mut active: users::ActiveModel = user.into();
        active.role = Set(role);
        let model = active.update(&self.conn).await?;

        Ok(User::from(model))
    }
}

/// Hash a password using Argon2id with the configured cost parameters.
pub fn hash_password(password: &str, config: &SecurityConfig) -> Result<String> {
    let salt = SaltString::generate(&mut OsRng);

    let params = Params::new(
        config.argon2_memory_cost_kib,
        config.argon2_time_cost,
        config.argon2_parallelism,
        None, // output length (use default)
    )
    .map_err(|e| anyhow::anyhow!("Invalid Argon2 params: {e}"))?;
    let argon2 = Argon2::new(Algorithm::Argon2id, Version::V0x13, params);

    let hash = argon2
        .hash_password(password.as_bytes(), &salt)
        .map_err(|e| anyhow::anyhow!("Failed to hash password: {e}"))?;

    Ok(hash.to_string())
}

/// Check a password against a stored PHC hash string.
pub fn verify_password(password_hash: &str, password: &str) -> Result<bool> {
    let parsed_hash = PasswordHash::new(password_hash)
        .map_err(|e| anyhow::anyhow!("Invalid password hash format: {e}"))?;

    Ok(Argon2::default()
        .verify_password(password.as_bytes(), &parsed_hash)
        .is_ok())
}

/// Hash verified for unknown emails. Built once with the configured cost so
/// it takes as long to check as a real account's hash.
fn dummy_hash(config: &SecurityConfig) -> Result<&'static str> {
    static DUMMY_HASH: OnceLock<String> = OnceLock::new();

    if let Some(hash) = DUMMY_HASH.get() {
        return Ok(hash);
    }
    let hash = hash_password(&Uuid::new_v4().to_string(), config)?;
    Ok(DUMMY_HASH.get_or_init(|| hash))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn cheap_config() -> SecurityConfig {
        SecurityConfig {
            argon2_memory_cost_kib: 1024,
            argon2_time_cost: 1,
            ..SecurityConfig::default()
        }
    }

    #[test]
    fn test_hash_is_salted_and_verifiable() {
        let config = cheap_config();
        let first = hash_password("secret1", &config).unwrap();
        let second = hash_password("secret1", &config).unwrap();

        assert_ne!(first, second);
        assert!(first.starts_with("$argon2id$"));

        assert!(verify_password(&first, "secret1").unwrap());
        assert!(!verify_password(&first, "secret2").unwrap());
        assert!(verify_password("not-a-hash", "secret1").is_err());
    }

    #[test]
    fn test_dummy_hash_is_reused_and_never_matches() {
        let config = cheap_config();
        let first = dummy_hash(&config).unwrap();
        let second = dummy_hash(&config).unwrap();

        assert_eq!(first, second);
        assert!(first.starts_with("$argon2id$"));
        assert!(!verify_password(first, "").unwrap());
        assert!(!verify_password(first, "secret1").unwrap());
    }
}
