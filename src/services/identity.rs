//! Turns validated token claims into a typed [`Identity`].

use thiserror::Error;

use crate::domain::{Identity, Role};
use crate::services::token::Claims;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum IdentityError {
    #[error("Subject claim is not a numeric user id: {0}")]
    MalformedSubject(String),

    #[error("Unknown role claim: {0}")]
    UnknownRole(String),
}

/// Resolves the caller from `sub` (or `nameid`) and `role`.
///
/// Returns `Ok(None)` when the token names no subject. A subject that is not
/// a number is an error for the whole request. A missing role resolves to
/// [`Role::User`].
pub fn resolve_identity(claims: &Claims) -> Result<Option<Identity>, IdentityError> {
    let Some(subject) = claims.sub.as_deref().or(claims.nameid.as_deref()) else {
        return Ok(None);
    };

    let user_id = subject
        .trim()
        .parse::<i32>()
        .map_err(|_| IdentityError::MalformedSubject(subject.to_string()))?;

    let role = match claims.role.as_deref() {
        None => Role::User,
        Some(raw) => raw
            .parse::<Role>()
            .map_err(|_| IdentityError::UnknownRole(raw.to_string()))?,
    };

    Ok(Some(Identity::new(user_id, role)))
}
