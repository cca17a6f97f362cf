//! The one place that decides whether a caller may use an endpoint.

use super::ApiError;
use crate::domain::{Identity, Role};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Policy {
    /// Any caller with a resolved identity
    Authenticated,
    /// Callers holding exactly this role
    Role(Role),
}

/// No identity is a 401. An identity with the wrong role is a 403.
pub fn authorize(identity: Option<&Identity>, policy: Policy) -> Result<Identity, ApiError> {
    let Some(identity) = identity else {
        return Err(ApiError::unauthorized("Authentication required"));
    };

    match policy {
        Policy::Authenticated => Ok(*identity),
        Policy::Role(required) if identity.role == required => Ok(*identity),
        Policy::Role(required) => Err(ApiError::forbidden(format!(
            "This action requires the {required} role"
        ))),
    }
}
