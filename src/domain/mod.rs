//! Domain primitives shared by services, repositories and the HTTP layer.
//!
//! Roles and review states are stored as string enums so the database keeps
//! the same spelling the API exposes (`User`, `Admin`, `Pending`, ...).

use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Role carried by every account and embedded in issued tokens.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, EnumIter, DeriveActiveEnum,
)]
#[sea_orm(rs_type = "String", db_type = "String(StringLen::N(16))")]
pub enum Role {
    #[sea_orm(string_value = "User")]
    User,
    #[sea_orm(string_value = "Admin")]
    Admin,
}

impl Role {
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::User => "User",
            Self::Admin => "Admin",
        }
    }
}

impl fmt::Display for Role {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Role {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "User" => Ok(Self::User),
            "Admin" => Ok(Self::Admin),
            other => Err(format!("Unknown role: {other}")),
        }
    }
}

/// Lifecycle state of a review.
///
/// Every review starts as [`ReviewStatus::Pending`]. An administrator moves it
/// to one of the two terminal states; only approved reviews are public.
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    Hash,
    Default,
    Serialize,
    Deserialize,
    EnumIter,
    DeriveActiveEnum,
)]
#[sea_orm(rs_type = "String", db_type = "String(StringLen::N(16))")]
pub enum ReviewStatus {
    #[default]
    #[sea_orm(string_value = "Pending")]
    Pending,
    #[sea_orm(string_value = "Approved")]
    Approved,
    #[sea_orm(string_value = "Rejected")]
    Rejected,
}

/// Error returned when a moderation decision is not a legal transition.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct InvalidTransition {
    pub from: ReviewStatus,
    pub to: ReviewStatus,
}

impl fmt::Display for InvalidTransition {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Cannot move a review from {} to {}", self.from, self.to)
    }
}

impl std::error::Error for InvalidTransition {}

impl ReviewStatus {
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Pending => "Pending",
            Self::Approved => "Approved",
            Self::Rejected => "Rejected",
        }
    }

    /// Applies a moderation decision.
    ///
    /// `Pending` may go to either terminal state. Re-applying the current
    /// state is accepted so repeated approvals stay harmless. Nothing ever
    /// returns to `Pending`, and the two terminal states do not swap.
    pub fn transition(self, to: Self) -> Result<Self, InvalidTransition> {
        match (self, to) {
            (from, to) if from == to => Ok(to),
            (Self::Pending, Self::Approved | Self::Rejected) => Ok(to),
            (from, to) => Err(InvalidTransition { from, to }),
        }
    }

    /// Only pending reviews can be withdrawn by their author.
    #[must_use]
    pub const fn is_deletable(self) -> bool {
        matches!(self, Self::Pending)
    }
}

impl fmt::Display for ReviewStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Caller identity resolved once per request from validated token claims.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Identity {
    pub user_id: i32,
    pub role: Role,
}

impl Identity {
    #[must_use]
    pub const fn new(user_id: i32, role: Role) -> Self {
        Self { user_id, role }
    }
}

/// Current UTC time in the fixed-width RFC 3339 form used for every stored
/// timestamp, so lexical order in the database equals chronological order.
#[must_use]
pub fn utc_timestamp() -> String {
    chrono::Utc::now().to_rfc3339_opts(chrono::SecondsFormat::Micros, true)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_pending_moves_to_terminal_states() {
        assert_eq!(
            ReviewStatus::Pending.transition(ReviewStatus::Approved),
            Ok(ReviewStatus::Approved)
        );
        assert_eq!(
            ReviewStatus::Pending.transition(ReviewStatus::Rejected),
            Ok(ReviewStatus::Rejected)
        );
    }

    #[test]
    fn test_reapplying_status_is_idempotent() {
        assert_eq!(
            ReviewStatus::Approved.transition(ReviewStatus::Approved),
            Ok(ReviewStatus::Approved)
        );
        assert_eq!(
            ReviewStatus::Rejected.transition(ReviewStatus::Rejected),
            Ok(ReviewStatus::Rejected)
        );
    }

    #[test]
    fn test_terminal_states_do_not_swap_or_reopen() {
        assert!(ReviewStatus::Approved.transition(ReviewStatus::Rejected).is_err());
        assert!(ReviewStatus::Rejected.transition(ReviewStatus::Approved).is_err());
        assert!(ReviewStatus::Approved.transition(ReviewStatus::Pending).is_err());
    }

    #[test]
    fn test_only_pending_is_deletable() {
        assert!(ReviewStatus::Pending.is_deletable());
        assert!(!ReviewStatus::Approved.is_deletable());
        assert!(!ReviewStatus::Rejected.is_deletable());
    }

    #[test]
    fn test_role_parsing() {
        assert_eq!("Admin".parse::<Role>(), Ok(Role::Admin));
        assert_eq!("User".parse::<Role>(), Ok(Role::User));
        assert!("admin".parse::<Role>().is_err());
    }

    #[test]
    fn test_timestamps_are_fixed_width() {
        let a = utc_timestamp();
        let b = utc_timestamp();
        assert_eq!(a.len(), b.len());
        assert!(a.ends_with('Z'));
        assert!(a <= b);
    }
}
