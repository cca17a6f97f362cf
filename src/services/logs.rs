use crate::db::Store;
use std::fmt;
use tracing::warn;

/// Action tags written to the audit log.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AuditAction {
    Register,
    LoginSuccess,
    LoginFailed,
    CreateCategory,
    UpdateCategory,
    DeleteCategory,
    CreateProduct,
    UpdateProduct,
    DeleteProduct,
    AddReview,
    ApproveReview,
    RejectReview,
    DeleteReview,
}

impl AuditAction {
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Register => "Register",
            Self::LoginSuccess => "LoginSuccess",
            Self::LoginFailed => "LoginFailed",
            Self::CreateCategory => "CreateCategory",
            Self::UpdateCategory => "UpdateCategory",
            Self::DeleteCategory => "DeleteCategory",
            Self::CreateProduct => "CreateProduct",
            Self::UpdateProduct => "UpdateProduct",
            Self::DeleteProduct => "DeleteProduct",
            Self::AddReview => "AddReview",
            Self::ApproveReview => "ApproveReview",
            Self::RejectReview => "RejectReview",
            Self::DeleteReview => "DeleteReview",
        }
    }
}

impl fmt::Display for AuditAction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Appends audit records. Writes are best-effort: they run after the
/// primary mutation and a failure is only reported to the tracing log.
pub struct LogService {
    store: Store,
}

impl LogService {
    #[must_use]
    pub const fn new(store: Store) -> Self {
        Self { store }
    }

    pub async fn record(&self, actor: Option<i32>, action: AuditAction, details: &str) {
        if let Err(e) = self.store.add_log(actor, action.as_str(), details).await {
            warn!(error = %e, action = %action, "Failed to write audit log");
        }
    }
}
