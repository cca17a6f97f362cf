//! Read-only aggregate over the whole store for the admin dashboard.

use thiserror::Error;

use crate::db::AuditLogEntry;

/// How many audit entries the summary carries.
pub const RECENT_LOG_LIMIT: u64 = 10;

#[derive(Debug, Error)]
pub enum ReportError {
    #[error("Database error: {0}")]
    Database(String),

    #[error("Internal error: {0}")]
    Internal(String),
}

impl From<sea_orm::DbErr> for ReportError {
    fn from(err: sea_orm::DbErr) -> Self {
        Self::Database(err.to_string())
    }
}

impl From<anyhow::Error> for ReportError {
    fn from(err: anyhow::Error) -> Self {
        Self::Internal(err.to_string())
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ReviewCounts {
    pub total: u64,
    pub pending: u64,
    pub approved: u64,
    pub rejected: u64,
}

#[derive(Debug, Clone)]
pub struct ReportSummary {
    pub users: u64,
    pub products: u64,
    pub categories: u64,
    pub reviews: ReviewCounts,
    /// Newest first
    pub last_logs: Vec<AuditLogEntry>,
}

#[async_trait::async_trait]
pub trait ReportService: Send + Sync {
    async fn summary(&self) -> Result<ReportSummary, ReportError>;
}
