//! `SeaORM` implementation of the `ReportService` trait.

use async_trait::async_trait;

use crate::db::Store;
use crate::domain::ReviewStatus;
use crate::services::report_service::{
    RECENT_LOG_LIMIT, ReportError, ReportService, ReportSummary, ReviewCounts,
};

pub struct SeaOrmReportService {
    store: Store,
}

impl SeaOrmReportService {
    #[must_use]
    pub const fn new(store: Store) -> Self {
        Self { store }
    }
}

#[async_trait]
impl ReportService for SeaOrmReportService {
    async fn summary(&self) -> Result<ReportSummary, ReportError> {
        let (users, products, categories) = tokio::try_join!(
            self.store.user_count(),
            self.store.product_count(),
            self.store.category_count(),
        )?;

        let (total, pending, approved, rejected) = tokio::try_join!(
            self.store.review_count(),
            self.store.review_count_by_status(ReviewStatus::Pending),
            self.store.review_count_by_status(ReviewStatus::Approved),
            self.store.review_count_by_status(ReviewStatus::Rejected),
        )?;

        let last_logs = self.store.latest_logs(RECENT_LOG_LIMIT).await?;

        Ok(ReportSummary {
            users,
            products,
            categories,
            reviews: ReviewCounts {
                total,
                pending,
                approved,
                rejected,
            },
            last_logs,
        })
    }
}
