//! `SeaORM` implementation of the `ReviewService` trait.

use std::sync::Arc;

use async_trait::async_trait;
use tracing::{debug, info};

use crate::db::{NewReview, OwnReviewRow, Store};
use crate::domain::{Identity, InvalidTransition, ReviewStatus};
use crate::entities::reviews;
use crate::services::input;
use crate::services::logs::{AuditAction, LogService};
use crate::services::review_service::{ReviewDraft, ReviewError, ReviewService};

pub struct SeaOrmReviewService {
    store: Store,
    audit: Arc<LogService>,
}

impl SeaOrmReviewService {
    #[must_use]
    pub const fn new(store: Store, audit: Arc<LogService>) -> Self {
        Self { store, audit }
    }
}

#[async_trait]
impl ReviewService for SeaOrmReviewService {
    async fn create(
        &self,
        author: &Identity,
        draft: ReviewDraft,
    ) -> Result<reviews::Model, ReviewError> {
        let rating = input::rating(draft.rating).map_err(ReviewError::Validation)?;
        let title = input::required_text("Title", &draft.title, input::MAX_TITLE_LEN)
            .map_err(ReviewError::Validation)?;
        let body = input::required_text("Body", &draft.body, input::MAX_BODY_LEN)
            .map_err(ReviewError::Validation)?;

        if !self.store.product_exists(draft.product_id).await? {
            return Err(ReviewError::InvalidProduct);
        }

        let review = self
            .store
            .create_review(NewReview {
                product_id: draft.product_id,
                user_id: author.user_id,
                rating,
                title,
                body,
            })
            .await?;

        info!(
            review_id = review.id,
            product_id = review.product_id,
            user_id = author.user_id,
            "Review submitted for moderation"
        );

        self.audit
            .record(
                Some(author.user_id),
                AuditAction::AddReview,
                &format!("ReviewId={}", review.id),
            )
            .await;

        Ok(review)
    }

    async fn moderate(
        &self,
        moderator: &Identity,
        id: i32,
        status: ReviewStatus,
    ) -> Result<reviews::Model, ReviewError> {
        let action = match status {
            ReviewStatus::Approved => AuditAction::ApproveReview,
            ReviewStatus::Rejected => AuditAction::RejectReview,
            ReviewStatus::Pending => {
                return Err(InvalidTransition {
                    from: ReviewStatus::Pending,
                    to: status,
                }
                .into());
            }
        };

        let review = self
            .store
            .get_review(id)
            .await?
            .ok_or(ReviewError::NotFound("Review"))?;

        let next = review.status.transition(status)?;

        let review = if next == review.status {
            debug!(review_id = id, status = %next, "Review already in requested state");
            review
        } else {
            let updated = self.store.set_review_status(review, next).await?;
            info!(review_id = id, status = %next, moderator = moderator.user_id, "Review moderated");
            updated
        };

        self.audit
            .record(
                Some(moderator.user_id),
                action,
                &format!("ReviewId={id}"),
            )
            .await;

        Ok(review)
    }

    async fn delete_own(&self, author: &Identity, id: i32) -> Result<(), ReviewError> {
        let review = self
            .store
            .get_owned_review(id, author.user_id)
            .await?
            .ok_or(ReviewError::NotFound("Review"))?;

        if !review.status.is_deletable() {
            return Err(ReviewError::NotPending);
        }

        if !self.store.delete_review(review.id).await? {
            return Err(ReviewError::NotFound("Review"));
        }
        info!(review_id = id, user_id = author.user_id, "Review withdrawn by author");

        self.audit
            .record(
                Some(author.user_id),
                AuditAction::DeleteReview,
                &format!("ReviewId={id}"),
            )
            .await;

        Ok(())
    }

    async fn list_for_product(&self, product_id: i32) -> Result<Vec<reviews::Model>, ReviewError> {
        if !self.store.product_exists(product_id).await? {
            return Err(ReviewError::NotFound("Product"));
        }

        Ok(self.store.list_approved_reviews(product_id).await?)
    }

    async fn list_pending(&self) -> Result<Vec<reviews::Model>, ReviewError> {
        Ok(self.store.list_pending_reviews().await?)
    }

    async fn list_mine(&self, author: &Identity) -> Result<Vec<OwnReviewRow>, ReviewError> {
        Ok(self.store.list_reviews_for_user(author.user_id).await?)
    }
}
