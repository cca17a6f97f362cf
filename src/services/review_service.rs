//! Domain service for the review moderation workflow.
//!
//! New reviews start `Pending`. Administrators move them to `Approved` or
//! `Rejected`; only approved reviews are listed publicly. Authors may delete
//! their own review while it is still pending.

use thiserror::Error;

use crate::db::OwnReviewRow;
use crate::domain::{Identity, InvalidTransition, ReviewStatus};
use crate::entities::reviews;

/// Errors specific to review operations.
#[derive(Debug, Error)]
pub enum ReviewError {
    #[error("{0} not found.")]
    NotFound(&'static str),

    #[error("{0}")]
    Validation(String),

    #[error("Invalid productId.")]
    InvalidProduct,

    #[error("Only Pending reviews can be deleted.")]
    NotPending,

    #[error(transparent)]
    Transition(#[from] InvalidTransition),

    #[error("Database error: {0}")]
    Database(String),

    #[error("Internal error: {0}")]
    Internal(String),
}

impl From<sea_orm::DbErr> for ReviewError {
    fn from(err: sea_orm::DbErr) -> Self {
        Self::Database(err.to_string())
    }
}

impl From<anyhow::Error> for ReviewError {
    fn from(err: anyhow::Error) -> Self {
        Self::Internal(err.to_string())
    }
}

/// Review fields as submitted by the author. Status and timestamp are not
/// accepted from clients.
#[derive(Debug, Clone)]
pub struct ReviewDraft {
    pub product_id: i32,
    pub rating: i32,
    pub title: String,
    pub body: String,
}

/// Domain service trait for reviews.
#[async_trait::async_trait]
pub trait ReviewService: Send + Sync {
    /// Stores a new `Pending` review authored by `author`.
    ///
    /// # Errors
    ///
    /// Returns [`ReviewError::Validation`] for a bad rating, title or body and
    /// [`ReviewError::InvalidProduct`] when the product does not exist.
    async fn create(
        &self,
        author: &Identity,
        draft: ReviewDraft,
    ) -> Result<reviews::Model, ReviewError>;

    /// Moves a review to `status` on behalf of an administrator.
    ///
    /// Re-applying the current status succeeds without change.
    ///
    /// # Errors
    ///
    /// Returns [`ReviewError::NotFound`] for an unknown id and
    /// [`ReviewError::Transition`] for a decided review moving to the other outcome.
    async fn moderate(
        &self,
        moderator: &Identity,
        id: i32,
        status: ReviewStatus,
    ) -> Result<reviews::Model, ReviewError>;

    /// Deletes the caller's own pending review.
    ///
    /// A review owned by someone else is reported as [`ReviewError::NotFound`].
    async fn delete_own(&self, author: &Identity, id: i32) -> Result<(), ReviewError>;

    /// Approved reviews of a product, newest first.
    async fn list_for_product(&self, product_id: i32) -> Result<Vec<reviews::Model>, ReviewError>;

    /// Moderation queue, oldest first.
    async fn list_pending(&self) -> Result<Vec<reviews::Model>, ReviewError>;

    /// All of the caller's reviews, newest first.
    async fn list_mine(&self, author: &Identity) -> Result<Vec<OwnReviewRow>, ReviewError>;
}
