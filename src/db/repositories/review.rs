use crate::domain::{ReviewStatus, utc_timestamp};
use crate::entities::{prelude::*, products, reviews};
use anyhow::{Context, Result};
use sea_orm::{
    ActiveModelTrait, ColumnTrait, DatabaseConnection, EntityTrait, PaginatorTrait, QueryFilter,
    QueryOrder, Set,
};

/// Fields supplied by an author. Status and timestamp are set here, never by the caller.
pub struct NewReview {
    pub product_id: i32,
    pub user_id: i32,
    pub rating: i32,
    pub title: String,
    pub body: String,
}

/// An author's review joined with the product name.
#[derive(Debug, Clone)]
pub struct OwnReviewRow {
    pub review: reviews::Model,
    pub product_name: Option<String>,
}

pub struct ReviewRepository {
    conn: DatabaseConnection,
}

impl ReviewRepository {
    #[must_use]
    pub const fn new(conn: DatabaseConnection) -> Self {
        Self { conn }
    }

    pub async fn create(&self, new_review: NewReview) -> Result<reviews::Model> {
        let active = reviews::ActiveModel {
            product_id: Set(new_review.product_id),
            user_id: Set(new_review.user_id),
            rating: Set(new_review.rating),
            title: Set(new_review.title),
            body: Set(new_review.body),
            status: Set(ReviewStatus::Pending),
            created_at: Set(utc_timestamp()),
            ..Default::default()
        };

        active
            .insert(&self.conn)
            .await
            .context("Failed to insert review")
    }

    pub async fn get(&self, id: i32) -> Result<Option<reviews::Model>> {
        Reviews::find_by_id(id)
            .one(&self.conn)
            .await
            .context("Failed to query review")
    }

    /// Finds a review only if it belongs to `user_id`.
    pub async fn get_owned(&self, id: i32, user_id: i32) -> Result<Option<reviews::Model>> {
        Reviews::find_by_id(id)
            .filter(reviews::Column::UserId.eq(user_id))
            .one(&self.conn)
            .await
            .context("Failed to query owned review")
    }

    pub async fn set_status(
        &self,
        review: reviews::Model,
        status: ReviewStatus,
    ) -> Result<reviews::Model> {
        let mut active: reviews::ActiveModel = review.into();
        active.status = Set(status);

        active
            .update(&self.conn)
            .await
            .context("Failed to update review status")
    }

    pub async fn delete(&self, id: i32) -> Result<bool> {
        let result = Reviews::delete_by_id(id)
            .exec(&self.conn)
            .await
            .context("Failed to delete review")?;
        Ok(result.rows_affected > 0)
    }

    /// Public listing: approved only, newest first.
    pub async fn list_approved_for_product(&self, product_id: i32) -> Result<Vec<reviews::Model>> {
        Reviews::find()
            .filter(reviews::Column::ProductId.eq(product_id))
            .filter(reviews::Column::Status.eq(ReviewStatus::Approved))
            .order_by_desc(reviews::Column::CreatedAt)
            .order_by_desc(reviews::Column::Id)
            .all(&self.conn)
            .await
            .context("Failed to list approved reviews")
    }

    /// Moderation queue: oldest first.
    pub async fn list_pending(&self) -> Result<Vec<reviews::Model>> {
        Reviews::find()
            .filter(reviews::Column::Status.eq(ReviewStatus::Pending))
            .order_by_asc(reviews::Column::CreatedAt)
            .order_by_asc(reviews::Column::Id)
            .all(&self.conn)
            .await
            .context("Failed to list pending reviews")
    }

    pub async fn list_for_user(&self, user_id: i32) -> Result<Vec<OwnReviewRow>> {
        let rows = Reviews::find()
            .filter(reviews::Column::UserId.eq(user_id))
            .find_also_related(Products)
            .order_by_desc(reviews::Column::CreatedAt)
            .order_by_desc(reviews::Column::Id)
            .all(&self.conn)
            .await
            .context("Failed to list reviews for user")?;

        Ok(rows
            .into_iter()
            .map(|(review, product): (reviews::Model, Option<products::Model>)| OwnReviewRow {
                review,
                product_name: product.map(|p| p.name),
            })
            .collect())
    }

    pub async fn count(&self) -> Result<u64> {
        Reviews::find()
            .count(&self.conn)
            .await
            .context("Failed to count reviews")
    }

    pub async fn count_by_status(&self, status: ReviewStatus) -> Result<u64> {
        Reviews::find()
            .filter(reviews::Column::Status.eq(status))
            .count(&self.conn)
            .await
            .context("Failed to count reviews by status")
    }
}
