use serde::{Deserialize, Serialize};

use crate::db::{AuditLogEntry, OwnReviewRow, ProductWithCategory, User};
use crate::domain::{ReviewStatus, Role};
use crate::entities::{categories, products, reviews};
use crate::services::{ReportSummary, ReviewCounts};

#[derive(Debug, Serialize)]
pub struct ApiResponse<T> {
    pub success: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub data: Option<T>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl<T> ApiResponse<T> {
    pub const fn success(data: T) -> Self {
        Self {
            success: true,
            data: Some(data),
            error: None,
        }
    }

    pub fn error(message: impl Into<String>) -> Self {
        Self {
            success: false,
            data: None,
            error: Some(message.into()),
        }
    }
}

// Requests. Missing fields fall back to defaults so they surface as
// validation messages instead of deserialization failures.

#[derive(Debug, Default, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct RegisterRequestDto {
    pub email: String,
    pub password: String,
    pub username: String,
}

#[derive(Debug, Default, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct LoginRequestDto {
    pub email: String,
    pub password: String,
}

#[derive(Debug, Default, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct CategoryRequest {
    pub name: String,
}

#[derive(Debug, Default, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct ProductRequest {
    pub name: String,
    pub brand: String,
    pub category_id: i32,
    pub image_url: Option<String>,
}

/// Anything else a client sends (`status`, `userId`, ...) is ignored.
#[derive(Debug, Default, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct CreateReviewRequest {
    pub product_id: i32,
    pub rating: i32,
    pub title: String,
    pub body: String,
}

// Responses

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RegisteredUserDto {
    pub id: i32,
    pub email: String,
    pub role: Role,
}

impl From<User> for RegisteredUserDto {
    fn from(user: User) -> Self {
        Self {
            id: user.id,
            email: user.email,
            role: user.role,
        }
    }
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct LoginResponse {
    pub token: String,
    pub expires_at: i64,
    pub user_id: i32,
    pub role: Role,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CategoryDto {
    pub id: i32,
    pub name: String,
}

impl From<categories::Model> for CategoryDto {
    fn from(model: categories::Model) -> Self {
        Self {
            id: model.id,
            name: model.name,
        }
    }
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ProductDto {
    pub id: i32,
    pub name: String,
    pub brand: String,
    pub category_id: i32,
    /// Category name, present on read endpoints
    #[serde(skip_serializing_if = "Option::is_none")]
    pub category: Option<String>,
    pub image_url: Option<String>,
}

impl From<ProductWithCategory> for ProductDto {
    fn from(row: ProductWithCategory) -> Self {
        Self {
            category: row.category_name,
            ..Self::from(row.product)
        }
    }
}

impl From<products::Model> for ProductDto {
    fn from(model: products::Model) -> Self {
        Self {
            id: model.id,
            name: model.name,
            brand: model.brand,
            category_id: model.category_id,
            category: None,
            image_url: model.image_url,
        }
    }
}

/// Review as shown publicly under a product.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PublicReviewDto {
    pub id: i32,
    pub rating: i32,
    pub title: String,
    pub body: String,
    pub created_at: String,
    pub user_id: i32,
}

impl From<reviews::Model> for PublicReviewDto {
    fn from(model: reviews::Model) -> Self {
        Self {
            id: model.id,
            rating: model.rating,
            title: model.title,
            body: model.body,
            created_at: model.created_at,
            user_id: model.user_id,
        }
    }
}

/// Full review, used for the moderation queue and creation responses.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ReviewDto {
    pub id: i32,
    pub product_id: i32,
    pub user_id: i32,
    pub rating: i32,
    pub title: String,
    pub body: String,
    pub status: ReviewStatus,
    pub created_at: String,
}

impl From<reviews::Model> for ReviewDto {
    fn from(model: reviews::Model) -> Self {
        Self {
            id: model.id,
            product_id: model.product_id,
            user_id: model.user_id,
            rating: model.rating,
            title: model.title,
            body: model.body,
            status: model.status,
            created_at: model.created_at,
        }
    }
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct MyReviewDto {
    pub id: i32,
    pub product_id: i32,
    pub product_name: Option<String>,
    pub rating: i32,
    pub title: String,
    pub body: String,
    pub status: ReviewStatus,
    pub created_at: String,
}

impl From<OwnReviewRow> for MyReviewDto {
    fn from(row: OwnReviewRow) -> Self {
        let review = row.review;
        Self {
            id: review.id,
            product_id: review.product_id,
            product_name: row.product_name,
            rating: review.rating,
            title: review.title,
            body: review.body,
            status: review.status,
            created_at: review.created_at,
        }
    }
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ReviewCountsDto {
    pub total: u64,
    pub pending: u64,
    pub approved: u64,
    pub rejected: u64,
}

impl From<ReviewCounts> for ReviewCountsDto {
    fn from(counts: ReviewCounts) -> Self {
        Self {
            total: counts.total,
            pending: counts.pending,
            approved: counts.approved,
            rejected: counts.rejected,
        }
    }
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct LogItemDto {
    pub id: i32,
    pub user_id: Option<i32>,
    pub action: String,
    pub details: String,
    pub timestamp: String,
}

impl From<AuditLogEntry> for LogItemDto {
    fn from(entry: AuditLogEntry) -> Self {
        Self {
            id: entry.id,
            user_id: entry.user_id,
            action: entry.action,
            details: entry.details,
            timestamp: entry.timestamp,
        }
    }
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ReportSummaryDto {
    pub users: u64,
    pub products: u64,
    pub categories: u64,
    pub reviews: ReviewCountsDto,
    pub last_logs: Vec<LogItemDto>,
}

impl From<ReportSummary> for ReportSummaryDto {
    fn from(summary: ReportSummary) -> Self {
        Self {
            users: summary.users,
            products: summary.products,
            categories: summary.categories,
            reviews: summary.reviews.into(),
            last_logs: summary.last_logs.into_iter().map(LogItemDto::from).collect(),
        }
    }
}
