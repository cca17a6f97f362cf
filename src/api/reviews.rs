//! Review endpoints: public listing, authoring and moderation.

use axum::{Json, extract::State, http::StatusCode};
use std::sync::Arc;

use super::auth::{AdminUser, CurrentUser};
use super::extract::{JsonBody, PathParam};
use super::validation::validate_id;
use super::{
    ApiError, ApiResponse, AppState, CreateReviewRequest, MyReviewDto, PublicReviewDto, ReviewDto,
};
use crate::domain::ReviewStatus;
use crate::services::{ReviewDraft, ReviewError};

impl From<ReviewError> for ApiError {
    fn from(err: ReviewError) -> Self {
        match err {
            ReviewError::NotFound(what) => Self::NotFound(format!("{what} not found.")),
            ReviewError::Validation(msg) => Self::validation(msg),
            ReviewError::InvalidProduct | ReviewError::NotPending => {
                Self::validation(err.to_string())
            }
            ReviewError::Transition(_) => Self::Conflict(err.to_string()),
            ReviewError::Database(msg) => Self::DatabaseError(msg),
            ReviewError::Internal(msg) => Self::internal(msg),
        }
    }
}

/// GET /reviews/product/{id}
/// Approved reviews only, newest first
pub async fn list_for_product(
    State(state): State<Arc<AppState>>,
    PathParam(product_id): PathParam<i32>,
) -> Result<Json<ApiResponse<Vec<PublicReviewDto>>>, ApiError> {
    let product_id = validate_id("product", product_id)?;
    let reviews = state.review_service().list_for_product(product_id).await?;
    Ok(Json(ApiResponse::success(
        reviews.into_iter().map(PublicReviewDto::from).collect(),
    )))
}

/// GET /reviews/pending
pub async fn list_pending(
    State(state): State<Arc<AppState>>,
    AdminUser(_admin): AdminUser,
) -> Result<Json<ApiResponse<Vec<ReviewDto>>>, ApiError> {
    let reviews = state.review_service().list_pending().await?;
    Ok(Json(ApiResponse::success(
        reviews.into_iter().map(ReviewDto::from).collect(),
    )))
}

/// GET /reviews/my
pub async fn list_mine(
    State(state): State<Arc<AppState>>,
    CurrentUser(user): CurrentUser,
) -> Result<Json<ApiResponse<Vec<MyReviewDto>>>, ApiError> {
    let rows = state.review_service().list_mine(&user).await?;
    Ok(Json(ApiResponse::success(
        rows.into_iter().map(MyReviewDto::from).collect(),
    )))
}

/// POST /reviews
/// The new review is always `Pending`, whatever the client sent
pub async fn create_review(
    State(state): State<Arc<AppState>>,
    CurrentUser(user): CurrentUser,
    JsonBody(payload): JsonBody<CreateReviewRequest>,
) -> Result<(StatusCode, Json<ApiResponse<ReviewDto>>), ApiError> {
    let review = state
        .review_service()
        .create(
            &user,
            ReviewDraft {
                product_id: payload.product_id,
                rating: payload.rating,
                title: payload.title,
                body: payload.body,
            },
        )
        .await?;

    Ok((
        StatusCode::CREATED,
        Json(ApiResponse::success(review.into())),
    ))
}

/// PUT /reviews/{id}/approve
pub async fn approve_review(
    State(state): State<Arc<AppState>>,
    AdminUser(admin): AdminUser,
    PathParam(id): PathParam<i32>,
) -> Result<StatusCode, ApiError> {
    let id = validate_id("review", id)?;
    state
        .review_service()
        .moderate(&admin, id, ReviewStatus::Approved)
        .await?;
    Ok(StatusCode::NO_CONTENT)
}

/// PUT /reviews/{id}/reject
pub async fn reject_review(
    State(state): State<Arc<AppState>>,
    AdminUser(admin): AdminUser,
    PathParam(id): PathParam<i32>,
) -> Result<StatusCode, ApiError> {
    let id = validate_id("review", id)?;
    state
        .review_service()
        .moderate(&admin, id, ReviewStatus::Rejected)
        .await?;
    Ok(StatusCode::NO_CONTENT)
}

/// DELETE /reviews/{id}
/// Authors may withdraw their own review while it is pending
pub async fn delete_review(
    State(state): State<Arc<AppState>>,
    CurrentUser(user): CurrentUser,
    PathParam(id): PathParam<i32>,
) -> Result<StatusCode, ApiError> {
    let id = validate_id("review", id)?;
    state.review_service().delete_own(&user, id).await?;
    Ok(StatusCode::NO_CONTENT)
}
