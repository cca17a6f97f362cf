use axum::{Json, extract::State, http::StatusCode};
use std::sync::Arc;

use super::auth::AdminUser;
use super::extract::{JsonBody, PathParam};
use super::validation::validate_id;
use super::{ApiError, ApiResponse, AppState, CategoryDto, CategoryRequest};
use crate::services::CatalogError;

impl From<CatalogError> for ApiError {
    fn from(err: CatalogError) -> Self {
        match err {
            CatalogError::NotFound(what) => Self::NotFound(format!("{what} not found.")),
            CatalogError::Validation(msg) => Self::validation(msg),
            CatalogError::DuplicateName | CatalogError::InvalidCategory => {
                Self::validation(err.to_string())
            }
            CatalogError::CategoryInUse(_) => Self::Conflict(err.to_string()),
            CatalogError::Database(msg) => Self::DatabaseError(msg),
            CatalogError::Internal(msg) => Self::internal(msg),
        }
    }
}

/// GET /categories
pub async fn list_categories(
    State(state): State<Arc<AppState>>,
) -> Result<Json<ApiResponse<Vec<CategoryDto>>>, ApiError> {
    let categories = state.catalog_service().list_categories().await?;
    Ok(Json(ApiResponse::success(
        categories.into_iter().map(CategoryDto::from).collect(),
    )))
}

/// GET /categories/{id}
pub async fn get_category(
    State(state): State<Arc<AppState>>,
    PathParam(id): PathParam<i32>,
) -> Result<Json<ApiResponse<CategoryDto>>, ApiError> {
    let id = validate_id("category", id)?;
    let category = state.catalog_service().get_category(id).await?;
    Ok(Json(ApiResponse::success(category.into())))
}

/// POST /categories
pub async fn create_category(
    State(state): State<Arc<AppState>>,
    AdminUser(admin): AdminUser,
    JsonBody(payload): JsonBody<CategoryRequest>,
) -> Result<(StatusCode, Json<ApiResponse<CategoryDto>>), ApiError> {
    let category = state
        .catalog_service()
        .create_category(&admin, &payload.name)
        .await?;

    Ok((
        StatusCode::CREATED,
        Json(ApiResponse::success(category.into())),
    ))
}

/// PUT /categories/{id}
pub async fn update_category(
    State(state): State<Arc<AppState>>,
    AdminUser(admin): AdminUser,
    PathParam(id): PathParam<i32>,
    JsonBody(payload): JsonBody<CategoryRequest>,
) -> Result<StatusCode, ApiError> {
    let id = validate_id("category", id)?;
    state
        .catalog_service()
        .update_category(&admin, id, &payload.name)
        .await?;
    Ok(StatusCode::NO_CONTENT)
}

/// DELETE /categories/{id}
/// Refused with 409 while products still reference the category
pub async fn delete_category(
    State(state): State<Arc<AppState>>,
    AdminUser(admin): AdminUser,
    PathParam(id): PathParam<i32>,
) -> Result<StatusCode, ApiError> {
    let id = validate_id("category", id)?;
    state.catalog_service().delete_category(&admin, id).await?;
    Ok(StatusCode::NO_CONTENT)
}
