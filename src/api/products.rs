use axum::{Json, extract::State, http::StatusCode};
use std::sync::Arc;

use super::auth::AdminUser;
use super::extract::{JsonBody, PathParam};
use super::validation::validate_id;
use super::{ApiError, ApiResponse, AppState, ProductDto, ProductRequest};
use crate::services::ProductDraft;

impl From<ProductRequest> for ProductDraft {
    fn from(request: ProductRequest) -> Self {
        Self {
            name: request.name,
            brand: request.brand,
            category_id: request.category_id,
            image_url: request.image_url,
        }
    }
}

/// GET /products
pub async fn list_products(
    State(state): State<Arc<AppState>>,
) -> Result<Json<ApiResponse<Vec<ProductDto>>>, ApiError> {
    let products = state.catalog_service().list_products().await?;
    Ok(Json(ApiResponse::success(
        products.into_iter().map(ProductDto::from).collect(),
    )))
}

/// GET /products/{id}
pub async fn get_product(
    State(state): State<Arc<AppState>>,
    PathParam(id): PathParam<i32>,
) -> Result<Json<ApiResponse<ProductDto>>, ApiError> {
    let id = validate_id("product", id)?;
    let product = state.catalog_service().get_product(id).await?;
    Ok(Json(ApiResponse::success(product.into())))
}

/// POST /products
pub async fn create_product(
    State(state): State<Arc<AppState>>,
    AdminUser(admin): AdminUser,
    JsonBody(payload): JsonBody<ProductRequest>,
) -> Result<(StatusCode, Json<ApiResponse<ProductDto>>), ApiError> {
    let product = state
        .catalog_service()
        .create_product(&admin, payload.into())
        .await?;

    Ok((
        StatusCode::CREATED,
        Json(ApiResponse::success(product.into())),
    ))
}

/// PUT /products/{id}
pub async fn update_product(
    State(state): State<Arc<AppState>>,
    AdminUser(admin): AdminUser,
    PathParam(id): PathParam<i32>,
    JsonBody(payload): JsonBody<ProductRequest>,
) -> Result<StatusCode, ApiError> {
    let id = validate_id("product", id)?;
    state
        .catalog_service()
        .update_product(&admin, id, payload.into())
        .await?;
    Ok(StatusCode::NO_CONTENT)
}

/// DELETE /products/{id}
pub async fn delete_product(
    State(state): State<Arc<AppState>>,
    AdminUser(admin): AdminUser,
    PathParam(id): PathParam<i32>,
) -> Result<StatusCode, ApiError> {
    let id = validate_id("product", id)?;
    state.catalog_service().delete_product(&admin, id).await?;
    Ok(StatusCode::NO_CONTENT)
}
