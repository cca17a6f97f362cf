use axum::{Json, extract::State};
use std::sync::Arc;

use super::auth::AdminUser;
use super::{ApiError, ApiResponse, AppState, ReportSummaryDto};
use crate::services::ReportError;

impl From<ReportError> for ApiError {
    fn from(err: ReportError) -> Self {
        match err {
            ReportError::Database(msg) => Self::DatabaseError(msg),
            ReportError::Internal(msg) => Self::internal(msg),
        }
    }
}

/// GET /reports/summary
pub async fn get_summary(
    State(state): State<Arc<AppState>>,
    AdminUser(_admin): AdminUser,
) -> Result<Json<ApiResponse<ReportSummaryDto>>, ApiError> {
    let summary = state.report_service().summary().await?;
    Ok(Json(ApiResponse::success(summary.into())))
}
