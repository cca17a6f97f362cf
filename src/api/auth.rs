use axum::{
    Json,
    extract::{FromRequestParts, Request, State},
    http::{HeaderMap, StatusCode, request::Parts},
    middleware::Next,
    response::Response,
};
use std::sync::Arc;

use super::extract::JsonBody;
use super::policy::{Policy, authorize};
use super::{
    ApiError, ApiResponse, AppState, LoginRequestDto, LoginResponse, RegisterRequestDto,
    RegisteredUserDto,
};
use crate::domain::{Identity, Role};
use crate::services::{AuthError, RegisterRequest, resolve_identity};

impl From<AuthError> for ApiError {
    fn from(err: AuthError) -> Self {
        match err {
            AuthError::InvalidEmail
            | AuthError::PasswordTooShort(_)
            | AuthError::PasswordTooLong(_)
            | AuthError::EmailInUse => Self::validation(err.to_string()),
            AuthError::Validation(msg) => Self::validation(msg),
            AuthError::InvalidCredentials => Self::unauthorized(err.to_string()),
            AuthError::Database(msg) => Self::DatabaseError(msg),
            AuthError::Internal(msg) => Self::internal(msg),
        }
    }
}

// ============================================================================
// Middleware
// ============================================================================

/// Resolves the caller from an `Authorization: Bearer <jwt>` header.
///
/// A missing, malformed or expired token leaves the request anonymous, so
/// public routes keep working and protected ones answer 401 through the
/// extractors below. A correctly signed token whose subject is not a user
/// id fails the request.
pub async fn identity_middleware(
    State(state): State<Arc<AppState>>,
    mut request: Request,
    next: Next,
) -> Result<Response, ApiError> {
    if let Some(token) = extract_bearer_token(request.headers()) {
        match state.shared.tokens.validate(&token) {
            Ok(claims) => {
                let identity = resolve_identity(&claims)
                    .map_err(|e| ApiError::unauthorized(e.to_string()))?;

                if let Some(identity) = identity {
                    request.extensions_mut().insert(identity);
                }
            }
            Err(e) => {
                tracing::debug!(error = %e, "Ignoring invalid bearer token");
            }
        }
    }

    Ok(next.run(request).await)
}

fn extract_bearer_token(headers: &HeaderMap) -> Option<String> {
    let value = headers.get("Authorization")?.to_str().ok()?;
    let token = value.strip_prefix("Bearer ")?.trim();
    (!token.is_empty()).then(|| token.to_string())
}

// ============================================================================
// Extractors
// ============================================================================

/// Any authenticated caller.
#[derive(Debug, Clone, Copy)]
pub struct CurrentUser(pub Identity);

/// An authenticated caller holding the `Admin` role.
#[derive(Debug, Clone, Copy)]
pub struct AdminUser(pub Identity);

impl<S: Send + Sync> FromRequestParts<S> for CurrentUser {
    type Rejection = ApiError;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        authorize(parts.extensions.get::<Identity>(), Policy::Authenticated).map(Self)
    }
}

impl<S: Send + Sync> FromRequestParts<S> for AdminUser {
    type Rejection = ApiError;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        authorize(parts.extensions.get::<Identity>(), Policy::Role(Role::Admin)).map(Self)
    }
}

// ============================================================================
// Handlers
// ============================================================================

/// POST /auth/register
pub async fn register(
    State(state): State<Arc<AppState>>,
    JsonBody(payload): JsonBody<RegisterRequestDto>,
) -> Result<(StatusCode, Json<ApiResponse<RegisteredUserDto>>), ApiError> {
    let user = state
        .auth_service()
        .register(RegisterRequest {
            email: payload.email,
            password: payload.password,
            username: payload.username,
        })
        .await?;

    Ok((
        StatusCode::CREATED,
        Json(ApiResponse::success(RegisteredUserDto::from(user))),
    ))
}

/// POST /auth/login
/// Returns a signed bearer token on success
pub async fn login(
    State(state): State<Arc<AppState>>,
    JsonBody(payload): JsonBody<LoginRequestDto>,
) -> Result<Json<ApiResponse<LoginResponse>>, ApiError> {
    let result = state
        .auth_service()
        .login(&payload.email, &payload.password)
        .await?;

    Ok(Json(ApiResponse::success(LoginResponse {
        token: result.token,
        expires_at: result.expires_at,
        user_id: result.user_id,
        role: result.role,
    })))
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::http::HeaderValue;

    #[test]
    fn test_extract_bearer_token() {
        let mut headers = HeaderMap::new();
        assert_eq!(extract_bearer_token(&headers), None);

        headers.insert("Authorization", HeaderValue::from_static("Bearer abc.def.ghi"));
        assert_eq!(extract_bearer_token(&headers).as_deref(), Some("abc.def.ghi"));

        headers.insert("Authorization", HeaderValue::from_static("Basic dXNlcjpwYXNz"));
        assert_eq!(extract_bearer_token(&headers), None);

        headers.insert("Authorization", HeaderValue::from_static("Bearer   "));
        assert_eq!(extract_bearer_token(&headers), None);
    }
}
