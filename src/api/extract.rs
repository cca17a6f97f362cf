//! Request extractors that report rejections through [`ApiError`].
//!
//! axum's own `Json` and `Path` answer malformed input with 415/422 and a
//! plain-text body. These wrappers turn every such rejection into a 400 in
//! the usual response envelope.

use axum::extract::rejection::{JsonRejection, PathRejection};
use axum::extract::{FromRequest, FromRequestParts, Request};
use axum::http::request::Parts;
use serde::de::DeserializeOwned;

use super::ApiError;

/// JSON request body.
#[derive(Debug, Clone, Copy, Default)]
pub struct JsonBody<T>(pub T);

impl<T, S> FromRequest<S> for JsonBody<T>
where
    T: DeserializeOwned,
    S: Send + Sync,
{
    type Rejection = ApiError;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        match axum::Json::<T>::from_request(req, state).await {
            Ok(axum::Json(value)) => Ok(Self(value)),
            Err(rejection) => Err(json_rejection(&rejection)),
        }
    }
}

/// Typed path parameters.
#[derive(Debug, Clone, Copy)]
pub struct PathParam<T>(pub T);

impl<T, S> FromRequestParts<S> for PathParam<T>
where
    T: DeserializeOwned + Send,
    S: Send + Sync,
{
    type Rejection = ApiError;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        match axum::extract::Path::<T>::from_request_parts(parts, state).await {
            Ok(axum::extract::Path(value)) => Ok(Self(value)),
            Err(rejection) => Err(path_rejection(&rejection)),
        }
    }
}

fn json_rejection(rejection: &JsonRejection) -> ApiError {
    tracing::debug!(status = %rejection.status(), "Rejected JSON body");
    ApiError::validation(rejection.body_text())
}

fn path_rejection(rejection: &PathRejection) -> ApiError {
    match rejection {
        PathRejection::MissingPathParams(_) => ApiError::internal(rejection.body_text()),
        _ => ApiError::validation(rejection.body_text()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::body::Body;
    use axum::http::{Request as HttpRequest, StatusCode};
    use axum::response::IntoResponse;
    use serde::Deserialize;

    #[derive(Debug, Deserialize)]
    struct Rating {
        rating: i32,
    }

    async fn extract(content_type: Option<&str>, body: &str) -> Result<i32, StatusCode> {
        let mut builder = HttpRequest::builder().method("POST").uri("/");
        if let Some(content_type) = content_type {
            builder = builder.header("content-type", content_type);
        }
        let request = builder.body(Body::from(body.to_string())).unwrap();

        JsonBody::<Rating>::from_request(request, &())
            .await
            .map(|JsonBody(r)| r.rating)
            .map_err(|e| e.into_response().status())
    }

    #[tokio::test]
    async fn test_json_body_rejections_are_bad_requests() {
        let json = Some("application/json");

        assert_eq!(extract(json, r#"{"rating": 4}"#).await, Ok(4));
        assert_eq!(
            extract(json, r#"{"rating": 10000000000}"#).await,
            Err(StatusCode::BAD_REQUEST)
        );
        assert_eq!(
            extract(json, r#"{"rating": "5"}"#).await,
            Err(StatusCode::BAD_REQUEST)
        );
        assert_eq!(extract(json, "{").await, Err(StatusCode::BAD_REQUEST));
        assert_eq!(
            extract(None, r#"{"rating": 4}"#).await,
            Err(StatusCode::BAD_REQUEST)
        );
    }
}
