use axum::{
    extract::{MatchedPath, Request, State},
    http::{HeaderName, HeaderValue, StatusCode},
    middleware::Next,
    response::{IntoResponse, Response},
};
use std::sync::Arc;
use std::time::Instant;
use tracing::{Instrument, debug, info_span, warn};
use uuid::Uuid;

use crate::api::AppState;
use crate::api::auth::AdminUser;
use crate::domain::Identity;

const REQUESTS_TOTAL: &str = "cosmorate_http_requests_total";
const REQUEST_SECONDS: &str = "cosmorate_http_request_duration_seconds";

const SECURITY_HEADERS: [(&str, &str); 5] = [
    ("x-content-type-options", "nosniff"),
    ("x-frame-options", "DENY"),
    ("referrer-policy", "no-referrer"),
    ("cache-control", "no-store"),
    (
        "content-security-policy",
        "default-src 'none'; frame-ancestors 'none'",
    ),
];

/// GET /metrics
/// Prometheus text exposition, admin only
pub async fn get_metrics(
    State(state): State<Arc<AppState>>,
    AdminUser(_admin): AdminUser,
) -> Response {
    state.prometheus_handle.as_ref().map_or_else(
        || {
            (
                StatusCode::NOT_FOUND,
                "Metrics not enabled or failed to initialize",
            )
                .into_response()
        },
        |handle| handle.render().into_response(),
    )
}

/// Route template for a request, falling back to the raw path when the
/// router has not matched one.
fn route_label(req: &Request) -> String {
    req.extensions().get::<MatchedPath>().map_or_else(
        || req.uri().path().to_string(),
        |matched| matched.as_str().to_string(),
    )
}

/// Per-route request span and metrics.
///
/// Installed inside the identity layer, so the span carries the resolved
/// caller. Labels use the route template to keep cardinality bounded.
pub async fn request_metrics_middleware(req: Request, next: Next) -> Response {
    let start = Instant::now();
    let method = req.method().to_string();
    let route = route_label(&req);
    let user_id = req.extensions().get::<Identity>().map(|identity| identity.user_id);

    let span = info_span!(
        "request",
        request_id = %Uuid::new_v4(),
        method = %method,
        route = %route,
        user_id,
    );

    async move {
        let response = next.run(req).await;
        let status = response.status();
        let elapsed = start.elapsed();
        let elapsed_ms = u64::try_from(elapsed.as_millis()).unwrap_or(u64::MAX);

        let labels = [
            ("method", method),
            ("route", route),
            ("status", status.as_u16().to_string()),
        ];
        metrics::counter!(REQUESTS_TOTAL, &labels).increment(1);
        metrics::histogram!(REQUEST_SECONDS, &labels).record(elapsed.as_secs_f64());

        if status.is_server_error() {
            warn!(status = status.as_u16(), elapsed_ms, "Request failed");
        } else {
            debug!(status = status.as_u16(), elapsed_ms, "Request handled");
        }

        response
    }
    .instrument(span)
    .await
}

pub async fn security_headers_middleware(req: Request, next: Next) -> Response {
    let mut response = next.run(req).await;
    let headers = response.headers_mut();

    for (name, value) in SECURITY_HEADERS {
        headers.insert(
            HeaderName::from_static(name),
            HeaderValue::from_static(value),
        );
    }

    response
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::body::Body;

    #[test]
    fn test_route_label_falls_back_to_path() {
        let req = Request::builder()
            .uri("/api/reviews/7?x=1")
            .body(Body::empty())
            .unwrap();

        assert_eq!(route_label(&req), "/api/reviews/7");
    }

    #[test]
    fn test_security_header_names_are_valid() {
        for (name, value) in SECURITY_HEADERS {
            assert!(HeaderName::from_bytes(name.as_bytes()).is_ok());
            assert!(HeaderValue::from_str(value).is_ok());
        }
    }
}
