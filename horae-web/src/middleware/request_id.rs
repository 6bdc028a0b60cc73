//! Request correlation
//!
//! Each request runs inside a `request` span tagged with its `X-Request-ID`
//! and, when negotiation ran first, the language it is served in. The id is
//! echoed on the response.

use axum::{
    body::Body,
    http::{HeaderMap, HeaderValue, Request},
    middleware::Next,
    response::Response,
};
use std::fmt;
use tracing::Instrument;
use uuid::Uuid;

use super::language::NegotiatedLanguage;

/// Request ID header name
pub const REQUEST_ID_HEADER: &str = "x-request-id";

/// Longest caller-supplied id that is reused as is
const MAX_REQUEST_ID_LEN: usize = 128;

/// Correlation id of one request
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RequestId(String);

impl RequestId {
    /// A fresh random id
    pub fn generate() -> Self {
        Self(Uuid::new_v4().to_string())
    }

    /// The caller's id if it sent a usable one, otherwise a fresh id
    pub fn from_headers(headers: &HeaderMap) -> Self {
        headers
            .get(REQUEST_ID_HEADER)
            .and_then(|value| value.to_str().ok())
            .map(str::trim)
            .filter(|id| !id.is_empty() && id.len() <= MAX_REQUEST_ID_LEN)
            .map(|id| Self(id.to_string()))
            .unwrap_or_else(Self::generate)
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for RequestId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Middleware running each request inside its correlation span
///
/// Layer it inside [`negotiate_language`](super::language::negotiate_language)
/// so the span carries the request's language.
pub async fn request_id_middleware(request: Request<Body>, next: Next) -> Response {
    let request_id = RequestId::from_headers(request.headers());

    let span = tracing::info_span!(
        "request",
        request_id = %request_id,
        language = tracing::field::Empty,
        method = %request.method(),
        path = %request.uri().path(),
    );
    if let Some(NegotiatedLanguage(locale)) = request.extensions().get::<NegotiatedLanguage>() {
        span.record("language", locale.as_str());
    }

    async move {
        let mut response = next.run(request).await;
        tracing::debug!(status = %response.status(), "Request completed");

        if let Ok(value) = HeaderValue::from_str(request_id.as_str()) {
            response.headers_mut().insert(REQUEST_ID_HEADER, value);
        }
        response
    }
    .instrument(span)
    .await
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::middleware::language::{negotiate_language, LanguageNegotiator};
    use axum::http::{header, StatusCode};
    use axum::{middleware, routing::get, Router};
    use horae_i18n::{Catalog, CatalogStore, Locale};
    use std::sync::Arc;
    use tower::ServiceExt;

    fn app() -> Router {
        let store = CatalogStore::load(
            ["en", "fr"]
                .iter()
                .map(|code| Catalog::new(Locale::parse(code).unwrap(), Default::default())),
        )
        .unwrap();
        let negotiator = Arc::new(LanguageNegotiator::new(&store));

        Router::new()
            .route("/now", get(|NegotiatedLanguage(locale): NegotiatedLanguage| async move { locale.to_string() }))
            .layer(middleware::from_fn(request_id_middleware))
            .layer(middleware::from_fn_with_state(negotiator, negotiate_language))
    }

    async fn send(request: Request<Body>) -> Response {
        app().oneshot(request).await.unwrap()
    }

    #[test]
    fn test_from_headers_reuses_caller_id() {
        let mut headers = HeaderMap::new();
        headers.insert(REQUEST_ID_HEADER, HeaderValue::from_static("  trace-42 "));
        assert_eq!(RequestId::from_headers(&headers).as_str(), "trace-42");
    }

    #[test]
    fn test_from_headers_replaces_unusable_ids() {
        let mut headers = HeaderMap::new();
        assert!(Uuid::parse_str(RequestId::from_headers(&headers).as_str()).is_ok());

        headers.insert(REQUEST_ID_HEADER, HeaderValue::from_static("   "));
        assert!(Uuid::parse_str(RequestId::from_headers(&headers).as_str()).is_ok());

        let oversized = "a".repeat(MAX_REQUEST_ID_LEN + 1);
        headers.insert(REQUEST_ID_HEADER, HeaderValue::from_str(&oversized).unwrap());
        assert_ne!(RequestId::from_headers(&headers).as_str(), oversized);
    }

    #[tokio::test]
    async fn test_generated_id_is_echoed() {
        let response = send(Request::builder().uri("/now").body(Body::empty()).unwrap()).await;

        assert_eq!(response.status(), StatusCode::OK);
        let id = response.headers().get(REQUEST_ID_HEADER).unwrap().to_str().unwrap();
        assert!(Uuid::parse_str(id).is_ok());
    }

    #[tokio::test]
    async fn test_runs_after_negotiation() {
        let request = Request::builder()
            .uri("/now")
            .header(REQUEST_ID_HEADER, "test-request-id-123")
            .header(header::ACCEPT_LANGUAGE, "fr")
            .body(Body::empty())
            .unwrap();

        let response = send(request).await;

        assert_eq!(response.headers().get(REQUEST_ID_HEADER).unwrap(), "test-request-id-123");
        assert_eq!(response.headers().get(header::CONTENT_LANGUAGE).unwrap(), "fr");
        let body = axum::body::to_bytes(response.into_body(), usize::MAX).await.unwrap();
        assert_eq!(&body[..], b"fr");
    }
}
