//! Per-request language negotiation
//!
//! The negotiated locale is stored in the request extensions and echoed back
//! as `Content-Language`. Negotiation never rejects a request.

use axum::{
    body::Body,
    extract::{FromRequestParts, State},
    http::{
        header::{ACCEPT_LANGUAGE, CONTENT_LANGUAGE, COOKIE},
        request::Parts,
        HeaderMap, HeaderValue, Request,
    },
    middleware::Next,
    response::Response,
};
use horae_i18n::{negotiate, parse_accept_language, CatalogStore, Locale};
use std::sync::Arc;

use crate::errors::WebError;

/// The locale chosen for the current request
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NegotiatedLanguage(pub Locale);

impl NegotiatedLanguage {
    pub fn locale(&self) -> &Locale {
        &self.0
    }
}

/// Chooses one supported locale from request metadata
#[derive(Debug, Clone)]
pub struct LanguageNegotiator {
    available: Vec<Locale>,
    default: Locale,
    cookie_name: Option<String>,
}

impl LanguageNegotiator {
    /// Negotiate among the store's locales, defaulting to its first one
    pub fn new(store: &CatalogStore) -> Self {
        Self {
            available: store.available_locales().to_vec(),
            default: store.default_locale().clone(),
            cookie_name: None,
        }
    }

    /// Let a cookie holding a locale code override `Accept-Language`
    pub fn with_cookie(mut self, name: impl Into<String>) -> Self {
        self.cookie_name = Some(name.into());
        self
    }

    pub fn available_locales(&self) -> &[Locale] {
        &self.available
    }

    pub fn default_locale(&self) -> &Locale {
        &self.default
    }

    /// Pick the locale for a request
    pub fn negotiate(&self, headers: &HeaderMap) -> Locale {
        if let Some(locale) = self.cookie_locale(headers) {
            return locale;
        }

        let preferences: Vec<_> = headers
            .get_all(ACCEPT_LANGUAGE)
            .iter()
            .filter_map(|value| value.to_str().ok())
            .flat_map(parse_accept_language)
            .collect();

        negotiate(&preferences, &self.available, &self.default)
    }

    fn cookie_locale(&self, headers: &HeaderMap) -> Option<Locale> {
        let name = self.cookie_name.as_deref()?;
        headers
            .get_all(COOKIE)
            .iter()
            .filter_map(|value| value.to_str().ok())
            .flat_map(|value| value.split(';'))
            .filter_map(|pair| pair.trim().split_once('='))
            .filter(|(key, _)| key.trim() == name)
            .filter_map(|(_, value)| Locale::parse(value.trim().trim_matches('"')).ok())
            .find(|locale| self.available.contains(locale))
    }
}

/// Middleware attaching [`NegotiatedLanguage`] to every request
pub async fn negotiate_language(
    State(negotiator): State<Arc<LanguageNegotiator>>,
    mut request: Request<Body>,
    next: Next,
) -> Response {
    let locale = negotiator.negotiate(request.headers());
    tracing::debug!(language = %locale, "Negotiated request language");

    let header_value = HeaderValue::from_str(locale.as_str()).ok();
    request.extensions_mut().insert(NegotiatedLanguage(locale));

    let mut response = next.run(request).await;
    if let Some(value) = header_value {
        response.headers_mut().insert(CONTENT_LANGUAGE, value);
    }
    response
}

impl<S> FromRequestParts<S> for NegotiatedLanguage
where
    S: Send + Sync,
{
    type Rejection = WebError;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        parts
            .extensions
            .get::<NegotiatedLanguage>()
            .cloned()
            .ok_or_else(|| WebError::internal("language negotiation middleware is not installed"))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::{http::StatusCode, middleware, routing::get, Router};
    use horae_i18n::Catalog;
    use tower::ServiceExt;

    fn store() -> CatalogStore {
        let catalogs = ["fr", "en"]
            .iter()
            .map(|code| Catalog::new(Locale::parse(code).unwrap(), Default::default()));
        CatalogStore::load(catalogs).unwrap()
    }

    fn headers(pairs: &[(axum::http::HeaderName, &str)]) -> HeaderMap {
        let mut map = HeaderMap::new();
        for (name, value) in pairs {
            map.append(name.clone(), HeaderValue::from_str(value).unwrap());
        }
        map
    }

    async fn echo(NegotiatedLanguage(locale): NegotiatedLanguage) -> String {
        locale.to_string()
    }

    fn app(negotiator: LanguageNegotiator) -> Router {
        Router::new()
            .route("/", get(echo))
            .layer(middleware::from_fn_with_state(Arc::new(negotiator), negotiate_language))
    }

    #[test]
    fn test_default_is_smallest_locale() {
        let negotiator = LanguageNegotiator::new(&store());
        assert_eq!(negotiator.default_locale().as_str(), "en");
        assert_eq!(negotiator.negotiate(&HeaderMap::new()).as_str(), "en");
    }

    #[test]
    fn test_accept_language() {
        let negotiator = LanguageNegotiator::new(&store());
        let chosen = negotiator.negotiate(&headers(&[(ACCEPT_LANGUAGE, "fr-CA,fr;q=0.9,en;q=0.8")]));
        assert_eq!(chosen.as_str(), "fr");
    }

    #[test]
    fn test_unsupported_language_uses_default() {
        let negotiator = LanguageNegotiator::new(&store());
        let chosen = negotiator.negotiate(&headers(&[(ACCEPT_LANGUAGE, "de")]));
        assert_eq!(chosen.as_str(), "en");
    }

    #[test]
    fn test_cookie_overrides_header() {
        let negotiator = LanguageNegotiator::new(&store()).with_cookie("language");
        let chosen = negotiator.negotiate(&headers(&[
            (ACCEPT_LANGUAGE, "en"),
            (COOKIE, "session=abc; language=fr"),
        ]));
        assert_eq!(chosen.as_str(), "fr");
    }

    #[test]
    fn test_unsupported_cookie_is_ignored() {
        let negotiator = LanguageNegotiator::new(&store()).with_cookie("language");
        let chosen = negotiator.negotiate(&headers(&[(ACCEPT_LANGUAGE, "fr"), (COOKIE, "language=de")]));
        assert_eq!(chosen.as_str(), "fr");
    }

    #[test]
    fn test_cookie_ignored_without_configuration() {
        let negotiator = LanguageNegotiator::new(&store());
        let chosen = negotiator.negotiate(&headers(&[(COOKIE, "language=fr")]));
        assert_eq!(chosen.as_str(), "en");
    }

    #[tokio::test]
    async fn test_middleware_sets_extension_and_header() {
        let request = Request::builder()
            .uri("/")
            .header(ACCEPT_LANGUAGE, "fr")
            .body(Body::empty())
            .unwrap();

        let response = app(LanguageNegotiator::new(&store())).oneshot(request).await.unwrap();

        assert_eq!(response.status(), StatusCode::OK);
        assert_eq!(response.headers().get(CONTENT_LANGUAGE).unwrap(), "fr");
        let body = axum::body::to_bytes(response.into_body(), usize::MAX).await.unwrap();
        assert_eq!(&body[..], b"fr");
    }

    #[tokio::test]
    async fn test_extractor_without_middleware_is_internal_error() {
        let app = Router::new().route("/", get(echo));
        let request = Request::builder().uri("/").body(Body::empty()).unwrap();

        let response = app.oneshot(request).await.unwrap();
        assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
    }
}
