//! # Horae Web Utilities
//!
//! Axum middleware shared by the Horae HTTP surface:
//!
//! - **Language negotiation**: selects one supported locale per request from
//!   a cookie or `Accept-Language` and stores it as [`NegotiatedLanguage`]
//! - **Request ids**: runs every request in a span tagged with its
//!   `X-Request-ID` and negotiated language
//! - **CORS**: a configurable `tower_http` CORS layer
//!
//! ## Example
//!
//! ```rust,no_run
//! use std::sync::Arc;
//! use axum::{middleware, routing::get, Router};
//! use horae_i18n::{Catalog, CatalogStore, Locale};
//! use horae_web::{negotiate_language, LanguageNegotiator, NegotiatedLanguage};
//!
//! async fn hello(NegotiatedLanguage(locale): NegotiatedLanguage) -> String {
//!     locale.to_string()
//! }
//!
//! # fn main() -> Result<(), Box<dyn std::error::Error>> {
//! let en = Catalog::new(Locale::parse("en")?, Default::default());
//! let store = CatalogStore::load(vec![en])?;
//! let negotiator = Arc::new(LanguageNegotiator::new(&store));
//!
//! let app: Router = Router::new()
//!     .route("/hello", get(hello))
//!     .layer(middleware::from_fn_with_state(negotiator, negotiate_language));
//! # Ok(())
//! # }
//! ```

pub mod errors;
pub mod middleware;

pub use errors::WebError;
pub use middleware::{
    cors_layer_with_config, handle_not_found, negotiate_language, request_id_middleware, CorsConfig,
    LanguageNegotiator, NegotiatedLanguage, RequestId, REQUEST_ID_HEADER,
};
