//! Internationalization primitives for Horae
//!
//! - [`CatalogStore`] holds every loaded message catalog. It is immutable
//!   after load and cheap to clone.
//! - [`Translator`] is a value bound to one locale. Activating a locale hands
//!   out a new translator instead of flipping process-wide state, so
//!   concurrent requests never observe each other's language.
//! - [`negotiation`] picks one supported locale from request preferences.

pub mod catalog;
pub mod error;
pub mod locale;
pub mod negotiation;
pub mod translator;

pub use catalog::{translate, Catalog, CatalogStore, CATALOG_FILE_NAME};
pub use error::{I18nError, I18nResult};
pub use locale::Locale;
pub use negotiation::{negotiate, parse_accept_language, LanguageRange};
pub use translator::Translator;
