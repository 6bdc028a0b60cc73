//! I18n error types

use std::path::PathBuf;
use thiserror::Error;

/// Result type for catalog and translation operations
pub type I18nResult<T> = Result<T, I18nError>;

#[derive(Debug, Error)]
pub enum I18nError {
    #[error("Invalid locale '{0}'")]
    InvalidLocale(String),

    #[error("No locales were loaded")]
    NoLocales,

    #[error("Failed to read catalog for '{locale}' at {}: {source}", path.display())]
    CatalogRead {
        locale: String,
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to parse catalog for '{locale}' at {}: {source}", path.display())]
    CatalogParse {
        locale: String,
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    #[error("Missing translation for '{message_id}' in locale '{locale}'")]
    MissingTranslation { locale: String, message_id: String },
}
