//! GraphQL API error types

use thiserror::Error;

/// Failure to render a date or time
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum FormatError {
    #[error("Invalid {field} pattern '{pattern}' for locale '{locale}'")]
    InvalidPattern {
        locale: String,
        field: &'static str,
        pattern: String,
    },

    #[error("Failed to render pattern '{pattern}'")]
    Render { pattern: String },
}

/// Failure while assembling the localized schemas
#[derive(Error, Debug)]
pub enum GraphQLError {
    #[error("Failed to build schema for locale '{locale}': {message}")]
    Schema { locale: String, message: String },

    #[error(transparent)]
    Format(#[from] FormatError),
}

pub type Result<T> = std::result::Result<T, GraphQLError>;
