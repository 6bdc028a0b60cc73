//! Domain-driven configuration management for Horae
//!
//! Configuration is split by functional domain (server, graphql, i18n,
//! logging), each with its own defaults and validation. Files may be YAML or
//! JSON, and `HORAE_*` environment variables override file values.

pub mod error;
pub mod loader;
pub mod validation;

pub mod domains;

pub use error::{ConfigError, ConfigResult};
pub use loader::ConfigLoader;
pub use validation::Validatable;

pub use domains::{
    graphql::{GraphQLConfig, LocaleFormatConfig},
    i18n::I18nConfig,
    logging::{LogFormat, LogLevel, LoggingConfig},
    server::ServerConfig,
    HoraeConfig,
};
