//! Horae server
//!
//! Wires configuration, message catalogs, the localized GraphQL schemas and
//! the web middleware into one axum application.

pub mod services;
pub mod startup;

pub use horae_config::HoraeConfig;
pub use services::{init_logging, ServiceContainer};
pub use startup::Server;
