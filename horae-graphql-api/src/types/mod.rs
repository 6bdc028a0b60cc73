//! Values produced by the resolvers

pub mod datetime;

pub use datetime::{DateTimeFormatter, DateTimeResult, LocalePatterns};
