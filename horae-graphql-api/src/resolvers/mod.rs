//! GraphQL resolvers

pub mod now;

pub use now::{resolve_now, NowResolver};
