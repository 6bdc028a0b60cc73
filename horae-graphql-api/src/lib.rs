//! GraphQL API for the Horae date/time service
//!
//! One schema is built per supported locale at startup, each with its
//! descriptions translated for that locale. Requests pick a schema by their
//! negotiated language, so nothing locale-dependent is shared or mutated
//! between requests.

pub mod clock;
pub mod context;
pub mod errors;
pub mod registry;
pub mod resolvers;
pub mod schema;
pub mod types;

pub use clock::{Clock, FixedClock, SystemClock};
pub use context::{GraphQLConfig, GraphQLState};
pub use errors::{FormatError, GraphQLError, Result};
pub use registry::SchemaRegistry;
pub use resolvers::{resolve_now, NowResolver};
pub use schema::{build_schema, graphiql, graphql_handler, graphql_router, graphql_sdl, DateTimeSchema};
pub use types::{DateTimeFormatter, DateTimeResult, LocalePatterns};
