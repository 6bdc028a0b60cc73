//! Schema options and shared handler state

use std::sync::Arc;

use crate::registry::SchemaRegistry;

/// Limits applied to every localized schema
#[derive(Debug, Clone)]
pub struct GraphQLConfig {
    pub enable_introspection: bool,
    pub max_query_depth: Option<usize>,
    pub max_query_complexity: Option<usize>,
}

impl Default for GraphQLConfig {
    fn default() -> Self {
        Self {
            enable_introspection: true,
            max_query_depth: Some(15),
            max_query_complexity: Some(1000),
        }
    }
}

/// State shared by the GraphQL handlers
#[derive(Clone)]
pub struct GraphQLState {
    pub registry: Arc<SchemaRegistry>,
    /// Path the endpoint is mounted on, used by GraphiQL
    pub endpoint: String,
}

impl GraphQLState {
    pub fn new(registry: SchemaRegistry, endpoint: impl Into<String>) -> Self {
        Self {
            registry: Arc::new(registry),
            endpoint: endpoint.into(),
        }
    }
}
