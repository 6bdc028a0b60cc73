//! GraphQL endpoint and schema configuration

use crate::error::ConfigResult;
use crate::validation::{validate_positive, validate_required_string, Validatable};
use horae_i18n::Locale;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Paths served by the server itself
const RESERVED_PATHS: &[&str] = &["/", "/health", "/schema"];

/// GraphQL configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct GraphQLConfig {
    /// Path the GraphQL endpoint is mounted on
    #[serde(default = "default_endpoint")]
    pub endpoint: String,

    /// Serve the GraphiQL explorer on `GET <endpoint>`
    #[serde(default = "crate::domains::utils::default_true")]
    pub enable_graphiql: bool,

    /// Allow introspection queries
    #[serde(default = "crate::domains::utils::default_true")]
    pub enable_introspection: bool,

    /// Maximum query depth
    #[serde(default = "default_max_query_depth")]
    pub max_query_depth: Option<usize>,

    /// Maximum query complexity
    #[serde(default = "default_max_query_complexity")]
    pub max_query_complexity: Option<usize>,

    /// IANA timezone all dates and times are reported in
    #[serde(default = "default_timezone")]
    pub timezone: String,

    /// Per-locale strftime overrides, keyed by locale code
    #[serde(default)]
    pub formats: BTreeMap<String, LocaleFormatConfig>,
}

/// strftime patterns for one locale
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LocaleFormatConfig {
    pub date: String,
    pub time: String,
}

impl Default for GraphQLConfig {
    fn default() -> Self {
        Self {
            endpoint: default_endpoint(),
            enable_graphiql: true,
            enable_introspection: true,
            max_query_depth: default_max_query_depth(),
            max_query_complexity: default_max_query_complexity(),
            timezone: default_timezone(),
            formats: BTreeMap::new(),
        }
    }
}

impl Validatable for GraphQLConfig {
    fn validate(&self) -> ConfigResult<()> {
        validate_required_string(&self.endpoint, "endpoint", self.domain_name())?;
        if !self.endpoint.starts_with('/') {
            return Err(self.validation_error(format!("endpoint must start with '/', got '{}'", self.endpoint)));
        }
        if RESERVED_PATHS.contains(&self.endpoint.as_str()) {
            return Err(self.validation_error(format!("endpoint '{}' is reserved", self.endpoint)));
        }

        if let Some(depth) = self.max_query_depth {
            validate_positive(depth, "max_query_depth", self.domain_name())?;
        }
        if let Some(complexity) = self.max_query_complexity {
            validate_positive(complexity, "max_query_complexity", self.domain_name())?;
        }

        self.timezone
            .parse::<chrono_tz::Tz>()
            .map_err(|e| self.validation_error(format!("Unknown timezone '{}': {}", self.timezone, e)))?;

        // Patterns themselves are checked when the formatter installs them
        for (code, format) in &self.formats {
            Locale::parse(code)
                .map_err(|_| self.validation_error(format!("formats key '{}' is not a valid language tag", code)))?;
            validate_required_string(&format.date, "date", self.domain_name())?;
            validate_required_string(&format.time, "time", self.domain_name())?;
        }

        Ok(())
    }

    fn domain_name(&self) -> &'static str {
        "graphql"
    }
}

fn default_endpoint() -> String {
    "/graphql".to_string()
}

fn default_max_query_depth() -> Option<usize> {
    Some(15)
}

fn default_max_query_complexity() -> Option<usize> {
    Some(1000)
}

fn default_timezone() -> String {
    "America/Toronto".to_string()
}
