//! Service construction and logging setup

use anyhow::{Context, Result};
use horae_config::{HoraeConfig, LogFormat, LoggingConfig};
use horae_graphql_api::{
    Clock, DateTimeFormatter, GraphQLConfig, LocalePatterns, NowResolver, SchemaRegistry, SystemClock,
};
use horae_i18n::{CatalogStore, Locale};
use horae_web::LanguageNegotiator;
use std::sync::Arc;
use tracing_subscriber::EnvFilter;

/// Everything the HTTP layer needs, built once at startup
pub struct ServiceContainer {
    pub catalogs: CatalogStore,
    pub registry: Arc<SchemaRegistry>,
    pub negotiator: Arc<LanguageNegotiator>,
}

impl ServiceContainer {
    /// Build services reading the wall clock
    pub fn new(config: &HoraeConfig) -> Result<Self> {
        Self::with_clock(config, Arc::new(SystemClock))
    }

    /// Build services around a caller-provided clock
    pub fn with_clock(config: &HoraeConfig, clock: Arc<dyn Clock>) -> Result<Self> {
        let locales = config
            .i18n
            .locales
            .iter()
            .map(|code| Locale::parse(code))
            .collect::<Result<Vec<_>, _>>()
            .context("Invalid locale in configuration")?;

        let catalogs = CatalogStore::load_dir(&config.i18n.locale_dir, &locales).with_context(|| {
            format!("Failed to load message catalogs from {}", config.i18n.locale_dir.display())
        })?;

        let timezone: chrono_tz::Tz = config
            .graphql
            .timezone
            .parse()
            .map_err(|e| anyhow::anyhow!("Unknown timezone '{}': {}", config.graphql.timezone, e))?;

        let mut formatter = DateTimeFormatter::new(timezone);
        for (code, format) in &config.graphql.formats {
            let locale = Locale::parse(code).with_context(|| format!("Invalid locale '{}' in graphql.formats", code))?;
            formatter = formatter.with_patterns(locale, LocalePatterns::new(&format.date, &format.time))?;
        }

        let schema_config = GraphQLConfig {
            enable_introspection: config.graphql.enable_introspection,
            max_query_depth: config.graphql.max_query_depth,
            max_query_complexity: config.graphql.max_query_complexity,
        };
        let registry = SchemaRegistry::build(&catalogs, NowResolver::new(clock, formatter), &schema_config)?;

        let mut negotiator = LanguageNegotiator::new(&catalogs);
        if let Some(cookie) = &config.i18n.cookie_name {
            negotiator = negotiator.with_cookie(cookie.clone());
        }

        tracing::info!(
            locales = ?catalogs.available_locales().iter().map(Locale::as_str).collect::<Vec<_>>(),
            default = %catalogs.default_locale(),
            timezone = %timezone,
            "Services initialized"
        );

        Ok(Self {
            catalogs,
            registry: Arc::new(registry),
            negotiator: Arc::new(negotiator),
        })
    }
}

/// Install the global tracing subscriber
///
/// A subscriber that is already installed is left in place.
pub fn init_logging(config: &LoggingConfig) {
    let env_filter = EnvFilter::try_new(config.level.to_string())
        .or_else(|_| EnvFilter::try_from_default_env())
        .unwrap_or_else(|_| EnvFilter::new("info"));

    let builder = tracing_subscriber::fmt()
        .with_env_filter(env_filter)
        .with_target(false)
        .with_file(config.include_location)
        .with_line_number(config.include_location);

    let result = match config.format {
        LogFormat::Json => builder.json().try_init(),
        LogFormat::Compact => builder.compact().try_init(),
        LogFormat::Pretty => builder.pretty().try_init(),
        LogFormat::Text => builder.try_init(),
    };

    if result.is_err() {
        tracing::debug!("Global tracing subscriber already initialized, skipping");
    }
}
