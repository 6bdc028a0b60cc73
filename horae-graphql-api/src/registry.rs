//! One prebuilt schema per supported locale

use horae_i18n::{CatalogStore, Locale};
use std::collections::BTreeMap;

use crate::{
    context::GraphQLConfig,
    errors::{GraphQLError, Result},
    resolvers::NowResolver,
    schema::{build_schema, DateTimeSchema},
};

/// Immutable set of localized schemas, selected per request
pub struct SchemaRegistry {
    schemas: BTreeMap<Locale, DateTimeSchema>,
    default: Locale,
    default_schema: DateTimeSchema,
}

impl SchemaRegistry {
    /// Build a schema for every locale in `store`
    pub fn build(store: &CatalogStore, resolver: NowResolver, config: &GraphQLConfig) -> Result<Self> {
        let mut schemas = BTreeMap::new();
        for locale in store.available_locales() {
            let translator = store.activate(locale);
            let schema = build_schema(&translator, resolver.clone(), config)?;
            tracing::debug!(locale = %locale, "Built localized schema");
            schemas.insert(locale.clone(), schema);
        }

        // Schemas share their internals, so the fallback is the same instance
        let default = store.default_locale().clone();
        let default_schema = schemas.get(&default).cloned().ok_or_else(|| GraphQLError::Schema {
            locale: default.to_string(),
            message: "default locale is not among the loaded locales".to_string(),
        })?;

        Ok(Self {
            schemas,
            default,
            default_schema,
        })
    }

    /// The schema for `locale`, or the default locale's schema
    pub fn schema_for(&self, locale: &Locale) -> &DateTimeSchema {
        self.schemas.get(locale).unwrap_or(&self.default_schema)
    }

    pub fn locales(&self) -> impl Iterator<Item = &Locale> {
        self.schemas.keys()
    }

    pub fn default_locale(&self) -> &Locale {
        &self.default
    }
}
