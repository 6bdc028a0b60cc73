//! Message catalogs and the process-wide catalog store

use crate::error::{I18nError, I18nResult};
use crate::locale::Locale;
use crate::translator::Translator;
use std::collections::{BTreeMap, HashMap};
use std::path::Path;
use std::sync::Arc;

/// File name of a catalog inside its `<root>/<code>/` directory
pub const CATALOG_FILE_NAME: &str = "messages.json";

/// Translated strings for one locale, keyed by message id
#[derive(Debug, Clone)]
pub struct Catalog {
    locale: Locale,
    messages: HashMap<String, String>,
}

impl Catalog {
    pub fn new(locale: Locale, messages: HashMap<String, String>) -> Self {
        Self { locale, messages }
    }

    /// Parse a catalog from a JSON object of message id to string
    pub fn from_json_str(locale: Locale, json: &str) -> Result<Self, serde_json::Error> {
        let messages: HashMap<String, String> = serde_json::from_str(json)?;
        Ok(Self::new(locale, messages))
    }

    pub fn locale(&self) -> &Locale {
        &self.locale
    }

    pub fn get(&self, message_id: &str) -> Option<&str> {
        self.messages.get(message_id).map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.messages.len()
    }

    pub fn is_empty(&self) -> bool {
        self.messages.is_empty()
    }
}

/// Look up `message_id` in `catalog`
pub fn translate<'a>(catalog: &'a Catalog, message_id: &str) -> I18nResult<&'a str> {
    catalog.get(message_id).ok_or_else(|| I18nError::MissingTranslation {
        locale: catalog.locale.to_string(),
        message_id: message_id.to_string(),
    })
}

#[derive(Debug)]
struct StoreInner {
    catalogs: BTreeMap<Locale, Catalog>,
    locales: Vec<Locale>,
}

/// Immutable set of catalogs, one per supported locale
///
/// Locales are kept in ascending order and the first one is the default used
/// whenever negotiation finds no match.
#[derive(Debug, Clone)]
pub struct CatalogStore {
    inner: Arc<StoreInner>,
}

impl CatalogStore {
    /// Build a store from already-parsed catalogs
    pub fn load(catalogs: impl IntoIterator<Item = Catalog>) -> I18nResult<Self> {
        let catalogs: BTreeMap<Locale, Catalog> = catalogs
            .into_iter()
            .map(|catalog| (catalog.locale.clone(), catalog))
            .collect();

        if catalogs.is_empty() {
            return Err(I18nError::NoLocales);
        }

        let locales = catalogs.keys().cloned().collect();
        Ok(Self {
            inner: Arc::new(StoreInner { catalogs, locales }),
        })
    }

    /// Read `<root>/<code>/messages.json` for every requested locale
    ///
    /// Any missing or malformed catalog fails the whole load.
    pub fn load_dir(root: impl AsRef<Path>, locales: &[Locale]) -> I18nResult<Self> {
        let root = root.as_ref();
        let mut catalogs = Vec::with_capacity(locales.len());

        for locale in locales {
            let path = root.join(locale.as_str()).join(CATALOG_FILE_NAME);
            let content = std::fs::read_to_string(&path).map_err(|source| I18nError::CatalogRead {
                locale: locale.to_string(),
                path: path.clone(),
                source,
            })?;
            let catalog =
                Catalog::from_json_str(locale.clone(), &content).map_err(|source| I18nError::CatalogParse {
                    locale: locale.to_string(),
                    path: path.clone(),
                    source,
                })?;

            tracing::info!(locale = %locale, messages = catalog.len(), path = %path.display(), "Loaded message catalog");
            catalogs.push(catalog);
        }

        Self::load(catalogs)
    }

    /// Supported locales in ascending order
    pub fn available_locales(&self) -> &[Locale] {
        &self.inner.locales
    }

    /// The fallback locale, i.e. the first available one
    pub fn default_locale(&self) -> &Locale {
        &self.inner.locales[0]
    }

    pub fn contains(&self, locale: &Locale) -> bool {
        self.inner.catalogs.contains_key(locale)
    }

    pub fn catalog(&self, locale: &Locale) -> Option<&Catalog> {
        self.inner.catalogs.get(locale)
    }

    /// Hand out a translator bound to `locale`
    ///
    /// Unsupported locales yield a translator for the default locale.
    pub fn activate(&self, locale: &Locale) -> Translator {
        let active = if self.contains(locale) {
            locale.clone()
        } else {
            tracing::debug!(requested = %locale, fallback = %self.default_locale(), "Unsupported locale, using default");
            self.default_locale().clone()
        };
        Translator::new(active, self.clone())
    }
}
