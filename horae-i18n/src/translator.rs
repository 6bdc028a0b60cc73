//! Request-scoped translators

use crate::catalog::{translate, CatalogStore};
use crate::error::{I18nError, I18nResult};
use crate::locale::Locale;

/// Resolves message ids against one locale's catalog
///
/// Obtained from [`CatalogStore::activate`]. Cloning is cheap; every clone
/// shares the same immutable store.
#[derive(Debug, Clone)]
pub struct Translator {
    locale: Locale,
    store: CatalogStore,
}

impl Translator {
    pub(crate) fn new(locale: Locale, store: CatalogStore) -> Self {
        Self { locale, store }
    }

    pub fn locale(&self) -> &Locale {
        &self.locale
    }

    /// Strict lookup in the active locale only
    pub fn try_translate(&self, message_id: &str) -> I18nResult<&str> {
        let catalog = self.store.catalog(&self.locale).ok_or_else(|| I18nError::MissingTranslation {
            locale: self.locale.to_string(),
            message_id: message_id.to_string(),
        })?;
        translate(catalog, message_id)
    }

    /// Lookup that never fails
    ///
    /// Falls back to the default locale's string, then to the message id.
    pub fn translate(&self, message_id: &str) -> String {
        match self.try_translate(message_id) {
            Ok(text) => text.to_string(),
            Err(err) => {
                tracing::warn!(error = %err, "Falling back for missing translation");
                self.store
                    .catalog(self.store.default_locale())
                    .and_then(|catalog| catalog.get(message_id))
                    .unwrap_or(message_id)
                    .to_string()
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::Catalog;

    fn store() -> CatalogStore {
        let en = Catalog::from_json_str(
            Locale::parse("en").unwrap(),
            r#"{"title": "Current time", "only english": "english only"}"#,
        )
        .unwrap();
        let fr = Catalog::from_json_str(Locale::parse("fr").unwrap(), r#"{"title": "Heure actuelle"}"#).unwrap();
        CatalogStore::load(vec![en, fr]).unwrap()
    }

    #[test]
    fn test_translate_in_active_locale() {
        let translator = store().activate(&Locale::parse("fr").unwrap());
        assert_eq!(translator.translate("title"), "Heure actuelle");
        assert_eq!(translator.try_translate("title").unwrap(), "Heure actuelle");
    }

    #[test]
    fn test_missing_falls_back_to_default_locale() {
        let translator = store().activate(&Locale::parse("fr").unwrap());
        assert!(translator.try_translate("only english").is_err());
        assert_eq!(translator.translate("only english"), "english only");
    }

    #[test]
    fn test_missing_everywhere_returns_message_id() {
        let translator = store().activate(&Locale::parse("fr").unwrap());
        assert_eq!(translator.translate("nobody has this"), "nobody has this");
    }

    #[test]
    fn test_translators_are_independent() {
        let store = store();
        let en = store.activate(&Locale::parse("en").unwrap());
        let fr = store.activate(&Locale::parse("fr").unwrap());
        assert_eq!(en.translate("title"), "Current time");
        assert_eq!(fr.translate("title"), "Heure actuelle");
        assert_eq!(en.translate("title"), "Current time");
    }
}
