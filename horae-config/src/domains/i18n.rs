//! Message catalog and language negotiation configuration

use crate::error::ConfigResult;
use crate::validation::{validate_required_string, Validatable};
use horae_i18n::Locale;
use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use std::path::PathBuf;

/// I18n configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct I18nConfig {
    /// Directory holding `<code>/messages.json` catalogs
    #[serde(default = "default_locale_dir")]
    pub locale_dir: PathBuf,

    /// Locale codes to load; the lexicographically smallest becomes the default
    #[serde(default = "default_locales")]
    pub locales: Vec<String>,

    /// Cookie consulted before `Accept-Language`, if any
    #[serde(default = "default_cookie_name")]
    pub cookie_name: Option<String>,
}

impl Default for I18nConfig {
    fn default() -> Self {
        Self {
            locale_dir: default_locale_dir(),
            locales: default_locales(),
            cookie_name: default_cookie_name(),
        }
    }
}

impl Validatable for I18nConfig {
    fn validate(&self) -> ConfigResult<()> {
        if self.locales.is_empty() {
            return Err(self.validation_error("At least one locale must be configured"));
        }

        let mut seen = HashSet::new();
        for code in &self.locales {
            validate_required_string(code, "locale", self.domain_name())?;
            let locale = Locale::parse(code)
                .map_err(|_| self.validation_error(format!("'{}' is not a valid language tag", code)))?;
            if !seen.insert(locale) {
                return Err(self.validation_error(format!("Duplicate locale '{}'", code)));
            }
        }

        if let Some(cookie) = &self.cookie_name {
            validate_required_string(cookie, "cookie_name", self.domain_name())?;
        }

        Ok(())
    }

    fn domain_name(&self) -> &'static str {
        "i18n"
    }
}

fn default_locale_dir() -> PathBuf {
    PathBuf::from("locale")
}

fn default_locales() -> Vec<String> {
    vec!["en".to_string(), "fr".to_string()]
}

fn default_cookie_name() -> Option<String> {
    Some("language".to_string())
}
