//! Locale identifiers

use crate::error::{I18nError, I18nResult};
use std::cmp::Ordering;
use std::fmt;
use std::hash::{Hash, Hasher};
use std::str::FromStr;
use unic_langid::LanguageIdentifier;

/// A BCP 47 language tag such as `en` or `fr-ca`
///
/// Tags are canonicalized by `unic-langid` and then lowercased, so `fr_CA`,
/// `FR-ca` and `fr-CA` are the same locale. Equality and ordering follow the
/// lowercased tag.
#[derive(Debug, Clone)]
pub struct Locale {
    id: LanguageIdentifier,
    tag: String,
}

impl Locale {
    /// Parse and normalize a language tag
    pub fn parse(tag: &str) -> I18nResult<Self> {
        let trimmed = tag.trim();
        let id: LanguageIdentifier = trimmed
            .parse()
            .map_err(|_| I18nError::InvalidLocale(trimmed.to_string()))?;
        // `und` is what an empty tag parses to
        if id.language.is_empty() {
            return Err(I18nError::InvalidLocale(trimmed.to_string()));
        }

        let tag = id.to_string().to_ascii_lowercase();
        Ok(Self { id, tag })
    }

    pub fn as_str(&self) -> &str {
        &self.tag
    }

    /// The language part of the tag, `fr` for `fr-ca`
    pub fn primary_subtag(&self) -> &str {
        self.id.language.as_str()
    }
}

impl PartialEq for Locale {
    fn eq(&self, other: &Self) -> bool {
        self.tag == other.tag
    }
}

impl Eq for Locale {}

impl Hash for Locale {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.tag.hash(state);
    }
}

impl PartialOrd for Locale {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for Locale {
    fn cmp(&self, other: &Self) -> Ordering {
        self.tag.cmp(&other.tag)
    }
}

impl FromStr for Locale {
    type Err = I18nError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

impl AsRef<str> for Locale {
    fn as_ref(&self) -> &str {
        &self.tag
    }
}

impl fmt::Display for Locale {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.tag)
    }
}
