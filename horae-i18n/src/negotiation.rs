//! Language negotiation
//!
//! Picks exactly one supported locale from the client's stated preferences.
//! Negotiation never fails: when nothing matches, the default locale wins.

use crate::locale::Locale;
use std::cmp::Ordering;

/// One entry of an `Accept-Language` header
#[derive(Debug, Clone, PartialEq)]
pub struct LanguageRange {
    /// Lowercased tag, or `*`
    pub tag: String,
    /// Quality weight in `0.0..=1.0`
    pub quality: f32,
}

impl LanguageRange {
    pub fn new(tag: impl Into<String>, quality: f32) -> Self {
        Self {
            tag: tag.into().to_ascii_lowercase(),
            quality,
        }
    }

    pub fn is_wildcard(&self) -> bool {
        self.tag == "*"
    }

    fn primary_subtag(&self) -> &str {
        self.tag.split('-').next().unwrap_or(&self.tag)
    }

    /// Whether the range names `locale` or a language it belongs to
    ///
    /// `en` covers `en-gb`; `en-gb` does not cover `en`.
    fn covers(&self, locale: &Locale) -> bool {
        locale
            .as_str()
            .strip_prefix(self.tag.as_str())
            .is_some_and(|rest| rest.is_empty() || rest.starts_with('-'))
    }
}

/// Parse an `Accept-Language` header value
///
/// Entries with an unparsable tag or weight are skipped. The result keeps
/// header order; [`negotiate`] applies the weights.
pub fn parse_accept_language(header: &str) -> Vec<LanguageRange> {
    header
        .split(',')
        .filter_map(|entry| {
            let mut parts = entry.split(';');
            let tag = match parts.next()?.trim() {
                "*" => "*".to_string(),
                tag => Locale::parse(tag).ok()?.to_string(),
            };

            let mut quality = 1.0;
            for param in parts {
                let param = param.trim();
                if let Some(value) = param.strip_prefix("q=").or_else(|| param.strip_prefix("Q=")) {
                    quality = value.trim().parse::<f32>().ok().filter(|q| (0.0..=1.0).contains(q))?;
                }
            }

            Some(LanguageRange::new(tag, quality))
        })
        .collect()
}

/// Select the best available locale for `preferences`
///
/// Higher weights win, ties keep their original order and `q=0` excludes a
/// range. A range matches a locale exactly or by primary language subtag, so
/// `fr-CA` selects `fr`. `*` selects `default`, or the first available locale
/// a `q=0` range has not refused.
pub fn negotiate(preferences: &[LanguageRange], available: &[Locale], default: &Locale) -> Locale {
    let refused: Vec<&LanguageRange> = preferences
        .iter()
        .filter(|range| range.quality <= 0.0 && !range.is_wildcard())
        .collect();
    let acceptable = |locale: &&Locale| !refused.iter().any(|range| range.covers(locale));

    let mut ranked: Vec<&LanguageRange> = preferences.iter().filter(|range| range.quality > 0.0).collect();
    ranked.sort_by(|a, b| b.quality.partial_cmp(&a.quality).unwrap_or(Ordering::Equal));

    for range in ranked {
        let chosen = if range.is_wildcard() {
            std::iter::once(default).chain(available).find(acceptable)
        } else {
            match_range(range, available).filter(acceptable)
        };
        if let Some(locale) = chosen {
            return locale.clone();
        }
    }

    default.clone()
}

fn match_range<'a>(range: &LanguageRange, available: &'a [Locale]) -> Option<&'a Locale> {
    let primary = range.primary_subtag();
    available
        .iter()
        .find(|locale| locale.as_str() == range.tag)
        .or_else(|| available.iter().find(|locale| locale.as_str() == primary))
        .or_else(|| available.iter().find(|locale| locale.primary_subtag() == primary))
}
