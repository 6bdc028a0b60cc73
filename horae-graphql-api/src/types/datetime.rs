//! Locale-aware date and time rendering

use chrono::format::{Item, StrftimeItems};
use chrono::{DateTime, TimeZone, Utc};
use chrono_tz::Tz;
use horae_i18n::Locale;
use serde::Serialize;
use std::collections::HashMap;
use std::fmt::Write;

use crate::errors::FormatError;

/// Payload of the `DateTime` GraphQL type
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DateTimeResult {
    pub date: String,
    pub time: String,
}

/// strftime patterns used for one locale
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LocalePatterns {
    pub date: String,
    pub time: String,
}

impl LocalePatterns {
    pub fn new(date: impl Into<String>, time: impl Into<String>) -> Self {
        Self {
            date: date.into(),
            time: time.into(),
        }
    }

    /// `3/15/2024`, `2:30:00 PM`
    pub fn english() -> Self {
        Self::new("%-m/%-d/%Y", "%-I:%M:%S %p")
    }

    /// `15/03/2024`, `14:30:00`
    pub fn french() -> Self {
        Self::new("%d/%m/%Y", "%H:%M:%S")
    }

    fn validate(&self, locale: &Locale) -> Result<(), FormatError> {
        for (field, pattern) in [("date", &self.date), ("time", &self.time)] {
            if StrftimeItems::new(pattern).any(|item| matches!(item, Item::Error)) {
                return Err(FormatError::InvalidPattern {
                    locale: locale.to_string(),
                    field,
                    pattern: pattern.clone(),
                });
            }
        }
        Ok(())
    }
}

/// Renders instants in a fixed timezone with per-locale patterns
///
/// Locales without their own patterns try their primary language subtag,
/// then use the English patterns.
#[derive(Debug, Clone)]
pub struct DateTimeFormatter {
    timezone: Tz,
    patterns: HashMap<Locale, LocalePatterns>,
    fallback: LocalePatterns,
}

impl DateTimeFormatter {
    pub fn new(timezone: Tz) -> Self {
        let mut patterns = HashMap::new();
        for (code, locale_patterns) in [("en", LocalePatterns::english()), ("fr", LocalePatterns::french())] {
            if let Ok(locale) = Locale::parse(code) {
                patterns.insert(locale, locale_patterns);
            }
        }

        Self {
            timezone,
            patterns,
            fallback: LocalePatterns::english(),
        }
    }

    /// Register or replace the patterns for `locale`
    pub fn with_patterns(mut self, locale: Locale, patterns: LocalePatterns) -> Result<Self, FormatError> {
        patterns.validate(&locale)?;
        self.patterns.insert(locale, patterns);
        Ok(self)
    }

    pub fn timezone(&self) -> Tz {
        self.timezone
    }

    pub fn patterns_for(&self, locale: &Locale) -> &LocalePatterns {
        self.patterns
            .get(locale)
            .or_else(|| {
                Locale::parse(locale.primary_subtag())
                    .ok()
                    .and_then(|primary| self.patterns.get(&primary))
            })
            .unwrap_or(&self.fallback)
    }

    /// Render `instant` as date and time strings for `locale`
    pub fn format(&self, instant: DateTime<Utc>, locale: &Locale) -> Result<DateTimeResult, FormatError> {
        let local = self.timezone.from_utc_datetime(&instant.naive_utc());
        let patterns = self.patterns_for(locale);

        Ok(DateTimeResult {
            date: render(&local, &patterns.date)?,
            time: render(&local, &patterns.time)?,
        })
    }
}

fn render(local: &DateTime<Tz>, pattern: &str) -> Result<String, FormatError> {
    let mut out = String::new();
    write!(out, "{}", local.format(pattern)).map_err(|_| FormatError::Render {
        pattern: pattern.to_string(),
    })?;
    Ok(out)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn instant(value: &str) -> DateTime<Utc> {
        DateTime::parse_from_rfc3339(value).unwrap().with_timezone(&Utc)
    }

    fn locale(code: &str) -> Locale {
        Locale::parse(code).unwrap()
    }

    fn toronto() -> DateTimeFormatter {
        DateTimeFormatter::new(chrono_tz::America::Toronto)
    }

    #[test]
    fn test_french_conventions() {
        let result = toronto().format(instant("2024-03-15T14:30:00-04:00"), &locale("fr")).unwrap();
        assert_eq!(result.date, "15/03/2024");
        assert_eq!(result.time, "14:30:00");
    }

    #[test]
    fn test_english_conventions() {
        let result = toronto().format(instant("2024-03-15T14:30:00-04:00"), &locale("en")).unwrap();
        assert_eq!(result.date, "3/15/2024");
        assert_eq!(result.time, "2:30:00 PM");
    }

    #[test]
    fn test_timezone_shifts_the_date() {
        // 02:00 UTC is still the previous evening in Toronto
        let result = toronto().format(instant("2024-01-02T02:00:00Z"), &locale("fr")).unwrap();
        assert_eq!(result.date, "01/01/2024");
        assert_eq!(result.time, "21:00:00");
    }

    #[test]
    fn test_regional_locale_uses_language_patterns() {
        assert_eq!(toronto().patterns_for(&locale("fr-ca")), &LocalePatterns::french());
    }

    #[test]
    fn test_unknown_locale_uses_english() {
        let result = toronto().format(instant("2024-03-15T14:30:00-04:00"), &locale("de")).unwrap();
        assert_eq!(result.date, "3/15/2024");
    }

    #[test]
    fn test_custom_patterns() {
        let formatter = toronto()
            .with_patterns(locale("de"), LocalePatterns::new("%d.%m.%Y", "%H:%M"))
            .unwrap();
        let result = formatter.format(instant("2024-03-15T14:30:00-04:00"), &locale("de")).unwrap();
        assert_eq!(result.date, "15.03.2024");
        assert_eq!(result.time, "14:30");
    }

    #[test]
    fn test_invalid_patterns_rejected() {
        let err = toronto()
            .with_patterns(locale("de"), LocalePatterns::new("%d.%m.%Y", "%Q"))
            .unwrap_err();
        assert!(matches!(err, FormatError::InvalidPattern { field: "time", .. }));
    }
}
