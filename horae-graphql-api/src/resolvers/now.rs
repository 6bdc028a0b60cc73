//! Resolver for the `now` query

use horae_i18n::Locale;
use std::sync::Arc;

use crate::clock::Clock;
use crate::errors::FormatError;
use crate::types::{DateTimeFormatter, DateTimeResult};

/// Read the clock and render it for `language`
pub fn resolve_now(
    clock: &dyn Clock,
    formatter: &DateTimeFormatter,
    language: &Locale,
) -> Result<DateTimeResult, FormatError> {
    formatter.format(clock.now(), language)
}

/// Clock and formatter shared by every localized schema
#[derive(Clone)]
pub struct NowResolver {
    clock: Arc<dyn Clock>,
    formatter: Arc<DateTimeFormatter>,
}

impl NowResolver {
    pub fn new(clock: Arc<dyn Clock>, formatter: DateTimeFormatter) -> Self {
        Self {
            clock,
            formatter: Arc::new(formatter),
        }
    }

    pub fn resolve(&self, language: &Locale) -> Result<DateTimeResult, FormatError> {
        resolve_now(self.clock.as_ref(), &self.formatter, language)
    }
}
