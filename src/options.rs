//! Configuration for [`crate::TranslationSet`].

use crate::resource::DEFAULT_SOURCE_LOCALE;

/// Construction options for a translation set.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SetOptions {
    /// Source locale of the resources this set is expected to hold.
    pub source_locale: String,
}

impl Default for SetOptions {
    fn default() -> Self {
        Self {
            source_locale: DEFAULT_SOURCE_LOCALE.to_string(),
        }
    }
}

impl SetOptions {
    /// Creates default options.
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the source locale.
    pub fn with_source_locale(mut self, source_locale: impl Into<String>) -> Self {
        self.source_locale = source_locale.into();
        self
    }
}
