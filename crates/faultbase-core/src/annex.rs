//! User-facing messages
//!
//! Technical messages are for developers. Text meant for end users lives in
//! this annex: one default message plus messages keyed by language tag.
//! Tags match by exact string equality; `en-US` does not fall back to `en`.

use crate::entity::BaseError;
use crate::error::{FaultError, FaultResult};
use std::collections::BTreeMap;

/// Language preferences for [`BaseError::resolve_user_message`]
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct MessageQuery<'a> {
    /// Tried first
    pub preferred: Option<&'a str>,
    /// Tried when the preferred language has no message
    pub fallback: Option<&'a str>,
}

impl<'a> MessageQuery<'a> {
    /// Query with no language preference; resolves to the default message
    pub fn new() -> Self {
        Self::default()
    }

    /// Query preferring `lang`
    pub fn preferred(lang: &'a str) -> Self {
        Self {
            preferred: Some(lang),
            fallback: None,
        }
    }

    /// Set the fallback language
    pub fn with_fallback(mut self, lang: &'a str) -> Self {
        self.fallback = Some(lang);
        self
    }
}

impl BaseError {
    /// Set the default user message, replacing any previous one
    pub fn set_default_user_message(&mut self, text: impl Into<String>) -> &mut Self {
        self.default_user_message = Some(text.into());
        self
    }

    /// Add a message for `lang`.
    ///
    /// Fails with [`FaultError::DuplicateLocalization`] when `lang` already has
    /// one; use [`update_localized_message`](Self::update_localized_message) to replace it.
    pub fn add_localized_message(
        &mut self,
        lang: impl Into<String>,
        text: impl Into<String>,
    ) -> FaultResult<&mut Self> {
        let lang = lang.into();
        if self.localized_messages.contains_key(&lang) {
            return Err(FaultError::duplicate_localization(lang));
        }
        self.localized_messages.insert(lang, text.into());
        Ok(self)
    }

    /// Insert or replace the message for `lang`
    pub fn update_localized_message(
        &mut self,
        lang: impl Into<String>,
        text: impl Into<String>,
    ) -> &mut Self {
        self.localized_messages.insert(lang.into(), text.into());
        self
    }

    /// Owned variant of [`set_default_user_message`](Self::set_default_user_message)
    pub fn with_user_message(mut self, text: impl Into<String>) -> Self {
        self.set_default_user_message(text);
        self
    }

    /// Owned variant of [`add_localized_message`](Self::add_localized_message)
    pub fn with_localized_message(
        mut self,
        lang: impl Into<String>,
        text: impl Into<String>,
    ) -> FaultResult<Self> {
        self.add_localized_message(lang, text)?;
        Ok(self)
    }

    /// Pick the message to show an end user: preferred language, then
    /// fallback language, then the default message.
    pub fn resolve_user_message(&self, query: MessageQuery<'_>) -> Option<&str> {
        query
            .preferred
            .and_then(|lang| self.localized_messages.get(lang))
            .or_else(|| {
                query
                    .fallback
                    .and_then(|lang| self.localized_messages.get(lang))
            })
            .map(String::as_str)
            .or(self.default_user_message.as_deref())
    }

    /// Default user message
    pub fn default_user_message(&self) -> Option<&str> {
        self.default_user_message.as_deref()
    }

    /// Localized messages by language tag
    pub fn localized_messages(&self) -> &BTreeMap<String, String> {
        &self.localized_messages
    }

    /// Whether any user-facing text was attached
    pub fn has_user_messages(&self) -> bool {
        self.default_user_message.is_some() || !self.localized_messages.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_duplicate_add_fails() {
        let mut error = BaseError::new("boom");
        error.add_localized_message("en", "a").unwrap();

        let result = error.add_localized_message("en", "b");
        assert_eq!(
            result.err(),
            Some(FaultError::DuplicateLocalization {
                lang: "en".to_string()
            })
        );
        assert_eq!(error.localized_messages()["en"], "a");
    }

    #[test]
    fn test_update_overwrites() {
        let mut error = BaseError::new("boom");
        error.add_localized_message("en", "a").unwrap();
        error.update_localized_message("en", "b");

        assert_eq!(
            error.resolve_user_message(MessageQuery::preferred("en")),
            Some("b")
        );
    }

    #[test]
    fn test_update_inserts_new_language() {
        let mut error = BaseError::new("boom");
        error.update_localized_message("de", "Fehler");
        assert_eq!(error.localized_messages().len(), 1);
    }

    #[test]
    fn test_resolution_order() {
        let mut error = BaseError::new("boom");
        error
            .set_default_user_message("D")
            .update_localized_message("en", "E");

        // preferred missing, no fallback: default
        assert_eq!(
            error.resolve_user_message(MessageQuery::preferred("fr")),
            Some("D")
        );
        // preferred missing, fallback present
        assert_eq!(
            error.resolve_user_message(MessageQuery::preferred("fr").with_fallback("en")),
            Some("E")
        );

        error.update_localized_message("fr", "F");
        assert_eq!(
            error.resolve_user_message(MessageQuery::preferred("fr").with_fallback("en")),
            Some("F")
        );
        assert_eq!(error.resolve_user_message(MessageQuery::new()), Some("D"));
    }

    #[test]
    fn test_exact_tag_matching() {
        let error = BaseError::new("boom")
            .with_localized_message("en", "E")
            .unwrap();
        assert_eq!(
            error.resolve_user_message(MessageQuery::preferred("en-US")),
            None
        );
    }

    #[test]
    fn test_resolve_without_annex() {
        let error = BaseError::new("boom");
        assert_eq!(error.resolve_user_message(MessageQuery::preferred("en")), None);
        assert!(!error.has_user_messages());
    }

    #[test]
    fn test_default_message_overwrite() {
        let error = BaseError::new("boom")
            .with_user_message("first")
            .with_user_message("second");
        assert_eq!(error.default_user_message(), Some("second"));
        assert!(error.has_user_messages());
    }

    #[test]
    fn test_chained_annotation() {
        let mut error = BaseError::new("boom");
        error
            .set_default_user_message("Something went wrong")
            .add_localized_message("en", "Something went wrong")
            .unwrap()
            .add_localized_message("es", "Algo salió mal")
            .unwrap()
            .update_localized_message("en", "Please try again");

        assert_eq!(error.localized_messages().len(), 2);
        assert_eq!(
            error.resolve_user_message(MessageQuery::preferred("en")),
            Some("Please try again")
        );
    }
}
