//! Best-effort text translation.
//!
//! Translation never fails a record. [`BestEffortTranslator`] wraps any
//! [`Translator`] and turns every failure into the original text with a
//! degraded status.

mod google;

pub use google::{GOOGLE_TRANSLATE_URL, GoogleTranslator, GoogleTranslatorConfig};

use crate::enrichment::best_effort::BestEffort;
use crate::model::NO_MITIGATION;
use thiserror::Error;

/// Longest text accepted by the translation provider, in characters.
pub const MAX_TRANSLATION_CHARS: usize = 5000;

/// Why a translation attempt failed.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum TranslationError {
    #[error("network error: {0}")]
    Network(String),

    #[error("translation service returned status {0}")]
    Status(u16),

    #[error("invalid translation response: {0}")]
    InvalidResponse(String),

    #[error("text of {0} characters exceeds the provider limit")]
    TooLong(usize),
}

/// A synchronous text-in/text-out translation capability.
pub trait Translator {
    /// Translate `text`, returning the translated string.
    fn translate(&self, text: &str) -> Result<String, TranslationError>;
}

/// Translator that never touches the network when it does not need to.
pub struct BestEffortTranslator {
    inner: Option<Box<dyn Translator>>,
}

impl BestEffortTranslator {
    /// Wrap a translator.
    #[must_use]
    pub fn new(inner: Box<dyn Translator>) -> Self {
        Self { inner: Some(inner) }
    }

    /// A translator that passes every text through unchanged.
    #[must_use]
    pub const fn disabled() -> Self {
        Self { inner: None }
    }

    /// Translate `text`, falling back to the input on any failure.
    ///
    /// Empty text and the no-mitigation sentinel are returned verbatim
    /// without calling the provider.
    pub fn translate(&self, text: &str) -> BestEffort<String> {
        let Some(inner) = self.inner.as_ref() else {
            return BestEffort::skipped(text.to_string());
        };
        if text.trim().is_empty() || text == NO_MITIGATION {
            return BestEffort::skipped(text.to_string());
        }

        let chars = text.chars().count();
        let result = if chars > MAX_TRANSLATION_CHARS {
            Err(TranslationError::TooLong(chars))
        } else {
            inner.translate(text)
        };

        match result {
            Ok(translated) if !translated.trim().is_empty() => BestEffort::complete(translated),
            Ok(_) => {
                tracing::warn!("Translation returned empty text, keeping original");
                BestEffort::degraded(text.to_string(), "empty translation")
            }
            Err(e) => {
                tracing::warn!("Translation failed, keeping original text: {}", e);
                BestEffort::degraded(text.to_string(), e.to_string())
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::enrichment::best_effort::Status;
    use std::cell::RefCell;
    use std::rc::Rc;

    struct Recording {
        seen: Rc<RefCell<Vec<String>>>,
        reply: Result<String, TranslationError>,
    }

    impl Translator for Recording {
        fn translate(&self, text: &str) -> Result<String, TranslationError> {
            self.seen.borrow_mut().push(text.to_string());
            self.reply.clone()
        }
    }

    fn translator(
        reply: Result<String, TranslationError>,
    ) -> (BestEffortTranslator, Rc<RefCell<Vec<String>>>) {
        let seen = Rc::new(RefCell::new(Vec::new()));
        let inner = Recording {
            seen: Rc::clone(&seen),
            reply,
        };
        (BestEffortTranslator::new(Box::new(inner)), seen)
    }

    #[test]
    fn test_translates_text() {
        let (t, seen) = translator(Ok("Execução remota de código".to_string()));
        let out = t.translate("Remote code execution");

        assert_eq!(out.value, "Execução remota de código");
        assert_eq!(out.status, Status::Complete);
        assert_eq!(seen.borrow().as_slice(), ["Remote code execution"]);
    }

    #[test]
    fn test_sentinel_is_never_sent() {
        let (t, seen) = translator(Ok("No mitigation specified".to_string()));
        let out = t.translate(NO_MITIGATION);

        assert_eq!(out.value, NO_MITIGATION);
        assert_eq!(out.status, Status::Skipped);
        assert!(seen.borrow().is_empty());
    }

    #[test]
    fn test_empty_text_is_skipped() {
        let (t, seen) = translator(Ok("x".to_string()));
        assert_eq!(t.translate("  ").status, Status::Skipped);
        assert!(seen.borrow().is_empty());
    }

    #[test]
    fn test_failure_keeps_original() {
        let (t, _) = translator(Err(TranslationError::Status(429)));
        let out = t.translate("Remote code execution");

        assert_eq!(out.value, "Remote code execution");
        assert!(out.is_degraded());
    }

    #[test]
    fn test_empty_reply_keeps_original() {
        let (t, _) = translator(Ok(String::new()));
        let out = t.translate("Remote code execution");
        assert_eq!(out.value, "Remote code execution");
        assert!(out.is_degraded());
    }

    #[test]
    fn test_long_text_not_sent() {
        let (t, seen) = translator(Ok("x".to_string()));
        let long = "a".repeat(MAX_TRANSLATION_CHARS + 1);
        let out = t.translate(&long);

        assert_eq!(out.value, long);
        assert!(out.is_degraded());
        assert!(seen.borrow().is_empty());
    }

    #[test]
    fn test_disabled_passes_through() {
        let t = BestEffortTranslator::disabled();
        let out = t.translate("Remote code execution");
        assert_eq!(out.value, "Remote code execution");
        assert_eq!(out.status, Status::Skipped);
    }
}
