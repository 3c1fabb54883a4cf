//! Error types for wiki markup conversion.

/// Result type for conversion operations.
pub type MarkupResult<T> = Result<T, MarkupError>;

/// Errors that can occur while converting wiki markup.
///
/// None of these are caused by user input: every string is valid markup.
/// They signal that the converter reached a state its own dispatch rules
/// should have made impossible.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum MarkupError {
  #[error("Internal consistency fault in {context}: no rule matched {text:?}")]
  Inconsistent {
    /// Which stage of the pipeline failed.
    context: &'static str,
    /// The input fragment that could not be dispatched.
    text:    String,
  },
}

impl MarkupError {
  pub(crate) fn inconsistent(context: &'static str, text: &str) -> Self {
    Self::Inconsistent {
      context,
      text: text.to_owned(),
    }
  }
}
