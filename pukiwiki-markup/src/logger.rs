//! Logging capability injected into a render call.
//!
//! The converter never talks to a global logger directly. Callers hand a
//! [`MarkupLogger`] to [`crate::render`] (or use [`LogLogger`], which forwards
//! to the `log` facade) and receive one debug record per recognized block.
use std::fmt;

/// Sink for debug-level traces of block recognition.
pub trait MarkupLogger {
  /// Record a debug message.
  fn debug(&self, message: fmt::Arguments<'_>);
}

/// Forwards to `log::debug!` under the `pukiwiki_markup` target.
#[derive(Debug, Clone, Copy, Default)]
pub struct LogLogger;

impl MarkupLogger for LogLogger {
  fn debug(&self, message: fmt::Arguments<'_>) {
    log::debug!(target: "pukiwiki_markup", "{message}");
  }
}

/// Discards everything.
#[derive(Debug, Clone, Copy, Default)]
pub struct NoopLogger;

impl MarkupLogger for NoopLogger {
  fn debug(&self, _message: fmt::Arguments<'_>) {}
}

impl<L: MarkupLogger + ?Sized> MarkupLogger for &L {
  fn debug(&self, message: fmt::Arguments<'_>) {
    (**self).debug(message);
  }
}
