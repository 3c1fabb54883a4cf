//! Convenience entry points mirroring the host-facing conversion call.
use log::error;

use super::{
  core::render,
  types::{RenderContext, WikiOptions},
};
use crate::{
  error::MarkupResult,
  logger::{LogLogger, MarkupLogger},
  pages::PageNameSet,
};

/// Output substituted for a document that hit an internal fault.
pub const RECOVERY_HTML: &str =
  "<div class=\"error\">Critical error processing wiki content</div>";

/// Render, replacing an internal fault with [`RECOVERY_HTML`].
///
/// The fault is logged at error level so it still surfaces, but the caller
/// always gets a fragment it can embed.
#[must_use]
pub fn render_with_recovery(
  source: &str,
  ctx: &RenderContext,
  logger: &dyn MarkupLogger,
) -> String {
  render(source, ctx, logger).unwrap_or_else(|e| {
    error!("Wiki markup conversion failed: {e}");
    RECOVERY_HTML.to_string()
  })
}

/// Convert wiki markup to an HTML fragment.
///
/// `page_names` is the universe of known pages; names longer than three
/// characters are linked wherever they appear. Links are built as
/// `base_uri + url_encode(name) + link_suffix`.
///
/// # Examples
///
/// ```
/// use pukiwiki_markup::to_html;
///
/// let html = to_html("Visit Home now", &["Home"], "/wiki/", "");
/// assert!(html.contains(r#"<a class="pagelink" href="/wiki/Home">Home</a>"#));
/// ```
#[must_use]
pub fn to_html<S: AsRef<str>>(
  source: &str,
  page_names: &[S],
  base_uri: &str,
  link_suffix: &str,
) -> String {
  render_with_recovery(
    source,
    &context_for(page_names, base_uri, link_suffix),
    &LogLogger,
  )
}

/// Like [`to_html`], but surfaces internal faults.
///
/// # Errors
///
/// Returns [`crate::MarkupError::Inconsistent`] on an internal fault.
pub fn try_to_html<S: AsRef<str>>(
  source: &str,
  page_names: &[S],
  base_uri: &str,
  link_suffix: &str,
) -> MarkupResult<String> {
  render(
    source,
    &context_for(page_names, base_uri, link_suffix),
    &LogLogger,
  )
}

fn context_for<S: AsRef<str>>(
  page_names: &[S],
  base_uri: &str,
  link_suffix: &str,
) -> RenderContext {
  let options = WikiOptions {
    base_uri: base_uri.to_owned(),
    link_suffix: link_suffix.to_owned(),
    ..WikiOptions::default()
  };
  RenderContext::new(&options, PageNameSet::new(page_names))
}
