//! Core implementation of the wiki processor.
//!
//! The pipeline is: normalize lines, segment them into blocks, render every
//! block, join the output lines with `\n`.
use std::sync::Arc;

use log::trace;

use super::types::{RenderContext, WikiOptions, WikiProcessor};
use crate::{
  block::{BlockRenderer, segment, split_lines},
  error::MarkupResult,
  logger::{LogLogger, MarkupLogger},
  pages::{PageNameCache, PageNameSet},
};

/// Render wiki markup to an HTML fragment.
///
/// # Errors
///
/// Returns [`crate::MarkupError::Inconsistent`] if the inline analyzer
/// reaches a state its rules should make impossible.
pub fn render(
  source: &str,
  ctx: &RenderContext,
  logger: &dyn MarkupLogger,
) -> MarkupResult<String> {
  let lines = split_lines(source);
  let blocks = segment(&lines);
  trace!("Segmented {} lines into {} blocks", lines.len(), blocks.len());

  let renderer = BlockRenderer::new(ctx, logger);
  let mut html = Vec::with_capacity(blocks.len() * 3);
  for block in &blocks {
    html.extend(renderer.render(block)?);
  }
  Ok(html.join("\n"))
}

impl WikiProcessor {
  /// Create a new `WikiProcessor` with the given options.
  #[must_use]
  pub fn new(options: WikiOptions) -> Self {
    Self {
      options,
      page_cache: PageNameCache::new(),
    }
  }

  /// Access processor options.
  #[must_use]
  pub const fn options(&self) -> &WikiOptions {
    &self.options
  }

  /// Compiled page-name set for `page_names`, reused while the list is the
  /// same as on the previous call.
  #[must_use]
  pub fn page_names<S: AsRef<str>>(&self, page_names: &[S]) -> Arc<PageNameSet> {
    self.page_cache.get_or_build(page_names)
  }

  /// Build the render context for one call.
  #[must_use]
  pub fn context<S: AsRef<str>>(&self, page_names: &[S]) -> RenderContext {
    RenderContext::new(&self.options, self.page_names(page_names))
  }

  /// Render wiki markup, tracing block recognition through the `log` crate.
  ///
  /// # Errors
  ///
  /// See [`render`].
  pub fn render<S: AsRef<str>>(
    &self,
    source: &str,
    page_names: &[S],
  ) -> MarkupResult<String> {
    self.render_with_logger(source, page_names, &LogLogger)
  }

  /// Render wiki markup, tracing block recognition through `logger`.
  ///
  /// # Errors
  ///
  /// See [`render`].
  pub fn render_with_logger<S: AsRef<str>>(
    &self,
    source: &str,
    page_names: &[S],
    logger: &dyn MarkupLogger,
  ) -> MarkupResult<String> {
    render(source, &self.context(page_names), logger)
  }
}
