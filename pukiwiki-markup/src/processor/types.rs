//! Type definitions for the wiki processor.
//!
//! Contains the configuration options (`WikiOptions`), the per-call
//! `RenderContext` threaded through every parser, and the `WikiProcessor`
//! itself.
//!
//! # Examples
//!
//! ```
//! use pukiwiki_markup::{WikiOptions, WikiProcessor};
//!
//! let options = WikiOptions {
//!   base_uri: "/wiki/".to_string(),
//!   link_suffix: String::new(),
//!   ..Default::default()
//! };
//!
//! let processor = WikiProcessor::new(options);
//! ```
use std::sync::Arc;

use crate::{
  pages::{PageNameCache, PageNameSet},
  utils::{url_encode, url_encode_path},
};

/// Highest heading level HTML knows about.
pub const MAX_HEADING_LEVEL: u8 = 6;

/// Options for configuring the wiki processor.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WikiOptions {
  /// Prefix of every page link.
  pub base_uri: String,

  /// Appended to every page link after the encoded page name.
  pub link_suffix: String,

  /// HTML heading level produced by a single `*` marker.
  pub base_heading_level: u8,

  /// Leave `/` unencoded in page links, for page names that mirror a
  /// directory tree.
  pub keep_path_separators: bool,
}

impl Default for WikiOptions {
  fn default() -> Self {
    Self {
      base_uri:             "/".to_string(),
      link_suffix:          "/".to_string(),
      base_heading_level:   2,
      keep_path_separators: false,
    }
  }
}

/// Builder for constructing `WikiOptions` with method chaining.
#[derive(Debug, Clone, Default)]
pub struct WikiOptionsBuilder {
  options: WikiOptions,
}

impl WikiOptionsBuilder {
  /// Create a new builder with default options.
  #[must_use]
  pub fn new() -> Self {
    Self::default()
  }

  /// Set the prefix of page links.
  #[must_use]
  pub fn base_uri<S: Into<String>>(mut self, base_uri: S) -> Self {
    self.options.base_uri = base_uri.into();
    self
  }

  /// Set the suffix of page links.
  #[must_use]
  pub fn link_suffix<S: Into<String>>(mut self, suffix: S) -> Self {
    self.options.link_suffix = suffix.into();
    self
  }

  /// Set the heading level of a single `*` marker. Clamped to 1-6.
  #[must_use]
  pub fn base_heading_level(mut self, level: u8) -> Self {
    self.options.base_heading_level = level.clamp(1, MAX_HEADING_LEVEL);
    self
  }

  /// Keep `/` unencoded in page links.
  #[must_use]
  pub const fn keep_path_separators(mut self, keep: bool) -> Self {
    self.options.keep_path_separators = keep;
    self
  }

  /// Build the final `WikiOptions`.
  #[must_use]
  pub fn build(self) -> WikiOptions {
    self.options
  }
}

/// Immutable configuration of a single render call.
///
/// Holds everything the parsers need, including the page-name matcher
/// compiled for this call's page list. A context must not be reused for a
/// render with a different page list; build a new one instead.
#[derive(Debug, Clone)]
pub struct RenderContext {
  base_uri:             String,
  link_suffix:          String,
  base_heading_level:   u8,
  keep_path_separators: bool,
  page_names:           Arc<PageNameSet>,
}

impl RenderContext {
  /// Create a context from options and a compiled page-name set.
  #[must_use]
  pub fn new<P: Into<Arc<PageNameSet>>>(
    options: &WikiOptions,
    page_names: P,
  ) -> Self {
    Self {
      base_uri:             options.base_uri.clone(),
      link_suffix:          options.link_suffix.clone(),
      base_heading_level:   options
        .base_heading_level
        .clamp(1, MAX_HEADING_LEVEL),
      keep_path_separators: options.keep_path_separators,
      page_names:           page_names.into(),
    }
  }

  #[must_use]
  pub fn base_uri(&self) -> &str {
    &self.base_uri
  }

  #[must_use]
  pub fn link_suffix(&self) -> &str {
    &self.link_suffix
  }

  #[must_use]
  pub const fn base_heading_level(&self) -> u8 {
    self.base_heading_level
  }

  #[must_use]
  pub fn page_names(&self) -> &PageNameSet {
    &self.page_names
  }

  /// Link target for a page: `base_uri + url_encode(name) + link_suffix`.
  ///
  /// With `keep_path_separators`, [`url_encode_path`] replaces
  /// [`url_encode`].
  #[must_use]
  pub fn page_uri(&self, name: &str) -> String {
    let encoded = if self.keep_path_separators {
      url_encode_path(name)
    } else {
      url_encode(name)
    };
    format!("{}{encoded}{}", self.base_uri, self.link_suffix)
  }
}

/// Main wiki processor.
///
/// Owns nothing mutable except a cache of the last compiled page-name set,
/// keyed by its content, so one processor can serve concurrent renders with
/// different page lists.
#[derive(Debug, Default)]
pub struct WikiProcessor {
  pub(crate) options:    WikiOptions,
  pub(crate) page_cache: PageNameCache,
}
