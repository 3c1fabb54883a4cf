//! # pukiwiki-markup - PukiWiki-style markup to HTML
//!
//! Converts line-oriented wiki markup into an HTML fragment meant to be
//! embedded in a host page. Known page names are linked wherever they appear
//! in running text, and `http`/`https` URIs become outbound links.
//!
//! ## Quick Start
//!
//! ```rust
//! use pukiwiki_markup::to_html;
//!
//! let html = to_html("* Hello", &[] as &[&str], "/", "/");
//! assert_eq!(html, "<h2>Hello</h2>");
//! ```
//!
//! ## Markup
//!
//! | Line starts with | Block                                    |
//! |------------------|------------------------------------------|
//! | `----`           | horizontal rule                          |
//! | `*` to `****`    | heading                                  |
//! | whitespace       | preformatted text                        |
//! | `>`              | quotation                                |
//! | `-`, `+`         | unordered / ordered list, nested by count |
//! | `:`              | definition list, `term\|definition`      |
//! | anything else    | paragraph                                |
//!
//! Inside headings, list items, definition lists and paragraphs,
//! `[[label: http://...]]` produces a labelled link.
//!
//! ## Configuration
//!
//! ```rust
//! use pukiwiki_markup::{WikiOptionsBuilder, WikiProcessor};
//!
//! let processor = WikiProcessor::new(
//!   WikiOptionsBuilder::new()
//!     .base_uri("/wiki/")
//!     .link_suffix("")
//!     .base_heading_level(1)
//!     .build(),
//! );
//! let html = processor.render("* FrontPage", &["FrontPage"]).unwrap_or_default();
//! assert_eq!(
//!   html,
//!   r#"<h1><a class="pagelink" href="/wiki/FrontPage">FrontPage</a></h1>"#
//! );
//! ```

pub mod block;
mod error;
pub mod inline;
mod logger;
pub mod pages;
pub mod processor;
mod types;
pub mod utils;

pub use crate::{
  block::{ListItem, ListNode, segment, split_lines},
  error::{MarkupError, MarkupResult},
  inline::{InlineMatch, InlineToken, render_inline, scan_inline},
  logger::{LogLogger, MarkupLogger, NoopLogger},
  pages::{PageNameCache, PageNameSet},
  processor::{
    RECOVERY_HTML,
    RenderContext,
    WikiOptions,
    WikiOptionsBuilder,
    WikiProcessor,
    render,
    render_with_recovery,
    to_html,
    try_to_html,
  },
  types::{Block, BlockKind},
  utils::{escape_html, url_encode, url_encode_path},
};
