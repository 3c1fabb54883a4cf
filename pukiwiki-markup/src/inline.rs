//! Single-pass inline analysis of one line of text.
//!
//! At every position the scanner looks for, in order of precedence:
//!
//! 1. an HTML-sensitive character (`&`, `"`, `<`, `>`),
//! 2. an explicit link `[[label: http://...]]`,
//! 3. a known page name,
//! 4. a bare `http`/`https` URI.
//!
//! The leftmost match wins; on a tie the earlier rule wins. Scanning resumes
//! right after the consumed match and unmatched text is copied verbatim.
use std::sync::LazyLock;

use log::error;
use regex::{Captures, Regex};

use crate::{
  error::{MarkupError, MarkupResult},
  pages::PageNameSet,
  processor::RenderContext,
  utils::escape_html,
};

/// Escape characters, explicit links and bare URIs in one alternation. Page
/// names are matched separately by [`PageNameSet`] and merged by position.
static INLINE_PATTERN: LazyLock<Option<Regex>> = LazyLock::new(|| {
  Regex::new(concat!(
    r#"(?P<escape>[&"<>])"#,
    r"|\[\[(?P<label>.+?):\s*(?P<target>https?://\S+)\s*\]\]",
    r"|(?P<uri>https?://[A-Za-z0-9\-._~:/?#@!$&'()*+,;=%]+)",
  ))
  .map_err(|e| {
    error!(
      "Failed to compile INLINE_PATTERN regex: {e}\n Falling back to escaping \
       only."
    );
  })
  .ok()
});

/// One recognized construct.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InlineMatch<'a> {
  /// An HTML-sensitive character to be replaced by its entity.
  EscapeChar(char),
  /// `[[label: uri]]`.
  ExplicitLink { label: &'a str, uri: &'a str },
  /// A known page name.
  PageNameRef(&'a str),
  /// A bare URI.
  BareUri(&'a str),
}

/// Output of the scanner: verbatim text runs interleaved with matches.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InlineToken<'a> {
  Text(&'a str),
  Match(InlineMatch<'a>),
}

#[derive(Debug, Clone, Copy)]
struct Located<'a> {
  start: usize,
  end:   usize,
  found: InlineMatch<'a>,
}

/// Result of one forward search, kept until the scan position passes it.
/// `Some(None)` records that the search found nothing up to the end of line.
type Lookahead<'a> = Option<Option<Located<'a>>>;

const fn is_stale(lookahead: Lookahead<'_>, pos: usize) -> bool {
  match lookahead {
    None => true,
    Some(Some(located)) => located.start < pos,
    Some(None) => false,
  }
}

/// Iterator over the [`InlineToken`]s of a line.
///
/// The pattern search and the page-name search each keep their next match
/// until the scan moves past its start, so every byte is searched once.
#[derive(Debug, Clone)]
pub struct InlineScanner<'a> {
  text:            &'a str,
  pages:           &'a PageNameSet,
  pos:             usize,
  pending:         Option<Located<'a>>,
  pattern_ahead:   Lookahead<'a>,
  page_ahead:      Lookahead<'a>,
  pattern_lookups: usize,
  page_lookups:    usize,
}

/// Scan `text`, recognizing page names from `pages`.
#[must_use]
pub const fn scan_inline<'a>(
  text: &'a str,
  pages: &'a PageNameSet,
) -> InlineScanner<'a> {
  InlineScanner {
    text,
    pages,
    pos: 0,
    pending: None,
    pattern_ahead: None,
    page_ahead: None,
    pattern_lookups: 0,
    page_lookups: 0,
  }
}

impl<'a> InlineScanner<'a> {
  /// Number of (pattern, page-name) searches run so far.
  #[must_use]
  pub const fn lookups(&self) -> (usize, usize) {
    (self.pattern_lookups, self.page_lookups)
  }

  fn next_match(&mut self) -> MarkupResult<Option<Located<'a>>> {
    if is_stale(self.pattern_ahead, self.pos) {
      self.pattern_lookups += 1;
      self.pattern_ahead = Some(self.pattern_match()?);
    }
    if is_stale(self.page_ahead, self.pos) {
      self.page_lookups += 1;
      self.page_ahead = Some(self.page_match());
    }

    Ok(match (self.pattern_ahead.flatten(), self.page_ahead.flatten()) {
      (None, None) => None,
      (Some(found), None) | (None, Some(found)) => Some(found),
      (Some(pattern), Some(page)) => {
        let page_first = page.start < pattern.start
          || (page.start == pattern.start
            && matches!(pattern.found, InlineMatch::BareUri(_)));
        Some(if page_first { page } else { pattern })
      },
    })
  }

  fn pattern_match(&self) -> MarkupResult<Option<Located<'a>>> {
    let Some(pattern) = INLINE_PATTERN.as_ref() else {
      return Ok(self.escape_char_match());
    };
    pattern
      .captures_at(self.text, self.pos)
      .map(|caps| classify(&caps))
      .transpose()
  }

  fn page_match(&self) -> Option<Located<'a>> {
    self.pages.find(self.text, self.pos).map(|(start, end, name)| {
      Located {
        start,
        end,
        found: InlineMatch::PageNameRef(name),
      }
    })
  }

  /// Rule 1 alone, for when the combined pattern is unavailable.
  fn escape_char_match(&self) -> Option<Located<'a>> {
    let rest = self.text.get(self.pos..)?;
    let (offset, ch) = rest
      .char_indices()
      .find(|&(_, ch)| matches!(ch, '&' | '"' | '<' | '>'))?;
    let start = self.pos + offset;
    Some(Located {
      start,
      end: start + ch.len_utf8(),
      found: InlineMatch::EscapeChar(ch),
    })
  }
}

fn classify<'a>(caps: &Captures<'a>) -> MarkupResult<Located<'a>> {
  let whole = caps.get(0).ok_or_else(|| {
    MarkupError::inconsistent("inline analyzer", "<empty capture>")
  })?;
  let located = |found| {
    Located {
      start: whole.start(),
      end: whole.end(),
      found,
    }
  };

  if let Some(ch) = caps.name("escape").and_then(|m| m.as_str().chars().next())
  {
    return Ok(located(InlineMatch::EscapeChar(ch)));
  }
  if let (Some(label), Some(uri)) = (caps.name("label"), caps.name("target")) {
    return Ok(located(InlineMatch::ExplicitLink {
      label: label.as_str(),
      uri:   uri.as_str(),
    }));
  }
  if let Some(uri) = caps.name("uri") {
    return Ok(located(InlineMatch::BareUri(uri.as_str())));
  }

  Err(MarkupError::inconsistent("inline analyzer", whole.as_str()))
}

impl<'a> Iterator for InlineScanner<'a> {
  type Item = MarkupResult<InlineToken<'a>>;

  fn next(&mut self) -> Option<Self::Item> {
    if let Some(located) = self.pending.take() {
      self.pos = located.end;
      return Some(Ok(InlineToken::Match(located.found)));
    }
    if self.pos >= self.text.len() {
      return None;
    }

    let located = match self.next_match() {
      Ok(located) => located,
      Err(e) => {
        self.pos = self.text.len();
        return Some(Err(e));
      },
    };
    let Some(located) = located else {
      let rest = self.text.get(self.pos..).unwrap_or_default();
      self.pos = self.text.len();
      return Some(Ok(InlineToken::Text(rest)));
    };

    if located.start > self.pos {
      let run = self.text.get(self.pos..located.start).unwrap_or_default();
      self.pos = located.start;
      self.pending = Some(located);
      return Some(Ok(InlineToken::Text(run)));
    }

    self.pos = located.end;
    Some(Ok(InlineToken::Match(located.found)))
  }
}

/// Render one line of text to HTML.
///
/// # Errors
///
/// Returns [`MarkupError::Inconsistent`] if the combined pattern reports a
/// match none of its alternatives account for.
pub fn render_inline(text: &str, ctx: &RenderContext) -> MarkupResult<String> {
  let mut html = String::with_capacity(text.len() + text.len() / 4);

  for token in scan_inline(text, ctx.page_names()) {
    match token? {
      InlineToken::Text(run) => html.push_str(run),
      InlineToken::Match(InlineMatch::EscapeChar(ch)) => {
        html.push_str(&escape_html(ch.encode_utf8(&mut [0; 4])));
      },
      InlineToken::Match(InlineMatch::ExplicitLink { label, uri }) => {
        html.push_str(&anchor("outlink", uri, label));
      },
      InlineToken::Match(InlineMatch::PageNameRef(name)) => {
        html.push_str(&anchor("pagelink", &ctx.page_uri(name), name));
      },
      InlineToken::Match(InlineMatch::BareUri(uri)) => {
        html.push_str(&anchor("outlink", uri, uri));
      },
    }
  }

  Ok(html)
}

fn anchor(class: &str, href: &str, label: &str) -> String {
  format!(
    r#"<a class="{class}" href="{}">{}</a>"#,
    escape_html(href),
    escape_html(label)
  )
}
