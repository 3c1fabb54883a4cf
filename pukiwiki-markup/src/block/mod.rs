//! Block-level parsing: segmentation and one parser per block kind.
pub mod list;
pub mod segment;

use log::trace;

use crate::{
  error::MarkupResult,
  inline::render_inline,
  logger::MarkupLogger,
  processor::{RenderContext, types::MAX_HEADING_LEVEL},
  types::{Block, BlockKind},
  utils::{escape_html, strip_marker},
};

pub use self::{
  list::{ListItem, ListNode},
  segment::{classify_line, segment, split_lines},
};

/// Heading markers beyond this count are ignored for the level.
const MAX_HEADING_MARKERS: usize = 4;

/// The per-call pair of render context and logger handed to every parser.
#[derive(Clone, Copy)]
pub struct BlockRenderer<'a> {
  ctx:    &'a RenderContext,
  logger: &'a dyn MarkupLogger,
}

impl<'a> BlockRenderer<'a> {
  #[must_use]
  pub const fn new(ctx: &'a RenderContext, logger: &'a dyn MarkupLogger) -> Self {
    Self { ctx, logger }
  }

  /// Render one block to its output lines.
  ///
  /// # Errors
  ///
  /// Propagates inline analyzer faults.
  pub fn render(&self, block: &Block) -> MarkupResult<Vec<String>> {
    self
      .logger
      .debug(format_args!("{}: {:?}", block.kind, block.lines));

    match block.kind {
      BlockKind::Rule => Ok(vec!["<hr />".to_string()]),
      BlockKind::Heading => {
        block
          .lines
          .iter()
          .map(|line| self.heading(line))
          .collect()
      },
      BlockKind::Preformatted => Ok(Self::preformatted(&block.lines)),
      BlockKind::Quote => Ok(Self::quote(&block.lines)),
      BlockKind::UnorderedList => self.list("ul", '-', &block.lines),
      BlockKind::OrderedList => self.list("ol", '+', &block.lines),
      BlockKind::DefinitionList => self.definition_list(&block.lines),
      BlockKind::Paragraph => self.paragraph(&block.lines),
    }
  }

  fn inline(&self, text: &str) -> MarkupResult<String> {
    render_inline(text, self.ctx)
  }

  fn heading(&self, line: &str) -> MarkupResult<String> {
    let markers = line.chars().take_while(|&c| c == '*').count();
    let run = u8::try_from(markers.clamp(1, MAX_HEADING_MARKERS)).unwrap_or(1);
    let level =
      (self.ctx.base_heading_level() + run - 1).min(MAX_HEADING_LEVEL);
    let content = line.trim_start_matches('*').trim_start();
    Ok(format!("<h{level}>{}</h{level}>", self.inline(content)?))
  }

  fn preformatted(lines: &[String]) -> Vec<String> {
    let body: Vec<String> = lines
      .iter()
      .map(|line| escape_html(strip_marker(line)))
      .collect();
    vec![
      format!("<pre><code>{}", body.join("\n")),
      "</code></pre>".to_string(),
    ]
  }

  fn quote(lines: &[String]) -> Vec<String> {
    let body: Vec<String> = lines
      .iter()
      .map(|line| escape_html(strip_marker(line).trim_start()))
      .collect();
    vec![
      "<blockquote><p>".to_string(),
      body.join("\n"),
      "</p></blockquote>".to_string(),
    ]
  }

  fn list(
    &self,
    tag: &str,
    marker: char,
    lines: &[String],
  ) -> MarkupResult<Vec<String>> {
    let stripped: Vec<&str> =
      lines.iter().map(|line| strip_marker(line)).collect();
    let tree = ListNode::parse(&stripped, marker);
    trace!("{tag} nested {} levels deep", tree.depth());
    tree.render(tag, &|text: &str| self.inline(text))
  }

  fn definition_list(&self, lines: &[String]) -> MarkupResult<Vec<String>> {
    let mut html = vec!["<dl>".to_string()];
    for line in lines {
      let line = strip_marker(line);
      match line.split_once('|') {
        Some((term, definition)) => {
          html.push(format!("<dt>{}</dt>", self.inline(term.trim())?));
          html.push(format!("<dd>{}</dd>", self.inline(definition.trim())?));
        },
        None => html.push(format!("<dt>{}</dt>", self.inline(line.trim())?)),
      }
    }
    html.push("</dl>".to_string());
    Ok(html)
  }

  fn paragraph(&self, lines: &[String]) -> MarkupResult<Vec<String>> {
    let mut html = Vec::with_capacity(lines.len() + 2);
    html.push("<p>".to_string());
    for line in lines {
      html.push(self.inline(line)?);
    }
    html.push("</p>".to_string());
    Ok(html)
  }
}
