//! Types for the block structure of a wiki document.
use std::fmt;

/// The kind of a block, decided by the marker character of its first line.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum BlockKind {
  /// `----` horizontal rule.
  Rule,
  /// `*` to `****` heading.
  Heading,
  /// Whitespace-led literal text.
  Preformatted,
  /// `>` quotation.
  Quote,
  /// `-` bullet list.
  UnorderedList,
  /// `+` numbered list.
  OrderedList,
  /// `:` term/definition list.
  DefinitionList,
  /// Anything else.
  Paragraph,
}

impl BlockKind {
  /// Short tag used in debug traces.
  #[must_use]
  pub const fn tag(self) -> &'static str {
    match self {
      Self::Rule => "hr",
      Self::Heading => "h",
      Self::Preformatted => "pre",
      Self::Quote => "quote",
      Self::UnorderedList => "ul",
      Self::OrderedList => "ol",
      Self::DefinitionList => "dl",
      Self::Paragraph => "p",
    }
  }

  /// Whether a block of this kind spans exactly one line.
  #[must_use]
  pub const fn is_single_line(self) -> bool {
    matches!(self, Self::Rule | Self::Heading)
  }
}

impl fmt::Display for BlockKind {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    f.write_str(self.tag())
  }
}

/// A contiguous group of lines parsed as a unit.
///
/// `lines` are kept exactly as they appeared in the input (after line
/// normalization), markers included. Concatenating the lines of every block
/// produced for a document yields its non-blank lines in order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Block {
  pub kind:  BlockKind,
  pub lines: Vec<String>,
}

impl Block {
  #[must_use]
  pub const fn new(kind: BlockKind, lines: Vec<String>) -> Self {
    Self { kind, lines }
  }
}
