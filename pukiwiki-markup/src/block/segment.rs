//! Splitting a document into lines and lines into blocks.
use crate::types::{Block, BlockKind};

/// Normalize `source` into lines.
///
/// Line terminators (`\n` or `\r\n`) and trailing whitespace are removed from
/// every line, and trailing blank lines of the whole document are dropped.
#[must_use]
pub fn split_lines(source: &str) -> Vec<String> {
  source
    .trim_end()
    .lines()
    .map(|line| line.trim_end().to_owned())
    .collect()
}

/// Classify a line on its own. `None` for blank lines.
///
/// Rules are checked in priority order: rule, heading, preformatted, quote,
/// unordered list, ordered list, definition list, paragraph.
#[must_use]
pub fn classify_line(line: &str) -> Option<BlockKind> {
  let first = line.chars().next()?;
  let kind = if line.starts_with("----") {
    BlockKind::Rule
  } else {
    match first {
      '*' => BlockKind::Heading,
      c if is_indent(c) => BlockKind::Preformatted,
      '>' => BlockKind::Quote,
      '-' => BlockKind::UnorderedList,
      '+' => BlockKind::OrderedList,
      ':' => BlockKind::DefinitionList,
      _ => BlockKind::Paragraph,
    }
  };
  Some(kind)
}

/// ASCII whitespace that can open a preformatted line. Line terminators never
/// reach here, and wider Unicode spaces such as U+3000 start paragraphs.
const fn is_indent(c: char) -> bool {
  matches!(c, ' ' | '\t' | '\x0B' | '\x0C')
}

/// Whether `line` extends an open block of `kind`.
///
/// Marker-led blocks continue on any line with the same first character, so
/// a `----` line inside a list run is a list item. Paragraphs continue only on
/// lines no other rule claims.
fn continues(kind: BlockKind, line: &str) -> bool {
  let Some(first) = line.chars().next() else {
    return false;
  };
  match kind {
    BlockKind::Rule | BlockKind::Heading => false,
    BlockKind::Preformatted => is_indent(first),
    BlockKind::Quote => first == '>',
    BlockKind::UnorderedList => first == '-',
    BlockKind::OrderedList => first == '+',
    BlockKind::DefinitionList => first == ':',
    BlockKind::Paragraph => classify_line(line) == Some(BlockKind::Paragraph),
  }
}

/// Group lines into blocks in a single forward pass.
///
/// Blank lines separate blocks and are dropped; every other line ends up in
/// exactly one block, in input order.
#[must_use]
pub fn segment<S: AsRef<str>>(lines: &[S]) -> Vec<Block> {
  let mut blocks = Vec::new();
  let mut rest = lines;

  while let Some((first, tail)) = rest.split_first() {
    let first = first.as_ref();
    let Some(kind) = classify_line(first) else {
      rest = tail;
      continue;
    };

    let taken = if kind.is_single_line() {
      1
    } else {
      1 + tail
        .iter()
        .take_while(|line| continues(kind, line.as_ref()))
        .count()
    };

    let (group, remaining) = rest.split_at(taken);
    blocks.push(Block::new(
      kind,
      group.iter().map(|line| line.as_ref().to_owned()).collect(),
    ));
    rest = remaining;
  }

  blocks
}

#[cfg(test)]
mod tests {
  use super::*;

  fn kinds(source: &str) -> Vec<BlockKind> {
    segment(&split_lines(source))
      .into_iter()
      .map(|block| block.kind)
      .collect()
  }

  #[test]
  fn split_lines_normalizes_terminators_and_trailing_space() {
    assert_eq!(split_lines("a  \r\nb\n\n\n"), vec!["a", "b"]);
    assert_eq!(split_lines(" code\t\n"), vec![" code"]);
    assert!(split_lines("").is_empty());
    assert!(split_lines("\n \n").is_empty());
  }

  #[test]
  fn classification_priority() {
    assert_eq!(classify_line(""), None);
    assert_eq!(classify_line("----"), Some(BlockKind::Rule));
    assert_eq!(classify_line("------ tail"), Some(BlockKind::Rule));
    assert_eq!(classify_line("---"), Some(BlockKind::UnorderedList));
    assert_eq!(classify_line("**h"), Some(BlockKind::Heading));
    assert_eq!(classify_line("\tx"), Some(BlockKind::Preformatted));
    assert_eq!(classify_line(">q"), Some(BlockKind::Quote));
    assert_eq!(classify_line("+o"), Some(BlockKind::OrderedList));
    assert_eq!(classify_line(":t|d"), Some(BlockKind::DefinitionList));
    assert_eq!(classify_line("text"), Some(BlockKind::Paragraph));
  }

  #[test]
  fn only_ascii_whitespace_opens_preformatted() {
    assert_eq!(classify_line("\x0Bx"), Some(BlockKind::Preformatted));
    assert_eq!(classify_line("\x0Cx"), Some(BlockKind::Preformatted));
    assert_eq!(classify_line("\u{3000}本文"), Some(BlockKind::Paragraph));
    assert_eq!(classify_line("\u{00A0}x"), Some(BlockKind::Paragraph));
    assert_eq!(kinds("\u{3000}一行目\n\u{3000}二行目"), vec![
      BlockKind::Paragraph
    ]);
    assert_eq!(kinds(" code\n\u{3000}text"), vec![
      BlockKind::Preformatted,
      BlockKind::Paragraph
    ]);
  }

  #[test]
  fn every_kind_is_recognized() {
    assert_eq!(
      kinds("* h\n----\n pre\n> q\n- u\n+ o\n: d\np"),
      vec![
        BlockKind::Heading,
        BlockKind::Rule,
        BlockKind::Preformatted,
        BlockKind::Quote,
        BlockKind::UnorderedList,
        BlockKind::OrderedList,
        BlockKind::DefinitionList,
        BlockKind::Paragraph,
      ]
    );
  }

  #[test]
  fn headings_and_rules_take_one_line() {
    assert_eq!(kinds("* a\n* b\n----\n----"), vec![
      BlockKind::Heading,
      BlockKind::Heading,
      BlockKind::Rule,
      BlockKind::Rule,
    ]);
  }

  #[test]
  fn runs_are_maximal() {
    let blocks = segment(&split_lines("- a\n-- b\n----\n- c\nafter"));
    assert_eq!(blocks.len(), 2);
    assert_eq!(blocks[0].kind, BlockKind::UnorderedList);
    assert_eq!(blocks[0].lines, vec!["- a", "-- b", "----", "- c"]);
    assert_eq!(blocks[1].lines, vec!["after"]);
  }

  #[test]
  fn paragraph_stops_at_any_marker() {
    let blocks = segment(&split_lines("one\ntwo\n>quote\nthree"));
    assert_eq!(blocks.len(), 3);
    assert_eq!(blocks[0].lines, vec!["one", "two"]);
    assert_eq!(blocks[2].lines, vec!["three"]);
  }

  #[test]
  fn blank_lines_separate_blocks() {
    let blocks = segment(&split_lines("one\n\ntwo"));
    assert_eq!(blocks.len(), 2);
    assert!(blocks.iter().all(|b| b.kind == BlockKind::Paragraph));
  }

  #[test]
  fn blocks_partition_non_blank_lines() {
    let source = "* Title\n\npara 1\npara 2\n pre\n  pre 2\n\n> q\n- a\n-- \
                  b\n+ 1\n: t|d\n----\nend";
    let lines = split_lines(source);
    let expected: Vec<&str> = lines
      .iter()
      .map(String::as_str)
      .filter(|line| !line.is_empty())
      .collect();
    let blocks = segment(&lines);
    let rebuilt: Vec<&str> = blocks
      .iter()
      .flat_map(|block| block.lines.iter().map(String::as_str))
      .collect();
    assert_eq!(rebuilt, expected);
  }
}
