//! Nested `-` and `+` lists.
//!
//! A list block is parsed into a [`ListNode`] tree first and rendered second.
//! Each extra leading marker character moves a line one level deeper, under
//! the item directly above it.
use crate::{error::MarkupResult, utils::strip_marker};

/// One level of a list.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ListNode {
  pub items: Vec<ListItem>,
}

/// A list item and the deeper list nested under it, if any.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ListItem {
  pub content: String,
  pub child:   Option<ListNode>,
}

impl ListItem {
  fn leaf(content: &str) -> Self {
    Self {
      content: content.to_owned(),
      child:   None,
    }
  }
}

impl ListNode {
  /// Parse lines that already had one `marker` stripped.
  ///
  /// A maximal run of lines still starting with `marker` becomes the child of
  /// the preceding item. A run with no preceding item hangs off an empty one.
  #[must_use]
  pub fn parse<S: AsRef<str>>(lines: &[S], marker: char) -> Self {
    let mut items: Vec<ListItem> = Vec::new();
    let mut rest = lines;

    while let Some((first, tail)) = rest.split_first() {
      let first = first.as_ref();
      if !first.starts_with(marker) {
        items.push(ListItem::leaf(first));
        rest = tail;
        continue;
      }

      let depth = rest
        .iter()
        .take_while(|line| line.as_ref().starts_with(marker))
        .count();
      let (nested, remaining) = rest.split_at(depth);
      let nested: Vec<&str> =
        nested.iter().map(|line| strip_marker(line.as_ref())).collect();
      let child = Self::parse(&nested, marker);

      match items.last_mut() {
        Some(parent) if parent.child.is_none() => parent.child = Some(child),
        _ => {
          items.push(ListItem {
            content: String::new(),
            child:   Some(child),
          });
        },
      }
      rest = remaining;
    }

    Self { items }
  }

  /// Maximum nesting depth, counting this level as 1.
  #[must_use]
  pub fn depth(&self) -> usize {
    1 + self
      .items
      .iter()
      .filter_map(|item| item.child.as_ref())
      .map(Self::depth)
      .max()
      .unwrap_or(0)
  }

  /// Render as `<tag>` ... `</tag>` lines, running `inline` over every item.
  ///
  /// # Errors
  ///
  /// Propagates errors from `inline`.
  pub fn render<F>(&self, tag: &str, inline: &F) -> MarkupResult<Vec<String>>
  where
    F: Fn(&str) -> MarkupResult<String>,
  {
    let mut html = vec![format!("<{tag}>")];
    for item in &self.items {
      html.push(format!("<li>{}", inline(item.content.trim_start())?));
      if let Some(child) = &item.child {
        html.extend(child.render(tag, inline)?);
      }
      html.push("</li>".to_string());
    }
    html.push(format!("</{tag}>"));
    Ok(html)
  }
}
