//! Escaping helpers shared by the block and inline renderers.

/// Escape the four HTML-sensitive characters (`&`, `"`, `<`, `>`).
///
/// No other character is touched. The input is assumed to be raw text;
/// escaping already escaped text escapes it twice.
#[must_use]
pub fn escape_html(text: &str) -> String {
  html_escape::encode_double_quoted_attribute(text).into_owned()
}

const HEX_DIGITS: &[u8; 16] = b"0123456789ABCDEF";

/// Percent-encode a page name for use inside a URI path.
///
/// `[A-Za-z0-9_.-]` pass through, every other byte of the UTF-8 encoding
/// becomes `%XX` with uppercase hex digits. Spaces are encoded as `%20`,
/// never as `+`.
#[must_use]
pub fn url_encode(text: &str) -> String {
  let mut encoded = String::with_capacity(text.len() * 3);
  for byte in text.bytes() {
    if byte.is_ascii_alphanumeric() || matches!(byte, b'_' | b'.' | b'-') {
      encoded.push(char::from(byte));
    } else {
      encoded.push('%');
      encoded.push(char::from(HEX_DIGITS[usize::from(byte >> 4)]));
      encoded.push(char::from(HEX_DIGITS[usize::from(byte & 0x0F)]));
    }
  }
  encoded
}

/// Like [`url_encode`], but keeps `/` so that a hierarchical page name such
/// as `Help/Formatting` maps onto a nested path. Each segment is encoded
/// strictly.
#[must_use]
pub fn url_encode_path(text: &str) -> String {
  text.split('/').map(url_encode).collect::<Vec<_>>().join("/")
}

/// Strip exactly one leading character (the block marker) from a line.
#[must_use]
pub fn strip_marker(line: &str) -> &str {
  let mut chars = line.chars();
  chars.next();
  chars.as_str()
}

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn escapes_only_sensitive_characters() {
    assert_eq!(
      escape_html(r#"a & b <c> "d" 'e'"#),
      "a &amp; b &lt;c&gt; &quot;d&quot; 'e'"
    );
    assert_eq!(escape_html("plain text"), "plain text");
  }

  #[test]
  fn escaping_is_not_idempotent() {
    assert_eq!(escape_html("&amp;"), "&amp;amp;");
  }

  #[test]
  fn url_encode_keeps_unreserved_subset() {
    assert_eq!(url_encode("Front_Page-1.0"), "Front_Page-1.0");
  }

  #[test]
  fn url_encode_uses_strict_percent_encoding() {
    assert_eq!(url_encode("Wiki Page"), "Wiki%20Page");
    assert_eq!(url_encode("a+b/c~"), "a%2Bb%2Fc%7E");
  }

  #[test]
  fn url_encode_encodes_each_utf8_byte() {
    assert_eq!(url_encode("日本"), "%E6%97%A5%E6%9C%AC");
    assert_eq!(url_encode("\u{1}\u{7F}"), "%01%7F");
  }

  #[test]
  fn url_encode_path_keeps_separators() {
    assert_eq!(url_encode_path("Help/Formatting"), "Help/Formatting");
    assert_eq!(url_encode_path("A B/日本"), "A%20B/%E6%97%A5%E6%9C%AC");
    assert_eq!(url_encode_path("trailing/"), "trailing/");
  }

  #[test]
  fn strip_marker_removes_one_character() {
    assert_eq!(strip_marker("--item"), "-item");
    assert_eq!(strip_marker("é rest"), " rest");
    assert_eq!(strip_marker(""), "");
  }
}
