//! Recognition of known page names inside running text.
//!
//! A [`PageNameSet`] is compiled once from the caller's page list and then
//! queried by the inline analyzer at every scan position. Names of three
//! characters or fewer are dropped before compilation so that short common
//! tokens never turn into links.
use std::{
  collections::{HashSet, hash_map::DefaultHasher},
  hash::{Hash, Hasher},
  sync::{Arc, Mutex, PoisonError},
};

use aho_corasick::{AhoCorasick, MatchKind};
use log::{trace, warn};

/// Names must be strictly longer than this (in characters) to be recognized.
pub const MIN_PAGE_NAME_LEN: usize = 3;

/// A filtered, compiled set of page names.
#[derive(Debug, Clone, Default)]
pub struct PageNameSet {
  names:       Vec<String>,
  matcher:     Option<AhoCorasick>,
  fingerprint: u64,
}

impl PageNameSet {
  /// Build a set from caller-supplied names.
  ///
  /// Short names are discarded and duplicates removed, keeping the first
  /// occurrence. When several names match at the same position the one that
  /// appears earliest in `names` wins.
  #[must_use]
  pub fn new<I, S>(names: I) -> Self
  where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
  {
    let names = filter_names(names);
    let fingerprint = fingerprint_of(&names);

    if names.is_empty() {
      return Self {
        names,
        matcher: None,
        fingerprint,
      };
    }

    let matcher = AhoCorasick::builder()
      .match_kind(MatchKind::LeftmostFirst)
      .build(&names)
      .map_err(|e| {
        warn!(
          "Failed to compile page name matcher for {} names: {e}. Page name \
           links are disabled for this render.",
          names.len()
        );
      })
      .ok();

    trace!("Compiled page name matcher over {} names", names.len());

    Self {
      names,
      matcher,
      fingerprint,
    }
  }

  /// A set that recognizes nothing.
  #[must_use]
  pub fn empty() -> Self {
    Self::default()
  }

  /// The recognized names, in priority order.
  #[must_use]
  pub fn names(&self) -> &[String] {
    &self.names
  }

  #[must_use]
  pub fn len(&self) -> usize {
    self.names.len()
  }

  /// True when no page-name recognition will take place.
  #[must_use]
  pub const fn is_empty(&self) -> bool {
    self.matcher.is_none()
  }

  /// Content hash of the filtered name list.
  #[must_use]
  pub const fn fingerprint(&self) -> u64 {
    self.fingerprint
  }

  /// Find the leftmost page name occurring in `text` at or after byte offset
  /// `from`. Returns the byte span and the matched name.
  #[must_use]
  pub fn find(&self, text: &str, from: usize) -> Option<(usize, usize, &str)> {
    let matcher = self.matcher.as_ref()?;
    let haystack = text.get(from..)?;
    let found = matcher.find(haystack)?;
    let name = self.names.get(found.pattern().as_usize())?;
    Some((from + found.start(), from + found.end(), name.as_str()))
  }

  fn same_names(&self, names: &[String]) -> bool {
    self.names == names
  }
}

/// Drop short names and duplicates, preserving order.
fn filter_names<I, S>(names: I) -> Vec<String>
where
  I: IntoIterator<Item = S>,
  S: AsRef<str>,
{
  let mut seen = HashSet::new();
  names
    .into_iter()
    .map(|name| name.as_ref().to_owned())
    .filter(|name| name.chars().count() > MIN_PAGE_NAME_LEN)
    .filter(|name| seen.insert(name.clone()))
    .collect()
}

fn fingerprint_of(names: &[String]) -> u64 {
  let mut hasher = DefaultHasher::new();
  names.hash(&mut hasher);
  hasher.finish()
}

/// One-slot cache for the most recently compiled [`PageNameSet`].
///
/// A cached set is handed out again only when the filtered name list is
/// identical to the one it was built from; any other list rebuilds the set and
/// replaces the slot.
#[derive(Debug, Default)]
pub struct PageNameCache {
  slot: Mutex<Option<Arc<PageNameSet>>>,
}

impl PageNameCache {
  #[must_use]
  pub fn new() -> Self {
    Self::default()
  }

  /// Return the compiled set for `names`, reusing the cached one when the
  /// content matches.
  #[must_use]
  pub fn get_or_build<S: AsRef<str>>(&self, names: &[S]) -> Arc<PageNameSet> {
    let filtered = filter_names(names);
    let fingerprint = fingerprint_of(&filtered);

    let mut slot = self.slot.lock().unwrap_or_else(PoisonError::into_inner);
    if let Some(cached) = slot.as_ref()
      && cached.fingerprint == fingerprint
      && cached.same_names(&filtered)
    {
      return Arc::clone(cached);
    }

    let built = Arc::new(PageNameSet::new(filtered));
    *slot = Some(Arc::clone(&built));
    built
  }
}

#[cfg(test)]
mod tests {
  #![allow(clippy::unwrap_used, reason = "Fine in tests")]

  use super::*;

  #[test]
  fn short_names_are_excluded() {
    let set = PageNameSet::new(["abc", "Home", "ab", "日本語"]);
    assert_eq!(set.names(), ["Home".to_owned()]);
  }

  #[test]
  fn length_counts_characters_not_bytes() {
    let set = PageNameSet::new(["日本語版"]);
    assert_eq!(set.len(), 1);
  }

  #[test]
  fn empty_input_disables_recognition() {
    let set = PageNameSet::new(Vec::<String>::new());
    assert!(set.is_empty());
    assert_eq!(set.find("anything", 0), None);

    let short_only = PageNameSet::new(["a", "bb", "ccc"]);
    assert!(short_only.is_empty());
    assert_eq!(short_only.find("a bb ccc", 0), None);
  }

  #[test]
  fn duplicates_are_removed() {
    let set = PageNameSet::new(["Home", "Help", "Home"]);
    assert_eq!(set.names(), ["Home".to_owned(), "Help".to_owned()]);
  }

  #[test]
  fn find_is_case_sensitive_and_offset_aware() {
    let set = PageNameSet::new(["Home"]);
    assert_eq!(set.find("go home or Home", 0), Some((11, 15, "Home")));
    assert_eq!(set.find("Home and Home", 1), Some((9, 13, "Home")));
    assert_eq!(set.find("Home", 4), None);
  }

  #[test]
  fn earlier_name_wins_at_same_position() {
    let set = PageNameSet::new(["Front", "FrontPage"]);
    assert_eq!(set.find("FrontPage", 0), Some((0, 5, "Front")));

    let set = PageNameSet::new(["FrontPage", "Front"]);
    assert_eq!(set.find("FrontPage", 0), Some((0, 9, "FrontPage")));
  }

  #[test]
  fn fingerprint_tracks_filtered_content() {
    let a = PageNameSet::new(["Home", "abc"]);
    let b = PageNameSet::new(["Home"]);
    let c = PageNameSet::new(["Help"]);
    assert_eq!(a.fingerprint(), b.fingerprint());
    assert_ne!(a.fingerprint(), c.fingerprint());
  }

  #[test]
  fn cache_reuses_only_identical_sets() {
    let cache = PageNameCache::new();
    let first = cache.get_or_build(&["Home", "Help"]);
    let again = cache.get_or_build(&["Home", "Help", "xy"]);
    assert!(Arc::ptr_eq(&first, &again));

    let other = cache.get_or_build(&["Home"]);
    assert!(!Arc::ptr_eq(&first, &other));
    assert_eq!(other.names(), ["Home".to_owned()]);

    let back = cache.get_or_build(&["Home", "Help"]);
    assert!(!Arc::ptr_eq(&first, &back));
    assert_eq!(back.find("Help", 0).unwrap().2, "Help");
  }
}
