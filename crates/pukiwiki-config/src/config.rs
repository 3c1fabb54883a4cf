use std::{
  fmt,
  fs,
  path::{Path, PathBuf},
  str::FromStr,
};

use pukiwiki_markup::{WikiOptions, WikiOptionsBuilder};
use serde::{Deserialize, Serialize};

use crate::error::ConfigError;

/// Default link prefix for page links.
pub const DEFAULT_BASE_URI: &str = "/";
/// Default link suffix for page links.
pub const DEFAULT_LINK_SUFFIX: &str = "/";
/// Default heading level of a single `*` marker.
pub const DEFAULT_HEADING_LEVEL: u8 = 2;
/// Default output directory for `build`.
pub const DEFAULT_OUTPUT_DIR: &str = "build";
/// Default extension of wiki source files.
pub const DEFAULT_EXTENSION: &str = "txt";

/// File names probed, in order, when no config file is given.
const CONFIG_FILENAMES: [&str; 4] = [
  "pukiwiki.toml",
  "pukiwiki.json",
  ".config/pukiwiki.toml",
  ".config/pukiwiki.json",
];

/// Configuration for the pukiwiki formatter.
///
/// Every scalar is optional so that merging several files only overrides what
/// a later file actually sets. Accessors such as [`Config::base_uri`] fill in
/// defaults.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
  /// Prefix of every page link.
  pub base_uri: Option<String>,

  /// Appended to every page link.
  pub link_suffix: Option<String>,

  /// HTML heading level of a single `*` marker.
  pub heading_level: Option<u8>,

  /// Known page names, in priority order.
  pub page_names: Vec<String>,

  /// File with one additional page name per line.
  pub pages_file: Option<PathBuf>,

  /// Directory of wiki source files for `build`.
  pub input_dir: Option<PathBuf>,

  /// Directory the rendered fragments are written to.
  pub output_dir: Option<PathBuf>,

  /// Extension of wiki source files, without the dot.
  pub extension: Option<String>,

  /// Number of threads to use for parallel rendering.
  pub jobs: Option<usize>,
}

/// On-disk format of a config file.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConfigFormat {
  Toml,
  Json,
}

impl FromStr for ConfigFormat {
  type Err = ConfigError;

  fn from_str(s: &str) -> Result<Self, Self::Err> {
    match s.to_lowercase().as_str() {
      "toml" => Ok(Self::Toml),
      "json" => Ok(Self::Json),
      other => {
        Err(ConfigError::Config(format!(
          "Unsupported config format: {other}"
        )))
      },
    }
  }
}

impl fmt::Display for ConfigFormat {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    f.write_str(match self {
      Self::Toml => "toml",
      Self::Json => "json",
    })
  }
}

impl Config {
  /// A config with every scalar set to its default, for writing out.
  #[must_use]
  pub fn with_defaults() -> Self {
    Self {
      base_uri:      Some(DEFAULT_BASE_URI.to_string()),
      link_suffix:   Some(DEFAULT_LINK_SUFFIX.to_string()),
      heading_level: Some(DEFAULT_HEADING_LEVEL),
      page_names:    Vec::new(),
      pages_file:    None,
      input_dir:     None,
      output_dir:    Some(PathBuf::from(DEFAULT_OUTPUT_DIR)),
      extension:     Some(DEFAULT_EXTENSION.to_string()),
      jobs:          None,
    }
  }

  #[must_use]
  pub fn base_uri(&self) -> &str {
    self.base_uri.as_deref().unwrap_or(DEFAULT_BASE_URI)
  }

  #[must_use]
  pub fn link_suffix(&self) -> &str {
    self.link_suffix.as_deref().unwrap_or(DEFAULT_LINK_SUFFIX)
  }

  #[must_use]
  pub fn heading_level(&self) -> u8 {
    self.heading_level.unwrap_or(DEFAULT_HEADING_LEVEL)
  }

  #[must_use]
  pub fn output_dir(&self) -> PathBuf {
    self
      .output_dir
      .clone()
      .unwrap_or_else(|| PathBuf::from(DEFAULT_OUTPUT_DIR))
  }

  #[must_use]
  pub fn extension(&self) -> &str {
    self
      .extension
      .as_deref()
      .map_or(DEFAULT_EXTENSION, |ext| ext.trim_start_matches('.'))
  }

  /// Converter options described by this config.
  #[must_use]
  pub fn wiki_options(&self) -> WikiOptions {
    WikiOptionsBuilder::new()
      .base_uri(self.base_uri())
      .link_suffix(self.link_suffix())
      .base_heading_level(self.heading_level())
      .build()
  }

  /// Load a config from a TOML or JSON file, chosen by extension.
  ///
  /// # Errors
  ///
  /// Returns an error if the file cannot be read, has an unsupported
  /// extension, or does not parse.
  pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self, ConfigError> {
    let path = path.as_ref();
    let content = fs::read_to_string(path).map_err(|e| {
      ConfigError::Config(format!(
        "Failed to read config file: {}: {}",
        path.display(),
        e
      ))
    })?;

    let Some(ext) = path.extension().and_then(|ext| ext.to_str()) else {
      return Err(ConfigError::Config(format!(
        "Config file has no extension: {}",
        path.display()
      )));
    };

    match ext.parse::<ConfigFormat>() {
      Ok(ConfigFormat::Json) => {
        serde_json::from_str(&content).map_err(|e| {
          ConfigError::Config(format!(
            "Failed to parse JSON config from {}: {}",
            path.display(),
            e
          ))
        })
      },
      Ok(ConfigFormat::Toml) => {
        toml::from_str(&content).map_err(|e| {
          ConfigError::Config(format!(
            "Failed to parse TOML config from {}: {}",
            path.display(),
            e
          ))
        })
      },
      Err(_) => {
        Err(ConfigError::Config(format!(
          "Unsupported config file format: {}",
          path.display()
        )))
      },
    }
  }

  /// Build the effective config.
  ///
  /// Explicit `config_files` are merged in order. Without any, the first
  /// config file found in `search_dir` is used, falling back to defaults.
  /// `config_overrides` (`KEY=VALUE`) are applied last.
  ///
  /// # Errors
  ///
  /// Returns an error if a file fails to load or an override is invalid.
  pub fn load(
    config_files: &[PathBuf],
    config_overrides: &[String],
    search_dir: &Path,
  ) -> Result<Self, ConfigError> {
    let mut config = if let Some((first, rest)) = config_files.split_first() {
      let mut merged = Self::from_file(first)?;
      for path in rest {
        merged.merge(Self::from_file(path)?);
      }
      if config_files.len() > 1 {
        log::info!("Loaded and merged {} config files", config_files.len());
      }
      merged
    } else if let Some(discovered) = Self::find_config_file(search_dir) {
      log::info!("Using discovered config file: {}", discovered.display());
      Self::from_file(&discovered)?
    } else {
      Self::default()
    };

    config.apply_overrides(config_overrides)?;
    Ok(config)
  }

  /// Search `dir` for a config file in the standard locations.
  #[must_use]
  pub fn find_config_file(dir: &Path) -> Option<PathBuf> {
    CONFIG_FILENAMES
      .iter()
      .map(|name| dir.join(name))
      .find(|path| path.is_file())
  }

  /// Merge another config into this one, with the other config's values
  /// taking precedence.
  ///
  /// - [`Option<T>`] fields: other's [`Some`] value replaces this one
  /// - `page_names`: other's names are appended
  pub fn merge(&mut self, other: Self) {
    let Self {
      base_uri,
      link_suffix,
      heading_level,
      page_names,
      pages_file,
      input_dir,
      output_dir,
      extension,
      jobs,
    } = other;

    merge_option(&mut self.base_uri, base_uri);
    merge_option(&mut self.link_suffix, link_suffix);
    merge_option(&mut self.heading_level, heading_level);
    merge_option(&mut self.pages_file, pages_file);
    merge_option(&mut self.input_dir, input_dir);
    merge_option(&mut self.output_dir, output_dir);
    merge_option(&mut self.extension, extension);
    merge_option(&mut self.jobs, jobs);
    self.page_names.extend(page_names);
  }

  /// Apply configuration overrides from KEY=VALUE strings.
  ///
  /// # Errors
  ///
  /// Returns an error if an override is not `KEY=VALUE`, names an unknown
  /// key, or has a value of the wrong type.
  pub fn apply_overrides(
    &mut self,
    overrides: &[String],
  ) -> Result<(), ConfigError> {
    for override_str in overrides {
      let (key, value) = override_str.split_once('=').ok_or_else(|| {
        ConfigError::Config(format!(
          "Invalid config override format: '{override_str}'. Expected \
           KEY=VALUE"
        ))
      })?;

      self.apply_override(key.trim(), value.trim())?;
    }
    Ok(())
  }

  /// Apply a single override. `page_names` takes a comma-separated list and
  /// appends to the existing names.
  ///
  /// # Errors
  ///
  /// Returns an error for unknown keys and unparsable values.
  pub fn apply_override(
    &mut self,
    key: &str,
    value: &str,
  ) -> Result<(), ConfigError> {
    match key {
      "base_uri" => self.base_uri = Some(value.to_string()),
      "link_suffix" => self.link_suffix = Some(value.to_string()),
      "heading_level" => {
        self.heading_level = Some(parse_value(key, value)?);
      },
      "page_names" => {
        self.page_names.extend(
          value
            .split(',')
            .map(str::trim)
            .filter(|name| !name.is_empty())
            .map(str::to_string),
        );
      },
      "pages_file" => self.pages_file = Some(PathBuf::from(value)),
      "input_dir" => self.input_dir = Some(PathBuf::from(value)),
      "output_dir" => self.output_dir = Some(PathBuf::from(value)),
      "extension" => self.extension = Some(value.to_string()),
      "jobs" => self.jobs = Some(parse_value(key, value)?),
      _ => {
        return Err(ConfigError::Config(format!(
          "Unknown configuration key: {key}"
        )));
      },
    }
    Ok(())
  }

  /// All known page names: `page_names` followed by the entries of
  /// `pages_file`. Blank lines and lines starting with `#` are skipped.
  ///
  /// # Errors
  ///
  /// Returns an error if `pages_file` is set but cannot be read.
  pub fn resolve_page_names(&self) -> Result<Vec<String>, ConfigError> {
    let mut names = self.page_names.clone();
    if let Some(ref path) = self.pages_file {
      let content = fs::read_to_string(path).map_err(|e| {
        ConfigError::Config(format!(
          "Failed to read pages file {}: {e}",
          path.display()
        ))
      })?;
      names.extend(parse_page_list(&content));
    }
    Ok(names)
  }

  /// Write a default configuration file.
  ///
  /// # Errors
  ///
  /// Returns an error if serialization or writing fails.
  pub fn generate_default(
    format: ConfigFormat,
    path: &Path,
  ) -> Result<(), ConfigError> {
    let defaults = Self::with_defaults();
    let content = match format {
      ConfigFormat::Toml => toml::to_string_pretty(&defaults)?,
      ConfigFormat::Json => serde_json::to_string_pretty(&defaults)?,
    };
    fs::write(path, content)?;
    log::info!("Wrote default configuration to {}", path.display());
    Ok(())
  }
}

/// Page names from a one-name-per-line list.
#[must_use]
pub fn parse_page_list(content: &str) -> Vec<String> {
  content
    .lines()
    .map(str::trim)
    .filter(|line| !line.is_empty() && !line.starts_with('#'))
    .map(str::to_string)
    .collect()
}

fn merge_option<T>(target: &mut Option<T>, other: Option<T>) {
  if other.is_some() {
    *target = other;
  }
}

fn parse_value<T: FromStr>(key: &str, value: &str) -> Result<T, ConfigError>
where
  T::Err: fmt::Display,
{
  value.parse().map_err(|e| {
    ConfigError::Config(format!("Invalid value for {key}: '{value}' ({e})"))
  })
}

#[cfg(test)]
mod tests {
  #![allow(
    clippy::unwrap_used,
    clippy::field_reassign_with_default,
    reason = "Fine in tests"
  )]

  use super::*;

  #[test]
  fn test_defaults() {
    let config = Config::default();
    assert_eq!(config.base_uri(), "/");
    assert_eq!(config.link_suffix(), "/");
    assert_eq!(config.heading_level(), 2);
    assert_eq!(config.output_dir(), PathBuf::from("build"));
    assert_eq!(config.extension(), "txt");
  }

  #[test]
  fn test_extension_ignores_leading_dot() {
    let mut config = Config::default();
    config.extension = Some(".wiki".to_string());
    assert_eq!(config.extension(), "wiki");
  }

  #[test]
  fn test_merge_only_overrides_set_fields() {
    let mut base = Config::default();
    base.base_uri = Some("/wiki/".to_string());
    base.heading_level = Some(3);
    base.page_names = vec!["FrontPage".to_string()];

    let mut other = Config::default();
    other.link_suffix = Some(String::new());
    other.heading_level = Some(1);
    other.page_names = vec!["SandBox".to_string()];

    base.merge(other);

    assert_eq!(base.base_uri(), "/wiki/");
    assert_eq!(base.link_suffix(), "");
    assert_eq!(base.heading_level(), 1);
    assert_eq!(base.page_names, vec!["FrontPage", "SandBox"]);
  }

  #[test]
  fn test_overrides() {
    let mut config = Config::default();
    config
      .apply_overrides(&[
        "base_uri=/w/".to_string(),
        "heading_level = 3".to_string(),
        "page_names=FrontPage, SandBox,".to_string(),
        "jobs=4".to_string(),
      ])
      .unwrap();

    assert_eq!(config.base_uri(), "/w/");
    assert_eq!(config.heading_level(), 3);
    assert_eq!(config.page_names, vec!["FrontPage", "SandBox"]);
    assert_eq!(config.jobs, Some(4));
  }

  #[test]
  fn test_override_errors() {
    let mut config = Config::default();
    assert!(config.apply_overrides(&["no_equals".to_string()]).is_err());
    assert!(config.apply_override("nonsense", "1").is_err());
    assert!(config.apply_override("heading_level", "high").is_err());
    assert!(config.apply_override("jobs", "-1").is_err());
  }

  #[test]
  fn test_wiki_options() {
    let mut config = Config::default();
    config.base_uri = Some("/wiki/".to_string());
    config.link_suffix = Some(".html".to_string());
    config.heading_level = Some(9);

    let options = config.wiki_options();
    assert_eq!(options.base_uri, "/wiki/");
    assert_eq!(options.link_suffix, ".html");
    assert_eq!(options.base_heading_level, 6);
  }

  #[test]
  fn test_parse_page_list() {
    assert_eq!(
      parse_page_list("FrontPage\n\n# comment\n  SandBox  \n"),
      vec!["FrontPage", "SandBox"]
    );
  }

  #[test]
  fn test_config_format_parse() {
    assert_eq!("TOML".parse::<ConfigFormat>().unwrap(), ConfigFormat::Toml);
    assert_eq!("json".parse::<ConfigFormat>().unwrap(), ConfigFormat::Json);
    assert!("yaml".parse::<ConfigFormat>().is_err());
  }
}
