use std::path::PathBuf;

use clap::{Parser, Subcommand};

/// Command line interface for pukiwiki
#[derive(Parser, Debug)]
#[command(author, version, about = "Render PukiWiki-style markup to HTML")]
pub struct Cli {
  /// Subcommand to execute (see [`Commands`])
  #[command(subcommand)]
  pub command: Commands,

  /// Enable verbose debug logging
  #[arg(short, long, global = true)]
  pub verbose: bool,

  /// Path to configuration file(s) (TOML or JSON, can be specified multiple
  /// times). Multiple files are merged in order, with later files overriding
  /// earlier ones
  #[arg(short = 'c', long = "config-file", global = true, action = clap::ArgAction::Append)]
  pub config_files: Vec<PathBuf>,

  /// Override configuration values (KEY=VALUE format, can be used multiple
  /// times)
  #[arg(long = "config", global = true, action = clap::ArgAction::Append)]
  pub config_overrides: Vec<String>,
}

/// All supported subcommands for the pukiwiki CLI.
#[derive(Subcommand, Debug)]
pub enum Commands {
  /// Render a single wiki file to HTML.
  Render {
    /// Wiki source file. Reads standard input when omitted or `-`.
    input: Option<PathBuf>,

    /// Write the fragment here instead of standard output.
    #[arg(short, long)]
    output: Option<PathBuf>,

    /// Known page name (can be specified multiple times).
    #[arg(short, long = "page", action = clap::ArgAction::Append)]
    pages: Vec<String>,

    /// File with one known page name per line.
    #[arg(long)]
    pages_file: Option<PathBuf>,

    /// Prefix of every page link.
    #[arg(long)]
    base_uri: Option<String>,

    /// Appended to every page link.
    #[arg(long)]
    link_suffix: Option<String>,
  },

  /// Render every wiki file under a directory.
  Build {
    /// Directory containing the wiki source files.
    #[arg(short, long)]
    input_dir: Option<PathBuf>,

    /// Output directory for the rendered fragments.
    #[arg(short, long)]
    output_dir: Option<PathBuf>,

    /// Number of threads to use for parallel rendering.
    #[arg(short, long)]
    jobs: Option<usize>,
  },

  /// Initialize a new pukiwiki configuration file
  Init {
    /// Path to create the configuration file at
    #[arg(short, long, default_value = "pukiwiki.toml")]
    output: PathBuf,

    /// Format of the configuration file.
    #[arg(short = 'F', long, default_value = "toml", value_parser = ["toml", "json"])]
    format: String,

    /// Force overwrite if file already exists
    #[arg(short, long)]
    force: bool,
  },
}

impl Cli {
  /// Parse command line arguments into a [`Cli`] struct.
  #[must_use]
  pub fn parse_args() -> Self {
    Self::parse()
  }
}
