//! Rendering of single files and whole wiki directories.
use std::{
  fs,
  path::{Path, PathBuf},
};

use color_eyre::eyre::{Context, Result, bail};
use log::{debug, info};
use pukiwiki_config::Config;
use pukiwiki_markup::{
  LogLogger,
  WikiOptions,
  WikiProcessor,
  render_with_recovery,
};
use rayon::prelude::*;
use walkdir::WalkDir;

/// A wiki source file and the page name it is published under.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WikiPage {
  pub source: PathBuf,
  pub name:   String,
}

impl WikiPage {
  /// Output location of this page under `output_dir`.
  #[must_use]
  pub fn output_path(&self, output_dir: &Path) -> PathBuf {
    output_dir.join(format!("{}.html", self.name))
  }
}

/// Collect every file under `input_dir` with the given extension, sorted.
#[must_use]
pub fn collect_wiki_files(input_dir: &Path, extension: &str) -> Vec<PathBuf> {
  let mut files = Vec::new();

  for entry in WalkDir::new(input_dir)
    .follow_links(true)
    .into_iter()
    .filter_map(Result::ok)
  {
    let path = entry.path();
    if path.is_file() && path.extension().is_some_and(|ext| ext == extension) {
      files.push(path.to_owned());
    }
  }

  files.sort();
  debug!("Found {} wiki files in {}", files.len(), input_dir.display());
  files
}

/// Page name of `path`: its location relative to `input_dir` without the
/// extension, components joined with `/`.
#[must_use]
pub fn page_name(input_dir: &Path, path: &Path) -> Option<String> {
  let relative = path.strip_prefix(input_dir).ok()?.with_extension("");
  let name = relative
    .components()
    .map(|component| component.as_os_str().to_string_lossy())
    .collect::<Vec<_>>()
    .join("/");
  (!name.is_empty()).then_some(name)
}

/// Discover the pages of a wiki directory.
#[must_use]
pub fn collect_pages(input_dir: &Path, extension: &str) -> Vec<WikiPage> {
  collect_wiki_files(input_dir, extension)
    .into_iter()
    .filter_map(|source| {
      let name = page_name(input_dir, &source)?;
      Some(WikiPage { source, name })
    })
    .collect()
}

/// Converter options for pages published as a file tree.
///
/// Page names derived from nested paths keep their `/` in links, so that a
/// link to `Help/Formatting` lands on `Help/Formatting.html`.
#[must_use]
pub fn site_options(config: &Config) -> WikiOptions {
  WikiOptions {
    keep_path_separators: true,
    ..config.wiki_options()
  }
}

/// Render one page, replacing an internal fault with the recovery fragment.
#[must_use]
pub fn render_page<S: AsRef<str>>(
  processor: &WikiProcessor,
  source: &str,
  page_names: &[S],
) -> String {
  render_with_recovery(source, &processor.context(page_names), &LogLogger)
}

/// Render a single source text with the names known to `config`.
///
/// # Errors
///
/// Returns an error if the configured pages file cannot be read.
pub fn render_source(config: &Config, source: &str) -> Result<String> {
  let page_names = config
    .resolve_page_names()
    .wrap_err("Failed to resolve page names")?;
  let processor = WikiProcessor::new(site_options(config));
  Ok(render_page(&processor, source, &page_names))
}

/// Render every page of `config.input_dir` into `config.output_dir`.
///
/// Each page is known by its path-derived name in addition to the configured
/// names, so pages link to each other. Returns the written files.
///
/// # Errors
///
/// Returns an error if no input directory is configured, or if a file cannot
/// be read or written.
pub fn build_site(config: &Config) -> Result<Vec<PathBuf>> {
  let Some(ref input_dir) = config.input_dir else {
    bail!("No input directory configured. Use --input-dir or set input_dir.");
  };
  if !input_dir.is_dir() {
    bail!("Input directory does not exist: {}", input_dir.display());
  }
  info!("Input directory: {}", input_dir.display());

  let output_dir = config.output_dir();
  fs::create_dir_all(&output_dir).wrap_err_with(|| {
    format!("Failed to create output directory: {}", output_dir.display())
  })?;

  let pages = collect_pages(input_dir, config.extension());
  info!("Found {} wiki pages", pages.len());

  let mut page_names = config
    .resolve_page_names()
    .wrap_err("Failed to resolve page names")?;
  page_names.extend(pages.iter().map(|page| page.name.clone()));

  let processor = WikiProcessor::new(site_options(config));
  let thread_count = config.jobs.unwrap_or_else(num_cpus::get);
  let pool = rayon::ThreadPoolBuilder::new()
    .num_threads(thread_count)
    .build()
    .wrap_err("Failed to build thread pool")?;

  let written = pool.install(|| {
    pages
      .par_iter()
      .map(|page| write_page(&processor, page, &page_names, &output_dir))
      .collect::<Result<Vec<_>>>()
  })?;

  info!(
    "Rendered {} pages into {}",
    written.len(),
    output_dir.display()
  );
  Ok(written)
}

fn write_page(
  processor: &WikiProcessor,
  page: &WikiPage,
  page_names: &[String],
  output_dir: &Path,
) -> Result<PathBuf> {
  let source = fs::read_to_string(&page.source).wrap_err_with(|| {
    format!("Failed to read wiki file: {}", page.source.display())
  })?;
  let html = render_page(processor, &source, page_names);

  let output = page.output_path(output_dir);
  if let Some(parent) = output.parent() {
    fs::create_dir_all(parent).wrap_err_with(|| {
      format!("Failed to create directory: {}", parent.display())
    })?;
  }
  fs::write(&output, html)
    .wrap_err_with(|| format!("Failed to write {}", output.display()))?;

  debug!("Rendered {} -> {}", page.name, output.display());
  Ok(output)
}
