#![allow(clippy::expect_used, reason = "Fine in tests")]
use std::fs;

use pukiwiki::site::{build_site, collect_pages, render_source};
use pukiwiki_config::Config;
use tempfile::tempdir;

#[test]
fn test_build_site_links_pages_to_each_other() {
  let temp_dir = tempdir().expect("Failed to create temp dir in test");
  let input_dir = temp_dir.path().join("wiki");
  let output_dir = temp_dir.path().join("out");
  fs::create_dir_all(input_dir.join("Help")).expect("Failed to create dir in test");

  fs::write(input_dir.join("FrontPage.txt"), "* Welcome\nSee SandBox.\n")
    .expect("Failed to write FrontPage in test");
  fs::write(input_dir.join("SandBox.txt"), "Back to FrontPage\n")
    .expect("Failed to write SandBox in test");
  fs::write(input_dir.join("Help/Formatting.txt"), "- item\n")
    .expect("Failed to write Help page in test");
  fs::write(input_dir.join("notes.md"), "ignored")
    .expect("Failed to write notes in test");

  let config = Config {
    input_dir: Some(input_dir),
    output_dir: Some(output_dir.clone()),
    base_uri: Some("/wiki/".to_string()),
    link_suffix: Some(".html".to_string()),
    jobs: Some(2),
    ..Default::default()
  };

  let written = build_site(&config).expect("Failed to build site in test");
  assert_eq!(written.len(), 3);

  let front = fs::read_to_string(output_dir.join("FrontPage.html"))
    .expect("Failed to read FrontPage output in test");
  assert_eq!(
    front,
    "<h2>Welcome</h2>\n<p>\nSee <a class=\"pagelink\" \
     href=\"/wiki/SandBox.html\">SandBox</a>.\n</p>"
  );

  let sandbox = fs::read_to_string(output_dir.join("SandBox.html"))
    .expect("Failed to read SandBox output in test");
  assert!(sandbox.contains(r#"href="/wiki/FrontPage.html""#));

  let help = fs::read_to_string(output_dir.join("Help").join("Formatting.html"))
    .expect("Failed to read nested output in test");
  assert_eq!(help, "<ul>\n<li>item\n</li>\n</ul>");
  assert!(!output_dir.join("notes.html").exists());
}

#[test]
fn test_links_to_nested_pages_resolve_to_written_files() {
  let temp_dir = tempdir().expect("Failed to create temp dir in test");
  let input_dir = temp_dir.path().join("wiki");
  let output_dir = temp_dir.path().join("out");
  fs::create_dir_all(input_dir.join("Help")).expect("Failed to create dir in test");

  fs::write(input_dir.join("FrontPage.txt"), "Read Help/Formatting first.\n")
    .expect("Failed to write FrontPage in test");
  fs::write(input_dir.join("Help/Formatting.txt"), "Back to FrontPage\n")
    .expect("Failed to write Help page in test");

  let config = Config {
    input_dir: Some(input_dir),
    output_dir: Some(output_dir.clone()),
    base_uri: Some("/".to_string()),
    link_suffix: Some(".html".to_string()),
    ..Default::default()
  };
  build_site(&config).expect("Failed to build site in test");

  let front = fs::read_to_string(output_dir.join("FrontPage.html"))
    .expect("Failed to read FrontPage output in test");
  let href = r#"href="/Help/Formatting.html""#;
  assert!(front.contains(href), "missing {href} in:\n{front}");
  assert!(output_dir.join("Help").join("Formatting.html").is_file());
}

#[test]
fn test_build_site_requires_input_dir() {
  let temp_dir = tempdir().expect("Failed to create temp dir in test");
  let config = Config {
    output_dir: Some(temp_dir.path().join("out")),
    ..Default::default()
  };
  assert!(build_site(&config).is_err());

  let config = Config {
    input_dir: Some(temp_dir.path().join("missing")),
    ..config
  };
  assert!(build_site(&config).is_err());
}

#[test]
fn test_collect_pages_uses_configured_extension() {
  let temp_dir = tempdir().expect("Failed to create temp dir in test");
  fs::write(temp_dir.path().join("One.wiki"), "")
    .expect("Failed to write file in test");
  fs::write(temp_dir.path().join("Two.txt"), "")
    .expect("Failed to write file in test");

  let pages = collect_pages(temp_dir.path(), "wiki");
  assert_eq!(pages.len(), 1);
  assert_eq!(pages[0].name, "One");
}

#[test]
fn test_render_source_reads_pages_file() {
  let temp_dir = tempdir().expect("Failed to create temp dir in test");
  let pages_file = temp_dir.path().join("pages.txt");
  fs::write(&pages_file, "# known pages\nRecentChanges\n\n")
    .expect("Failed to write pages file in test");

  let config = Config {
    page_names: vec!["FrontPage".to_string()],
    pages_file: Some(pages_file),
    ..Default::default()
  };
  let html = render_source(&config, "FrontPage RecentChanges")
    .expect("Failed to render in test");
  assert_eq!(
    html,
    "<p>\n<a class=\"pagelink\" href=\"/FrontPage/\">FrontPage</a> <a \
     class=\"pagelink\" href=\"/RecentChanges/\">RecentChanges</a>\n</p>"
  );
}

#[test]
fn test_render_source_fails_on_missing_pages_file() {
  let temp_dir = tempdir().expect("Failed to create temp dir in test");
  let config = Config {
    pages_file: Some(temp_dir.path().join("nope.txt")),
    ..Default::default()
  };
  assert!(render_source(&config, "text").is_err());
}
