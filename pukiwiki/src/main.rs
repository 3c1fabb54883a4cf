use std::{
  env,
  fs,
  io::{self, Write},
  path::Path,
};

use color_eyre::eyre::{Context, Result, bail};
use log::{LevelFilter, info};
use pukiwiki::{
  cli::{Cli, Commands},
  site,
};
use pukiwiki_config::{Config, ConfigFormat};

fn main() -> Result<()> {
  color_eyre::install()?;

  let cli = Cli::parse_args();

  env_logger::Builder::new()
    .filter_level(if cli.verbose {
      LevelFilter::Debug
    } else {
      LevelFilter::Info
    })
    .write_style(env_logger::WriteStyle::Always)
    .init();

  match cli.command {
    Commands::Init {
      ref output,
      ref format,
      force,
    } => init(output, format, force),

    Commands::Render {
      ref input,
      ref output,
      ref pages,
      ref pages_file,
      ref base_uri,
      ref link_suffix,
    } => {
      let mut config = load_config(&cli)?;
      config.page_names.extend(pages.iter().cloned());
      config.merge(Config {
        base_uri: base_uri.clone(),
        link_suffix: link_suffix.clone(),
        pages_file: pages_file.clone(),
        ..Default::default()
      });
      render(&config, input.as_deref(), output.as_deref())
    },

    Commands::Build {
      ref input_dir,
      ref output_dir,
      jobs,
    } => {
      let mut config = load_config(&cli)?;
      config.merge(Config {
        input_dir: input_dir.clone(),
        output_dir: output_dir.clone(),
        jobs,
        ..Default::default()
      });
      site::build_site(&config)?;
      Ok(())
    },
  }
}

fn load_config(cli: &Cli) -> Result<Config> {
  let cwd = env::current_dir().wrap_err("Failed to read current directory")?;
  Config::load(&cli.config_files, &cli.config_overrides, &cwd)
    .wrap_err("Failed to load configuration")
}

fn init(output: &Path, format: &str, force: bool) -> Result<()> {
  if output.exists() && !force {
    bail!(
      "Configuration file already exists: {}. Use --force to overwrite.",
      output.display()
    );
  }

  if let Some(parent) = output.parent()
    && !parent.as_os_str().is_empty()
    && !parent.exists()
  {
    fs::create_dir_all(parent).wrap_err_with(|| {
      format!("Failed to create directory: {}", parent.display())
    })?;
    info!("Created directory: {}", parent.display());
  }

  let format: ConfigFormat = format.parse()?;
  Config::generate_default(format, output).wrap_err_with(|| {
    format!("Failed to generate configuration file: {}", output.display())
  })?;

  info!("Configuration file created successfully.");
  Ok(())
}

fn render(
  config: &Config,
  input: Option<&Path>,
  output: Option<&Path>,
) -> Result<()> {
  let source = match input {
    Some(path) if path != Path::new("-") => {
      fs::read_to_string(path).wrap_err_with(|| {
        format!("Failed to read wiki file: {}", path.display())
      })?
    },
    _ => io::read_to_string(io::stdin()).wrap_err("Failed to read stdin")?,
  };

  let html = site::render_source(config, &source)?;

  if let Some(path) = output {
    fs::write(path, &html)
      .wrap_err_with(|| format!("Failed to write {}", path.display()))?;
    info!("Wrote {}", path.display());
  } else {
    let mut stdout = io::stdout().lock();
    writeln!(stdout, "{html}").wrap_err("Failed to write to stdout")?;
  }
  Ok(())
}
