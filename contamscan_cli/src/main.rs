use clap::Parser;
use std::path::PathBuf;

use contamscan_cli::config::{CliOverrides, ConfigManager};
use contamscan_cli::error::{CliError, CliResult};
use contamscan_cli::orchestrators::{ScanOptions, ScanOrchestrator};
use contamscan_cli::output::OutputFormat;
use contamscan_cli::terminal;

#[derive(Parser)]
#[command(name = "contamscan")]
#[command(author, version, about = "Locate GATK contamination tables and check sample completeness", long_about = None)]
struct Cli {
    /// Directory to search recursively
    #[arg(required_unless_present = "print_config")]
    directory: Option<PathBuf>,

    /// Output base path for path lists (a trailing .txt or .json is stripped)
    #[arg(short, long, value_name = "BASE")]
    output: Option<PathBuf>,

    /// Create symlinks to every located file in this directory
    #[arg(long, value_name = "DIR")]
    symlink_dir: Option<PathBuf>,

    /// Enable debug logging
    #[arg(short, long)]
    debug: bool,

    /// Exclude patterns (glob patterns matched against the full path, can be specified multiple times)
    #[arg(short = 'e', long = "exclude", value_name = "PATTERN")]
    exclude_patterns: Vec<String>,

    /// Only count a file for a sample when its derived sample name is identical
    #[arg(long)]
    exact_match: bool,

    /// Report format
    #[arg(short, long, value_enum)]
    format: Option<OutputFormat>,

    /// Disable colored output
    #[arg(long)]
    no_color: bool,

    /// Configuration file to use instead of the default location
    #[arg(long, value_name = "FILE")]
    config: Option<PathBuf>,

    /// Print the effective configuration as TOML and exit
    #[arg(long)]
    print_config: bool,
}

fn main() {
    let cli = Cli::parse();
    let debug = cli.debug;

    // Initialize logging based on debug flag
    if debug {
        env_logger::Builder::from_env(env_logger::Env::default())
            .filter_level(log::LevelFilter::Debug)
            .filter_module("contamscan_core", log::LevelFilter::Debug)
            .filter_module("contamscan_cli", log::LevelFilter::Debug)
            .format_timestamp_millis()
            .init();
        eprintln!("Debug logging enabled");
    } else {
        env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("warn")).init();
    }

    if let Err(error) = run(cli) {
        eprint!("{}", error.format_for_user(debug));
        std::process::exit(error.exit_code() as i32);
    }
}

fn run(cli: Cli) -> CliResult<()> {
    let manager = match cli.config {
        Some(path) => {
            if !path.is_file() {
                return Err(CliError::config(&format!(
                    "Configuration file not found: {}",
                    path.display()
                )));
            }
            ConfigManager::with_path(path)
        }
        None => ConfigManager::new(),
    };

    log::debug!("Configuration file: {}", manager.get_config_path().display());
    let mut config = manager.load()?;
    config.apply_cli_overrides(CliOverrides {
        exclude_patterns: cli.exclude_patterns,
        exact_match: cli.exact_match,
        format: cli.format,
        no_color: cli.no_color,
    });
    log::debug!("Effective configuration: {config:?}");

    let use_color = terminal::should_use_color(config.output.color_enabled);
    colored::control::set_override(use_color);

    if cli.print_config {
        print!("{}", config.to_toml()?);
        return Ok(());
    }

    let Some(directory) = cli.directory else {
        return Err(CliError::misuse("A directory to search is required"));
    };

    let options = ScanOptions {
        directory,
        output: cli.output,
        symlink_dir: cli.symlink_dir,
        discovery: config.discovery,
        match_mode: config.matching.mode,
        format: config.output.default_format,
        use_color,
    };

    let stdout = std::io::stdout();
    let mut out = stdout.lock();
    ScanOrchestrator::new(options).run(&mut out)?;

    Ok(())
}
