//! cve-enrich: CVE enrichment and criticality classification.
//!
//! Reads a list of CVE identifiers, looks each one up in NVD (falling back to
//! CIRCL), cross-references the CISA KEV catalog, and writes one report.

use anyhow::{Context, Result};
use clap::{CommandFactory, Parser, Subcommand};
use clap_complete::{Shell, generate};
use cve_enrich::{
    cli,
    config::{AppConfig, generate_example_config, load_or_default},
    pipeline::exit_codes,
    reports::ReportFormat,
};
use std::io;
use std::path::PathBuf;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[derive(Parser)]
#[command(name = "cve-enrich")]
#[command(version)]
#[command(about = "Enrich CVE identifiers with NVD/CIRCL data and CISA KEV status", long_about = None)]
#[command(after_help = "EXIT CODES:
    0  Report written
    1  No records produced (nothing written)
    3  Error occurred

EXAMPLES:
    # Enrich a list of CVEs into output.csv
    cve-enrich enrich base.csv

    # English output, JSON to stdout
    cve-enrich enrich base.csv --no-translate -f json -O -

    # Give up on NVD after 5 rate-limit waits
    NVD_API_KEY=... cve-enrich enrich base.csv --max-rate-limit-retries 5")]
struct Cli {
    /// Enable verbose output
    #[arg(short, long, global = true)]
    verbose: bool,

    /// Only log warnings and errors
    #[arg(short, long, global = true, conflicts_with = "verbose")]
    quiet: bool,

    /// Path to configuration file
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

/// Arguments for the `enrich` subcommand
#[derive(Parser)]
struct EnrichArgs {
    /// File with one CVE identifier per row (CSV or plain text)
    input: PathBuf,

    /// Output file path (`-` for stdout, default: output.csv)
    #[arg(short = 'O', long)]
    output_file: Option<PathBuf>,

    /// Output format
    #[arg(short, long)]
    format: Option<ReportFormat>,

    /// NVD API key
    #[arg(long, env = "NVD_API_KEY", hide_env_values = true)]
    nvd_api_key: Option<String>,

    /// Keep descriptions and mitigations in the source language
    #[arg(long)]
    no_translate: bool,

    /// Translation source language
    #[arg(long)]
    source_lang: Option<String>,

    /// Translation target language
    #[arg(long)]
    target_lang: Option<String>,

    /// HTTP timeout in seconds (default: 25)
    #[arg(long)]
    timeout: Option<u64>,

    /// Seconds to wait after an NVD rate-limit response (default: 30)
    #[arg(long)]
    rate_limit_wait: Option<u64>,

    /// Fall back to CIRCL after this many rate-limit waits (default: unbounded)
    #[arg(long)]
    max_rate_limit_retries: Option<u32>,

    /// Skip the CISA KEV catalog (nothing is flagged as exploited)
    #[arg(long)]
    no_kev: bool,

    /// Do not query CIRCL when NVD fails
    #[arg(long)]
    no_secondary: bool,
}

impl EnrichArgs {
    /// Layer explicitly given flags over file configuration.
    fn apply_to(self, config: &mut AppConfig) {
        if let Some(file) = self.output_file {
            config.output.file = file;
        }
        if let Some(format) = self.format {
            config.output.format = format;
        }
        if self.nvd_api_key.is_some() {
            config.nvd.api_key = self.nvd_api_key;
        }
        if self.no_translate {
            config.translation.enabled = false;
        }
        if let Some(lang) = self.source_lang {
            config.translation.source_lang = lang;
        }
        if let Some(lang) = self.target_lang {
            config.translation.target_lang = lang;
        }
        if let Some(secs) = self.timeout {
            config.http.timeout_secs = secs;
        }
        if let Some(secs) = self.rate_limit_wait {
            config.retry.rate_limit_wait_secs = secs;
        }
        if self.max_rate_limit_retries.is_some() {
            config.retry.max_rate_limit_retries = self.max_rate_limit_retries;
        }
        if self.no_kev {
            config.kev.enabled = false;
        }
        if self.no_secondary {
            config.circl.enabled = false;
        }
    }
}

#[derive(Subcommand)]
enum Commands {
    /// Enrich a list of CVE identifiers and write a report
    Enrich(EnrichArgs),

    /// Inspect or create configuration files
    Config {
        #[command(subcommand)]
        action: ConfigAction,
    },

    /// Generate shell completions
    Completions {
        /// Shell to generate completions for
        #[arg(value_enum)]
        shell: Shell,
    },
}

#[derive(Subcommand)]
enum ConfigAction {
    /// Print the JSON schema of the configuration file
    Schema {
        /// Write to a file instead of stdout
        #[arg(short, long)]
        output: Option<PathBuf>,
    },
    /// Print the effective configuration
    Show,
    /// Write an example .cve-enrich.yaml in the current directory
    Init,
}

fn main() {
    let cli = Cli::parse();

    // Initialize logging
    let log_level = if cli.verbose {
        "debug"
    } else if cli.quiet {
        "warn"
    } else {
        "info"
    };
    tracing_subscriber::registry()
        .with(tracing_subscriber::EnvFilter::new(
            std::env::var("RUST_LOG").unwrap_or_else(|_| log_level.to_string()),
        ))
        .with(
            tracing_subscriber::fmt::layer()
                .with_target(false)
                .with_writer(io::stderr),
        )
        .init();

    match run(cli) {
        Ok(code) => std::process::exit(code),
        Err(e) => {
            tracing::error!("{:#}", e);
            std::process::exit(exit_codes::ERROR);
        }
    }
}

fn run(cli: Cli) -> Result<i32> {
    match cli.command {
        Commands::Enrich(args) => {
            let (mut config, loaded_from) = load_or_default(cli.config.as_deref())?;
            if let Some(path) = loaded_from {
                tracing::info!("Using config file {}", path.display());
            }
            let input = args.input.clone();
            args.apply_to(&mut config);
            cli::run_enrich(&input, &config)
        }

        Commands::Config { action } => match action {
            ConfigAction::Schema { output } => {
                let schema = cve_enrich::config::generate_json_schema()
                    .context("failed to serialize schema")?;
                match output {
                    Some(path) => {
                        std::fs::write(&path, &schema)?;
                        eprintln!("Schema written to {}", path.display());
                    }
                    None => println!("{schema}"),
                }
                Ok(exit_codes::SUCCESS)
            }
            ConfigAction::Show => {
                let (mut config, loaded_from) = load_or_default(cli.config.as_deref())?;
                if config.nvd.api_key.is_some() {
                    config.nvd.api_key = Some("<redacted>".to_string());
                }
                match loaded_from {
                    Some(path) => eprintln!("# Loaded from: {}", path.display()),
                    None => eprintln!("# No config file found; showing defaults"),
                }
                let yaml =
                    serde_yaml_ng::to_string(&config).context("failed to serialize config")?;
                print!("{yaml}");
                Ok(exit_codes::SUCCESS)
            }
            ConfigAction::Init => {
                let target = std::env::current_dir()
                    .context("cannot determine current directory")?
                    .join(".cve-enrich.yaml");
                if target.exists() {
                    anyhow::bail!(
                        "{} already exists. Remove it first to re-initialize.",
                        target.display()
                    );
                }
                std::fs::write(&target, generate_example_config())
                    .with_context(|| format!("failed to write {}", target.display()))?;
                eprintln!("Wrote {}", target.display());
                Ok(exit_codes::SUCCESS)
            }
        },

        Commands::Completions { shell } => {
            generate(shell, &mut Cli::command(), "cve-enrich", &mut io::stdout());
            Ok(exit_codes::SUCCESS)
        }
    }
}
