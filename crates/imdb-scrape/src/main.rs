// Copyright 2026 imdb-scrape contributors
// SPDX-License-Identifier: Apache-2.0

use anyhow::{Context, Result};
use clap::{CommandFactory, Parser, Subcommand};
use clap_complete::Shell;
use imdb_scrape::cli;
use imdb_scrape::config::Config;
use std::path::PathBuf;
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(
    name = "imdb-scrape",
    about = "imdb-scrape: extract ratings, genres and metascores from IMDb title pages",
    version,
    after_help = "Run 'imdb-scrape <command> --help' for details on each command."
)]
struct Cli {
    /// Output results as JSON (machine-readable)
    #[arg(long, global = true)]
    json: bool,

    /// Suppress non-essential output
    #[arg(long, short, global = true)]
    quiet: bool,

    /// Enable verbose/debug logging
    #[arg(long, short, global = true)]
    verbose: bool,

    /// Request timeout in milliseconds
    #[arg(long, global = true)]
    timeout: Option<u64>,

    /// Base URL that title identifiers are appended to
    #[arg(long, global = true)]
    base_url: Option<String>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Scrape one title by identifier (e.g. "tt0111161")
    Movie {
        /// IMDb title identifier
        id: String,
        /// Rating to report as metascore when the page has none
        #[arg(long, value_parser = parse_rating)]
        fallback_rating: Option<f64>,
    },
    /// Markup-only extraction of the older title layout
    Legacy {
        /// Full title page URL
        url: String,
    },
    /// Scrape every row of a CSV/TSV table with a URL column
    Batch {
        /// Input table
        input: PathBuf,
        /// Number of titles fetched at once
        #[arg(long)]
        concurrency: Option<usize>,
        /// Write the JSON records here instead of stdout
        #[arg(long, short)]
        output: Option<PathBuf>,
    },
    /// List 0-10 metascores for a table, falling back to its IMDb Rating column
    Metascores {
        /// Input table
        input: PathBuf,
        /// Number of titles fetched at once
        #[arg(long)]
        concurrency: Option<usize>,
    },
    /// Generate shell completion scripts
    Completions {
        /// Shell type (bash, zsh, fish, powershell)
        shell: Shell,
    },
}

/// A finite rating; clap's plain `f64` parser would also accept `NaN` and `inf`.
fn parse_rating(raw: &str) -> Result<f64, String> {
    let rating: f64 = raw.trim().parse().map_err(|e| format!("{e}"))?;
    if rating.is_finite() {
        Ok(rating)
    } else {
        Err(format!("rating must be a finite number, got {raw:?}"))
    }
}

fn init_tracing(cli: &Cli) {
    let default = if cli.verbose {
        "imdb_scrape=debug"
    } else if cli.quiet {
        "imdb_scrape=error"
    } else {
        "imdb_scrape=warn"
    };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default));
    let builder = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr);

    if cli.json {
        builder.json().init();
    } else {
        builder.init();
    }
}

fn resolve_config(cli: &Cli, concurrency: Option<usize>) -> Result<Config> {
    let mut config = Config::from_env().context("invalid IMDB_SCRAPE_* environment")?;
    if let Some(timeout) = cli.timeout {
        config.timeout_ms = timeout;
    }
    if let Some(base) = &cli.base_url {
        config.base_url = base.clone();
    }
    if let Some(n) = concurrency {
        config.concurrency = n;
    }
    config.validate()?;
    Ok(config)
}

async fn dispatch(cli: &Cli) -> Result<()> {
    match &cli.command {
        Commands::Movie {
            id,
            fallback_rating,
        } => {
            let config = resolve_config(cli, None)?;
            cli::movie_cmd::run(&config, id, *fallback_rating).await
        }
        Commands::Legacy { url } => {
            let config = resolve_config(cli, None)?;
            cli::legacy_cmd::run(&config, url).await
        }
        Commands::Batch {
            input,
            concurrency,
            output,
        } => {
            let config = resolve_config(cli, *concurrency)?;
            cli::batch_cmd::run(&config, input, output.as_deref()).await
        }
        Commands::Metascores { input, concurrency } => {
            let config = resolve_config(cli, *concurrency)?;
            cli::batch_cmd::run_metascores(&config, input).await
        }
        Commands::Completions { shell } => {
            let mut cmd = Cli::command();
            clap_complete::generate(*shell, &mut cmd, "imdb-scrape", &mut std::io::stdout());
            Ok(())
        }
    }
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    // Set global flags via environment variables so all modules can check them
    if cli.json {
        std::env::set_var(cli::output::ENV_JSON, "1");
    }
    if cli.quiet {
        std::env::set_var(cli::output::ENV_QUIET, "1");
    }
    init_tracing(&cli);

    let result = dispatch(&cli).await;

    // Consistent exit codes: 0=success, 1=error
    if let Err(e) = &result {
        if cli::output::is_json() {
            cli::output::print_json(&serde_json::json!({
                "error": true,
                "message": format!("{e:#}"),
            }));
        } else if !cli::output::is_quiet() {
            eprintln!("  Error: {e:#}");
        }
        std::process::exit(1);
    }

    result
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_rating_rejects_non_finite() {
        assert_eq!(parse_rating("7.2"), Ok(7.2));
        assert!(parse_rating("NaN").is_err());
        assert!(parse_rating("inf").is_err());
        assert!(parse_rating("seven").is_err());
    }

    #[test]
    fn test_fallback_rating_flag() {
        let cli = Cli::try_parse_from(["imdb-scrape", "movie", "tt0111161", "--fallback-rating", "7.2"])
            .unwrap();
        assert!(matches!(
            cli.command,
            Commands::Movie { fallback_rating: Some(r), .. } if r == 7.2
        ));
        assert!(
            Cli::try_parse_from(["imdb-scrape", "movie", "tt1", "--fallback-rating", "NaN"]).is_err()
        );
    }
}
