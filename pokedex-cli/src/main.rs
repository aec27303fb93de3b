//! Pokedex CLI
//!
//! Interactive explorer for PokeAPI location areas, backed by a TTL cache.

mod commands;
mod session;

use std::io::Write;
use std::sync::Arc;

use anyhow::{Context, Result};
use clap::Parser;
use colored::*;
use tokio::io::{AsyncBufReadExt, BufReader};
use tokio::sync::watch;
use tracing::{debug, info};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use pokedex_api::{ApiConfig, PokeApiClient};
use pokedex_cache::{CacheConfig, PokeCache};
use pokedex_core::constants::{
    DEFAULT_API_URL, DEFAULT_CACHE_TTL_SECONDS, DEFAULT_HTTP_TIMEOUT_SECONDS, DEFAULT_PAGE_SIZE,
    DEFAULT_REAP_INTERVAL_SECONDS,
};
use pokedex_core::PokedexConfig;
use pokedex_pager::{AreaPager, Trainer};

use crate::commands::{Command, HELP_TEXT};
use crate::session::{Flow, Session};

/// Pokedex - explore PokeAPI location areas and catch what lives there
#[derive(Parser)]
#[command(name = "pokedex")]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Enable verbose logging
    #[arg(short, long)]
    verbose: bool,

    /// Seconds a cached location area stays valid
    #[arg(long, env = "POKEDEX_CACHE_TTL", default_value_t = DEFAULT_CACHE_TTL_SECONDS)]
    cache_ttl: u64,

    /// Seconds between sweeps of expired areas
    #[arg(long, env = "POKEDEX_REAP_INTERVAL", default_value_t = DEFAULT_REAP_INTERVAL_SECONDS)]
    reap_interval: u64,

    /// Locations listed per `map` / `mapb`
    #[arg(long, env = "POKEDEX_PAGE_SIZE", default_value_t = DEFAULT_PAGE_SIZE)]
    page_size: u32,

    /// PokeAPI base URL
    #[arg(long, env = "POKEAPI_URL", default_value = DEFAULT_API_URL)]
    api_url: String,

    /// HTTP request timeout in seconds
    #[arg(long, env = "POKEDEX_HTTP_TIMEOUT", default_value_t = DEFAULT_HTTP_TIMEOUT_SECONDS)]
    timeout: u64,

    /// Seed for capture rolls
    #[arg(long, env = "POKEDEX_SEED")]
    seed: Option<u64>,
}

impl Cli {
    fn config(&self) -> PokedexConfig {
        PokedexConfig {
            cache_ttl_seconds: self.cache_ttl,
            reap_interval_seconds: self.reap_interval,
            page_size: self.page_size,
            api_url: self.api_url.clone(),
            timeout_seconds: self.timeout,
            seed: self.seed,
        }
    }
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    // Logs go to stderr so they never interleave with REPL output
    let filter = if cli.verbose {
        "pokedex=debug,info"
    } else {
        "pokedex=info,warn"
    };

    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| filter.into()))
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    let config = cli.config();
    config.validate().context("Invalid configuration")?;

    let (shutdown_tx, shutdown_rx) = watch::channel(false);
    let (cache, reaper) = PokeCache::with_reaper(CacheConfig::from(&config), shutdown_rx);

    let client = Arc::new(
        PokeApiClient::with_config(ApiConfig::from(&config)).context("Failed to create PokeAPI client")?,
    );
    let pager = AreaPager::new(cache.clone(), client.clone()).with_page_size(config.page_size);
    let trainer = match config.seed {
        Some(seed) => Trainer::with_seed(cache.clone(), client, seed),
        None => Trainer::new(cache.clone(), client),
    };

    info!(api_url = %config.api_url, page_size = config.page_size, "Pokedex started");

    let mut session = Session::new(cache, pager, trainer);
    let result = run_repl(&mut session).await;

    if shutdown_tx.send(true).is_err() {
        debug!("Reaper already stopped before shutdown signal");
    }
    let report = reaper.await.context("Cache reaper panicked")?;
    debug!(passes = report.passes, removed = report.removed, "Reaper finished");

    result
}

/// Reads commands from stdin until `exit` or end of input.
async fn run_repl(session: &mut Session) -> Result<()> {
    println!("{}", "Welcome to the Pokedex!".cyan().bold());
    println!("{}", HELP_TEXT);

    let mut lines = BufReader::new(tokio::io::stdin()).lines();
    let mut stdout = std::io::stdout();

    loop {
        print!("\n{} ", "Pokedex >".bold());
        stdout.flush()?;

        let Some(line) = lines.next_line().await? else {
            println!();
            break;
        };

        let command = match Command::parse(&line) {
            Ok(Some(command)) => command,
            Ok(None) => continue,
            Err(e) => {
                println!("{}", e.to_string().red());
                continue;
            }
        };

        match session.execute(command, &mut stdout).await {
            Ok(Flow::Exit) => break,
            Ok(Flow::Continue) => {}
            Err(e) if e.is_user_error() => println!("{}", e.to_string().yellow()),
            Err(e) => println!("{} {}", "Error:".red().bold(), e),
        }
    }

    println!("{}", "Goodbye!".cyan());
    Ok(())
}
