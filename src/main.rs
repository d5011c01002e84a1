// Allow dead code for functions that are part of the API surface but not used in all code paths
#![allow(dead_code)]

use std::path::Path;

use anyhow::Result;
use clap::Parser;
use tracing_subscriber::EnvFilter;

mod cli;
mod config;
mod ensemble;
mod features;
mod model;
mod normalize;
mod pipeline;
mod registry;
mod report;
mod schema;
mod signals;
mod verdict;

use cli::Cli;
use config::AppConfig;
use registry::ModelRegistry;

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    init_tracing(cli.verbose);

    // Handle --init first (before any other processing)
    if cli.init {
        match AppConfig::create_default_config() {
            Ok(path) => {
                println!("Created default configuration file at: {}", path.display());
                println!("Edit this file to customize settings, then run phishscout again.");
                return Ok(());
            }
            Err(e) => {
                eprintln!("Failed to create configuration file: {}", e);
                std::process::exit(1);
            }
        }
    }

    if let Err(message) = cli.validate() {
        eprintln!("Error: {}", message);
        std::process::exit(1);
    }

    let config = match AppConfig::load_from_path(Path::new(&cli.config)) {
        Ok(cfg) => cfg,
        Err(config::ConfigError::FileNotFound(path)) => {
            // Config not found - prompt to create if interactive
            match AppConfig::prompt_create_config() {
                Ok(Some(created)) => {
                    println!("Created default configuration file at: {}", created.display());
                    println!("Edit this file to customize settings, then run phishscout again.");
                    return Ok(());
                }
                Ok(None) => {
                    eprintln!("Configuration file not found at: {}", path.display());
                    eprintln!("Run with --init to create a default configuration file.");
                    std::process::exit(1);
                }
                Err(e) => {
                    eprintln!("Failed to create configuration file: {}", e);
                    std::process::exit(1);
                }
            }
        }
        Err(e) => {
            eprintln!("Configuration error: {}", e);
            std::process::exit(1);
        }
    };

    // Model and schema artifacts load once; a broken or mismatched artifact
    // is fatal before any URL is analyzed.
    let registry = match ModelRegistry::load(&config.models) {
        Ok(registry) => registry,
        Err(e) => {
            eprintln!("Model load error: {}", e);
            std::process::exit(1);
        }
    };

    let raw_url = cli.url.clone().unwrap_or_default();
    match pipeline::analyze(&raw_url, &registry, &config, !cli.no_signals).await {
        Ok(verdict) => {
            if cli.output_format == "json" {
                println!("{}", report::render_json(&verdict)?);
            } else {
                print!("{}", report::render_text(&raw_url, &verdict));
                if cli.show_features {
                    println!();
                    print!("{}", report::render_features(&raw_url, &registry));
                }
            }
            Ok(())
        }
        Err(e) => {
            eprintln!("{}", e);
            std::process::exit(1);
        }
    }
}

fn init_tracing(verbose: u8) {
    let default_level = match verbose {
        0 => "warn",
        1 => "info",
        _ => "debug",
    };
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();
}
