// src/main.rs
// DOCUMENTATION: Application entry point
// PURPOSE: Initialize config and logging, then run the search form

mod cli;
mod config;
mod errors;
mod handlers;
mod models;
mod services;

use anyhow::Context;
use clap::Parser;
use cli::Cli;
use colored::*;
use config::Config;
use models::SearchRequest;
use services::{GoogleMapsClient, MapsProvider, SearchService};
use std::fs::File;
use std::path::PathBuf;
use std::sync::Arc;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // 1. Parse arguments (before anything that could fail on --help)
    let cli = Cli::parse();

    // 2. Load configuration (also loads .env)
    let config = Config::from_env();

    // 3. Initialize logging
    env_logger::Builder::from_env(
        env_logger::Env::default().default_filter_or(config.log_level.as_str()),
    )
    .init();

    if let Err(e) = config.validate() {
        log::error!("Configuration error: {}", e);
        eprintln!("{} {}", "Configuration error:".red().bold(), e);
        std::process::exit(1);
    }

    log::info!("Starting places-finder");

    if let Some(path) = &cli.show {
        let file = File::open(path).with_context(|| format!("Cannot open {}", path.display()))?;
        let records = services::read_csv(file).map_err(|e| anyhow::anyhow!(e))?;
        println!("{}", handlers::results::render_table(&records));
        return Ok(());
    }

    // 4. Build the provider client and the search service
    let http_client = config::init_http_client(&config).context("Failed to build HTTP client")?;
    let provider: Arc<dyn MapsProvider> = Arc::new(GoogleMapsClient::new(http_client, &config));
    let service = SearchService::new(provider, &config);

    let export_path = cli
        .output
        .clone()
        .unwrap_or_else(|| PathBuf::from(&config.export_path));
    let export_mode = cli.export_mode();

    // 5. Batch mode: one search from flags, exit code reflects the result
    if cli.is_batch() {
        let request = SearchRequest::new(
            cli.city.as_deref().unwrap_or_default(),
            cli.category.as_deref().unwrap_or_default(),
            cli.radius.unwrap_or(config.default_radius),
        );

        let outcome = match request {
            Ok(request) => {
                handlers::handle_search(&service, &request, &export_path, export_mode).await
            }
            Err(e) => {
                handlers::results::print_error(&e);
                Err(e)
            }
        };

        if outcome.is_err() {
            std::process::exit(1);
        }
        return Ok(());
    }

    // 6. Interactive mode: one run at a time until the user stops
    println!("{}", "🗺️  Business search".bright_blue().bold());
    println!();

    loop {
        let request = handlers::form::prompt_request(config.default_radius)?;
        println!();

        // Errors were already shown to the user; the form stays open
        let _ = handlers::handle_search(&service, &request, &export_path, export_mode).await;

        println!();
        if !handlers::form::confirm_again()? {
            break;
        }
        println!();
    }

    Ok(())
}
