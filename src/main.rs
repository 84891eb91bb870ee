//! Artist Atlas - terminal client for a remote artist catalog
//!
//! The controller stack here is the same one a graphical view would embed:
//! a paginated browse mode and a debounced live-search mode reconciled
//! against the catalog service, with stale responses discarded at arrival.

#![allow(dead_code)]

mod client;
mod config;
mod controller;
mod errors;
mod models;
mod stores;

use std::sync::Arc;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use tracing::{info, warn};

use crate::client::{CatalogClient, HttpCatalogClient};
use crate::config::Settings;
use crate::models::Artist;
use crate::stores::{DetailLoader, DetailState, PaginationStore};

/// Artist Atlas - browse and search a remote artist catalog
#[derive(Parser, Debug)]
#[command(name = "artist-atlas")]
#[command(version)]
#[command(about = "Browse and search a remote artist catalog")]
struct Args {
    /// Base URL of the catalog service (overrides configuration)
    #[arg(long)]
    base_url: Option<String>,

    /// Enable debug logging
    #[arg(long)]
    debug: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Fetch one page of the artist catalog
    Browse {
        /// Page to show
        #[arg(long, default_value_t = 1)]
        page: u32,
    },
    /// Search artists by name
    Search {
        /// Query text
        query: String,
    },
    /// Show one artist by id
    Show {
        /// Catalog identifier
        id: String,
    },
}

#[tokio::main]
async fn main() -> Result<()> {
    let args = Args::parse();

    // initialize logging, keeping the http stack quiet unless asked for
    let log_level = if args.debug { "debug" } else { "info" };
    let filter = tracing_subscriber::EnvFilter::new(format!(
        "{},hyper=warn,reqwest=warn",
        log_level
    ));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .compact()
        .init();

    let mut settings = Settings::load().context("Failed to load settings")?;
    if let Some(base_url) = args.base_url {
        settings.base_url = base_url;
    }
    info!("Catalog service: {}", settings.base_url);

    let client = Arc::new(HttpCatalogClient::new(&settings.base_url));

    match args.command {
        Command::Browse { page } => browse(client, &settings, page).await,
        Command::Search { query } => search(client, &settings, &query).await,
        Command::Show { id } => show(client, &id).await,
    }
}

/// Fetch and print one catalog page. The first fetch establishes the total;
/// a requested page past it is ignored the same way the view's disabled
/// boundary buttons ignore it.
async fn browse(client: Arc<HttpCatalogClient>, settings: &Settings, page: u32) -> Result<()> {
    let mut pagination = PaginationStore::new(settings.per_page);

    let first = client
        .list_artists(pagination.page(), pagination.per_page())
        .await
        .context("Failed to fetch artists")?;
    pagination.commit(first.artists, first.total);

    if page != pagination.page() {
        if pagination.set_page(page) {
            let fetched = client
                .list_artists(pagination.page(), pagination.per_page())
                .await
                .context("Failed to fetch artists")?;
            pagination.commit(fetched.artists, fetched.total);
        } else {
            warn!(
                "Page {} is out of range, showing page {}",
                page,
                pagination.page()
            );
        }
    }

    println!(
        "Page {} of {} ({} artists total)",
        pagination.page(),
        pagination.total_pages(),
        pagination.total()
    );
    for artist in pagination.artists() {
        print_artist_line(artist);
    }
    Ok(())
}

/// Run one search and print suggestions and results
async fn search(client: Arc<HttpCatalogClient>, settings: &Settings, query: &str) -> Result<()> {
    let payload = client
        .search(query, settings.search_limit)
        .await
        .context("Failed to search artists")?;

    if payload.results.is_empty() && payload.suggestions.is_empty() {
        println!("No matches for {:?}", query);
        return Ok(());
    }

    if !payload.suggestions.is_empty() {
        println!("Suggestions:");
        for suggestion in &payload.suggestions {
            println!("  {}", suggestion.name);
        }
    }
    if !payload.results.is_empty() {
        println!("Results:");
        for artist in &payload.results {
            print_artist_line(artist);
        }
    }
    Ok(())
}

/// Fetch and print one artist's details
async fn show(client: Arc<HttpCatalogClient>, id: &str) -> Result<()> {
    let mut loader = DetailLoader::new(client);
    match loader.show(id).await {
        DetailState::Loaded(artist) => {
            println!("{}", artist.name);
            println!("  id:      {}", artist.id);
            println!("  genres:  {}", artist.genre_line());
            if let Some(country) = &artist.country {
                println!("  country: {}", country);
            }
            if let Some(image_url) = &artist.image_url {
                println!("  image:   {}", image_url);
            }
            Ok(())
        }
        DetailState::Failed(message) => anyhow::bail!("{}", message),
        DetailState::Loading => anyhow::bail!("Artist fetch did not complete"),
    }
}

fn print_artist_line(artist: &Artist) {
    println!("  {}  {} [{}]", artist.id, artist.name, artist.genre_line());
}
