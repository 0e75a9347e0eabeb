use std::{io, path::PathBuf};

use anyhow::{Context, Result};
use clap::Parser;
use client_core::{CatalogSource, CatalogStore, ListingKind, TmdbClient, UiEvent, ViewController};
use shared::domain::GenreId;
use tokio::io::{AsyncBufReadExt, BufReader};
use tracing::{info, warn};
use tracing_subscriber::EnvFilter;

mod commands;
mod config;
mod presenter;

use commands::{parse_command, Command, HELP};
use config::load_settings;
use presenter::TextPresenter;

/// Lists the movies currently playing in cinemas, filtered by rating and genre.
#[derive(Parser, Debug)]
struct Args {
    /// Config file (flat TOML table); defaults to ./now_playing.toml when present.
    #[arg(long)]
    config: Option<PathBuf>,
    #[arg(long)]
    api_key: Option<String>,
    #[arg(long)]
    base_url: Option<String>,
    #[arg(long)]
    language: Option<String>,
    #[arg(long)]
    region: Option<String>,
    #[arg(long)]
    poster_size: Option<String>,
    /// Minimum TMDb rating (0-10).
    #[arg(long)]
    min_rating: Option<f64>,
    /// Required genre id; repeat to require several.
    #[arg(long = "genre")]
    genres: Vec<i64>,
    #[arg(long)]
    listing: Option<ListingKind>,
    #[arg(long)]
    hide_filters: bool,
    /// Keep reading filter commands from stdin.
    #[arg(long)]
    interactive: bool,
}

impl Args {
    fn initial_events(&self) -> Vec<UiEvent> {
        let mut events = Vec::new();
        if let Some(rating) = self.min_rating {
            events.push(UiEvent::RatingChanged(rating));
        }
        events.extend(
            self.genres
                .iter()
                .map(|id| UiEvent::GenreToggled(GenreId(*id))),
        );
        if let Some(kind) = self.listing {
            events.push(UiEvent::ListingTypeChanged(kind));
        }
        if self.hide_filters {
            events.push(UiEvent::FiltersVisibilityToggled);
        }
        events
    }
}

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .with_writer(io::stderr)
        .init();
    let args = Args::parse();

    let mut settings = load_settings(args.config.as_deref())?;
    if let Some(v) = &args.api_key {
        settings.api_key = v.clone();
    }
    if let Some(v) = &args.base_url {
        settings.api_base_url = v.clone();
    }
    if let Some(v) = &args.language {
        settings.language = v.clone();
    }
    if let Some(v) = &args.region {
        settings.region = v.clone();
    }
    if let Some(v) = &args.poster_size {
        settings.poster_size = v.clone();
    }
    settings.validate()?;

    info!(
        base_url = %settings.api_base_url,
        region = %settings.region,
        language = %settings.language,
        "starting now playing listing"
    );

    let client = TmdbClient::new(settings.tmdb())?;
    let mut controller = ViewController::new(CatalogStore::new(client), TextPresenter::default())
        .with_poster_size(settings.poster_size.clone());

    controller
        .render_default()
        .await
        .context("failed to load the now playing catalog")?;

    for event in args.initial_events() {
        controller.handle(event).await?;
    }
    print_page(&controller)?;

    if args.interactive {
        run_interactive(&mut controller).await?;
    }

    Ok(())
}

async fn run_interactive<S: CatalogSource>(
    controller: &mut ViewController<S, TextPresenter>,
) -> Result<()> {
    println!("{HELP}");
    let mut lines = BufReader::new(tokio::io::stdin()).lines();

    while let Some(line) = lines.next_line().await.context("failed to read stdin")? {
        match parse_command(&line) {
            Ok(Command::Quit) => break,
            Ok(Command::Help) => println!("{HELP}"),
            Ok(Command::Show) => print_page(controller)?,
            Ok(Command::Event(event)) => {
                controller.handle(event).await?;
                print_page(controller)?;
            }
            Err(message) => {
                warn!(input = %line, "rejected command");
                println!("{message}");
            }
        }
    }

    Ok(())
}

fn print_page<S: CatalogSource>(controller: &ViewController<S, TextPresenter>) -> Result<()> {
    let stdout = io::stdout();
    let mut out = stdout.lock();
    controller
        .presenter()
        .write_to(&mut out)
        .context("failed to write listing")
}
