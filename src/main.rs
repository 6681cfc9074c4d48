use std::path::PathBuf;

use anyhow::Context;
use clap::{Parser, Subcommand};
use tracing::debug;
use tracing_subscriber::EnvFilter;

use markerboard::{
    map::SubmitResult, models::LoginStatus, Board, BoardConfig, HeadlessSurface,
    HttpMarkerStore, LatLng, MarkerStore, PortfolioClient, SqliteMarkerStore,
};

#[derive(Parser)]
#[command(name = "markerboard")]
#[command(about = "Shared map markers, quotes and translations for the portfolio site")]
struct Cli {
    /// Backend base url
    #[arg(long, env = "MARKERBOARD_URL")]
    url: Option<String>,

    /// Keep markers in a local sqlite file instead of the backend
    #[arg(long, value_name = "DB")]
    local: Option<PathBuf>,

    /// Enable verbose output
    #[arg(short, long)]
    verbose: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// List stored markers the way the map list shows them
    Markers,
    /// Place a marker and save it
    Add {
        #[arg(long, allow_hyphen_values = true, value_parser = parse_latitude)]
        lat: f64,
        #[arg(long, allow_hyphen_values = true, value_parser = parse_longitude)]
        lng: f64,
        content: String,
    },
    /// Delete every stored marker
    Clear,
    /// Show the latest quotes and the login status
    Quotes {
        #[arg(long, default_value_t = markerboard::config::DEFAULT_QUOTE_COUNT)]
        count: u32,
    },
    /// Delete your quotes
    DeleteQuotes,
    /// Submit a quote
    Quote { text: String },
    /// Set your nickname
    Nickname { name: String },
    /// Translate a block of text
    Translate {
        #[arg(long, default_value = "text")]
        element_id: String,
        #[arg(long)]
        lang: String,
        text: String,
    },
    /// Open the map window
    #[cfg(feature = "gui")]
    Gui,
}

fn parse_coordinate(raw: &str, name: &str, limit: f64) -> Result<f64, String> {
    let value: f64 = raw
        .trim()
        .parse()
        .map_err(|e| format!("{raw:?} is not a number: {e}"))?;
    if value.is_finite() && value.abs() <= limit {
        Ok(value)
    } else {
        Err(format!("{name} must be between -{limit} and {limit}"))
    }
}

fn parse_latitude(raw: &str) -> Result<f64, String> {
    parse_coordinate(raw, "latitude", 90.0)
}

fn parse_longitude(raw: &str) -> Result<f64, String> {
    parse_coordinate(raw, "longitude", 180.0)
}

fn main() -> anyhow::Result<()> {
    let args = Cli::parse();

    let default_level = if args.verbose { "debug" } else { "info" };
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level)),
        )
        .with_target(false)
        .init();

    let mut config = BoardConfig::from_env();
    if let Some(url) = args.url {
        config = config.with_base_url(url);
    }
    debug!(?config, "configuration loaded");

    match args.command {
        // iced drives its own executor, so the window stays off the tokio runtime
        #[cfg(feature = "gui")]
        Command::Gui => {
            let store = HttpMarkerStore::new(config.clone())?;
            markerboard::gui::run(store, config).context("Map window failed")
        }
        command => {
            let runtime = tokio::runtime::Runtime::new()?;
            runtime.block_on(dispatch(command, args.local, config))
        }
    }
}

async fn dispatch(
    command: Command,
    local: Option<PathBuf>,
    config: BoardConfig,
) -> anyhow::Result<()> {
    match command {
        Command::Quotes { count } => {
            let client = PortfolioClient::new(config)?;
            let envelope = client
                .fetch_quotes(count)
                .await
                .context("Failed to fetch quotes")?;
            let status = envelope.login_status();
            println!("{}", status.status_line());
            println!("{}: {}", status.redirect_label(), envelope.redirect_url);
            for quote in &envelope.quotes {
                match quote.posted_at() {
                    Some(at) => println!("  [{}] {}", at.date(), quote.display_line()),
                    None => println!("  {}", quote.display_line()),
                }
            }
            if !status.can_submit() {
                println!("Log in to submit quotes.");
            }
            Ok(())
        }
        Command::DeleteQuotes => {
            let client = PortfolioClient::new(config)?;
            client.delete_quotes().await.context("Failed to delete quotes")?;
            println!("Quotes deleted.");
            Ok(())
        }
        Command::Quote { text } => {
            let client = PortfolioClient::new(config)?;
            client.submit_quote(&text).await.context("Failed to submit quote")?;
            println!("Quote submitted.");
            Ok(())
        }
        Command::Nickname { name } => {
            let client = PortfolioClient::new(config)?;
            client.set_nickname(&name).await.context("Failed to set nickname")?;
            println!("Nickname set to {}.", name);
            Ok(())
        }
        Command::Translate {
            element_id,
            lang,
            text,
        } => {
            let client = PortfolioClient::new(config)?;
            println!("Loading...");
            let translated = client
                .translate(&element_id, &text, &lang)
                .await
                .context("Failed to translate")?;
            println!("{}", translated);
            Ok(())
        }
        Command::Markers => with_store(local, config, MarkerCommand::List).await,
        Command::Add { lat, lng, content } => {
            let position = LatLng::new(lat, lng);
            with_store(local, config, MarkerCommand::Add { position, content }).await
        }
        Command::Clear => with_store(local, config, MarkerCommand::Clear).await,
        #[cfg(feature = "gui")]
        Command::Gui => anyhow::bail!("the map window cannot be opened from a running task"),
    }
}

enum MarkerCommand {
    List,
    Add { position: LatLng, content: String },
    Clear,
}

async fn with_store(
    local: Option<PathBuf>,
    config: BoardConfig,
    command: MarkerCommand,
) -> anyhow::Result<()> {
    match local {
        Some(db_file) => {
            let store = SqliteMarkerStore::open(&db_file)
                .await
                .with_context(|| format!("Failed to open local store {:?}", db_file))?;
            let result = run_markers(store.clone(), config, command, None).await;
            store.close().await;
            result
        }
        None => {
            // the backend drops markers from logged out users without complaint
            let login = match command {
                MarkerCommand::Add { .. } => {
                    let envelope = PortfolioClient::new(config.clone())?
                        .fetch_quotes(0)
                        .await
                        .context("Failed to check login")?;
                    Some(envelope.login_status())
                }
                MarkerCommand::List | MarkerCommand::Clear => None,
            };
            let store = HttpMarkerStore::new(config.clone())?;
            run_markers(store, config, command, login).await
        }
    }
}

async fn run_markers<S: MarkerStore>(
    store: S,
    config: BoardConfig,
    command: MarkerCommand,
    login: Option<LoginStatus>,
) -> anyhow::Result<()> {
    let mut board = Board::new(store, HeadlessSurface::new(), config);
    board.set_login_status(login);
    let loaded = board.initialize().await;
    // a failed load is already queued as a notice; only listing needs it
    if matches!(command, MarkerCommand::List) {
        loaded.context("Failed to load markers")?;
    }

    match command {
        MarkerCommand::List => {
            if board.view().list().is_empty() {
                println!("No markers yet.");
            }
            for line in board.view().list().lines() {
                println!("{}", line);
            }
        }
        MarkerCommand::Add { position, content } => {
            board
                .on_map_click(position)
                .context("Cannot place marker")?;
            match board
                .submit_edit(&content)
                .await
                .context("Failed to save marker")?
            {
                SubmitResult::Committed(marker) => println!("{}", marker.list_line()),
                SubmitResult::Cancelled | SubmitResult::NoSession => {
                    println!("Nothing to add.")
                }
            }
        }
        MarkerCommand::Clear => {
            board.clear_all().await.context("Failed to delete markers")?;
            println!("Deleted all stored markers.");
        }
    }

    for notice in board.view_mut().take_notices() {
        eprintln!("warning: {}", notice);
    }
    Ok(())
}
