/// CloudTune - terminal music player over the catalog backend
use clap::{Parser, Subcommand};
use cloudtune_catalog_client::CatalogClient;
use cloudtune_core::SourceId;
use cloudtune_player::{render, AppConfig, ClockSink, Shell};
use cloudtune_playback::{Player, PlayerError};
use cloudtune_storage::{CollectionStore, FileStore};
use std::path::PathBuf;
use std::sync::Arc;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[derive(Parser)]
#[command(name = "cloudtune")]
#[command(about = "Search, queue and play music from the CloudTune catalog", long_about = None)]
struct Cli {
    /// Configuration file path
    #[arg(short, long, global = true, env = "CLOUDTUNE_CONFIG")]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Start the interactive player (default)
    Shell,
    /// Search the catalog and print the results
    Search {
        /// Keyword to search for
        keyword: String,
        /// Source to search; repeat for several (defaults to config)
        #[arg(short, long = "source")]
        sources: Vec<String>,
    },
    /// Print the saved playlist
    Playlist,
    /// Print the saved favorites
    Favorites,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Logs go to stderr; keep them quiet so they do not garble the prompt
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "cloudtune=warn".into()),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    let cli = Cli::parse();

    let config = AppConfig::load(cli.config.as_deref())?;
    config.validate()?;

    match cli.command.unwrap_or(Commands::Shell) {
        Commands::Shell => shell(&config).await?,
        Commands::Search { keyword, sources } => search(&config, &keyword, &sources).await?,
        Commands::Playlist => print_collection(&config, false)?,
        Commands::Favorites => print_collection(&config, true)?,
    }

    Ok(())
}

async fn shell(config: &AppConfig) -> anyhow::Result<()> {
    let catalog = CatalogClient::new(config.catalog_config())?;
    let collections = open_collections(config)?;
    let (sink, clock) = ClockSink::new(config.playback.track_secs as f64);

    tracing::info!("Catalog: {}", catalog.url());
    tracing::info!("Data directory: {}", config.storage.data_dir.display());

    let player = Player::new(
        config.player_config(),
        collections,
        Arc::new(catalog),
        Box::new(sink),
    );

    Shell::new(player, clock, config.sources()).run().await?;
    Ok(())
}

async fn search(config: &AppConfig, keyword: &str, sources: &[String]) -> anyhow::Result<()> {
    let sources: Vec<SourceId> = if sources.is_empty() {
        config.sources()
    } else {
        sources.iter().flat_map(|s| SourceId::parse_list(s)).collect()
    };
    if sources.is_empty() {
        return Err(PlayerError::EmptySelection.into());
    }

    let catalog = CatalogClient::new(config.catalog_config())?;
    let tracks = catalog.search_songs(keyword, &sources).await?;

    if tracks.is_empty() {
        println!("No results");
    }
    for (i, track) in tracks.iter().enumerate() {
        println!("{}", render::track_row(i + 1, track, false, false));
    }
    Ok(())
}

fn print_collection(config: &AppConfig, favorites: bool) -> anyhow::Result<()> {
    let collections = open_collections(config)?;
    let tracks = if favorites {
        collections.load_favorites()
    } else {
        collections.load_playlist()
    };

    if tracks.is_empty() {
        println!("Nothing saved yet");
    }
    for (i, track) in tracks.iter().enumerate() {
        println!("{}", render::track_row(i + 1, track, !favorites, favorites));
    }
    Ok(())
}

fn open_collections(config: &AppConfig) -> anyhow::Result<CollectionStore> {
    let store = FileStore::open(config.storage.data_dir.clone())?;
    Ok(CollectionStore::new(Arc::new(store)))
}
