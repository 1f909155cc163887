/// California Speaks skill server
use clap::{Parser, Subcommand};
use speakca_playback::SharedQueueManager;
use speakca_server::{
    api,
    config::ServerConfig,
    services::{EpisodeCatalog, Ingestor, SiteClient, TranscodingService},
    state::AppState,
};
use std::{net::SocketAddr, path::PathBuf, sync::Arc};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[derive(Parser)]
#[command(name = "speakca-server")]
#[command(about = "California Speaks voice skill server", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Start the HTTP server
    Serve {
        /// Configuration file path
        #[arg(short, long, env = "SPEAKCA_CONFIG")]
        config: Option<PathBuf>,
    },
    /// Ingest new episodes from the podcast feed
    Sync {
        /// Configuration file path
        #[arg(short, long, env = "SPEAKCA_CONFIG")]
        config: Option<PathBuf>,
        /// Report what would be ingested without downloading
        #[arg(long)]
        dry_run: bool,
    },
    /// List episodes in the bucket, newest first
    List {
        /// Configuration file path
        #[arg(short, long, env = "SPEAKCA_CONFIG")]
        config: Option<PathBuf>,
    },
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Initialize tracing
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "speakca_server=info,speakca_playback=info,tower_http=info".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let cli = Cli::parse();

    match cli.command {
        Commands::Serve { config } => {
            serve(load_config(config)?).await?;
        }
        Commands::Sync { config, dry_run } => {
            sync(load_config(config)?, dry_run).await?;
        }
        Commands::List { config } => {
            list_episodes(load_config(config)?).await?;
        }
    }

    Ok(())
}

fn load_config(path: Option<PathBuf>) -> anyhow::Result<ServerConfig> {
    let config = ServerConfig::load(path.as_deref())?;
    config.validate()?;
    Ok(config)
}

async fn open_catalog(config: &ServerConfig) -> anyhow::Result<EpisodeCatalog> {
    let catalog = EpisodeCatalog::new(
        config.storage.bucket_path.clone(),
        &config.storage.public_base_url,
    )?;
    catalog.initialize().await?;
    Ok(catalog)
}

async fn serve(config: ServerConfig) -> anyhow::Result<()> {
    tracing::info!("Starting California Speaks skill server");
    tracing::info!("Host: {}", config.server.host);
    tracing::info!("Port: {}", config.server.port);

    let catalog = open_catalog(&config).await?;
    let playlist = catalog.playlist().await?;
    let link_index = catalog.link_index().await?;
    tracing::info!(
        episodes = playlist.len(),
        linked = link_index.len(),
        "Loaded episode catalog from {:?}",
        catalog.bucket_path()
    );
    if playlist.is_empty() {
        tracing::warn!("Episode bucket is empty; run `speakca-server sync` first");
    }

    let site = SiteClient::new(&config.site)?;
    let app_state = AppState::new(
        SharedQueueManager::from_playlist(playlist),
        Arc::new(site),
        link_index,
        config.skill.clone(),
    );

    let app = api::router(app_state, catalog.bucket_path());

    let addr = SocketAddr::from((
        config.server.host.parse::<std::net::IpAddr>()?,
        config.server.port,
    ));

    tracing::info!("Server listening on {}", addr);

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}

async fn sync(config: ServerConfig, dry_run: bool) -> anyhow::Result<()> {
    let catalog = open_catalog(&config).await?;
    let ingestor = Ingestor::new(
        Arc::new(SiteClient::new(&config.site)?),
        Arc::new(catalog),
        Arc::new(TranscodingService::from_settings(&config.transcoding)),
    );

    let report = ingestor.sync(dry_run).await?;

    println!(
        "Discovered {}, skipped {}, uploaded {}, failed {}",
        report.discovered, report.skipped, report.uploaded, report.failed
    );

    if report.failed > 0 {
        anyhow::bail!("{} episode(s) failed to ingest", report.failed);
    }
    Ok(())
}

async fn list_episodes(config: ServerConfig) -> anyhow::Result<()> {
    let catalog = open_catalog(&config).await?;
    let entries = catalog.list().await?;

    println!("Episodes:");
    for entry in entries {
        println!(
            "  {} {} {}",
            entry.last_modified.format("%Y-%m-%d %H:%M"),
            entry.key,
            entry.metadata.url.as_deref().unwrap_or("-")
        );
    }

    Ok(())
}
