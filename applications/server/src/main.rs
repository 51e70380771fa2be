/// Music Store Server - storefront with catalog browsing and shopping carts
use clap::{Parser, Subcommand};
use musicstore_core::CatalogStore;
use musicstore_server::{config::ServerConfig, create_router, state::AppState, TracingAnalytics};
use musicstore_storage::LocalStorageContext;
use std::{net::SocketAddr, sync::Arc};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[derive(Parser)]
#[command(name = "musicstore-server")]
#[command(about = "Music Store storefront server", long_about = None)]
struct Cli {
    /// Configuration file path
    #[arg(short, long, global = true, env = "MUSICSTORE_CONFIG")]
    config: Option<String>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Start the HTTP server
    Serve,
    /// Insert the sample catalog into an empty database
    Seed,
    /// List all genres
    ListGenres,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Initialize tracing
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "musicstore_server=info,analytics=info,tower_http=info".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let cli = Cli::parse();
    let config = ServerConfig::load(cli.config.as_deref())?;

    match cli.command {
        Commands::Serve => {
            serve(config).await?;
        }
        Commands::Seed => {
            seed(&config).await?;
        }
        Commands::ListGenres => {
            list_genres(&config).await?;
        }
    }

    Ok(())
}

async fn serve(config: ServerConfig) -> anyhow::Result<()> {
    config.validate()?;

    tracing::info!("Starting Music Store server");
    tracing::info!("Host: {}", config.server.host);
    tracing::info!("Port: {}", config.server.port);

    // Initialize database
    let pool = musicstore_storage::open(&config.storage.database_url).await?;
    tracing::info!("Database connected");

    let app_state = AppState::from_config(pool, &config, Arc::new(TracingAnalytics));
    tracing::info!(
        "Album cache {} (sliding expiration {}s)",
        if app_state.album_cache.is_enabled() {
            "enabled"
        } else {
            "disabled"
        },
        config.store.cache_sliding_expiration_secs
    );

    let app = create_router(app_state);

    let addr = SocketAddr::from((
        config.server.host.parse::<std::net::IpAddr>()?,
        config.server.port,
    ));

    tracing::info!("Server listening on {}", addr);

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}

async fn seed(config: &ServerConfig) -> anyhow::Result<()> {
    let pool = musicstore_storage::open(&config.storage.database_url).await?;
    let summary = musicstore_storage::seed::run(&pool).await?;

    println!(
        "Seeded {} genres, {} artists, {} albums",
        summary.genres, summary.artists, summary.albums
    );

    Ok(())
}

async fn list_genres(config: &ServerConfig) -> anyhow::Result<()> {
    let pool = musicstore_storage::open(&config.storage.database_url).await?;
    let storage = LocalStorageContext::new(pool);

    let genres = storage.get_all_genres().await?;

    println!("Genres:");
    for genre in genres {
        println!("  {} - {}", genre.id, genre.name);
    }

    Ok(())
}
