/// Musify Server - catalog, playlists and comments over HTTP
use clap::{Parser, Subcommand};
use musify_core::{Identity, UserId};
use musify_server::{
    api,
    config::ServerConfig,
    services::{AuthService, LocalAssetStore},
    state::AppState,
};
use musify_storage::Database;
use std::{net::SocketAddr, path::PathBuf, sync::Arc};
use tower_http::{
    cors::CorsLayer,
    services::ServeDir,
    trace::{DefaultMakeSpan, TraceLayer},
};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[derive(Parser)]
#[command(name = "musify-server")]
#[command(about = "Musify music catalog server", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Start the HTTP server
    Serve {
        /// Configuration file path
        #[arg(short, long)]
        config: Option<PathBuf>,
    },
    /// Mint a bearer token for local development
    IssueToken {
        /// User id placed in the `sub` claim
        #[arg(short, long)]
        user: String,
        /// Email claim
        #[arg(short, long)]
        email: Option<String>,
        /// Grant the admin claim
        #[arg(long)]
        admin: bool,
        /// Configuration file path
        #[arg(short, long)]
        config: Option<PathBuf>,
    },
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Initialize tracing
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "musify_server=info,tower_http=info".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let cli = Cli::parse();

    match cli.command {
        Commands::Serve { config } => {
            serve(config).await?;
        }
        Commands::IssueToken {
            user,
            email,
            admin,
            config,
        } => {
            issue_token(config, user, email, admin)?;
        }
    }

    Ok(())
}

async fn serve(config_path: Option<PathBuf>) -> anyhow::Result<()> {
    // Load configuration
    let config = ServerConfig::load(config_path.as_deref())?;
    config.validate()?;

    tracing::info!("Starting Musify Server");
    tracing::info!("Host: {}", config.server.host);
    tracing::info!("Port: {}", config.server.port);

    // Initialize database
    if let Some(dir) = sqlite_parent_dir(&config.storage.database_url) {
        tokio::fs::create_dir_all(dir).await?;
    }
    let db = Arc::new(Database::connect(&config.storage.database_url).await?);
    tracing::info!("Database connected");

    // Initialize asset store
    let assets = LocalAssetStore::new(
        config.storage.asset_root.clone(),
        config.storage.public_asset_base_url.clone(),
    );
    assets.initialize().await?;
    tracing::info!("Asset store initialized at {}", assets.root().display());

    let auth_service = Arc::new(AuthService::new(
        config.auth.jwt_secret.clone(),
        config.auth.jwt_expiration_hours,
    ));

    // Build application state
    let app_state = AppState::new(db, Arc::new(assets), auth_service);

    // Build router
    let app = api::router(app_state)
        .nest_service("/assets", ServeDir::new(&config.storage.asset_root))
        .layer(
            TraceLayer::new_for_http()
                .make_span_with(DefaultMakeSpan::default().include_headers(true)),
        )
        .layer(CorsLayer::permissive());

    // Create server address
    let addr = SocketAddr::from((
        config.server.host.parse::<std::net::IpAddr>()?,
        config.server.port,
    ));

    tracing::info!("Server listening on {}", addr);

    // Start server
    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}

fn issue_token(
    config_path: Option<PathBuf>,
    user: String,
    email: Option<String>,
    admin: bool,
) -> anyhow::Result<()> {
    let config = ServerConfig::load(config_path.as_deref())?;
    config.validate()?;

    let auth_service = AuthService::new(
        config.auth.jwt_secret.clone(),
        config.auth.jwt_expiration_hours,
    );

    let mut identity = Identity::new(UserId::new(user));
    if let Some(email) = email {
        identity = identity.with_email(email);
    }
    if admin {
        identity = identity.admin();
    }

    println!("{}", auth_service.issue_token(&identity)?);
    Ok(())
}

/// Directory holding a file-backed SQLite database
fn sqlite_parent_dir(database_url: &str) -> Option<PathBuf> {
    let path = database_url.strip_prefix("sqlite://")?;
    let path = path.split('?').next().unwrap_or(path);
    if path.is_empty() || path == ":memory:" {
        return None;
    }
    PathBuf::from(path)
        .parent()
        .filter(|p| !p.as_os_str().is_empty())
        .map(PathBuf::from)
}
