use std::net::SocketAddr;
use std::sync::Arc;

use clap::{Parser, Subcommand};
use jobtrack::{
    client::JobsClient,
    config::Config,
    create_router,
    db::{self, JobStore, MemoryJobStore, PgJobStore},
    middleware::issue_token,
    utils::logger::{init_file_logger, init_logger},
    AppState,
};
use tokio::net::TcpListener;
use tracing::{info, warn};
use uuid::Uuid;

#[derive(Parser)]
#[command(name = "jobtrack", about = "Track job applications", version)]
struct Cli {
    #[command(subcommand)]
    command: Option<Command>,
}

#[derive(Subcommand)]
enum Command {
    /// Run the HTTP API (default)
    Serve {
        /// Keep jobs in process memory instead of PostgreSQL
        #[arg(long)]
        in_memory: bool,
    },
    /// Apply database migrations and exit
    Migrate,
    /// Print a bearer token for a user id
    Token {
        #[arg(long)]
        user: Uuid,
    },
    /// Open the terminal client
    Tui {
        /// Base URL of the API, overrides JOBTRACK_API_URL
        #[arg(long)]
        url: Option<String>,
        /// Bearer token, overrides JOBTRACK_TOKEN
        #[arg(long)]
        token: Option<String>,
    },
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    let config = Config::from_env()?;

    match cli.command.unwrap_or(Command::Serve { in_memory: false }) {
        Command::Serve { in_memory } => {
            init_logger();
            serve(config, in_memory).await
        }
        Command::Migrate => {
            init_logger();
            let pool = db::create_pool(&config.database).await?;
            db::run_migrations(&pool).await
        }
        Command::Token { user } => {
            if config.auth.secret.is_empty() {
                anyhow::bail!("JWT_SECRET must be set");
            }
            println!("{}", issue_token(&config.auth, user)?);
            Ok(())
        }
        Command::Tui { url, token } => {
            // stdout belongs to the terminal UI
            let _guard = init_file_logger(&std::env::temp_dir());

            let url = url.unwrap_or(config.client.api_url);
            let token = token
                .or(config.client.token)
                .ok_or_else(|| anyhow::anyhow!("a token is required: pass --token or set JOBTRACK_TOKEN"))?;

            jobtrack::tui::run(Arc::new(JobsClient::new(url, token))).await
        }
    }
}

async fn serve(config: Config, in_memory: bool) -> anyhow::Result<()> {
    config.validate_for_server(in_memory)?;
    info!("Configuration loaded: {:?}", config.server);

    let store: Arc<dyn JobStore> = if in_memory {
        warn!("Using in-memory job store, data is lost on exit");
        Arc::new(MemoryJobStore::new())
    } else {
        let pool = db::create_pool(&config.database).await?;
        db::run_migrations(&pool).await?;
        Arc::new(PgJobStore::new(pool))
    };

    let addr: SocketAddr = format!("{}:{}", config.server.host, config.server.port).parse()?;
    let app = create_router(AppState { store, config });

    info!("Server listening on {}", addr);
    let listener = TcpListener::bind(addr).await?;
    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .map_err(|e| anyhow::anyhow!("Server error: {}", e))?;

    Ok(())
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        warn!("Failed to listen for shutdown signal: {}", e);
        return;
    }
    info!("Shutdown signal received");
}
