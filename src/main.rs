use clap::{Parser, Subcommand};
use configuration::Settings;
use provider::{MemoryStore, RecordStore};
use std::sync::Arc;
use tracing_subscriber::EnvFilter;

/// The main entry point for the Prism analysis service.
#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Load environment variables from a .env file, if present.
    dotenvy::dotenv().ok();

    // Initialize tracing once for the whole process; every crate logs
    // through this subscriber.
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    let cli = Cli::parse();
    let settings = configuration::load_settings()?;

    match cli.command {
        Commands::Serve(args) => handle_serve(args, settings).await,
        Commands::Migrate => handle_migrate(settings).await,
    }
}

// ==============================================================================
// CLI Structure
// ==============================================================================

/// A modular, domain-oriented data analysis web service.
#[derive(Parser)]
#[command(author, version, about, long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Run the HTTP server.
    Serve(ServeArgs),
    /// Apply pending database migrations and exit.
    Migrate,
}

#[derive(Parser)]
struct ServeArgs {
    /// Serve from an empty in-memory store instead of Postgres.
    #[arg(long)]
    memory: bool,

    /// Override the configured port.
    #[arg(long)]
    port: Option<u16>,
}

// ==============================================================================
// Command Logic
// ==============================================================================

async fn handle_serve(args: ServeArgs, mut settings: Settings) -> anyhow::Result<()> {
    if let Some(port) = args.port {
        settings.server.port = port;
    }

    tracing::info!(
        environment = settings.app.environment.as_str(),
        "starting {} v{}",
        settings.app.name,
        settings.app.version
    );

    if args.memory {
        tracing::warn!("serving from an in-memory store; data will not survive a restart");
        let store: Arc<dyn RecordStore> = Arc::new(MemoryStore::new());
        web_server::serve(store, settings).await
    } else {
        web_server::run_server(settings).await
    }
}

async fn handle_migrate(settings: Settings) -> anyhow::Result<()> {
    let pool = database::connect(&settings.database).await?;
    database::run_migrations(&pool).await?;
    tracing::info!("database migrations applied");
    Ok(())
}
