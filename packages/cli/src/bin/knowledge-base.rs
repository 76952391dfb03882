use clap::{Parser, Subcommand};
use kb_cli::{run_server, Config};
use kb_config::DEFAULT_LOG_FILTER;
use std::path::PathBuf;
use std::process;
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "knowledge-base")]
#[command(about = "Knowledge base of tagged questions and answers")]
#[command(version)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Run the HTTP API server
    Serve {
        /// Port to listen on (overrides KB_API_PORT)
        #[arg(long)]
        port: Option<u16>,
        /// SQLite database file (overrides KB_DATABASE_PATH)
        #[arg(long)]
        database: Option<PathBuf>,
    },
}

#[tokio::main]
async fn main() {
    dotenvy::dotenv().ok();

    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new(DEFAULT_LOG_FILTER)),
        )
        .init();

    let cli = Cli::parse();

    if let Err(e) = handle_command(cli.command).await {
        eprintln!("Error: {:#}", e);
        process::exit(1);
    }
}

async fn handle_command(command: Commands) -> anyhow::Result<()> {
    match command {
        Commands::Serve { port, database } => {
            let mut config = Config::from_env()?;
            if let Some(port) = port {
                if port == 0 {
                    return Err(kb_cli::ConfigError::PortOutOfRange(port).into());
                }
                config.port = port;
            }
            if let Some(database) = database {
                config.database_path = database;
            }
            run_server(config).await
        }
    }
}
