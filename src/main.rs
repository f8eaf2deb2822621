//! rollhouse server binary.

use clap::Parser;
use rollhouse::{
    api::{ApiServer, AppState},
    ConfigLoader, Ledger, MemoryStore, Settlement,
};
use std::sync::Arc;
use tracing::info;

#[derive(Parser, Debug)]
#[command(name = "rollhouse", about = "Play-money casino backend", version)]
struct Args {
    /// Path to a TOML config file
    #[arg(short, long)]
    config: Option<String>,

    /// Override the listen port
    #[arg(short, long)]
    port: Option<u16>,
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "rollhouse=info,tower_http=info".into()),
        )
        .init();

    let args = Args::parse();

    let mut loader = ConfigLoader::new();
    if let Some(path) = &args.config {
        loader = loader.with_path(path);
    }
    let mut config = loader.load()?;
    if let Some(port) = args.port {
        config.server.port = port;
    }

    info!(
        welcome_bonus = config.casino.welcome_bonus,
        min_cash = config.casino.min_cash_amount,
        "loaded configuration"
    );

    let store = Arc::new(MemoryStore::new());
    let ledger = Arc::new(Ledger::new(store, config.casino.clone()));
    let settlement = Arc::new(Settlement::new(ledger.clone()));

    let state = Arc::new(AppState {
        ledger,
        settlement,
        version: env!("CARGO_PKG_VERSION").to_string(),
    });

    ApiServer::new(config.server, state).run().await
}
