use std::sync::Arc;

use anyhow::Result;
use clap::Parser;
use tokio::net::TcpListener;
use tracing::info;

use pastel_db::SqliteDatabase;
use pastel_server::config::Cli;

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .init();

    let config = Cli::parse().into_server_config();
    let db = Arc::new(SqliteDatabase::open(&config.db_config())?);

    let listener = TcpListener::bind((config.host.as_str(), config.port)).await?;
    info!("start pastel at http://{}", listener.local_addr()?);

    pastel_server::serve(listener, db).await
}
