use std::path::PathBuf;

use clap::{Args, Parser, Subcommand};
use pastel_db::DbConfig;

#[derive(Debug, Parser)]
#[command(
    name = "pastel",
    version,
    about = "A copy and paste sharing web application"
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Option<Commands>,

    #[command(flatten)]
    pub config: ServerConfig,
}

#[derive(Debug, Subcommand)]
pub enum Commands {
    /// Start the pastel server
    #[command(visible_alias = "s")]
    Start(ServerConfig),
}

impl Cli {
    /// Resolve the server settings; `start` is the default action.
    pub fn into_server_config(self) -> ServerConfig {
        match self.command {
            Some(Commands::Start(config)) => config,
            None => self.config,
        }
    }
}

#[derive(Debug, Clone, Args)]
pub struct ServerConfig {
    /// Address to serve this service
    #[arg(long, env = "PASTEL_HOST", default_value = "0.0.0.0")]
    pub host: String,

    /// Port number to serve this service
    #[arg(long, env = "PASTEL_PORT", default_value = "5050")]
    pub port: u16,

    /// Path to sqlite storage file
    #[arg(long = "database_url", env = "PASTEL_DATABASE_URL", default_value = "pastel.db")]
    pub database_url: PathBuf,
}

impl ServerConfig {
    pub fn db_config(&self) -> DbConfig {
        DbConfig {
            sqlite_path: self.database_url.clone(),
        }
    }
}
