//! HTTP server command
//!
//! Connects to the document store once, then serves the review API until
//! shutdown. A missing connection string or an unreachable store stops the
//! process before any request is served.

use std::net::{IpAddr, SocketAddr};
use std::sync::Arc;

use anyhow::{Context, Result};
use clap::Parser;

use pollfinder_server::db::DEFAULT_DATABASE;
use pollfinder_server::{run_server, MongoPollStore, ServerConfig, StoreConfig};

/// Arguments for the serve command
#[derive(Parser, Debug)]
pub struct ServeArgs {
    /// MongoDB connection string
    #[arg(long, env = "MONGODB_CONNECTION_STRING", hide_env_values = true)]
    pub database_url: Option<String>,

    /// Database holding the expanded_polls collection
    #[arg(long, env = "MONGODB_DATABASE", default_value = DEFAULT_DATABASE)]
    pub database: String,

    /// Port to listen on
    #[arg(long, short = 'p', env = "PORT", default_value_t = 3001)]
    pub port: u16,

    /// Address to bind to
    #[arg(long, default_value = "0.0.0.0")]
    pub host: IpAddr,

    /// Only allow local front-end origins instead of any origin
    #[arg(long)]
    pub cors_localhost_only: bool,
}

impl ServeArgs {
    fn store_config(&self) -> Result<StoreConfig> {
        let url = self
            .database_url
            .as_deref()
            .filter(|s| !s.is_empty())
            .context(
                "MONGODB_CONNECTION_STRING not set. Set via --database-url, the environment, or .env",
            )?;

        Ok(StoreConfig::new(url).with_database(&self.database))
    }

    fn server_config(&self) -> ServerConfig {
        ServerConfig {
            bind_addr: SocketAddr::new(self.host, self.port),
            cors_permissive: !self.cors_localhost_only,
        }
    }
}

/// Run the HTTP server
pub async fn run_serve(args: ServeArgs) -> Result<()> {
    let store_config = args.store_config()?;
    let server_config = args.server_config();

    tracing::info!(database = %store_config.database, "connecting to MongoDB");

    let store = MongoPollStore::connect(&store_config)
        .await
        .context("Failed to connect to MongoDB")?;

    run_server(Arc::new(store), server_config)
        .await
        .context("Server error")?;

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn args(database_url: Option<&str>) -> ServeArgs {
        ServeArgs {
            database_url: database_url.map(str::to_owned),
            database: DEFAULT_DATABASE.to_string(),
            port: 3001,
            host: IpAddr::from([127, 0, 0, 1]),
            cors_localhost_only: false,
        }
    }

    #[test]
    fn requires_connection_string() {
        assert!(args(None).store_config().is_err());
        assert!(args(Some("")).store_config().is_err());
    }

    #[test]
    fn builds_configs() {
        let args = args(Some("mongodb://localhost:27017"));

        let store = args.store_config().unwrap();
        assert_eq!(store.connection_string, "mongodb://localhost:27017");
        assert_eq!(store.database, "pollfinder");

        let server = args.server_config();
        assert_eq!(server.bind_addr.port(), 3001);
        assert!(server.cors_permissive);
    }
}
