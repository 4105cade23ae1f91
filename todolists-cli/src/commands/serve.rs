//! HTTP server command
//!
//! Picks the storage backend, then runs the todolists server until
//! Ctrl+C or SIGTERM.

use std::net::SocketAddr;
use std::time::Duration;

use anyhow::{Context, Result};
use clap::{Parser, ValueEnum};

use todolists_server::http::{run_server, ServerConfig};
use todolists_server::Backend;

/// Default PostgreSQL connection string
pub const DEFAULT_DATABASE_URL: &str = "postgres://localhost/todos";

/// Where lists are kept
#[derive(ValueEnum, Debug, Clone, Copy, PartialEq, Eq)]
pub enum BackendKind {
    /// PostgreSQL, shared by every visitor
    Postgres,
    /// In-memory, private to each session and lost when it expires
    Memory,
}

/// Arguments for the serve command
#[derive(Parser, Debug)]
pub struct ServeArgs {
    /// Address to bind to
    #[arg(long, short = 'b', default_value = "127.0.0.1:4567")]
    pub bind: SocketAddr,

    /// Storage backend
    #[arg(long, value_enum, env = "TODOLISTS_BACKEND", default_value = "postgres")]
    pub backend: BackendKind,

    /// Database URL for the postgres backend
    #[arg(long, env = "DATABASE_URL", default_value = DEFAULT_DATABASE_URL)]
    pub database_url: String,

    /// Idle seconds before a session (and its in-memory lists) is dropped
    #[arg(long, default_value_t = 1800)]
    pub session_ttl_secs: u64,

    /// Allow permissive CORS (all origins) - use with caution
    #[arg(long)]
    pub cors_permissive: bool,
}

impl ServeArgs {
    fn server_config(&self) -> ServerConfig {
        ServerConfig {
            bind_addr: self.bind,
            cors_permissive: self.cors_permissive,
            session_ttl: Duration::from_secs(self.session_ttl_secs),
        }
    }
}

/// Run the HTTP server
pub async fn run_serve(args: ServeArgs) -> Result<()> {
    let config = args.server_config();

    let backend = match args.backend {
        BackendKind::Postgres => Backend::connect_postgres(&args.database_url)
            .await
            .context("Failed to connect to PostgreSQL. Set --database-url, DATABASE_URL or ~/.todolists/.env")?,
        BackendKind::Memory => Backend::Memory,
    };

    tracing::info!("Starting todolists server on {}", config.bind_addr);

    // Blocks until shutdown
    run_server(backend, config).await.context("Server error")?;

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Parser)]
    struct Harness {
        #[command(flatten)]
        serve: ServeArgs,
    }

    #[test]
    fn explicit_flags_build_config() {
        let harness = Harness::parse_from([
            "todolists",
            "--bind",
            "0.0.0.0:8080",
            "--backend",
            "memory",
            "--session-ttl-secs",
            "60",
            "--cors-permissive",
        ]);
        assert_eq!(harness.serve.backend, BackendKind::Memory);

        let config = harness.serve.server_config();
        assert_eq!(config.bind_addr.port(), 8080);
        assert_eq!(config.session_ttl, Duration::from_secs(60));
        assert!(config.cors_permissive);
    }

    #[test]
    fn rejects_unknown_backend() {
        let result = Harness::try_parse_from(["todolists", "--backend", "sqlite"]);
        assert!(result.is_err());
    }
}
