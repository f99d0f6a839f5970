use std::{net::SocketAddr, path::PathBuf};

use clap::Parser;

/// Todo API service.
#[derive(Debug, Clone, Parser)]
#[command(name = "todo-api", version)]
pub struct ApiConfig {
    /// Address to listen on
    #[arg(long, env = "TODO_API_ADDR", default_value = "0.0.0.0:3001")]
    pub addr: SocketAddr,

    /// Directory of the sled database
    #[arg(long, env = "TODO_DB_PATH", default_value = "db")]
    pub db_path: PathBuf,
}

/// Browser front-end for the todo API.
#[derive(Debug, Clone, Parser)]
#[command(name = "todo-web", version)]
pub struct WebConfig {
    /// Address to listen on
    #[arg(long, env = "TODO_WEB_ADDR", default_value = "0.0.0.0:3000")]
    pub addr: SocketAddr,

    /// Base URL of the todo API
    #[arg(long, env = "TODO_API_URL", default_value = "http://localhost:3001")]
    pub api_url: String,
}

/// Installs the fmt subscriber, honouring `RUST_LOG` (default `info`).
pub fn init_tracing() {
    let filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info"));
    tracing_subscriber::fmt().with_env_filter(filter).init();
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_api_defaults() {
        let config = ApiConfig::parse_from(["todo-api"]);
        assert_eq!(config.addr.port(), 3001);
        assert_eq!(config.db_path, PathBuf::from("db"));
    }

    #[test]
    fn test_web_flags() {
        let config = WebConfig::parse_from([
            "todo-web",
            "--addr",
            "127.0.0.1:8080",
            "--api-url",
            "http://api:3001",
        ]);
        assert_eq!(config.addr.port(), 8080);
        assert_eq!(config.api_url, "http://api:3001");
    }
}
