use anyhow::{Context, Result};
use clap::{Parser, ValueEnum};

use crate::auth::identity::ServiceCredentials;
use crate::utils::logging::LogLevel;

/// Command line / environment surface of the gateway binary.
#[derive(Debug, Parser)]
#[command(author, version, about, long_about = None)]
pub struct Args {
    #[arg(long, env = "BIND_HOST", default_value = "0.0.0.0")]
    pub host: String,
    #[arg(long, env = "BIND_PORT", default_value_t = 8000)]
    pub port: u16,
    #[arg(long, env = "LOG_LEVEL", value_enum)]
    pub log_level: Option<LogLevel>,
    #[arg(long, env = "LOG_FORMAT", value_enum, default_value_t = LogFormat::Compact)]
    pub log_format: LogFormat,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum LogFormat {
    Json,
    Compact,
}

impl std::fmt::Display for LogFormat {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            LogFormat::Json => f.write_str("json"),
            LogFormat::Compact => f.write_str("compact"),
        }
    }
}

/// Resolved process configuration: bind address plus the fixed service
/// credentials used against the identity endpoint.
#[derive(Debug, Clone)]
pub struct Settings {
    pub host: String,
    pub port: u16,
    pub credentials: ServiceCredentials,
}

impl Settings {
    /// Loads `.env.local` first, then `.env` as fallback, then reads the
    /// service credentials from the process environment.
    pub fn load(args: &Args) -> Result<Self> {
        let _ = dotenvy::from_filename(".env.local");
        let _ = dotenvy::dotenv();

        let username =
            std::env::var("AUTH_TOKEN_USERNAME").context("AUTH_TOKEN_USERNAME is not set")?;
        let api_key =
            std::env::var("AUTH_TOKEN_APIKEY").context("AUTH_TOKEN_APIKEY is not set")?;

        Ok(Self {
            host: args.host.clone(),
            port: args.port,
            credentials: ServiceCredentials { username, api_key },
        })
    }
}
