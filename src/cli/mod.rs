use clap::{Parser, Subcommand};
use std::process::ExitCode;

use crate::clients::aqhi::AqhiFeedClient;
use crate::infra::config::{Config, FeedConfig};

#[derive(Parser)]
#[command(name = "hk-environment-mcp")]
#[command(about = "HK Environment MCP Server")]
#[command(version)]
pub struct Cli {
    /// Serve streamable HTTP at /mcp instead of stdio
    #[arg(short = 's', long = "sse", visible_alias = "http")]
    pub sse: bool,
    /// Listen host for HTTP mode (overrides HOST)
    #[arg(long)]
    pub host: Option<String>,
    /// Listen port for HTTP mode (overrides PORT)
    #[arg(long)]
    pub port: Option<u16>,
    #[command(subcommand)]
    pub command: Option<Commands>,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Fetch the AQHI feed once and print the readings as JSON
    Fetch,
    /// Health check a running HTTP server
    Health {
        /// Service URL to check
        #[arg(short, long, default_value = "http://localhost:8000")]
        url: String,
    },
    /// Validate configuration
    Config,
}

impl Cli {
    /// Environment config with command-line overrides applied.
    pub fn server_config(&self) -> Config {
        let mut cfg = Config::from_env();
        if self.sse {
            cfg.mode = "http".into();
        }
        if let Some(host) = &self.host {
            cfg.host = host.clone();
        }
        if let Some(port) = self.port {
            cfg.port = port;
        }
        cfg
    }
}

pub async fn run() -> ExitCode {
    let cli = Cli::parse();

    match cli.command {
        Some(command) => run_commands(command).await,
        None => match crate::infra::boot::run_server(cli.server_config()).await {
            Ok(()) => ExitCode::SUCCESS,
            Err(e) => {
                tracing::error!(error = %format!("{e:#}"), "server exited with error");
                ExitCode::FAILURE
            }
        },
    }
}

pub async fn run_commands(command: Commands) -> ExitCode {
    match command {
        Commands::Fetch => match fetch_once().await {
            Ok(json) => {
                println!("{json}");
                ExitCode::SUCCESS
            }
            Err(e) => {
                eprintln!("❌ Fetch failed: {}", e);
                ExitCode::FAILURE
            }
        },
        Commands::Health { url } => match health_check(&url).await {
            Ok(_) => {
                println!("✅ Service is healthy");
                ExitCode::SUCCESS
            }
            Err(e) => {
                eprintln!("❌ Health check failed: {}", e);
                ExitCode::FAILURE
            }
        },
        Commands::Config => match validate_config() {
            Ok(_) => {
                println!("✅ Configuration is valid");
                ExitCode::SUCCESS
            }
            Err(e) => {
                eprintln!("❌ Configuration validation failed: {}", e);
                ExitCode::FAILURE
            }
        },
    }
}

async fn fetch_once() -> Result<String, Box<dyn std::error::Error>> {
    let feed_cfg = FeedConfig::from_env_and_toml()?;
    let client = AqhiFeedClient::from_config(&feed_cfg)?;
    let readings = crate::tools::aqhi::get_current_aqhi(&client).await?;
    Ok(serde_json::to_string_pretty(&readings)?)
}

async fn health_check(url: &str) -> Result<(), Box<dyn std::error::Error>> {
    let client = reqwest::Client::new();
    let response = client
        .get(format!("{}/healthz", url.trim_end_matches('/')))
        .timeout(std::time::Duration::from_millis(500))
        .send()
        .await?;

    if response.status().is_success() {
        Ok(())
    } else {
        Err(format!("HTTP {}", response.status()).into())
    }
}

fn validate_config() -> Result<(), Box<dyn std::error::Error>> {
    let cfg = Config::from_env();
    if !matches!(cfg.mode.as_str(), "stdio" | "http") {
        return Err(format!("Invalid MODE: {}. Must be 'stdio' or 'http'", cfg.mode).into());
    }
    if cfg.is_http() && cfg.port == 0 {
        return Err("PORT cannot be 0".into());
    }

    let feed = FeedConfig::from_env_and_toml()?;
    if !(feed.url.starts_with("http://") || feed.url.starts_with("https://")) {
        return Err(format!("AQHI feed URL must be http(s): {}", feed.url).into());
    }
    if feed.connect_timeout_ms == 0 {
        return Err("AQHI_CONNECT_TIMEOUT_MS cannot be 0".into());
    }
    if feed.timeout_ms == 0 {
        return Err("AQHI_TIMEOUT_MS cannot be 0".into());
    }
    Ok(())
}
