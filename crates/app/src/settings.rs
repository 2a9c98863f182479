//! Handles settings for the application.
//!
//! Values come from, in increasing priority: built-in defaults, an optional
//! `settings.toml`, `MOMO_*` environment variables (`MOMO_SERVER__PORT=9000`)
//! and command line flags.
use clap::Parser;
use config::{Config, ConfigError, Environment, File};
use serde::Deserialize;

const DEFAULT_CONFIG_PATH: &str = "settings";

#[derive(Debug, Deserialize)]
pub struct App {
    pub level: String,
}

#[derive(Debug, Deserialize)]
pub struct Server {
    pub bind: String,
    pub port: u16,
    /// XML document loaded at startup.
    pub seed: String,
}

#[derive(Debug, Deserialize)]
pub struct Settings {
    pub app: App,
    pub server: Server,
}

#[derive(Debug, Parser)]
#[command(name = "momo_api", about = "REST API for mobile money SMS transactions")]
struct Args {
    /// Optional config file path (TOML).
    #[arg(long)]
    config: Option<String>,
    /// Port to run the server on.
    #[arg(long)]
    port: Option<u16>,
    /// Address to bind to.
    #[arg(long)]
    bind: Option<String>,
    /// Seed XML document.
    #[arg(long)]
    seed: Option<String>,
}

impl Settings {
    pub fn new() -> Result<Self, ConfigError> {
        let args = Args::parse();
        let config_path = args.config.as_deref().unwrap_or(DEFAULT_CONFIG_PATH);

        let mut settings: Settings = Config::builder()
            .set_default("app.level", "info")?
            .set_default("server.bind", "127.0.0.1")?
            .set_default("server.port", 8000)?
            .set_default("server.seed", "modified_sms_v2.xml")?
            .add_source(File::with_name(config_path).required(false))
            .add_source(
                Environment::with_prefix("MOMO")
                    .prefix_separator("_")
                    .separator("__")
                    .try_parsing(true),
            )
            .build()?
            .try_deserialize()?;

        if let Some(port) = args.port {
            settings.server.port = port;
        }
        if let Some(bind) = args.bind {
            settings.server.bind = bind;
        }
        if let Some(seed) = args.seed {
            settings.server.seed = seed;
        }

        Ok(settings)
    }
}
