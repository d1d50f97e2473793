// CLI module for rewrite-relay

use crate::config::AppConfig;
use clap::Parser;

/// rewrite-relay - Streaming Gemini rewrite relay and Baidu translation backend
#[derive(Parser, Debug, Default)]
#[command(name = "rewrite-relay", version, about, long_about = None)]
pub struct Args {
    /// Path to a TOML config file (default: ~/.rewrite-relay/config.toml)
    #[arg(long, short, env = "REWRITE_RELAY_CONFIG")]
    pub config: Option<String>,

    /// Address to bind
    #[arg(long)]
    pub host: Option<String>,

    /// Port to listen on
    #[arg(long, short)]
    pub port: Option<u16>,

    /// Directory holding the front-end (index.html and assets)
    #[arg(long)]
    pub static_dir: Option<String>,
}

impl Args {
    /// Apply command-line overrides, the highest-precedence configuration source.
    pub fn apply(&self, config: &mut AppConfig) {
        if let Some(host) = &self.host {
            config.server.host = host.clone();
        }
        if let Some(port) = self.port {
            config.server.port = port;
        }
        if let Some(dir) = &self.static_dir {
            config.static_files.dir = dir.clone();
        }
    }
}
