use clap::Parser;

use crate::auth::{SessionConfig, SessionSigner};

#[derive(Debug, Clone, Parser)]
#[command(name = "bravor")]
#[command(about = "genomic variant browser front-end")]
pub struct Config {
    /// Host address to bind to
    #[arg(long, env = "BRAVOR_HOST", default_value = "0.0.0.0")]
    pub host: String,

    /// Port to listen on
    #[arg(short, long, env = "BRAVOR_PORT", default_value = "8080")]
    pub port: u16,

    /// Base URL of the data-serving API
    #[arg(long, env = "BRAVOR_API_URL", default_value = "http://localhost:9000")]
    pub api_url: String,

    /// Secret for signing session cookies; sessions are disabled when unset
    #[arg(long, env = "BRAVOR_SESSION_SECRET")]
    pub session_secret: Option<String>,

    /// Authorization URL of the external identity provider
    #[arg(long, env = "BRAVOR_AUTH_URL")]
    pub auth_url: Option<String>,

    /// Enable CORS for all origins
    #[arg(long, env = "BRAVOR_CORS", default_value = "true")]
    pub cors: bool,

    /// Log level (trace, debug, info, warn, error)
    #[arg(long, env = "RUST_LOG", default_value = "info")]
    pub log_level: String,
}

impl Config {
    /// Session configuration, or `None` when no signing secret was given.
    pub fn session_config(&self) -> Option<SessionConfig> {
        let secret = self.session_secret.as_ref()?;
        Some(SessionConfig {
            signer: SessionSigner::new(secret.as_bytes()),
            provider_url: self.auth_url.clone(),
        })
    }
}
