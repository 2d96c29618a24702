//! Client configuration
//!
//! Every setting is a clap argument with an environment fallback. A `.env`
//! file is loaded first when present.

use std::{path::PathBuf, sync::Arc};

use clap::{Args, ValueEnum};

use crate::api::{ApiConfig, FileTokenStore, TokenStore};

/// Server and credential settings.
#[derive(Debug, Clone, Args)]
pub struct ClientConfig {
    /// Base URL of the inventory API
    #[arg(long, env = "API_URL", default_value = "http://localhost:8080")]
    pub api_url: String,

    /// File holding the persisted bearer token
    #[arg(long, env = "KOBMAND_TOKEN_FILE", default_value = ".kobmand/storage.json")]
    pub token_file: PathBuf,

    /// Send the stored bearer token with every request
    #[arg(long, env = "KOBMAND_USE_TOKEN", default_value_t = false)]
    pub use_token: bool,
}

impl ClientConfig {
    /// Token store backed by [`Self::token_file`].
    pub fn token_store(&self) -> FileTokenStore {
        FileTokenStore::new(self.token_file.clone())
    }

    /// API client settings. The token store is only attached with
    /// `--use-token`.
    pub fn api_config(&self) -> ApiConfig {
        ApiConfig {
            base_url: self.api_url.clone(),
            tokens: self
                .use_token
                .then(|| Arc::new(self.token_store()) as Arc<dyn TokenStore>),
        }
    }
}

/// Log output format.
#[derive(Clone, Copy, Debug, PartialEq, Eq, ValueEnum)]
pub enum LogFormat {
    /// Compact, human-readable logs.
    Compact,

    /// Structured JSON logs.
    Json,
}

/// Logging settings.
#[derive(Debug, Clone, Args)]
pub struct LoggingConfig {
    /// Log level (trace, debug, info, warn, error)
    #[arg(long, env = "RUST_LOG", default_value = "warn")]
    pub log_level: String,

    /// Log format (compact, json)
    #[arg(long, env = "LOG_FORMAT", value_enum, default_value_t = LogFormat::Compact)]
    pub log_format: LogFormat,
}

/// Load `.env` if present. A missing file is not an error.
pub fn load_dotenv() {
    _ = dotenvy::dotenv();
}

#[cfg(test)]
mod tests {
    use clap::Parser;

    use super::*;

    #[derive(Debug, Parser)]
    struct Harness {
        #[command(flatten)]
        client: ClientConfig,

        #[command(flatten)]
        logging: LoggingConfig,
    }

    #[test]
    fn token_is_only_attached_when_requested() {
        let plain = Harness::parse_from(["kobmand", "--api-url", "http://api.test/"]);
        let with_token = Harness::parse_from(["kobmand", "--use-token", "--token-file", "t.json"]);

        assert_eq!(plain.client.api_config().base_url, "http://api.test/");
        assert!(plain.client.api_config().tokens.is_none());
        assert!(with_token.client.api_config().tokens.is_some());
        assert_eq!(
            with_token.client.token_store().path(),
            PathBuf::from("t.json").as_path()
        );
    }

    #[test]
    fn log_format_parses_value_enum() {
        let harness = Harness::parse_from(["kobmand", "--log-format", "json"]);

        assert_eq!(harness.logging.log_format, LogFormat::Json);
    }
}
