// src/config.rs

use std::env;
use std::time::Duration;

use dotenvy::dotenv;
use url::Url;

use crate::error::AppError;

#[derive(Debug, Clone)]
pub struct Config {
    pub api_base_url: Url,
    pub rust_log: String,
    pub request_timeout: Duration,
    pub log_dir: String,
    /// Credentials used to open a session at start, if both are present.
    pub credentials: Option<(String, String)>,
}

impl Config {
    pub fn from_env() -> Result<Self, AppError> {
        dotenv().ok();

        let api_base_url = env::var("API_BASE_URL")
            .map_err(|_| AppError::Config("API_BASE_URL must be set".to_string()))?;
        let api_base_url = Url::parse(&api_base_url)?;

        let rust_log = env::var("RUST_LOG").unwrap_or_else(|_| "info".to_string());

        let request_timeout = match env::var("REQUEST_TIMEOUT_SECS") {
            Ok(raw) => raw.parse::<u64>().map_err(|_| {
                AppError::Config(format!("REQUEST_TIMEOUT_SECS is not a number: {raw}"))
            })?,
            Err(_) => 15,
        };

        let log_dir = env::var("LOG_DIR").unwrap_or_else(|_| "logs".to_string());

        let credentials = match (env::var("ECOQUIZ_EMAIL"), env::var("ECOQUIZ_PASSWORD")) {
            (Ok(email), Ok(password)) => Some((email, password)),
            _ => None,
        };

        Ok(Self {
            api_base_url,
            rust_log,
            request_timeout: Duration::from_secs(request_timeout),
            log_dir,
            credentials,
        })
    }

    /// Configuration pointing at `base_url` with every other setting at its default.
    pub fn for_base_url(base_url: Url) -> Self {
        Self {
            api_base_url: base_url,
            rust_log: "info".to_string(),
            request_timeout: Duration::from_secs(15),
            log_dir: "logs".to_string(),
            credentials: None,
        }
    }
}
