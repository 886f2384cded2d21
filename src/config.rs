use std::{env, str::FromStr};

use color_eyre::eyre::{Result, WrapErr};

use crate::audio::config::SessionConfig;

pub const DEFAULT_API_BASE_URL: &str = "http://localhost:8080";

#[derive(Debug, Clone)]
pub struct ApiConfig {
    pub base_url: String,
    pub timeout_secs: u64,
    pub connect_timeout_secs: u64,
}

impl Default for ApiConfig {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_API_BASE_URL.to_string(),
            timeout_secs: 30,
            connect_timeout_secs: 10,
        }
    }
}

impl ApiConfig {
    pub fn with_base_url(base_url: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into(),
            ..Self::default()
        }
    }
}

#[derive(Debug, Clone, Default)]
pub struct AppConfig {
    pub api: ApiConfig,
    pub session: SessionConfig,
    /// Page size of the "recent plays" view, separate from the queue page.
    pub history_page_size: u32,
    pub access_token: Option<String>,
}

impl AppConfig {
    /// Reads `SOUNDSHARE_*` variables. Call after `dotenv` so `.env` applies.
    pub fn from_env() -> Result<Self> {
        let mut config = Self {
            history_page_size: 20,
            ..Self::default()
        };

        if let Ok(url) = env::var("SOUNDSHARE_API_BASE_URL") {
            config.api.base_url = url;
        }
        if let Some(timeout) = parse_var("SOUNDSHARE_HTTP_TIMEOUT_SECS")? {
            config.api.timeout_secs = timeout;
        }
        if let Some(size) = parse_var("SOUNDSHARE_QUEUE_SIZE")? {
            config.session.queue_page_size = size;
        }
        if let Some(size) = parse_var("SOUNDSHARE_HISTORY_SIZE")? {
            config.history_page_size = size;
        }
        if let Some(volume) = parse_var::<u8>("SOUNDSHARE_VOLUME")? {
            config.session.volume = volume.min(100);
        }
        config.access_token = env::var("SOUNDSHARE_ACCESS_TOKEN")
            .ok()
            .filter(|t| !t.trim().is_empty());

        Ok(config)
    }
}

fn parse_var<T>(name: &str) -> Result<Option<T>>
where
    T: FromStr,
    T::Err: std::error::Error + Send + Sync + 'static,
{
    match env::var(name) {
        Ok(raw) => raw
            .trim()
            .parse()
            .map(Some)
            .wrap_err_with(|| format!("{name} has an invalid value: {raw:?}")),
        Err(_) => Ok(None),
    }
}
