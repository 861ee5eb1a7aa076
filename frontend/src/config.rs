use std::path::PathBuf;
use std::time::Duration;

use reqwest::Url;

use crate::error::{Error, Result};

pub const API_URL: &str = "API_URL";
pub const API_TIMEOUT_SECS: &str = "API_TIMEOUT_SECS";
pub const API_ROOT_CA: &str = "API_ROOT_CA";

const DEFAULT_TIMEOUT: Duration = Duration::from_secs(30);

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ApiConfig {
    pub api_url: Url,
    pub timeout: Duration,
    pub root_ca: Option<PathBuf>,
}

impl ApiConfig {
    /// Reads the configuration from the process environment. A `.env` file
    /// should already have been loaded by the caller if one is wanted.
    ///
    /// `API_URL` is read here once, not on every request. Only the endpoint
    /// is joined per call, see [`ApiConfig::endpoint`]. The cli performs one
    /// request per process, so both happen at invocation time there; a long
    /// lived caller has to build a new config to pick up a changed url.
    pub fn from_env() -> Result<Self> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self> {
        // no fallback host
        let api_url = lookup(API_URL).ok_or_else(|| Error::Config {
            reason: format!("{API_URL} is not set"),
        })?;

        let api_url = Url::parse(api_url.trim()).map_err(|e| Error::Config {
            reason: format!("{API_URL} is not a valid url ({api_url}): {e}"),
        })?;

        let timeout = match lookup(API_TIMEOUT_SECS) {
            Some(secs) => secs
                .trim()
                .parse::<u64>()
                .map(Duration::from_secs)
                .map_err(|e| Error::Config {
                    reason: format!("{API_TIMEOUT_SECS} must be a whole number of seconds: {e}"),
                })?,
            None => DEFAULT_TIMEOUT,
        };

        let root_ca = lookup(API_ROOT_CA).map(PathBuf::from);

        tracing::debug!("Loaded api config for {api_url}");

        Ok(Self { api_url, timeout, root_ca })
    }

    pub fn new(api_url: Url) -> Self {
        Self { api_url, timeout: DEFAULT_TIMEOUT, root_ca: None }
    }

    /// Joins the configured base with a path such as `/api/auth/users/`.
    pub fn endpoint(&self, rel_path: &str) -> String {
        let base = self.api_url.as_str().trim_end_matches('/');
        format!("{base}{rel_path}")
    }
}
