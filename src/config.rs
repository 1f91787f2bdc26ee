//! Runtime configuration read from the environment

use std::time::Duration;

use anyhow::{anyhow, Context, Result};

use crate::model::DEFAULT_DEBOUNCE;

pub const DEFAULT_API_URL: &str = "https://www.omdbapi.com/";

const API_KEY_VAR: &str = "OMDB_API_KEY";
const API_URL_VAR: &str = "OMDB_API_URL";
const DEBOUNCE_VAR: &str = "MOVIE_SEARCH_DEBOUNCE_MS";

/// Key baked in at build time, used when the variable is absent at runtime
const BUILD_API_KEY: Option<&str> = option_env!("OMDB_API_KEY");

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct AppConfig {
    pub api_key: String,
    pub api_url: String,
    pub debounce: Duration,
}

impl AppConfig {
    pub fn from_env() -> Result<Self> {
        Self::from_lookup(|name| std::env::var(name).ok())
    }

    /// Build the config from an arbitrary variable source
    pub fn from_lookup<F>(lookup: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let api_key = lookup(API_KEY_VAR)
            .filter(|key| !key.trim().is_empty())
            .or_else(|| BUILD_API_KEY.map(str::to_string))
            .ok_or_else(|| anyhow!("{API_KEY_VAR} is not set; get a key at https://www.omdbapi.com/apikey.aspx"))?;

        let api_url = lookup(API_URL_VAR)
            .filter(|url| !url.trim().is_empty())
            .unwrap_or_else(|| DEFAULT_API_URL.to_string());

        let debounce = match lookup(DEBOUNCE_VAR) {
            Some(raw) => {
                let millis: u64 = raw
                    .trim()
                    .parse()
                    .with_context(|| format!("{DEBOUNCE_VAR} must be a number of milliseconds, got {raw:?}"))?;
                Duration::from_millis(millis)
            }
            None => DEFAULT_DEBOUNCE,
        };

        Ok(Self {
            api_key: api_key.trim().to_string(),
            api_url,
            debounce,
        })
    }
}
