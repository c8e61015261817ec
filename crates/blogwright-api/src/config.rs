use anyhow::{Context, Result, bail};
use std::env;

pub const LISTEN_ADDR_ENV: &str = "BLOGWRIGHT_API_ADDR";
pub const MAX_RUNS_ENV: &str = "BLOGWRIGHT_MAX_CONCURRENT_RUNS";

#[derive(Clone, Debug)]
pub struct ApiConfig {
    pub listen_addr: String,
    pub max_concurrent_runs: usize,
}

impl Default for ApiConfig {
    fn default() -> Self {
        Self {
            listen_addr: Self::DEFAULT_LISTEN_ADDR.to_string(),
            max_concurrent_runs: Self::DEFAULT_MAX_RUNS,
        }
    }
}

impl ApiConfig {
    const DEFAULT_LISTEN_ADDR: &'static str = "0.0.0.0:8080";
    const DEFAULT_MAX_RUNS: usize = 5;

    pub fn from_env() -> Result<Self> {
        let listen_addr = env::var(LISTEN_ADDR_ENV)
            .ok()
            .map(|value| value.trim().to_string())
            .filter(|value| !value.is_empty())
            .unwrap_or_else(|| Self::DEFAULT_LISTEN_ADDR.to_string());

        let max_concurrent_runs = env::var(MAX_RUNS_ENV)
            .ok()
            .map(|value| parse_run_limit(&value))
            .transpose()?
            .unwrap_or(Self::DEFAULT_MAX_RUNS);

        Ok(Self {
            listen_addr,
            max_concurrent_runs,
        })
    }
}

fn parse_run_limit(raw: &str) -> Result<usize> {
    let limit = raw
        .trim()
        .parse::<usize>()
        .with_context(|| format!("{MAX_RUNS_ENV} must be a positive integer, got {raw:?}"))?;
    if limit == 0 {
        bail!("{MAX_RUNS_ENV} must be at least 1");
    }
    Ok(limit)
}
