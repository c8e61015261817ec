use std::sync::OnceLock;

use tracing_subscriber::{EnvFilter, fmt};

use crate::BlogwrightError;

pub const LOG_JSON_ENV: &str = "BLOGWRIGHT_LOG_JSON";
const DEFAULT_FILTER: &str = "info,blogwright_core=info,blogwright_agents=info";

static SUBSCRIBER_INSTALLED: OnceLock<()> = OnceLock::new();

/// How the process-wide subscriber renders events. Output always goes to
/// stderr so stdout stays reserved for command results.
#[derive(Debug, Clone)]
pub struct TelemetryOptions {
    pub env_filter: Option<String>,
    pub with_ansi: bool,
    /// Emit newline-delimited JSON instead of human-readable lines.
    pub json: bool,
}

impl Default for TelemetryOptions {
    fn default() -> Self {
        Self {
            env_filter: None,
            with_ansi: true,
            json: false,
        }
    }
}

impl TelemetryOptions {
    /// Read `RUST_LOG`, `BLOGWRIGHT_LOG_JSON` and `NO_COLOR`.
    pub fn from_env() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    pub fn from_lookup<F>(lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        let json = lookup(LOG_JSON_ENV)
            .map(|value| matches!(value.trim().to_ascii_lowercase().as_str(), "1" | "true" | "yes"))
            .unwrap_or(false);

        Self {
            env_filter: lookup("RUST_LOG").filter(|value| !value.trim().is_empty()),
            with_ansi: lookup("NO_COLOR").is_none(),
            json,
        }
    }
}

/// Install the global tracing subscriber. Later calls are no-ops.
pub fn init_telemetry(options: TelemetryOptions) -> Result<(), BlogwrightError> {
    if SUBSCRIBER_INSTALLED.get().is_some() {
        return Ok(());
    }

    let filter = options
        .env_filter
        .unwrap_or_else(|| DEFAULT_FILTER.to_string());
    let env_filter = EnvFilter::try_new(&filter).map_err(|err| {
        BlogwrightError::InvalidConfiguration(format!("invalid log filter {filter:?}: {err}"))
    })?;

    let builder = fmt::Subscriber::builder()
        .with_env_filter(env_filter)
        .with_target(false)
        .with_writer(std::io::stderr);

    let installed = if options.json {
        builder.json().try_init()
    } else {
        builder.with_ansi(options.with_ansi).try_init()
    };
    installed.map_err(|err| {
        BlogwrightError::InvalidConfiguration(format!("telemetry init failed: {err}"))
    })?;

    SUBSCRIBER_INSTALLED.get_or_init(|| ());
    Ok(())
}
