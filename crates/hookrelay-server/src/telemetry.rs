//! Logging setup

use serde::Serialize;
use tracing::{debug, warn};
use tracing_subscriber::EnvFilter;

const URL_LOG_CHARS: usize = 30;

/// Install the global subscriber
///
/// `RUST_LOG` wins; otherwise `log_level` applies to everything.
pub fn init_tracing(log_level: &str) {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(format!("{log_level},tower_http=debug")));

    tracing_subscriber::fmt().with_env_filter(filter).init();
}

/// Destination URLs carry secrets in their path; log only a prefix
pub fn short_url(url: &str) -> String {
    hookrelay::domain::services::truncate_chars(url, URL_LOG_CHARS)
}

/// Pretty-print a payload at debug level when payload logging is on
pub fn log_payload<T: Serialize>(enabled: bool, label: &str, payload: &T) {
    if !enabled {
        debug!("{}: payload logging disabled", label);
        return;
    }
    match serde_json::to_string_pretty(payload) {
        Ok(pretty) => debug!("{}:\n{}", label, pretty),
        Err(e) => warn!(error = %e, "{}: payload could not be serialized", label),
    }
}
