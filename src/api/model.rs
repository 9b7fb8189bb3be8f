// Consul API request models

use serde::Deserialize;

/// Default blocking-query wait used when the `wait` parameter is absent or
/// unparseable, matching Consul's documented default.
pub const DEFAULT_WAIT_MILLIS: u64 = 300_000;

/// Consul blocking-query parameters, accepted on catalog endpoints.
///
/// The adapter parses and forwards them for API compatibility, but the
/// registration service completes immediately regardless; see
/// `RegistrationService`.
#[derive(Debug, Clone, Deserialize, Default)]
pub struct BlockingQueryParams {
    /// Maximum wait duration, e.g. "55s" or "5m"
    pub wait: Option<String>,

    /// Last change index observed by the caller
    pub index: Option<i64>,
}

impl BlockingQueryParams {
    pub fn wait_millis(&self) -> u64 {
        self.wait
            .as_deref()
            .map(parse_wait)
            .unwrap_or(DEFAULT_WAIT_MILLIS)
    }
}

/// Parse a Consul wait duration of the form `<n>s` or `<n>m` into
/// milliseconds. Anything else falls back to [`DEFAULT_WAIT_MILLIS`].
pub fn parse_wait(value: &str) -> u64 {
    let value = value.trim();
    if let Some(minutes) = value.strip_suffix('m') {
        if let Ok(minutes) = minutes.parse::<u64>() {
            return minutes * 60_000;
        }
    } else if let Some(seconds) = value.strip_suffix('s') {
        if let Ok(seconds) = seconds.parse::<u64>() {
            return seconds * 1_000;
        }
    }
    DEFAULT_WAIT_MILLIS
}
