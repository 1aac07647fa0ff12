//! Client configuration: where the server lives and how responses are kept.

use std::time::Duration;

use reqwest::Url;
use serde::Deserialize;

use crate::error::{Error, Result};

/// Endpoint the interface listens on when nothing else is configured.
pub const DEFAULT_BASE_URL: &str = "http://localhost:9000/";

/// Environment variable that overrides [`DEFAULT_BASE_URL`].
pub const HOST_ENV: &str = "GDMC_HOST";

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct ClientConfig {
    pub base_url: String,
    /// Keep the raw bytes of the last terrain fetch (see
    /// [`TerrainRetriever::retained_raw`](crate::terrain::TerrainRetriever::retained_raw)).
    pub retain_raw: bool,
    /// Per-request timeout. `None` waits for the server indefinitely.
    #[serde(with = "optional_secs")]
    pub timeout: Option<Duration>,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_BASE_URL.to_string(),
            retain_raw: false,
            timeout: None,
        }
    }
}

impl ClientConfig {
    /// Defaults, with the base URL taken from `GDMC_HOST` when set.
    pub fn from_env() -> Self {
        Self::default().with_host_override(std::env::var(HOST_ENV).ok().as_deref())
    }

    /// Replace the base URL with `host` unless it is missing or blank.
    fn with_host_override(mut self, host: Option<&str>) -> Self {
        if let Some(host) = host.map(str::trim).filter(|h| !h.is_empty()) {
            self.base_url = host.to_string();
        }
        self
    }

    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into();
        self
    }

    pub fn with_retain_raw(mut self, retain_raw: bool) -> Self {
        self.retain_raw = retain_raw;
        self
    }

    /// Parse `base_url`. A trailing `/` is added when missing so endpoint
    /// paths join under it instead of replacing its last segment.
    pub fn parsed_base_url(&self) -> Result<Url> {
        let mut raw = self.base_url.clone();
        if !raw.ends_with('/') {
            raw.push('/');
        }
        let url = Url::parse(&raw)
            .map_err(|e| Error::Config(format!("base url `{}`: {}", self.base_url, e)))?;
        if url.cannot_be_a_base() {
            return Err(Error::Config(format!(
                "base url `{}` cannot have endpoint paths",
                self.base_url
            )));
        }
        Ok(url)
    }
}

/// `Option<Duration>` as a number of seconds.
mod optional_secs {
    use std::time::Duration;

    use serde::de::Error as _;
    use serde::{Deserialize, Deserializer};

    /// Zero, negative and NaN mean no timeout. Values too large for a
    /// `Duration` are rejected.
    pub fn deserialize<'de, D>(deserializer: D) -> Result<Option<Duration>, D::Error>
    where
        D: Deserializer<'de>,
    {
        let secs = Option::<f64>::deserialize(deserializer)?;
        secs.filter(|s| *s > 0.0)
            .map(|s| {
                Duration::try_from_secs_f64(s)
                    .map_err(|e| D::Error::custom(format!("timeout {}s: {}", s, e)))
            })
            .transpose()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_points_at_local_server() {
        let url = ClientConfig::default().parsed_base_url().unwrap();
        assert_eq!(url.as_str(), "http://localhost:9000/");
    }

    #[test]
    fn base_url_gains_trailing_slash() {
        let config = ClientConfig::default().with_base_url("http://example.net:9000/api");
        let url = config.parsed_base_url().unwrap();
        assert_eq!(url.join("chunks").unwrap().as_str(), "http://example.net:9000/api/chunks");
    }

    #[test]
    fn invalid_base_url_is_a_config_error() {
        let config = ClientConfig::default().with_base_url("not a url");
        assert!(matches!(config.parsed_base_url(), Err(Error::Config(_))));
    }

    #[test]
    fn deserializes_with_defaults() {
        let config: ClientConfig =
            serde_json::from_str(r#"{"base_url":"http://10.0.0.2:9000/","timeout":2.5}"#).unwrap();
        assert_eq!(config.base_url, "http://10.0.0.2:9000/");
        assert!(!config.retain_raw);
        assert_eq!(config.timeout, Some(Duration::from_millis(2500)));
    }

    #[test]
    fn non_positive_timeout_means_none() {
        let config: ClientConfig = serde_json::from_str(r#"{"timeout":0}"#).unwrap();
        assert_eq!(config.timeout, None);
        let config: ClientConfig = serde_json::from_str(r#"{"timeout":-3}"#).unwrap();
        assert_eq!(config.timeout, None);
    }

    #[test]
    fn oversized_timeout_is_an_error() {
        let err = serde_json::from_str::<ClientConfig>(r#"{"timeout":1e300}"#).unwrap_err();
        assert!(err.to_string().contains("timeout"), "{}", err);
    }

    #[test]
    fn host_override_replaces_base_url() {
        let config = ClientConfig::default().with_host_override(Some("  http://10.0.0.5:9000/ "));
        assert_eq!(config.base_url, "http://10.0.0.5:9000/");
    }

    #[test]
    fn blank_or_missing_host_keeps_default() {
        for host in [None, Some(""), Some("   \t")] {
            let config = ClientConfig::default().with_host_override(host);
            assert_eq!(config.base_url, DEFAULT_BASE_URL, "{:?}", host);
        }
    }
}
