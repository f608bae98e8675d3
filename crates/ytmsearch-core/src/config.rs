//! Configuration types for ytmsearch components.
//!
//! Values here are plain defaults. The CLI overrides them from flags and
//! environment variables (`TIMEOUT`, `YTMUSIC_LANGUAGE`, `YTMUSIC_LOCATION`,
//! `YTMUSIC_BASE_URL`).

use std::time::Duration;

/// Base URL of the YouTube Music web API.
pub const DEFAULT_BASE_URL: &str = "https://music.youtube.com/youtubei/v1/";

/// HTTP client configuration for the search backend.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HttpConfig {
    pub timeout: Duration,
    /// Interface language sent as `hl`.
    pub language: String,
    /// Content region sent as `gl`. The service picks one from the IP when unset.
    pub location: Option<String>,
    pub base_url: String,
}

impl Default for HttpConfig {
    fn default() -> Self {
        Self {
            timeout: Duration::from_secs(10),
            language: "en".to_string(),
            location: None,
            base_url: DEFAULT_BASE_URL.to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_http_config_defaults() {
        let config = HttpConfig::default();
        assert_eq!(config.timeout, Duration::from_secs(10));
        assert_eq!(config.language, "en");
        assert!(config.location.is_none());
        assert_eq!(config.base_url, "https://music.youtube.com/youtubei/v1/");
    }
}
