use semantyfish_api::CatalogClient;
use std::time::Duration;

/// How long the intro screen stays up before the search screen
pub const INTRO_DURATION: Duration = Duration::from_millis(5000);

/// Explorer configuration, filled from CLI flags and environment variables
#[derive(Debug, Clone)]
pub struct ExplorerConfig {
    /// Base the catalog client prefixes onto `resources/...`, normally the relay
    pub api_base_url: String,
    pub intro_duration: Duration,
}

impl Default for ExplorerConfig {
    fn default() -> Self {
        Self {
            api_base_url: CatalogClient::DEFAULT_BASE_URL.to_string(),
            intro_duration: INTRO_DURATION,
        }
    }
}

impl ExplorerConfig {
    pub fn client(&self) -> CatalogClient {
        CatalogClient::new(&self.api_base_url)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = ExplorerConfig::default();
        assert_eq!(config.api_base_url, "http://localhost:3001/api");
        assert_eq!(config.intro_duration, Duration::from_millis(5000));
        assert_eq!(config.client().base_url(), "http://localhost:3001/api");
    }
}
