/// Static configuration for the documentation scraper: the pages it reads
/// and the default HTTP headers sent with every request.
///
/// Passed into [`crate::fetch::Fetcher::new`] explicitly rather than living
/// as process-global state, so tests can substitute fixture URLs and headers
/// without touching anything global.
#[derive(Debug, Clone)]
pub struct DocsConfig {
    pub lts_edge_release_cadence_url: String,
    pub java_support_url: String,
    pub dataweave_url: String,
    pub connector_release_notes_url: String,
    pub user_agent: String,
    pub accept: String,
    pub timeout_secs: u64,
}

impl Default for DocsConfig {
    fn default() -> Self {
        DocsConfig {
            lts_edge_release_cadence_url:
                "https://docs.mulesoft.com/release-notes/mule-runtime/lts-edge-release-cadence"
                    .to_string(),
            java_support_url: "https://docs.mulesoft.com/general/java-support".to_string(),
            dataweave_url: "https://docs.mulesoft.com/dataweave/".to_string(),
            connector_release_notes_url:
                "https://docs.mulesoft.com/connectors/introduction/connector-release-notes"
                    .to_string(),
            // A browser-style user agent; the docs CDN rejects bare clients.
            user_agent: "Mozilla/5.0 (Windows NT 10.0; Win64; x64) AppleWebKit/537.36 \
                         (KHTML, like Gecko) Chrome/91.0.4472.124 Safari/537.36"
                .to_string(),
            accept: "text/html,application/xhtml+xml".to_string(),
            timeout_secs: 30,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_urls_point_at_mulesoft_docs() {
        let config = DocsConfig::default();

        assert!(config
            .lts_edge_release_cadence_url
            .starts_with("https://docs.mulesoft.com/"));
        assert!(config.java_support_url.contains("java-support"));
        assert!(config.dataweave_url.contains("dataweave"));
        assert!(config
            .connector_release_notes_url
            .contains("connector-release-notes"));
    }

    #[test]
    fn test_default_headers_and_timeout() {
        let config = DocsConfig::default();

        assert!(config.user_agent.starts_with("Mozilla/5.0"));
        assert!(config.accept.contains("text/html"));
        assert_eq!(config.timeout_secs, 30);
    }
}
