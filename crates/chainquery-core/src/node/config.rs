use std::time::Duration;

use reqwest::Url;

use crate::error::CoreError;

use super::endpoint::ApiPrefix;

const DEFAULT_HOST: &str = "127.0.0.1:8000";

/// Where and how to reach a node.
#[derive(Debug, Clone)]
pub struct NodeConfig {
    /// `ip` or `ip:port`, without scheme or path.
    pub host: String,
    pub https: bool,
    pub api_prefix: ApiPrefix,
    /// Whole-request timeout. `None` waits as long as the transport allows.
    pub timeout: Option<Duration>,
    pub user_agent: String,
}

impl Default for NodeConfig {
    fn default() -> Self {
        Self {
            host: DEFAULT_HOST.to_owned(),
            https: false,
            api_prefix: ApiPrefix::default(),
            timeout: None,
            user_agent: format!("chainquery/{}", env!("CARGO_PKG_VERSION")),
        }
    }
}

impl NodeConfig {
    pub fn new(host: impl Into<String>) -> Self {
        Self {
            host: host.into(),
            ..Self::default()
        }
    }

    pub fn with_https(mut self, https: bool) -> Self {
        self.https = https;
        self
    }

    pub fn with_api_prefix(mut self, api_prefix: ApiPrefix) -> Self {
        self.api_prefix = api_prefix;
        self
    }

    pub fn with_timeout(mut self, timeout: Option<Duration>) -> Self {
        self.timeout = timeout;
        self
    }

    pub fn with_user_agent(mut self, user_agent: impl Into<String>) -> Self {
        self.user_agent = user_agent.into();
        self
    }

    pub fn scheme(&self) -> &'static str {
        if self.https {
            "https"
        } else {
            "http"
        }
    }

    /// `scheme://host/`, validated.
    pub(crate) fn base_url(&self) -> Result<Url, CoreError> {
        let host = self.host.trim();
        if host.is_empty() {
            return Err(CoreError::InvalidConfig(
                "node host must not be empty".to_owned(),
            ));
        }
        if host.contains("://") {
            return Err(CoreError::InvalidConfig(format!(
                "node host `{host}` must not include a scheme; set https instead"
            )));
        }
        if host.contains(['/', '?', '#']) {
            return Err(CoreError::InvalidConfig(format!(
                "node host `{host}` must not include a path; set the API prefix instead"
            )));
        }

        Url::parse(&format!("{}://{host}/", self.scheme()))
            .map_err(|e| CoreError::InvalidConfig(format!("invalid node host `{host}`: {e}")))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_points_at_local_node_over_http() {
        let config = NodeConfig::default();
        let url = config.base_url().expect("default must be valid");
        assert_eq!(url.as_str(), "http://127.0.0.1:8000/");
        assert_eq!(config.api_prefix, ApiPrefix::V1);
        assert!(config.timeout.is_none());
        assert!(config.user_agent.starts_with("chainquery/"));
    }

    #[test]
    fn https_switches_scheme() {
        let url = NodeConfig::new("node.example.org")
            .with_https(true)
            .base_url()
            .expect("hostname must be valid");
        assert_eq!(url.as_str(), "https://node.example.org/");
    }

    #[test]
    fn rejects_empty_host() {
        let err = NodeConfig::new("  ").base_url().expect_err("empty host");
        assert!(err.to_string().contains("must not be empty"));
    }

    #[test]
    fn rejects_scheme_in_host() {
        let err = NodeConfig::new("https://127.0.0.1")
            .base_url()
            .expect_err("scheme in host");
        assert!(err.to_string().contains("must not include a scheme"));
    }

    #[test]
    fn rejects_path_in_host() {
        let err = NodeConfig::new("127.0.0.1:8000/api/v1")
            .base_url()
            .expect_err("path in host");
        assert!(err.to_string().contains("must not include a path"));
    }

    #[test]
    fn rejects_bad_port() {
        let err = NodeConfig::new("127.0.0.1:notaport")
            .base_url()
            .expect_err("non-numeric port");
        assert!(matches!(err, CoreError::InvalidConfig(_)));
    }
}
