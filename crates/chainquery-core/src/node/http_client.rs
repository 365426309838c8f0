use async_trait::async_trait;
use reqwest::{header, Url};
use serde_json::Value;
use tracing::{debug, trace};

use crate::error::{CoreError, NodeError};

use super::config::NodeConfig;
use super::endpoint::{ApiPrefix, Endpoint};
use super::NodeApi;

// ==============================================================================
// HttpNodeClient — JSON-over-HTTP client for a single node
// ==============================================================================

/// Node API client over HTTP(S).
///
/// Issues exactly one GET per call. Idle connections are not kept between
/// calls, and nothing is retried or cached.
pub struct HttpNodeClient {
    client: reqwest::Client,
    base_url: Url,
    api_prefix: ApiPrefix,
}

impl HttpNodeClient {
    pub fn new(config: NodeConfig) -> Result<Self, CoreError> {
        let base_url = config.base_url()?;

        let mut builder = reqwest::Client::builder()
            .user_agent(config.user_agent.as_str())
            .pool_max_idle_per_host(0);
        if let Some(timeout) = config.timeout {
            builder = builder.timeout(timeout);
        }
        let client = builder.build().map_err(NodeError::Transport)?;

        Ok(Self {
            client,
            base_url,
            api_prefix: config.api_prefix,
        })
    }

    pub fn api_prefix(&self) -> ApiPrefix {
        self.api_prefix
    }

    /// Full request URL for `endpoint`, with path parameters percent-encoded
    /// as single segments.
    pub fn url_for(&self, endpoint: &Endpoint) -> Result<Url, CoreError> {
        let mut url = self.base_url.clone();
        url.path_segments_mut()
            .map_err(|()| {
                CoreError::InvalidConfig(format!(
                    "node URL `{}` cannot carry a path",
                    self.base_url
                ))
            })?
            .pop_if_empty()
            .extend(self.api_prefix.segments())
            .extend(endpoint.segments());
        Ok(url)
    }
}

#[async_trait]
impl NodeApi for HttpNodeClient {
    async fn get(&self, endpoint: &Endpoint) -> Result<Value, CoreError> {
        let url = self.url_for(endpoint)?;
        debug!(node.url = %url, node.endpoint = %endpoint, "node request");

        let response = self
            .client
            .get(url.clone())
            .header(header::ACCEPT, "application/json")
            .send()
            .await
            .map_err(NodeError::Transport)?;
        let status = response.status();

        let body = response.text().await.map_err(NodeError::Transport)?;
        debug!(node.url = %url, %status, body_len = body.len(), "node response");
        trace!(node.url = %url, body = %body, "node response body");

        if !status.is_success() {
            return Err(NodeError::Status { status, body }.into());
        }

        serde_json::from_str(&body).map_err(|e| {
            NodeError::InvalidResponse(format!("decode JSON body from {url}: {e}; body={body}"))
                .into()
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn client(config: NodeConfig) -> HttpNodeClient {
        HttpNodeClient::new(config).expect("static config must build")
    }

    #[test]
    fn url_uses_scheme_host_and_prefix() {
        let http = client(NodeConfig::new("127.0.0.1:8000"));
        let url = http.url_for(&Endpoint::Peers).expect("url must build");
        assert_eq!(url.as_str(), "http://127.0.0.1:8000/api/v1/peerlist");

        let https = client(
            NodeConfig::new("node.example.org")
                .with_https(true)
                .with_api_prefix(ApiPrefix::Rest),
        );
        let url = https.url_for(&Endpoint::Nodes).expect("url must build");
        assert_eq!(url.as_str(), "https://node.example.org/rest/nodes");
    }

    #[test]
    fn url_places_each_parameter_in_its_own_segment() {
        let http = client(NodeConfig::new("10.0.0.5:8000"));
        let url = http
            .url_for(&Endpoint::BlocksAboveHash {
                hash: "0".into(),
                chain: "alice".into(),
                amount: 20,
            })
            .expect("url must build");
        assert_eq!(
            url.as_str(),
            "http://10.0.0.5:8000/api/v1/blocksabovehash/0/alice/20"
        );
    }

    #[test]
    fn url_escapes_separators_inside_parameters() {
        let http = client(NodeConfig::new("127.0.0.1:8000").with_api_prefix(ApiPrefix::JsonRpc));
        let url = http
            .url_for(&Endpoint::Balance {
                key: "a/b?c#d".into(),
            })
            .expect("url must build");
        assert_eq!(
            url.as_str(),
            "http://127.0.0.1:8000/json_rpc/balance/a%2Fb%3Fc%23d"
        );
    }

    #[test]
    fn new_rejects_invalid_host() {
        let err = HttpNodeClient::new(NodeConfig::new("")).err().expect("empty host");
        assert!(matches!(err, CoreError::InvalidConfig(_)));
    }

    #[tokio::test]
    async fn submit_block_returns_fixed_payload_without_io() {
        // Port 9 (discard) is never contacted: submission is a local stub.
        let http = client(NodeConfig::new("127.0.0.1:9"));
        let reply = http
            .submit_block(&serde_json::json!({ "height": 1 }))
            .await
            .expect("stub never fails");
        assert_eq!(reply, serde_json::json!({ "error": "not implemented" }));
    }
}
