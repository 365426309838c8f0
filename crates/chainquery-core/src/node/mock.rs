use std::collections::HashMap;
use std::sync::Mutex;

use async_trait::async_trait;
use reqwest::StatusCode;
use serde_json::Value;

use crate::error::{CoreError, NodeError};

use super::endpoint::Endpoint;
use super::NodeApi;

/// A mock node for testing. Returns canned JSON bodies from a `HashMap`
/// populated via the builder pattern and records every endpoint requested.
/// Unknown endpoints answer like a node would: a 404 status error.
pub struct MockNode {
    responses: HashMap<Endpoint, Value>,
    requests: Mutex<Vec<Endpoint>>,
}

impl MockNode {
    pub fn builder() -> MockNodeBuilder {
        MockNodeBuilder {
            responses: HashMap::new(),
        }
    }

    /// Endpoints requested so far, in call order.
    pub fn requests(&self) -> Vec<Endpoint> {
        self.requests
            .lock()
            .expect("mock request log must not be poisoned")
            .clone()
    }
}

pub struct MockNodeBuilder {
    responses: HashMap<Endpoint, Value>,
}

impl MockNodeBuilder {
    pub fn with_response(mut self, endpoint: Endpoint, body: Value) -> Self {
        self.responses.insert(endpoint, body);
        self
    }

    pub fn build(self) -> MockNode {
        MockNode {
            responses: self.responses,
            requests: Mutex::new(Vec::new()),
        }
    }
}

#[async_trait]
impl NodeApi for MockNode {
    async fn get(&self, endpoint: &Endpoint) -> Result<Value, CoreError> {
        self.requests
            .lock()
            .expect("mock request log must not be poisoned")
            .push(endpoint.clone());

        self.responses.get(endpoint).cloned().ok_or_else(|| {
            NodeError::Status {
                status: StatusCode::NOT_FOUND,
                body: format!("no canned response for {endpoint}"),
            }
            .into()
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[tokio::test]
    async fn named_getters_route_to_matching_endpoints() {
        let node = MockNode::builder()
            .with_response(Endpoint::Status, json!({ "height": 12 }))
            .with_response(
                Endpoint::BlockAtHeight {
                    chain: "alice".into(),
                    height: 3,
                },
                json!("0xfeed"),
            )
            .with_response(
                Endpoint::PublicKeyForUsername {
                    username: "printersco".into(),
                },
                json!({ "publickey": "7mvH1bk7" }),
            )
            .build();

        assert_eq!(
            node.get_status().await.expect("status is canned"),
            json!({ "height": 12 })
        );
        assert_eq!(
            node.get_block_at_height("alice", 3)
                .await
                .expect("height is canned"),
            json!("0xfeed")
        );
        assert_eq!(
            node.get_publickey_for_username("printersco")
                .await
                .expect("username is canned"),
            json!({ "publickey": "7mvH1bk7" })
        );
        assert_eq!(node.requests().len(), 3);
    }

    #[tokio::test]
    async fn unknown_endpoint_is_a_status_error() {
        let node = MockNode::builder().build();
        let err = node
            .get_balance("nobody")
            .await
            .expect_err("nothing is canned");
        assert!(matches!(
            err,
            CoreError::Node(NodeError::Status { status, .. }) if status == StatusCode::NOT_FOUND
        ));
    }

    #[tokio::test]
    async fn submit_block_is_answered_locally() {
        let node = MockNode::builder().build();
        let reply = node
            .submit_block(&json!({ "hash": "0xabc" }))
            .await
            .expect("stub never fails");
        assert_eq!(reply, json!({ "error": "not implemented" }));
        assert!(node.requests().is_empty(), "stub must not reach the node");
    }

    #[tokio::test]
    async fn submit_block_accepts_large_non_object_blocks() {
        let node = MockNode::builder().build();
        let block = Value::Array(vec![json!({ "tx": "00".repeat(64) }); 10_000]);
        let reply = node.submit_block(&block).await.expect("stub never fails");
        assert_eq!(reply, json!({ "error": "not implemented" }));
        assert!(node.requests().is_empty());
    }
}
