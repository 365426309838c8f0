//! Node HTTP API abstraction layer.
//!
//! Defines the [`NodeApi`] trait and provides an HTTP implementation
//! ([`HttpNodeClient`]) plus a test mock (`mock::MockNode`).

mod config;
mod endpoint;
mod http_client;
#[cfg(test)]
pub mod mock;
pub mod types;

pub use config::NodeConfig;
pub use endpoint::{ApiPrefix, Endpoint};
pub use http_client::HttpNodeClient;
pub use types::{ChainBlocks, ChainList};

use async_trait::async_trait;
use serde_json::Value;
use tracing::warn;

use crate::error::CoreError;

/// The node endpoints chainquery can query.
///
/// Implementors only provide [`NodeApi::get`]; every named getter is a thin
/// wrapper that builds the matching [`Endpoint`]. Each call is one request
/// returning the node's JSON body, with failures surfaced as `Err`.
#[async_trait]
pub trait NodeApi: Send + Sync {
    /// Fetch one endpoint and return its parsed JSON body.
    async fn get(&self, endpoint: &Endpoint) -> Result<Value, CoreError>;

    /// Peers known to the node (`peerlist`).
    async fn get_peers(&self) -> Result<Value, CoreError> {
        self.get(&Endpoint::Peers).await
    }

    /// Nodes known to the node (`nodes`, served under the `rest` prefix).
    async fn get_nodes(&self) -> Result<Value, CoreError> {
        self.get(&Endpoint::Nodes).await
    }

    async fn get_block(&self, hash: &str) -> Result<Value, CoreError> {
        self.get(&Endpoint::Block {
            hash: hash.to_owned(),
        })
        .await
    }

    async fn get_status(&self) -> Result<Value, CoreError> {
        self.get(&Endpoint::Status).await
    }

    async fn get_block_count(&self, chain: &str) -> Result<Value, CoreError> {
        self.get(&Endpoint::BlockCount {
            chain: chain.to_owned(),
        })
        .await
    }

    async fn get_transaction_count(&self, chain: &str) -> Result<Value, CoreError> {
        self.get(&Endpoint::TransactionCount {
            chain: chain.to_owned(),
        })
        .await
    }

    /// Balance of a chain, username or public key.
    async fn get_balance(&self, key: &str) -> Result<Value, CoreError> {
        self.get(&Endpoint::Balance {
            key: key.to_owned(),
        })
        .await
    }

    /// Block hash of `chain` at `height`.
    async fn get_block_at_height(&self, chain: &str, height: u64) -> Result<Value, CoreError> {
        self.get(&Endpoint::BlockAtHeight {
            chain: chain.to_owned(),
            height,
        })
        .await
    }

    async fn get_usernames(&self) -> Result<Value, CoreError> {
        self.get(&Endpoint::Usernames).await
    }

    async fn get_publickey_for_username(&self, username: &str) -> Result<Value, CoreError> {
        self.get(&Endpoint::PublicKeyForUsername {
            username: username.to_owned(),
        })
        .await
    }

    async fn get_username_for_publickey(&self, public_key: &str) -> Result<Value, CoreError> {
        self.get(&Endpoint::UsernameForPublicKey {
            public_key: public_key.to_owned(),
        })
        .await
    }

    /// Chains (wallets) known to the node, as `{"list": [...]}`.
    async fn get_chains(&self) -> Result<Value, CoreError> {
        self.get(&Endpoint::Chains).await
    }

    /// Up to `amount` blocks of `chain` above `hash`.
    async fn get_blocks_above_hash(
        &self,
        hash: &str,
        chain: &str,
        amount: u64,
    ) -> Result<Value, CoreError> {
        self.get(&Endpoint::BlocksAboveHash {
            hash: hash.to_owned(),
            chain: chain.to_owned(),
            amount,
        })
        .await
    }

    /// Block submission is not supported by any known node API. Nothing is
    /// sent; the fixed `{"error": "not implemented"}` payload is returned.
    async fn submit_block(&self, block: &Value) -> Result<Value, CoreError> {
        warn!(
            block_is_object = block.is_object(),
            "block submission is not implemented; nothing was sent"
        );
        Ok(serde_json::json!({ "error": "not implemented" }))
    }
}
