use std::fmt;
use std::str::FromStr;

use crate::error::CoreError;

// ==============================================================================
// API Prefix
// ==============================================================================

/// Path prefix under which a node exposes its JSON API.
///
/// Node releases disagree on this, and the library does not try to unify
/// them: pick the one matching the target node.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum ApiPrefix {
    /// `api/v1`
    #[default]
    V1,
    /// `rest`
    Rest,
    /// `json_rpc`
    JsonRpc,
}

impl ApiPrefix {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::V1 => "api/v1",
            Self::Rest => "rest",
            Self::JsonRpc => "json_rpc",
        }
    }

    pub(crate) fn segments(self) -> impl Iterator<Item = &'static str> {
        self.as_str().split('/')
    }
}

impl fmt::Display for ApiPrefix {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ApiPrefix {
    type Err = CoreError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim_matches('/') {
            "v1" | "api/v1" => Ok(Self::V1),
            "rest" => Ok(Self::Rest),
            "json-rpc" | "json_rpc" | "jsonrpc" => Ok(Self::JsonRpc),
            other => Err(CoreError::InvalidConfig(format!(
                "unknown API prefix `{other}`; expected v1, rest or json-rpc"
            ))),
        }
    }
}

// ==============================================================================
// Endpoint
// ==============================================================================

/// Every GET endpoint the client knows how to reach, with its path
/// parameters.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum Endpoint {
    Peers,
    Nodes,
    Block { hash: String },
    Status,
    BlockCount { chain: String },
    TransactionCount { chain: String },
    /// `key` may be a chain, a username or a public key, depending on the node.
    Balance { key: String },
    BlockAtHeight { chain: String, height: u64 },
    Usernames,
    PublicKeyForUsername { username: String },
    UsernameForPublicKey { public_key: String },
    Chains,
    BlocksAboveHash { hash: String, chain: String, amount: u64 },
}

impl Endpoint {
    /// Path segments below the API prefix. Parameters are returned raw;
    /// percent-encoding happens when they are placed into a URL.
    pub fn segments(&self) -> Vec<String> {
        match self {
            Self::Peers => vec!["peerlist".into()],
            Self::Nodes => vec!["nodes".into()],
            Self::Block { hash } => vec!["block".into(), hash.clone()],
            Self::Status => vec!["status".into()],
            Self::BlockCount { chain } => vec!["blockcount".into(), chain.clone()],
            Self::TransactionCount { chain } => vec!["transactioncount".into(), chain.clone()],
            Self::Balance { key } => vec!["balance".into(), key.clone()],
            Self::BlockAtHeight { chain, height } => {
                vec!["hash_at_height".into(), chain.clone(), height.to_string()]
            }
            Self::Usernames => vec!["usernames".into()],
            Self::PublicKeyForUsername { username } => {
                vec!["publickey_for_username".into(), username.clone()]
            }
            Self::UsernameForPublicKey { public_key } => {
                vec!["username_for_publickey".into(), public_key.clone()]
            }
            Self::Chains => vec!["chainlist".into()],
            Self::BlocksAboveHash {
                hash,
                chain,
                amount,
            } => vec![
                "blocksabovehash".into(),
                hash.clone(),
                chain.clone(),
                amount.to_string(),
            ],
        }
    }

    /// Unencoded `prefix/endpoint/params` path, for logs and diagnostics.
    pub fn path(&self, prefix: ApiPrefix) -> String {
        let mut path = prefix.as_str().to_owned();
        for segment in self.segments() {
            path.push('/');
            path.push_str(&segment);
        }
        path
    }
}

impl fmt::Display for Endpoint {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.segments().join("/"))
    }
}
