use reqwest::StatusCode;

#[derive(Debug, thiserror::Error)]
pub enum CoreError {
    #[error("invalid address, bad len or prefix (prefix: {}, len: {len})", display_prefix(.prefix))]
    InvalidAddress { prefix: Option<u8>, len: usize },

    #[error("public key is {len} bytes long; at most {max} bytes fit in an address")]
    InvalidPublicKeyLength { len: usize, max: usize },

    #[error("public key character {ch:?} at index {index} does not fit in a single byte")]
    InvalidPublicKeyChar { ch: char, index: usize },

    #[error("invalid address, bad checksum ({expected_len} checksum bytes)")]
    ChecksumMismatch { expected_len: usize },

    #[error("invalid base58: {0}")]
    Base58(#[from] bs58::decode::Error),

    #[error(transparent)]
    Node(#[from] NodeError),

    #[error("invalid configuration: {0}")]
    InvalidConfig(String),
}

/// Failures talking to a node over HTTP.
#[derive(Debug, thiserror::Error)]
pub enum NodeError {
    #[error("HTTP error: {0}")]
    Transport(#[from] reqwest::Error),

    #[error("node returned {status}: {body}")]
    Status { status: StatusCode, body: String },

    #[error("invalid node response: {0}")]
    InvalidResponse(String),
}

fn display_prefix(prefix: &Option<u8>) -> String {
    match prefix {
        Some(byte) => byte.to_string(),
        None => "none".to_owned(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn invalid_address_message_includes_prefix_and_len() {
        let err = CoreError::InvalidAddress {
            prefix: Some(5),
            len: 50,
        };
        assert_eq!(
            err.to_string(),
            "invalid address, bad len or prefix (prefix: 5, len: 50)"
        );
    }

    #[test]
    fn invalid_address_message_handles_empty_payload() {
        let err = CoreError::InvalidAddress {
            prefix: None,
            len: 0,
        };
        assert!(err.to_string().contains("prefix: none, len: 0"));
    }

    #[test]
    fn node_status_error_is_transparent() {
        let err: CoreError = NodeError::Status {
            status: StatusCode::NOT_FOUND,
            body: "no such chain".into(),
        }
        .into();
        assert_eq!(err.to_string(), "node returned 404 Not Found: no such chain");
    }
}
