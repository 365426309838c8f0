//! Typed views over node responses that the library itself needs to read.
//!
//! Most endpoints are passed through as raw `serde_json::Value`; only the
//! shapes consumed by `crate::walk` are modelled here.

use serde::{Deserialize, Serialize};

// ==============================================================================
// Chain List
// ==============================================================================

/// Body of the `chainlist` endpoint.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct ChainList {
    pub list: Vec<String>,
}

/// Blocks fetched for one chain by [`crate::walk::walk_chains`].
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ChainBlocks {
    pub chain: String,
    pub blocks: serde_json::Value,
}
