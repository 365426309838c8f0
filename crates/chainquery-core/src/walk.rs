//! Chain walker: list every chain a node knows about, then pull the blocks
//! above a starting hash for each one.

use tracing::debug;

use crate::error::{CoreError, NodeError};
use crate::node::{ChainBlocks, ChainList, NodeApi};

/// Fetch the chain list, then `amount` blocks above `start_hash` for every
/// chain, one request at a time and in list order.
///
/// Stops at the first failing request.
pub async fn walk_chains(
    api: &dyn NodeApi,
    start_hash: &str,
    amount: u64,
) -> Result<Vec<ChainBlocks>, CoreError> {
    let raw = api.get_chains().await?;
    let chains: ChainList = serde_json::from_value(raw)
        .map_err(|e| NodeError::InvalidResponse(format!("invalid chain list: {e}")))?;
    debug!(chains = chains.list.len(), start_hash, amount, "walking chains");

    let mut walked = Vec::with_capacity(chains.list.len());
    for chain in chains.list {
        let blocks = api.get_blocks_above_hash(start_hash, &chain, amount).await?;
        debug!(chain = %chain, "fetched blocks above hash");
        walked.push(ChainBlocks { chain, blocks });
    }
    Ok(walked)
}
