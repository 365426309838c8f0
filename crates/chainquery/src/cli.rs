use clap::{Parser, Subcommand};

use chainquery_core::ApiPrefix;

/// chainquery — query a blockchain node's HTTP API and convert between
/// public keys and addresses.
#[derive(Parser)]
#[command(version, about)]
pub struct Cli {
    /// Node to query, as `ip` or `ip:port`.
    #[arg(long, global = true, default_value = "127.0.0.1:8000", env = "CHAINQUERY_NODE")]
    pub node: String,

    /// Use HTTPS instead of HTTP.
    #[arg(long, global = true, env = "CHAINQUERY_HTTPS")]
    pub https: bool,

    /// API path prefix served by the node: v1 (`api/v1`), rest or json-rpc.
    #[arg(long, global = true, default_value = "v1", env = "CHAINQUERY_API_PREFIX")]
    pub api_prefix: ApiPrefix,

    /// Abort a request after this many seconds (no limit by default).
    #[arg(long, global = true)]
    pub timeout_secs: Option<u64>,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand)]
pub enum Command {
    /// List peers known to the node.
    Peers,
    /// List nodes known to the node (usually with `--api-prefix rest`).
    Nodes,
    /// Fetch a block by hash.
    Block { hash: String },
    /// Show the node status.
    Status,
    /// Number of blocks in a chain.
    BlockCount { chain: String },
    /// Number of transactions in a chain.
    TxCount { chain: String },
    /// Balance of a chain, username or public key.
    Balance { key: String },
    /// Block hash of a chain at a height.
    BlockAtHeight { chain: String, height: u64 },
    /// List usernames known to the node.
    Usernames,
    /// Public key registered for a username.
    PubkeyForUsername { username: String },
    /// Username registered for a public key.
    UsernameForPubkey { public_key: String },
    /// List chains (wallets) known to the node.
    Chains,
    /// Blocks of a chain above a given hash.
    BlocksAbove {
        hash: String,
        chain: String,
        amount: u64,
    },
    /// Submit a block given as JSON (not supported by the node API).
    SubmitBlock { block: String },
    /// List every chain, then fetch the blocks above a hash for each.
    Walk {
        /// Hash to start above.
        #[arg(long, default_value = "0")]
        start_hash: String,

        /// Blocks to fetch per chain.
        #[arg(long, default_value = "20")]
        amount: u64,
    },
    /// Convert a public key into an address.
    ToAddress {
        public_key: String,

        /// Read the public key as hex bytes instead of byte-per-character text.
        #[arg(long)]
        hex: bool,
    },
    /// Convert an address back into its public key.
    ToPubkey {
        address: String,

        /// Print the public key as hex bytes instead of byte-per-character text.
        #[arg(long)]
        hex: bool,

        /// Also require the checksum padding to match the key's digest.
        #[arg(long)]
        verify_checksum: bool,
    },
}

impl Command {
    /// Whether the command goes through a node client. The codec commands
    /// run offline and never read the node options.
    pub fn needs_node(&self) -> bool {
        !matches!(self, Self::ToAddress { .. } | Self::ToPubkey { .. })
    }
}
