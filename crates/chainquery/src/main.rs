mod cli;

use std::time::Duration;

use clap::Parser;
use eyre::WrapErr;
use serde_json::Value;

use chainquery_core::address::{self, PublicKey};
use chainquery_core::walk::walk_chains;
use chainquery_core::{HttpNodeClient, NodeApi, NodeConfig};

use cli::Command;

#[tokio::main]
async fn main() -> eyre::Result<()> {
    let args = cli::Cli::parse();

    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .with_writer(std::io::stderr)
        .with_file(true)
        .with_line_number(true)
        .with_level(true)
        .init();

    let output = execute(args).await?;
    println!("{output}");
    Ok(())
}

/// Run the parsed command line, returning what should be printed on stdout.
///
/// The node client is only built for commands that need one, so a bad
/// `--node` value never affects the offline codec commands.
async fn execute(args: cli::Cli) -> eyre::Result<String> {
    if !args.command.needs_node() {
        return convert(args.command);
    }

    let config = NodeConfig::new(args.node.as_str())
        .with_https(args.https)
        .with_api_prefix(args.api_prefix)
        .with_timeout(args.timeout_secs.map(Duration::from_secs));
    let scheme = config.scheme();
    let node = HttpNodeClient::new(config).context("configure node client")?;

    tracing::debug!(
        node = %args.node,
        scheme,
        api_prefix = %node.api_prefix(),
        "querying node"
    );
    query(&node, args.command).await.map_err(|err| {
        let causes: Vec<String> = err.chain().map(ToString::to_string).collect();
        let message = format_node_error(&args.node, &causes.join(": "));
        err.wrap_err(message)
    })
}

/// Execute one node command and render its JSON answer.
async fn query(node: &dyn NodeApi, command: Command) -> eyre::Result<String> {
    let json = match command {
        Command::Peers => node.get_peers().await?,
        Command::Nodes => node.get_nodes().await?,
        Command::Block { hash } => node.get_block(&hash).await?,
        Command::Status => node.get_status().await?,
        Command::BlockCount { chain } => node.get_block_count(&chain).await?,
        Command::TxCount { chain } => node.get_transaction_count(&chain).await?,
        Command::Balance { key } => node.get_balance(&key).await?,
        Command::BlockAtHeight { chain, height } => {
            node.get_block_at_height(&chain, height).await?
        }
        Command::Usernames => node.get_usernames().await?,
        Command::PubkeyForUsername { username } => {
            node.get_publickey_for_username(&username).await?
        }
        Command::UsernameForPubkey { public_key } => {
            node.get_username_for_publickey(&public_key).await?
        }
        Command::Chains => node.get_chains().await?,
        Command::BlocksAbove {
            hash,
            chain,
            amount,
        } => node.get_blocks_above_hash(&hash, &chain, amount).await?,
        Command::SubmitBlock { block } => {
            let block: Value =
                serde_json::from_str(&block).context("block must be a JSON document")?;
            node.submit_block(&block).await?
        }
        Command::Walk { start_hash, amount } => {
            let walked = walk_chains(node, &start_hash, amount).await?;
            serde_json::to_value(walked).context("serialize walked chains")?
        }
        offline @ (Command::ToAddress { .. } | Command::ToPubkey { .. }) => {
            return convert(offline)
        }
    };

    serde_json::to_string_pretty(&json).context("render JSON response")
}

/// Public key <-> address conversion; never touches the network.
fn convert(command: Command) -> eyre::Result<String> {
    match command {
        Command::ToAddress {
            public_key,
            hex: as_hex,
        } => {
            let key = if as_hex {
                PublicKey::from_bytes(
                    hex::decode(public_key.trim()).context("public key must be valid hex")?,
                )
            } else {
                PublicKey::from_latin1(&public_key)?
            };
            Ok(address::encode(&key)?.to_string())
        }
        Command::ToPubkey {
            address: encoded,
            hex: as_hex,
            verify_checksum,
        } => {
            let key = if verify_checksum {
                address::decode_verified(encoded.trim())?
            } else {
                address::decode(encoded.trim())?
            };
            Ok(if as_hex {
                hex::encode(key.as_bytes())
            } else {
                key.to_latin1()
            })
        }
        _ => eyre::bail!("command needs a node"),
    }
}

/// Attach an actionable hint to common transport failures.
fn format_node_error(node: &str, source_error: &str) -> String {
    let mut lines = vec![format!("request to node `{node}` failed")];

    if source_error.contains("dns error") || source_error.contains("failed to lookup address") {
        lines.push("hint: hostname resolution failed; verify the node address".into());
    } else if source_error.contains("Connection refused")
        || source_error.contains("tcp connect")
    {
        lines.push("hint: nothing is listening there; verify the node ip and port".into());
    } else if source_error.contains("certificate")
        || source_error.contains("tls")
        || source_error.contains("InvalidContentType")
    {
        lines.push(
            "hint: TLS handshake failed; check whether the node really serves HTTPS".into(),
        );
    } else if source_error.contains("404") {
        lines.push("hint: endpoint not found; the node may serve a different --api-prefix".into());
    } else if source_error.contains("invalid node response") {
        lines.push("hint: the node answered with something other than JSON".into());
    }

    lines.join("\n")
}
