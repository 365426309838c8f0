pub mod address;
pub mod error;
pub mod node;
pub mod walk;

pub use address::{address_to_publickey, publickey_to_address, Address, PublicKey};
pub use error::{CoreError, NodeError};
pub use node::{ApiPrefix, Endpoint, HttpNodeClient, NodeApi, NodeConfig};
