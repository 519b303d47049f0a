use serde::{Deserialize, Serialize};
use url::Url;

use crate::common::types::Address;

/// Externally supplied deployment constants: which escrow application to talk
/// to, who deployed the offer contracts, and where the node and indexer live.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct Config {
    pub app_id: u64,
    pub deployer_address: Address,
    pub node_url: Url,
    pub indexer_url: Url,
    pub api_token: String,
}

impl Config {
    pub fn new(
        app_id: u64,
        deployer_address: Address,
        node_url: Url,
        indexer_url: Url,
        api_token: impl Into<String>,
    ) -> Self {
        Config {
            app_id,
            deployer_address,
            node_url,
            indexer_url,
            api_token: api_token.into(),
        }
    }

    /// Public TestNet endpoints. The AlgoNode API token is an empty string.
    pub fn testnet(app_id: u64, deployer_address: Address) -> Self {
        Config {
            app_id,
            deployer_address,
            node_url: Url::parse("https://testnet-api.algonode.cloud").unwrap(),
            indexer_url: Url::parse("https://testnet-idx.algonode.cloud").unwrap(),
            api_token: String::new(),
        }
    }
}
