use serde::Deserialize;
use tracing::debug;
use url::Url;

use crate::common::config::Config;
use crate::common::error::OtcError;
use crate::common::types::{TxIdString, VALID_ROUND_WINDOW};
use crate::txn::SuggestedParams;

const API_TOKEN_HEADER: &str = "X-Algo-API-Token";

#[derive(Debug, Deserialize)]
struct TransactionParamsResponse {
    fee: u64,
    #[serde(rename = "genesis-hash")]
    genesis_hash: String,
    #[serde(rename = "genesis-id")]
    genesis_id: String,
    #[serde(rename = "last-round")]
    last_round: u64,
    #[serde(rename = "min-fee")]
    min_fee: u64,
}

#[derive(Debug, Deserialize)]
struct SubmitResponse {
    #[serde(rename = "txId")]
    tx_id: String,
}

#[derive(Debug, Deserialize)]
struct NodeErrorResponse {
    message: Option<String>,
}

/// Thin handle to the node's parameter-query and transaction-submission API.
#[derive(Clone)]
pub struct NodeClient {
    http: reqwest::Client,
    base_url: Url,
    api_token: String,
}

impl NodeClient {
    pub fn new(config: &Config) -> Self {
        NodeClient {
            http: reqwest::Client::new(),
            base_url: config.node_url.to_owned(),
            api_token: config.api_token.to_owned(),
        }
    }

    fn endpoint(&self, path: &str) -> String {
        format!("{}/{}", self.base_url.as_str().trim_end_matches('/'), path)
    }

    pub async fn suggested_params(&self) -> Result<SuggestedParams, OtcError> {
        let response = self
            .http
            .get(self.endpoint("v2/transactions/params"))
            .header(API_TOKEN_HEADER, &self.api_token)
            .send()
            .await?;
        let response = Self::check_status(response).await?;
        let params: TransactionParamsResponse = response.json().await?;

        Ok(SuggestedParams {
            fee: params.fee.max(params.min_fee),
            first_valid: params.last_round,
            last_valid: params.last_round + VALID_ROUND_WINDOW,
            genesis_id: params.genesis_id,
            genesis_hash: params.genesis_hash,
        })
    }

    /// Submits the signed transaction blobs as one concatenated body. The
    /// network accepts or rejects the contained group as a unit.
    pub async fn send_raw_transactions(
        &self,
        signed_txns: Vec<Vec<u8>>,
    ) -> Result<TxIdString, OtcError> {
        let body: Vec<u8> = signed_txns.concat();
        let response = self
            .http
            .post(self.endpoint("v2/transactions"))
            .header(API_TOKEN_HEADER, &self.api_token)
            .header(reqwest::header::CONTENT_TYPE, "application/x-binary")
            .body(body)
            .send()
            .await?;
        let response = Self::check_status(response).await?;
        let submit: SubmitResponse = response.json().await?;
        debug!("Node accepted transaction group w/ txid {}", submit.tx_id);
        Ok(submit.tx_id)
    }

    async fn check_status(response: reqwest::Response) -> Result<reqwest::Response, OtcError> {
        if response.status().is_success() {
            return Ok(response);
        }
        let status = response.status();
        let message = match response.json::<NodeErrorResponse>().await {
            Ok(NodeErrorResponse {
                message: Some(message),
            }) => message,
            _ => format!("Node request failed with status {}", status),
        };
        Err(OtcError::Node(message))
    }
}
