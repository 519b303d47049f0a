use serde::{Deserialize, Serialize};
use url::Url;

use crate::common::config::Config;
use crate::common::error::OtcError;
use crate::common::types::Address;

const API_TOKEN_HEADER: &str = "X-Indexer-API-Token";

#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct StateEntryValue {
    #[serde(rename = "type")]
    pub value_type: u8,
    #[serde(default)]
    pub bytes: String,
    #[serde(default)]
    pub uint: u64,
}

#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct StateEntry {
    pub key: String,
    pub value: StateEntryValue,
}

#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct ApplicationParams {
    #[serde(rename = "global-state", default)]
    pub global_state: Vec<StateEntry>,
}

#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct ApplicationInfo {
    pub id: u64,
    #[serde(default)]
    pub deleted: bool,
    pub params: ApplicationParams,
}

#[derive(Debug, Deserialize)]
struct CreatedApplicationsResponse {
    #[serde(default)]
    applications: Vec<ApplicationInfo>,
}

/// Thin handle to the read-only indexing service used to discover offer
/// contracts and their public state.
#[derive(Clone)]
pub struct IndexerClient {
    http: reqwest::Client,
    base_url: Url,
    api_token: String,
}

impl IndexerClient {
    pub fn new(config: &Config) -> Self {
        IndexerClient {
            http: reqwest::Client::new(),
            base_url: config.indexer_url.to_owned(),
            api_token: config.api_token.to_owned(),
        }
    }

    pub async fn applications_by_creator(
        &self,
        creator: &Address,
    ) -> Result<Vec<ApplicationInfo>, OtcError> {
        let endpoint = format!(
            "{}/v2/accounts/{}/created-applications",
            self.base_url.as_str().trim_end_matches('/'),
            creator
        );
        let response = self
            .http
            .get(endpoint)
            .header(API_TOKEN_HEADER, &self.api_token)
            .send()
            .await?;
        if !response.status().is_success() {
            return Err(OtcError::Node(format!(
                "Indexer request failed with status {}",
                response.status()
            )));
        }
        let created: CreatedApplicationsResponse = response.json().await?;
        Ok(created.applications)
    }
}
