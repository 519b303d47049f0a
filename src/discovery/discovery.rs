use tracing::debug;

use crate::common::config::Config;
use crate::common::error::OtcError;
use crate::common::types::Address;
use crate::indexer::{decode_global_state, IndexerClient};
use crate::offer::Offer;

/// Read path: every offer contract is an application created by the known
/// deployer account. Fetch them all, decode each one's public state and keep
/// the still-open ones.
pub struct Discovery {
    indexer: IndexerClient,
    deployer_address: Address,
}

impl Discovery {
    pub fn new(config: &Config, indexer: IndexerClient) -> Self {
        Discovery {
            indexer,
            deployer_address: config.deployer_address,
        }
    }

    pub async fn fetch_open_offers(&self) -> Result<Vec<Offer>, OtcError> {
        let applications = self
            .indexer
            .applications_by_creator(&self.deployer_address)
            .await?;

        let mut offers: Vec<Offer> = Vec::new();
        for application in applications {
            if application.deleted {
                continue;
            }
            // Apps with no global state are not (yet) initialized offers
            if application.params.global_state.is_empty() {
                continue;
            }

            let state = decode_global_state(&application.params.global_state)?;
            let offer = Offer::from_global_state(application.id, &state)?;
            if offer.is_completed {
                debug!("Skipping completed offer app {}", offer.app_id);
                continue;
            }
            offers.push(offer);
        }
        Ok(offers)
    }
}
