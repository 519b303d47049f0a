use std::collections::HashSet;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

use tokio::sync::RwLock;
use tracing::{debug, warn};

use crate::common::config::Config;
use crate::common::error::OtcError;
use crate::common::types::{Address, TxIdString};
use crate::discovery::Discovery;
use crate::indexer::IndexerClient;
use crate::maker::Maker;
use crate::node::NodeClient;
use crate::offer::{Offer, OfferTerms};
use crate::taker::Taker;
use crate::wallet::{WalletSession, WalletSessionAccess, WalletTransport};

/// Top-level handle of the crate. Owns the wallet session (and with it the
/// connected account), the node/indexer adapters, the locally displayed offer
/// list, and the per-action in-flight guards. Session state is passed down to
/// flows explicitly - dependents never reach for ambient globals.
pub struct Manager {
    wallet_session: WalletSession,
    wallet: WalletSessionAccess,
    maker: Maker,
    taker: Taker,
    discovery: Discovery,
    offers: RwLock<Vec<Offer>>,
    accepts_in_flight: RwLock<HashSet<u64>>,
    reclaims_in_flight: RwLock<HashSet<u64>>,
    create_in_flight: AtomicBool,
}

impl Manager {
    pub fn new(config: Config, transport: Arc<dyn WalletTransport>) -> Manager {
        let wallet_session = WalletSession::new(transport);
        let wallet = wallet_session.new_accessor();
        let node = NodeClient::new(&config);
        let indexer = IndexerClient::new(&config);

        Manager {
            maker: Maker::new(&config, node.clone(), wallet.clone()),
            taker: Taker::new(node, wallet.clone()),
            discovery: Discovery::new(&config, indexer),
            wallet_session,
            wallet,
            offers: RwLock::new(Vec::new()),
            accepts_in_flight: RwLock::new(HashSet::new()),
            reclaims_in_flight: RwLock::new(HashSet::new()),
            create_in_flight: AtomicBool::new(false),
        }
    }

    // Wallet lifecycle

    /// Opens the pairing flow. `Ok(None)` means the user dismissed the
    /// pairing UI - a neutral outcome, not surfaced as an error.
    pub async fn connect_wallet(&self) -> Result<Option<Address>, OtcError> {
        match self.wallet.connect().await {
            Ok(account) => Ok(Some(account)),
            Err(error) if error.is_user_dismissal() => {
                debug!("Wallet pairing UI dismissed by user");
                Ok(None)
            }
            Err(error) => Err(error),
        }
    }

    /// Silently restores a previous wallet session if one exists.
    pub async fn reconnect_wallet(&self) -> Option<Address> {
        self.wallet.reconnect().await
    }

    pub async fn disconnect_wallet(&self) -> Result<(), OtcError> {
        self.wallet.disconnect().await
    }

    pub async fn connected_account(&self) -> Option<Address> {
        self.wallet.connected_account().await
    }

    // Offer management

    pub async fn create_offer(&self, terms: &OfferTerms) -> Result<TxIdString, OtcError> {
        let account = self.require_account().await?;
        if self.create_in_flight.swap(true, Ordering::SeqCst) {
            return Err(OtcError::Simple(
                "A create-offer request is already in flight".to_string(),
            ));
        }
        let result = self.maker.create_offer(terms, &account).await;
        self.create_in_flight.store(false, Ordering::SeqCst);
        result
    }

    /// Re-reads open offers from the indexer and replaces the local list. A
    /// failed fetch leaves the list empty rather than stale.
    pub async fn refresh_offers(&self) -> Result<Vec<Offer>, OtcError> {
        match self.discovery.fetch_open_offers().await {
            Ok(offers) => {
                *self.offers.write().await = offers.to_owned();
                Ok(offers)
            }
            Err(error) => {
                warn!("Offer discovery failed - {}", error);
                self.offers.write().await.clear();
                Err(error)
            }
        }
    }

    /// Snapshot of the locally displayed offer list.
    pub async fn offers(&self) -> Vec<Offer> {
        self.offers.read().await.to_owned()
    }

    /// Accepts an offer from the local list. Keyed by app id: a second accept
    /// for the same offer while one is outstanding errors immediately, while
    /// accepts for other offers proceed. On success the offer is removed from
    /// the local list optimistically; on failure it remains.
    pub async fn accept_offer(&self, app_id: u64) -> Result<TxIdString, OtcError> {
        {
            let mut in_flight = self.accepts_in_flight.write().await;
            if !in_flight.insert(app_id) {
                return Err(OtcError::Simple(format!(
                    "An accept for offer {} is already in flight",
                    app_id
                )));
            }
        }
        let result = self.accept_offer_inner(app_id).await;
        self.accepts_in_flight.write().await.remove(&app_id);
        result
    }

    async fn accept_offer_inner(&self, app_id: u64) -> Result<TxIdString, OtcError> {
        let account = self.require_account().await?;
        let offer = self.find_offer(app_id).await?;

        let tx_id = self.taker.accept_offer(&offer, &account).await?;

        let mut offers = self.offers.write().await;
        offers.retain(|offer| offer.app_id != app_id);
        Ok(tx_id)
    }

    /// Reclaims an expired offer's escrowed assets back to the maker.
    pub async fn reclaim_offer(&self, app_id: u64) -> Result<TxIdString, OtcError> {
        {
            let mut in_flight = self.reclaims_in_flight.write().await;
            if !in_flight.insert(app_id) {
                return Err(OtcError::Simple(format!(
                    "A reclaim for offer {} is already in flight",
                    app_id
                )));
            }
        }
        let result = self.reclaim_offer_inner(app_id).await;
        self.reclaims_in_flight.write().await.remove(&app_id);
        result
    }

    async fn reclaim_offer_inner(&self, app_id: u64) -> Result<TxIdString, OtcError> {
        let account = self.require_account().await?;
        let offer = self.find_offer(app_id).await?;
        if offer.maker != account {
            return Err(OtcError::OfferInvalid(format!(
                "Only the maker can reclaim offer {}",
                app_id
            )));
        }

        let tx_id = self
            .maker
            .reclaim_offer(app_id, offer.sell_asset_id, &account)
            .await?;

        let mut offers = self.offers.write().await;
        offers.retain(|offer| offer.app_id != app_id);
        Ok(tx_id)
    }

    pub async fn shutdown(self) -> Result<(), OtcError> {
        self.wallet.shutdown().await?;
        if let Err(error) = self.wallet_session.task_handle.await {
            return Err(OtcError::Simple(format!(
                "Wallet session task join failed - {}",
                error
            )));
        }
        Ok(())
    }

    // Private helpers

    async fn require_account(&self) -> Result<Address, OtcError> {
        self.wallet.connected_account().await.ok_or_else(|| {
            OtcError::Simple("Please connect your wallet first".to_string())
        })
    }

    async fn find_offer(&self, app_id: u64) -> Result<Offer, OtcError> {
        let offers = self.offers.read().await;
        offers
            .iter()
            .find(|offer| offer.app_id == app_id)
            .cloned()
            .ok_or_else(|| {
                OtcError::Simple(format!("Offer {} is not in the displayed list", app_id))
            })
    }
}
