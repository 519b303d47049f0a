use tracing::{debug, info};

use crate::common::config::Config;
use crate::common::error::OtcError;
use crate::common::types::{app_address, Address, TxIdString, MBR_FUNDING_MICROALGOS};
use crate::node::NodeClient;
use crate::offer::OfferTerms;
use crate::txn::{
    assign_group_id, encode_uint64, method_selector, SuggestedParams, Transaction,
    CREATE_METHOD_SIGNATURE, RECLAIM_METHOD_ARG,
};
use crate::wallet::WalletSessionAccess;

/// Composes the fixed 3-member create-offer group: escrow funding payment,
/// sell-asset deposit, then the contract method call carrying the offer
/// terms. All three land at the app's deterministic address and share one
/// group id in this order.
pub fn build_create_group(
    app_id: u64,
    terms: &OfferTerms,
    account: &Address,
    params: &SuggestedParams,
) -> Result<Vec<Transaction>, OtcError> {
    let escrow = app_address(app_id);

    let funding_txn =
        Transaction::payment(*account, escrow, MBR_FUNDING_MICROALGOS, params);

    let deposit_txn = Transaction::asset_transfer(
        *account,
        escrow,
        terms.sell_asset_id,
        terms.sell_amount,
        params,
    );

    let app_args = vec![
        method_selector(CREATE_METHOD_SIGNATURE).to_vec(),
        encode_uint64(terms.sell_asset_id),
        encode_uint64(terms.sell_amount),
        encode_uint64(terms.buy_asset_id),
        encode_uint64(terms.buy_amount),
        encode_uint64(terms.expiration.rounds()),
        terms.taker_or_sentinel().as_bytes().to_vec(),
    ];
    let call_txn = Transaction::app_call(
        *account,
        app_id,
        app_args,
        vec![terms.sell_asset_id, terms.buy_asset_id],
        vec![],
        params,
    );

    let mut txns = vec![funding_txn, deposit_txn, call_txn];
    assign_group_id(&mut txns)?;
    Ok(txns)
}

/// Reclaim of an expired offer is a single method call; no grouping needed.
pub fn build_reclaim_txn(
    app_id: u64,
    sell_asset_id: u64,
    account: &Address,
    params: &SuggestedParams,
) -> Transaction {
    Transaction::app_call(
        *account,
        app_id,
        vec![RECLAIM_METHOD_ARG.to_vec()],
        vec![sell_asset_id],
        vec![],
        params,
    )
}

/// Drives a maker intent through construction, signing and submission.
pub struct Maker {
    node: NodeClient,
    wallet: WalletSessionAccess,
    app_id: u64,
}

impl Maker {
    pub fn new(config: &Config, node: NodeClient, wallet: WalletSessionAccess) -> Self {
        Maker {
            node,
            wallet,
            app_id: config.app_id,
        }
    }

    pub async fn create_offer(
        &self,
        terms: &OfferTerms,
        account: &Address,
    ) -> Result<TxIdString, OtcError> {
        let params = self.node.suggested_params().await?;
        let txns = build_create_group(self.app_id, terms, account, &params)?;
        debug!(
            "Create-offer group of {} built for account {}",
            txns.len(),
            account
        );

        let signed = self.wallet.sign_transaction_groups(vec![txns]).await?;
        let tx_id = self.node.send_raw_transactions(signed).await?;
        info!("Offer created w/ txid {}", tx_id);
        Ok(tx_id)
    }

    pub async fn reclaim_offer(
        &self,
        app_id: u64,
        sell_asset_id: u64,
        account: &Address,
    ) -> Result<TxIdString, OtcError> {
        let params = self.node.suggested_params().await?;
        let txn = build_reclaim_txn(app_id, sell_asset_id, account, &params);

        let signed = self.wallet.sign_transaction_groups(vec![vec![txn]]).await?;
        let tx_id = self.node.send_raw_transactions(signed).await?;
        info!("Expired offer {} reclaimed w/ txid {}", app_id, tx_id);
        Ok(tx_id)
    }
}
