use tracing::{debug, info};

use crate::common::error::OtcError;
use crate::common::types::{app_address, Address, TxIdString, ALGO_ASSET_ID};
use crate::node::NodeClient;
use crate::offer::Offer;
use crate::txn::{assign_group_id, SuggestedParams, Transaction, ACCEPT_METHOD_ARG};
use crate::wallet::WalletSessionAccess;

/// Composes the 2-member accept-offer group: the taker's buy-side deposit to
/// the escrow address, then the accept method call referencing the sell asset
/// and the maker account for the contract's inner transfers.
pub fn build_accept_group(
    offer: &Offer,
    account: &Address,
    params: &SuggestedParams,
) -> Result<Vec<Transaction>, OtcError> {
    if offer.maker.is_zero() {
        return Err(OtcError::OfferInvalid(format!(
            "Offer {} has no known maker",
            offer.app_id
        )));
    }
    if !offer.eligible_taker(account) {
        return Err(OtcError::OfferInvalid(format!(
            "Offer {} is restricted to a designated taker",
            offer.app_id
        )));
    }
    if offer.maker == *account {
        return Err(OtcError::OfferInvalid(format!(
            "Maker cannot accept own offer {}",
            offer.app_id
        )));
    }

    let escrow = app_address(offer.app_id);

    // Buy side in the native coin moves as a payment, anything else as an
    // asset transfer
    let deposit_txn = if offer.buy_asset_id == ALGO_ASSET_ID {
        Transaction::payment(*account, escrow, offer.buy_amount, params)
    } else {
        Transaction::asset_transfer(
            *account,
            escrow,
            offer.buy_asset_id,
            offer.buy_amount,
            params,
        )
    };

    let call_txn = Transaction::app_call(
        *account,
        offer.app_id,
        vec![ACCEPT_METHOD_ARG.to_vec()],
        vec![offer.sell_asset_id],
        vec![offer.maker],
        params,
    );

    let mut txns = vec![deposit_txn, call_txn];
    assign_group_id(&mut txns)?;
    Ok(txns)
}

/// Drives an accept intent through construction, signing and submission.
pub struct Taker {
    node: NodeClient,
    wallet: WalletSessionAccess,
}

impl Taker {
    pub fn new(node: NodeClient, wallet: WalletSessionAccess) -> Self {
        Taker { node, wallet }
    }

    pub async fn accept_offer(
        &self,
        offer: &Offer,
        account: &Address,
    ) -> Result<TxIdString, OtcError> {
        let params = self.node.suggested_params().await?;
        let txns = build_accept_group(offer, account, &params)?;
        debug!(
            "Accept group of {} built for offer {} by account {}",
            txns.len(),
            offer.app_id,
            account
        );

        let signed = self.wallet.sign_transaction_groups(vec![txns]).await?;
        let tx_id = self.node.send_raw_transactions(signed).await?;
        info!("Offer {} accepted w/ txid {}", offer.app_id, tx_id);
        Ok(tx_id)
    }
}
