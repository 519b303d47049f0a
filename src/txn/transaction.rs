use serde::{Deserialize, Serialize};

use crate::common::types::Address;
use crate::txn::group::GroupId;

/// Network transaction parameters as fetched from the node, already collapsed
/// to what transaction construction needs.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct SuggestedParams {
    pub fee: u64,
    pub first_valid: u64,
    pub last_valid: u64,
    pub genesis_id: String,
    pub genesis_hash: String,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct TxnHeader {
    pub sender: Address,
    pub fee: u64,
    pub first_valid: u64,
    pub last_valid: u64,
    pub genesis_id: String,
    pub genesis_hash: String,
    pub group: Option<GroupId>,
}

/// The three transfer/call shapes an offer flow is composed of. Closed set -
/// the escrow contract's execution model needs nothing else.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum TxnBody {
    Payment {
        receiver: Address,
        amount_microalgos: u64,
    },
    AssetTransfer {
        receiver: Address,
        asset_id: u64,
        amount: u64,
    },
    ApplicationCall {
        app_id: u64,
        app_args: Vec<Vec<u8>>,
        foreign_assets: Vec<u64>,
        foreign_accounts: Vec<Address>,
    },
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Transaction {
    pub header: TxnHeader,
    pub body: TxnBody,
}

impl Transaction {
    fn header(sender: Address, params: &SuggestedParams) -> TxnHeader {
        TxnHeader {
            sender,
            fee: params.fee,
            first_valid: params.first_valid,
            last_valid: params.last_valid,
            genesis_id: params.genesis_id.to_owned(),
            genesis_hash: params.genesis_hash.to_owned(),
            group: None,
        }
    }

    pub fn payment(
        sender: Address,
        receiver: Address,
        amount_microalgos: u64,
        params: &SuggestedParams,
    ) -> Self {
        Transaction {
            header: Self::header(sender, params),
            body: TxnBody::Payment {
                receiver,
                amount_microalgos,
            },
        }
    }

    pub fn asset_transfer(
        sender: Address,
        receiver: Address,
        asset_id: u64,
        amount: u64,
        params: &SuggestedParams,
    ) -> Self {
        Transaction {
            header: Self::header(sender, params),
            body: TxnBody::AssetTransfer {
                receiver,
                asset_id,
                amount,
            },
        }
    }

    pub fn app_call(
        sender: Address,
        app_id: u64,
        app_args: Vec<Vec<u8>>,
        foreign_assets: Vec<u64>,
        foreign_accounts: Vec<Address>,
        params: &SuggestedParams,
    ) -> Self {
        Transaction {
            header: Self::header(sender, params),
            body: TxnBody::ApplicationCall {
                app_id,
                app_args,
                foreign_assets,
                foreign_accounts,
            },
        }
    }

    pub fn is_payment(&self) -> bool {
        matches!(self.body, TxnBody::Payment { .. })
    }

    pub fn is_asset_transfer(&self) -> bool {
        matches!(self.body, TxnBody::AssetTransfer { .. })
    }

    pub fn is_app_call(&self) -> bool {
        matches!(self.body, TxnBody::ApplicationCall { .. })
    }
}
