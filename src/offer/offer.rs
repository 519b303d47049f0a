use std::collections::HashMap;

use serde::{Deserialize, Serialize};

use crate::common::error::OtcError;
use crate::common::types::{
    Address, ExpirationBucket, ALGO_ASSET_ID, MICROALGOS_PER_ALGO, ROUNDS_PER_HOUR, ZERO_ADDRESS,
};
use crate::indexer::StateValue;

// Global-state keys written by the escrow contract
const KEY_MAKER: &str = "maker";
const KEY_TAKER: &str = "taker";
const KEY_SELL_ASSET: &str = "asset_a";
const KEY_SELL_AMOUNT: &str = "asset_a_amount";
const KEY_BUY_ASSET: &str = "asset_b";
const KEY_BUY_AMOUNT: &str = "asset_b_amount";
const KEY_EXPIRY: &str = "offer_expiry";
const KEY_COMPLETED: &str = "is_completed";

const COMPLETED_SENTINEL: u64 = 1;

/// Validated create-offer intent. Amounts are base units; a zero taker
/// restriction would mean "public", so it is normalized away at build time.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct OfferTerms {
    pub sell_asset_id: u64,
    pub sell_amount: u64,
    pub buy_asset_id: u64,
    pub buy_amount: u64,
    pub expiration: ExpirationBucket,
    pub taker_restriction: Option<Address>,
    #[serde(skip)]
    pub(super) _private: (),
}

impl OfferTerms {
    /// Taker argument as the contract expects it - the restriction address,
    /// or the all-zero sentinel for a public offer.
    pub fn taker_or_sentinel(&self) -> Address {
        self.taker_restriction.unwrap_or(ZERO_ADDRESS)
    }
}

/// Snapshot of one deployed escrow contract, as read from the indexer. Never
/// mutated locally except for optimistic removal from the displayed list.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Offer {
    pub app_id: u64,
    pub maker: Address,
    pub taker: Address,
    pub sell_asset_id: u64,
    pub sell_amount: u64,
    pub buy_asset_id: u64,
    pub buy_amount: u64,
    pub expiry_round: u64,
    pub is_completed: bool,
}

impl Offer {
    pub fn is_public(&self) -> bool {
        self.taker.is_zero()
    }

    pub fn eligible_taker(&self, account: &Address) -> bool {
        self.is_public() || self.taker == *account
    }

    /// Buy amount per unit sold, or `None` for a zero sell amount - on-chain
    /// state is unvalidated input here. The native coin's base unit is a
    /// fixed fractional denomination, so a native buy side scales by 1e-6.
    pub fn price_per_unit(&self) -> Option<f64> {
        if self.sell_amount == 0 {
            return None;
        }
        let raw = self.buy_amount as f64 / self.sell_amount as f64;
        if self.buy_asset_id == ALGO_ASSET_ID {
            Some(raw / MICROALGOS_PER_ALGO as f64)
        } else {
            Some(raw)
        }
    }

    pub fn expiry_text(&self) -> String {
        format!("{}h left", self.expiry_round / ROUNDS_PER_HOUR)
    }

    pub(crate) fn from_global_state(
        app_id: u64,
        state: &HashMap<String, StateValue>,
    ) -> Result<Offer, OtcError> {
        let address_field = |key: &str| -> Result<Address, OtcError> {
            state
                .get(key)
                .and_then(StateValue::as_address)
                .copied()
                .ok_or_else(|| {
                    OtcError::StateDecode(format!(
                        "App {} global state missing address field {}",
                        app_id, key
                    ))
                })
        };
        let uint_field = |key: &str| -> Result<u64, OtcError> {
            state.get(key).and_then(StateValue::as_uint).ok_or_else(|| {
                OtcError::StateDecode(format!(
                    "App {} global state missing uint field {}",
                    app_id, key
                ))
            })
        };

        Ok(Offer {
            app_id,
            maker: address_field(KEY_MAKER)?,
            taker: address_field(KEY_TAKER).unwrap_or(ZERO_ADDRESS),
            sell_asset_id: uint_field(KEY_SELL_ASSET)?,
            sell_amount: uint_field(KEY_SELL_AMOUNT)?,
            buy_asset_id: uint_field(KEY_BUY_ASSET)?,
            buy_amount: uint_field(KEY_BUY_AMOUNT)?,
            expiry_round: uint_field(KEY_EXPIRY)?,
            is_completed: uint_field(KEY_COMPLETED)? == COMPLETED_SENTINEL,
        })
    }
}
