use std::collections::HashMap;

use base64::{engine::general_purpose::STANDARD as BASE64, Engine};
use serde_json::{json, Value};
use url::Url;

use crate::common::config::Config;
use crate::common::types::{Address, ExpirationBucket, ROUNDS_PER_HOUR};
use crate::indexer::StateValue;
use crate::offer::{Offer, OfferTermsBuilder};
use crate::txn::SuggestedParams;

pub struct SomeTestParams {}

impl SomeTestParams {
    pub const APP_ID: u64 = 1001;
    pub const SELL_ASSET_ID: u64 = 10458941;
    pub const SELL_AMOUNT: u64 = 100;
    pub const BUY_ASSET_ID: u64 = 31566704;
    pub const BUY_AMOUNT: u64 = 150;

    pub fn maker_address() -> Address {
        Address([1u8; 32])
    }

    pub fn taker_address() -> Address {
        Address([2u8; 32])
    }

    pub fn deployer_address() -> Address {
        Address([3u8; 32])
    }

    pub fn test_config() -> Config {
        Config::new(
            Self::APP_ID,
            Self::deployer_address(),
            Url::parse("http://localhost:4001").unwrap(),
            Url::parse("http://localhost:8980").unwrap(),
            "",
        )
    }

    pub fn config_for(base_url: &str) -> Config {
        Config::new(
            Self::APP_ID,
            Self::deployer_address(),
            Url::parse(base_url).unwrap(),
            Url::parse(base_url).unwrap(),
            "",
        )
    }

    pub fn suggested_params() -> SuggestedParams {
        SuggestedParams {
            fee: 1000,
            first_valid: 35_000_000,
            last_valid: 35_001_000,
            genesis_id: "testnet-v1.0".to_string(),
            genesis_hash: "SGO1GKSzyE7IEPItTxCByw9x8FmnrCDexi9/cOUJOiI=".to_string(),
        }
    }

    pub fn default_terms_builder() -> OfferTermsBuilder {
        let mut builder = OfferTermsBuilder::new();
        builder.sell_asset_id(Self::SELL_ASSET_ID);
        builder.sell_amount(Self::SELL_AMOUNT);
        builder.buy_asset_id(Self::BUY_ASSET_ID);
        builder.buy_amount(Self::BUY_AMOUNT);
        builder.expiration(ExpirationBucket::TwentyFourHours);
        builder
    }

    pub fn some_offer() -> Offer {
        Offer {
            app_id: Self::APP_ID,
            maker: Self::maker_address(),
            taker: crate::common::types::ZERO_ADDRESS,
            sell_asset_id: Self::SELL_ASSET_ID,
            sell_amount: Self::SELL_AMOUNT,
            buy_asset_id: Self::BUY_ASSET_ID,
            buy_amount: Self::BUY_AMOUNT,
            expiry_round: 10 * ROUNDS_PER_HOUR,
            is_completed: false,
        }
    }

    pub fn some_offer_state(offer: &Offer) -> HashMap<String, StateValue> {
        HashMap::from([
            ("maker".to_string(), StateValue::Address(offer.maker)),
            ("taker".to_string(), StateValue::Address(offer.taker)),
            ("asset_a".to_string(), StateValue::Uint(offer.sell_asset_id)),
            (
                "asset_a_amount".to_string(),
                StateValue::Uint(offer.sell_amount),
            ),
            ("asset_b".to_string(), StateValue::Uint(offer.buy_asset_id)),
            (
                "asset_b_amount".to_string(),
                StateValue::Uint(offer.buy_amount),
            ),
            (
                "offer_expiry".to_string(),
                StateValue::Uint(offer.expiry_round),
            ),
            (
                "is_completed".to_string(),
                StateValue::Uint(offer.is_completed as u64),
            ),
        ])
    }

    fn state_entry_bytes(key: &str, address: &Address) -> Value {
        json!({
            "key": BASE64.encode(key.as_bytes()),
            "value": { "type": 1, "bytes": BASE64.encode(address.as_bytes()), "uint": 0 }
        })
    }

    fn state_entry_uint(key: &str, value: u64) -> Value {
        json!({
            "key": BASE64.encode(key.as_bytes()),
            "value": { "type": 2, "bytes": "", "uint": value }
        })
    }

    /// One application entry in the indexer's created-applications wire shape.
    pub fn application_json(offer: &Offer) -> Value {
        json!({
            "id": offer.app_id,
            "deleted": false,
            "params": {
                "global-state": [
                    Self::state_entry_bytes("maker", &offer.maker),
                    Self::state_entry_bytes("taker", &offer.taker),
                    Self::state_entry_uint("asset_a", offer.sell_asset_id),
                    Self::state_entry_uint("asset_a_amount", offer.sell_amount),
                    Self::state_entry_uint("asset_b", offer.buy_asset_id),
                    Self::state_entry_uint("asset_b_amount", offer.buy_amount),
                    Self::state_entry_uint("offer_expiry", offer.expiry_round),
                    Self::state_entry_uint("is_completed", offer.is_completed as u64),
                ]
            }
        })
    }

    pub fn created_applications_json(offers: &[Offer]) -> Value {
        let applications: Vec<Value> =
            offers.iter().map(Self::application_json).collect();
        json!({ "applications": applications })
    }

    pub fn transaction_params_json() -> Value {
        json!({
            "consensus-version": "future",
            "fee": 0,
            "genesis-hash": "SGO1GKSzyE7IEPItTxCByw9x8FmnrCDexi9/cOUJOiI=",
            "genesis-id": "testnet-v1.0",
            "last-round": 35_000_000u64,
            "min-fee": 1000
        })
    }
}
