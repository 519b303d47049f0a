use crate::common::error::OtcError;
use crate::common::types::{Address, ExpirationBucket};
use crate::offer::offer::OfferTerms;

/// Builder for user-entered offer terms. Every numeric/identifier field must
/// be supplied before `build()`; the taker restriction is validated against
/// the network's address checksum rule.
pub struct OfferTermsBuilder {
    sell_asset_id: Option<u64>,
    sell_amount: Option<u64>,
    buy_asset_id: Option<u64>,
    buy_amount: Option<u64>,
    expiration: Option<ExpirationBucket>,
    taker_restriction: Option<String>,
}

impl OfferTermsBuilder {
    pub fn new() -> Self {
        OfferTermsBuilder {
            sell_asset_id: Option::<u64>::None,
            sell_amount: Option::<u64>::None,
            buy_asset_id: Option::<u64>::None,
            buy_amount: Option::<u64>::None,
            expiration: Option::<ExpirationBucket>::None,
            taker_restriction: Option::<String>::None,
        }
    }

    pub fn sell_asset_id(&mut self, sell_asset_id: impl Into<u64>) -> &mut Self {
        self.sell_asset_id = Some(sell_asset_id.into());
        self
    }

    pub fn sell_amount(&mut self, sell_amount: impl Into<u64>) -> &mut Self {
        self.sell_amount = Some(sell_amount.into());
        self
    }

    pub fn buy_asset_id(&mut self, buy_asset_id: impl Into<u64>) -> &mut Self {
        self.buy_asset_id = Some(buy_asset_id.into());
        self
    }

    pub fn buy_amount(&mut self, buy_amount: impl Into<u64>) -> &mut Self {
        self.buy_amount = Some(buy_amount.into());
        self
    }

    pub fn expiration(&mut self, expiration: ExpirationBucket) -> &mut Self {
        self.expiration = Some(expiration);
        self
    }

    pub fn taker_restriction(&mut self, taker_address: impl Into<String>) -> &mut Self {
        self.taker_restriction = Some(taker_address.into());
        self
    }

    pub fn build(&self) -> Result<OfferTerms, OtcError> {
        let Some(sell_asset_id) = self.sell_asset_id else {
            return Err(OtcError::Simple("No Sell Asset ID defined".to_string()));
        };

        let Some(sell_amount) = self.sell_amount else {
            return Err(OtcError::Simple("No Sell Amount defined".to_string()));
        };

        let Some(buy_asset_id) = self.buy_asset_id else {
            return Err(OtcError::Simple("No Buy Asset ID defined".to_string()));
        };

        let Some(buy_amount) = self.buy_amount else {
            return Err(OtcError::Simple("No Buy Amount defined".to_string()));
        };

        if sell_amount == 0 {
            return Err(OtcError::Simple("Sell Amount must be non-zero".to_string()));
        }
        if buy_amount == 0 {
            return Err(OtcError::Simple("Buy Amount must be non-zero".to_string()));
        }

        let expiration = self
            .expiration
            .unwrap_or(ExpirationBucket::TwentyFourHours);

        let taker_restriction = match self.taker_restriction.as_ref() {
            Some(taker_string) => {
                let address: Address = taker_string.parse()?;
                // An explicit zero sentinel means no restriction
                if address.is_zero() {
                    None
                } else {
                    Some(address)
                }
            }
            None => None,
        };

        Ok(OfferTerms {
            sell_asset_id,
            sell_amount,
            buy_asset_id,
            buy_amount,
            expiration,
            taker_restriction,
            _private: (),
        })
    }
}

impl Default for OfferTermsBuilder {
    fn default() -> Self {
        Self::new()
    }
}
