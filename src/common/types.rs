use std::fmt;
use std::str::FromStr;

use data_encoding::BASE32_NOPAD;
use serde::{de, Deserialize, Deserializer, Serialize, Serializer};
use sha2::{Digest, Sha512_256};
use strum_macros::{Display, EnumString, IntoStaticStr};

use crate::common::error::OtcError;

pub type TxIdString = String;

/// Asset id of the network's native coin.
pub const ALGO_ASSET_ID: u64 = 0;

/// The native coin's base unit is a millionth of a whole coin.
pub const MICROALGOS_PER_ALGO: u64 = 1_000_000;

/// Approximate block rounds per hour, used for expiry math on both the
/// create and discovery paths.
pub const ROUNDS_PER_HOUR: u64 = 973;

/// Fixed funding transfer covering the escrow contract's minimum balance
/// requirement. 0.2 Algo.
pub const MBR_FUNDING_MICROALGOS: u64 = 200_000;

/// Validity window stamped onto built transactions, in rounds.
pub const VALID_ROUND_WINDOW: u64 = 1000;

const CHECKSUM_LEN: usize = 4;
const ADDRESS_STR_LEN: usize = 58;

/// 32-byte account public key. The textual form is base32 over key plus a
/// 4-byte SHA-512/256 checksum tail, always 58 characters.
#[derive(Clone, Copy, PartialEq, Eq, Hash)]
pub struct Address(pub [u8; 32]);

/// Sentinel for "no designated taker" - an offer carrying it is public.
pub const ZERO_ADDRESS: Address = Address([0u8; 32]);

impl Address {
    pub fn is_zero(&self) -> bool {
        self.0 == [0u8; 32]
    }

    pub fn as_bytes(&self) -> &[u8; 32] {
        &self.0
    }

    pub fn from_raw_bytes(bytes: &[u8]) -> Result<Address, OtcError> {
        let raw: [u8; 32] = bytes.try_into().map_err(|_| {
            OtcError::AddressParsing(format!(
                "Expected 32 raw address bytes, got {}",
                bytes.len()
            ))
        })?;
        Ok(Address(raw))
    }

    fn checksum(key: &[u8; 32]) -> [u8; CHECKSUM_LEN] {
        let digest = Sha512_256::digest(key);
        let mut checksum = [0u8; CHECKSUM_LEN];
        checksum.copy_from_slice(&digest[digest.len() - CHECKSUM_LEN..]);
        checksum
    }
}

impl fmt::Display for Address {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        let mut full = [0u8; 32 + CHECKSUM_LEN];
        full[..32].copy_from_slice(&self.0);
        full[32..].copy_from_slice(&Self::checksum(&self.0));
        write!(f, "{}", BASE32_NOPAD.encode(&full))
    }
}

impl fmt::Debug for Address {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "Address({})", self)
    }
}

impl FromStr for Address {
    type Err = OtcError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        if s.len() != ADDRESS_STR_LEN {
            return Err(OtcError::AddressParsing(format!(
                "Address must be {} characters, got {}",
                ADDRESS_STR_LEN,
                s.len()
            )));
        }
        let full = BASE32_NOPAD.decode(s.as_bytes())?;
        if full.len() != 32 + CHECKSUM_LEN {
            return Err(OtcError::AddressParsing(format!(
                "Address decodes to {} bytes, expected {}",
                full.len(),
                32 + CHECKSUM_LEN
            )));
        }
        let mut key = [0u8; 32];
        key.copy_from_slice(&full[..32]);
        if full[32..] != Self::checksum(&key) {
            return Err(OtcError::AddressParsing(format!(
                "Address checksum mismatch for {}",
                s
            )));
        }
        Ok(Address(key))
    }
}

impl Serialize for Address {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&self.to_string())
    }
}

impl<'de> Deserialize<'de> for Address {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let string = String::deserialize(deserializer)?;
        string.parse().map_err(de::Error::custom)
    }
}

/// Deterministic escrow address of a deployed application:
/// SHA-512/256 over "appID" concatenated with the big-endian app id.
pub fn app_address(app_id: u64) -> Address {
    let mut hasher = Sha512_256::new();
    hasher.update(b"appID");
    hasher.update(app_id.to_be_bytes());
    let digest = hasher.finalize();
    let mut key = [0u8; 32];
    key.copy_from_slice(&digest);
    Address(key)
}

/// The fixed set of expiration durations a maker can pick from.
#[derive(
    Clone, Copy, PartialEq, Eq, Hash, Debug, Serialize, Deserialize, EnumString, Display,
    IntoStaticStr,
)]
pub enum ExpirationBucket {
    OneHour,
    TwentyFourHours,
    SevenDays,
}

impl ExpirationBucket {
    pub fn hours(&self) -> u64 {
        match self {
            ExpirationBucket::OneHour => 1,
            ExpirationBucket::TwentyFourHours => 24,
            ExpirationBucket::SevenDays => 168,
        }
    }

    pub fn rounds(&self) -> u64 {
        self.hours() * ROUNDS_PER_HOUR
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn address_roundtrip() {
        let address = Address([7u8; 32]);
        let encoded = address.to_string();
        assert_eq!(encoded.len(), 58);
        let decoded = Address::from_str(&encoded).unwrap();
        assert_eq!(decoded, address);
    }

    #[test]
    fn address_checksum_rejected() {
        let address = Address([7u8; 32]);
        let mut encoded = address.to_string();
        // Flip the leading character to corrupt the key without touching length
        let replacement = if encoded.starts_with('A') { "B" } else { "A" };
        encoded.replace_range(0..1, replacement);
        assert!(Address::from_str(&encoded).is_err());
    }

    #[test]
    fn address_wrong_length_rejected() {
        assert!(Address::from_str("TOOSHORT").is_err());
    }

    #[test]
    fn zero_address_is_sentinel() {
        assert!(ZERO_ADDRESS.is_zero());
        assert!(!Address([1u8; 32]).is_zero());
        let reparsed = Address::from_str(&ZERO_ADDRESS.to_string()).unwrap();
        assert!(reparsed.is_zero());
    }

    #[test]
    fn app_address_deterministic() {
        assert_eq!(app_address(1234), app_address(1234));
        assert_ne!(app_address(1234), app_address(1235));
    }

    #[test]
    fn expiration_bucket_rounds() {
        assert_eq!(ExpirationBucket::OneHour.rounds(), 973);
        assert_eq!(ExpirationBucket::TwentyFourHours.rounds(), 24 * 973);
        assert_eq!(ExpirationBucket::SevenDays.rounds(), 168 * 973);
    }
}
