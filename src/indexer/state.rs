use std::collections::HashMap;

use base64::{engine::general_purpose::STANDARD as BASE64, Engine};

use crate::common::error::OtcError;
use crate::common::types::Address;
use crate::indexer::client::StateEntry;

const VALUE_TYPE_BYTES: u8 = 1;
const VALUE_TYPE_UINT: u8 = 2;

/// A decoded global-state value. The on-chain representation is a closed
/// two-way tag; anything else is a decode error rather than a silent
/// misinterpretation.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum StateValue {
    Address(Address),
    Uint(u64),
}

impl StateValue {
    pub fn as_address(&self) -> Option<&Address> {
        match self {
            StateValue::Address(address) => Some(address),
            StateValue::Uint(_) => None,
        }
    }

    pub fn as_uint(&self) -> Option<u64> {
        match self {
            StateValue::Uint(value) => Some(*value),
            StateValue::Address(_) => None,
        }
    }
}

/// Decodes one application's global key-value state. Keys arrive as
/// base64-encoded text; byte values must be 32-byte addresses.
pub fn decode_global_state(
    entries: &[StateEntry],
) -> Result<HashMap<String, StateValue>, OtcError> {
    let mut state = HashMap::new();
    for entry in entries {
        let key_bytes = BASE64.decode(&entry.key)?;
        let key = String::from_utf8(key_bytes).map_err(|error| {
            OtcError::StateDecode(format!("State key is not valid UTF-8 - {}", error))
        })?;

        let value = match entry.value.value_type {
            VALUE_TYPE_BYTES => {
                let bytes = BASE64.decode(&entry.value.bytes)?;
                let address = Address::from_raw_bytes(&bytes).map_err(|error| {
                    OtcError::StateDecode(format!(
                        "State key {} holds malformed address bytes - {}",
                        key, error
                    ))
                })?;
                StateValue::Address(address)
            }
            VALUE_TYPE_UINT => StateValue::Uint(entry.value.uint),
            other => {
                return Err(OtcError::StateDecode(format!(
                    "State key {} carries unknown value type tag {}",
                    key, other
                )))
            }
        };
        state.insert(key, value);
    }
    Ok(state)
}
