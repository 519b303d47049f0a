use sha2::{Digest, Sha512_256};

use crate::common::error::OtcError;
use crate::txn::transaction::Transaction;

pub type GroupId = [u8; 32];

/// Network-imposed ceiling on atomic group membership.
pub const MAX_GROUP_SIZE: usize = 16;

const GROUP_DOMAIN_PREFIX: &[u8] = b"TG";

/// Computes one group identifier over the ordered member list and stamps it
/// onto every member. Group fields must be clear going in; the id is
/// order-sensitive, so reordering members yields a different group.
pub fn assign_group_id(txns: &mut [Transaction]) -> Result<GroupId, OtcError> {
    if txns.is_empty() {
        return Err(OtcError::Simple(
            "Cannot group an empty transaction list".to_string(),
        ));
    }
    if txns.len() > MAX_GROUP_SIZE {
        return Err(OtcError::Simple(format!(
            "Transaction group of {} exceeds the network maximum of {}",
            txns.len(),
            MAX_GROUP_SIZE
        )));
    }
    for txn in txns.iter() {
        if txn.header.group.is_some() {
            return Err(OtcError::Simple(
                "Transaction already belongs to a group".to_string(),
            ));
        }
    }

    let mut hasher = Sha512_256::new();
    hasher.update(GROUP_DOMAIN_PREFIX);
    for txn in txns.iter() {
        let encoded = serde_json::to_vec(txn)?;
        hasher.update((encoded.len() as u64).to_be_bytes());
        hasher.update(&encoded);
    }
    let digest = hasher.finalize();
    let mut group_id: GroupId = [0u8; 32];
    group_id.copy_from_slice(&digest);

    for txn in txns.iter_mut() {
        txn.header.group = Some(group_id);
    }
    Ok(group_id)
}
