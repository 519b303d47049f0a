mod abi;
mod group;
mod transaction;

pub use abi::{encode_uint64, method_selector, ACCEPT_METHOD_ARG, CREATE_METHOD_SIGNATURE,
    RECLAIM_METHOD_ARG};
pub use group::{assign_group_id, GroupId, MAX_GROUP_SIZE};
pub use transaction::{SuggestedParams, Transaction, TxnBody, TxnHeader};
