mod maker;

pub use maker::{build_create_group, build_reclaim_txn, Maker};
