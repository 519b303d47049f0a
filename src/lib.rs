pub mod common;
pub mod discovery;
pub mod indexer;
pub mod maker;
pub mod manager;
pub mod node;
pub mod offer;
pub mod taker;
pub mod testing;
pub mod txn;
pub mod wallet;
