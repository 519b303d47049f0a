mod taker;

pub use taker::{build_accept_group, Taker};
