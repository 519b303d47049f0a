mod client;
mod state;

pub use client::{ApplicationInfo, ApplicationParams, IndexerClient, StateEntry, StateEntryValue};
pub use state::{decode_global_state, StateValue};
