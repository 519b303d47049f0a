mod client;

pub use client::NodeClient;
