pub mod logger;
pub mod stub_network;
