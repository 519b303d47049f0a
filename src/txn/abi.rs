use sha2::{Digest, Sha512_256};

/// ABI signature of the escrow contract's create method.
pub const CREATE_METHOD_SIGNATURE: &str =
    "create(asset,uint64,asset,uint64,uint64,address)void";

/// The accept and reclaim methods are invoked by bare method name, matching
/// the contract's dispatch for those calls.
pub const ACCEPT_METHOD_ARG: &[u8] = b"accept_offer";
pub const RECLAIM_METHOD_ARG: &[u8] = b"reclaim_assets";

/// First 4 bytes of the SHA-512/256 digest of the method signature.
pub fn method_selector(signature: &str) -> [u8; 4] {
    let digest = Sha512_256::digest(signature.as_bytes());
    let mut selector = [0u8; 4];
    selector.copy_from_slice(&digest[..4]);
    selector
}

pub fn encode_uint64(value: u64) -> Vec<u8> {
    value.to_be_bytes().to_vec()
}
