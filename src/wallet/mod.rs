mod session;
mod transport;

pub use session::{WalletSession, WalletSessionAccess};
pub use transport::{WalletTransport, WalletTransportError};
