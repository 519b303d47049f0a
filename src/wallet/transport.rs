use std::{error::Error, fmt};

use async_trait::async_trait;
use tokio::sync::mpsc;

use crate::common::error::OtcError;
use crate::common::types::Address;
use crate::txn::Transaction;

/// Failures of the underlying pairing/signing transport. The user closing the
/// pairing UI is deliberately its own case - callers treat it as a neutral
/// outcome rather than an error to surface.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum WalletTransportError {
    ModalClosed,
    Rejected(String),
    Transport(String),
}

impl Error for WalletTransportError {}

impl fmt::Display for WalletTransportError {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            WalletTransportError::ModalClosed => write!(f, "Pairing UI closed by user"),
            WalletTransportError::Rejected(msg) => write!(f, "Rejected by wallet - {}", msg),
            WalletTransportError::Transport(msg) => write!(f, "Transport failure - {}", msg),
        }
    }
}

impl From<WalletTransportError> for OtcError {
    fn from(e: WalletTransportError) -> OtcError {
        match e {
            WalletTransportError::ModalClosed => OtcError::ModalClosed,
            WalletTransportError::Rejected(msg) => OtcError::WalletRejected(msg),
            WalletTransportError::Transport(msg) => OtcError::WalletTransport(msg),
        }
    }
}

/// Seam to the external signing device. Implementations wrap a concrete
/// pairing/session protocol; the crate ships a scriptable in-memory one under
/// `testing`.
#[async_trait]
pub trait WalletTransport: Send + Sync + 'static {
    /// Opens the pairing flow and resolves with the connected account list.
    /// Fails with `ModalClosed` when the user dismisses the pairing UI.
    async fn connect(&self) -> Result<Vec<Address>, WalletTransportError>;

    /// Restores a previous session if one exists. An empty account list means
    /// there was nothing to restore; that is not an error.
    async fn reconnect(&self) -> Result<Vec<Address>, WalletTransportError>;

    async fn disconnect(&self) -> Result<(), WalletTransportError>;

    /// Signs one or more atomic groups and returns the signed byte blobs in
    /// the same order the transactions were presented.
    async fn sign_transaction_groups(
        &self,
        groups: Vec<Vec<Transaction>>,
    ) -> Result<Vec<Vec<u8>>, WalletTransportError>;

    /// Registers the channel the transport's out-of-band disconnect event is
    /// delivered on. One subscriber at a time; re-registering replaces the
    /// previous channel.
    fn subscribe_disconnect(&self, tx: mpsc::Sender<()>);

    fn unsubscribe_disconnect(&self);
}
