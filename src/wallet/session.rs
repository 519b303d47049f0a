use std::sync::Arc;

use tokio::{
    select,
    sync::{mpsc, oneshot},
};
use tracing::{debug, info};

use crate::common::error::OtcError;
use crate::common::types::Address;
use crate::txn::Transaction;
use crate::wallet::transport::WalletTransport;

#[derive(Clone)]
pub struct WalletSessionAccess {
    tx: mpsc::Sender<WalletSessionRequest>,
}

impl WalletSessionAccess {
    pub(super) fn new(tx: mpsc::Sender<WalletSessionRequest>) -> Self {
        Self { tx }
    }

    pub async fn connect(&self) -> Result<Address, OtcError> {
        let (rsp_tx, rsp_rx) = oneshot::channel::<Result<Address, OtcError>>();
        let request = WalletSessionRequest::Connect { rsp_tx };
        self.tx.send(request).await.unwrap();
        rsp_rx.await.unwrap()
    }

    /// Silent session restore. Absence of a prior session, or any transport
    /// failure, is reported as `None` - never as a visible error.
    pub async fn reconnect(&self) -> Option<Address> {
        let (rsp_tx, rsp_rx) = oneshot::channel::<Option<Address>>();
        let request = WalletSessionRequest::Reconnect { rsp_tx };
        self.tx.send(request).await.unwrap();
        rsp_rx.await.unwrap()
    }

    pub async fn disconnect(&self) -> Result<(), OtcError> {
        let (rsp_tx, rsp_rx) = oneshot::channel::<Result<(), OtcError>>();
        let request = WalletSessionRequest::Disconnect { rsp_tx };
        self.tx.send(request).await.unwrap();
        rsp_rx.await.unwrap()
    }

    pub async fn connected_account(&self) -> Option<Address> {
        let (rsp_tx, rsp_rx) = oneshot::channel::<Option<Address>>();
        let request = WalletSessionRequest::ConnectedAccount { rsp_tx };
        self.tx.send(request).await.unwrap();
        rsp_rx.await.unwrap()
    }

    pub async fn sign_transaction_groups(
        &self,
        groups: Vec<Vec<Transaction>>,
    ) -> Result<Vec<Vec<u8>>, OtcError> {
        let (rsp_tx, rsp_rx) = oneshot::channel::<Result<Vec<Vec<u8>>, OtcError>>();
        let request = WalletSessionRequest::SignGroups { groups, rsp_tx };
        self.tx.send(request).await.unwrap();
        rsp_rx.await.unwrap()
    }

    pub async fn shutdown(&self) -> Result<(), OtcError> {
        let (rsp_tx, rsp_rx) = oneshot::channel::<()>();
        let request = WalletSessionRequest::Shutdown { rsp_tx };
        self.tx.send(request).await?; // Shutdown is allowed to fail if already shutdown
        rsp_rx.await.map_err(|e| OtcError::Simple(e.to_string()))
    }
}

/// Single shared handle to the signing-device session. Owns the connected
/// account; everything downstream receives the account explicitly from here.
pub struct WalletSession {
    tx: mpsc::Sender<WalletSessionRequest>,
    pub task_handle: tokio::task::JoinHandle<()>,
}

impl WalletSession {
    const SESSION_REQUEST_CHANNEL_SIZE: usize = 10;

    pub fn new(transport: Arc<dyn WalletTransport>) -> Self {
        let (tx, rx) =
            mpsc::channel::<WalletSessionRequest>(Self::SESSION_REQUEST_CHANNEL_SIZE);
        let actor = WalletSessionActor::new(rx, transport);
        let task_handle = tokio::spawn(async move { actor.run().await });
        Self { tx, task_handle }
    }

    pub fn new_accessor(&self) -> WalletSessionAccess {
        WalletSessionAccess::new(self.tx.clone())
    }
}

pub(super) enum WalletSessionRequest {
    Connect {
        rsp_tx: oneshot::Sender<Result<Address, OtcError>>,
    },
    Reconnect {
        rsp_tx: oneshot::Sender<Option<Address>>,
    },
    Disconnect {
        rsp_tx: oneshot::Sender<Result<(), OtcError>>,
    },
    ConnectedAccount {
        rsp_tx: oneshot::Sender<Option<Address>>,
    },
    SignGroups {
        groups: Vec<Vec<Transaction>>,
        rsp_tx: oneshot::Sender<Result<Vec<Vec<u8>>, OtcError>>,
    },
    Shutdown {
        rsp_tx: oneshot::Sender<()>,
    },
}

struct WalletSessionActor {
    rx: mpsc::Receiver<WalletSessionRequest>,
    transport: Arc<dyn WalletTransport>,
    account: Option<Address>,
}

impl WalletSessionActor {
    const DISCONNECT_CHANNEL_SIZE: usize = 1;

    fn new(rx: mpsc::Receiver<WalletSessionRequest>, transport: Arc<dyn WalletTransport>) -> Self {
        WalletSessionActor {
            rx,
            transport,
            account: None,
        }
    }

    async fn run(mut self) {
        // Disconnect notification lifecycle is scoped to this event loop -
        // subscribed once here, unsubscribed on exit, so handlers never
        // accumulate across reconnect cycles.
        let (disconnect_tx, mut disconnect_rx) =
            mpsc::channel::<()>(Self::DISCONNECT_CHANNEL_SIZE);
        self.transport.subscribe_disconnect(disconnect_tx);

        loop {
            select! {
                request = self.rx.recv() => {
                    match request {
                        Some(request) => {
                            if self.handle_request(request).await {
                                break;
                            }
                        }
                        // All accessors dropped - the session is over
                        None => break,
                    }
                },
                Some(()) = disconnect_rx.recv() => {
                    info!("Wallet transport reported disconnect, clearing session account");
                    self.account = None;
                },
            }
        }

        self.transport.unsubscribe_disconnect();
        info!("Wallet session terminating");
    }

    async fn handle_request(&mut self, request: WalletSessionRequest) -> bool {
        let mut terminate = false;

        match request {
            WalletSessionRequest::Connect { rsp_tx } => {
                let result = self.connect().await;
                rsp_tx.send(result).unwrap(); // oneshot should never fail
            }
            WalletSessionRequest::Reconnect { rsp_tx } => {
                let account = self.reconnect().await;
                rsp_tx.send(account).unwrap(); // oneshot should never fail
            }
            WalletSessionRequest::Disconnect { rsp_tx } => {
                let result = self.disconnect().await;
                rsp_tx.send(result).unwrap(); // oneshot should never fail
            }
            WalletSessionRequest::ConnectedAccount { rsp_tx } => {
                rsp_tx.send(self.account).unwrap(); // oneshot should never fail
            }
            WalletSessionRequest::SignGroups { groups, rsp_tx } => {
                let result = self.sign_groups(groups).await;
                rsp_tx.send(result).unwrap(); // oneshot should never fail
            }
            WalletSessionRequest::Shutdown { rsp_tx } => {
                rsp_tx.send(()).unwrap(); // oneshot should never fail
                terminate = true;
            }
        }
        terminate
    }

    async fn connect(&mut self) -> Result<Address, OtcError> {
        let accounts = self.transport.connect().await?;
        let Some(account) = accounts.first().copied() else {
            return Err(OtcError::Simple(
                "Wallet connected but returned no accounts".to_string(),
            ));
        };
        self.account = Some(account);
        info!("Wallet session connected w/ account {}", account);
        Ok(account)
    }

    async fn reconnect(&mut self) -> Option<Address> {
        match self.transport.reconnect().await {
            Ok(accounts) => {
                let account = accounts.first().copied();
                if let Some(account) = account {
                    info!("Wallet session restored w/ account {}", account);
                    self.account = Some(account);
                }
                account
            }
            Err(error) => {
                debug!("Wallet session restore skipped - {}", error);
                None
            }
        }
    }

    async fn disconnect(&mut self) -> Result<(), OtcError> {
        // Local account state clears regardless of transport teardown outcome
        self.account = None;
        self.transport.disconnect().await?;
        Ok(())
    }

    async fn sign_groups(
        &mut self,
        groups: Vec<Vec<Transaction>>,
    ) -> Result<Vec<Vec<u8>>, OtcError> {
        if self.account.is_none() {
            return Err(OtcError::Simple(
                "No connected account to sign with".to_string(),
            ));
        }
        let signed = self.transport.sign_transaction_groups(groups).await?;
        Ok(signed)
    }
}
