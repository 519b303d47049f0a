use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use tokio::sync::{mpsc, Semaphore};

use crate::common::types::Address;
use crate::txn::Transaction;
use crate::wallet::{WalletTransport, WalletTransportError};

enum ConnectScript {
    Approve,
    ModalClosed,
    Fail(String),
}

enum SignScript {
    Approve,
    Reject(String),
}

/// Scriptable in-memory wallet transport. Stands in for a real
/// pairing/signing device in unit and integration tests; records every
/// signing request so tests can assert on the groups presented.
pub struct SomeTestWallet {
    accounts: Vec<Address>,
    connect_script: ConnectScript,
    sign_script: SignScript,
    sign_gate: Option<Semaphore>,
    has_session: AtomicBool,
    disconnect_tx: Mutex<Option<mpsc::Sender<()>>>,
    sign_calls: Mutex<Vec<Vec<Vec<Transaction>>>>,
}

impl SomeTestWallet {
    pub fn approving(account: Address) -> Arc<Self> {
        Arc::new(SomeTestWallet {
            accounts: vec![account],
            connect_script: ConnectScript::Approve,
            sign_script: SignScript::Approve,
            sign_gate: None,
            has_session: AtomicBool::new(false),
            disconnect_tx: Mutex::new(None),
            sign_calls: Mutex::new(Vec::new()),
        })
    }

    /// Approving wallet whose signing requests park until the test releases
    /// them, holding a flow open mid-signature.
    pub fn parking(account: Address) -> Arc<Self> {
        Arc::new(SomeTestWallet {
            accounts: vec![account],
            connect_script: ConnectScript::Approve,
            sign_script: SignScript::Approve,
            sign_gate: Some(Semaphore::new(0)),
            has_session: AtomicBool::new(false),
            disconnect_tx: Mutex::new(None),
            sign_calls: Mutex::new(Vec::new()),
        })
    }

    pub fn modal_closing() -> Arc<Self> {
        Arc::new(SomeTestWallet {
            accounts: Vec::new(),
            connect_script: ConnectScript::ModalClosed,
            sign_script: SignScript::Approve,
            sign_gate: None,
            has_session: AtomicBool::new(false),
            disconnect_tx: Mutex::new(None),
            sign_calls: Mutex::new(Vec::new()),
        })
    }

    pub fn failing_connect(message: impl Into<String>) -> Arc<Self> {
        Arc::new(SomeTestWallet {
            accounts: Vec::new(),
            connect_script: ConnectScript::Fail(message.into()),
            sign_script: SignScript::Approve,
            sign_gate: None,
            has_session: AtomicBool::new(false),
            disconnect_tx: Mutex::new(None),
            sign_calls: Mutex::new(Vec::new()),
        })
    }

    pub fn rejecting_sign(account: Address, message: impl Into<String>) -> Arc<Self> {
        Arc::new(SomeTestWallet {
            accounts: vec![account],
            connect_script: ConnectScript::Approve,
            sign_script: SignScript::Reject(message.into()),
            sign_gate: None,
            has_session: AtomicBool::new(false),
            disconnect_tx: Mutex::new(None),
            sign_calls: Mutex::new(Vec::new()),
        })
    }

    /// Lets through `count` parked signing requests, in arrival order.
    pub fn release_signs(&self, count: usize) {
        if let Some(gate) = &self.sign_gate {
            gate.add_permits(count);
        }
    }

    /// Simulates the out-of-band disconnect event from the signing device.
    pub async fn trigger_remote_disconnect(&self) {
        let tx = self.disconnect_tx.lock().unwrap().clone();
        if let Some(tx) = tx {
            tx.send(()).await.unwrap();
        }
        self.has_session.store(false, Ordering::SeqCst);
    }

    pub fn has_disconnect_subscriber(&self) -> bool {
        self.disconnect_tx.lock().unwrap().is_some()
    }

    /// Every `sign_transaction_groups` invocation seen so far.
    pub fn sign_calls(&self) -> Vec<Vec<Vec<Transaction>>> {
        self.sign_calls.lock().unwrap().clone()
    }
}

#[async_trait]
impl WalletTransport for SomeTestWallet {
    async fn connect(&self) -> Result<Vec<Address>, WalletTransportError> {
        match &self.connect_script {
            ConnectScript::Approve => {
                self.has_session.store(true, Ordering::SeqCst);
                Ok(self.accounts.to_owned())
            }
            ConnectScript::ModalClosed => Err(WalletTransportError::ModalClosed),
            ConnectScript::Fail(message) => {
                Err(WalletTransportError::Transport(message.to_owned()))
            }
        }
    }

    async fn reconnect(&self) -> Result<Vec<Address>, WalletTransportError> {
        if self.has_session.load(Ordering::SeqCst) {
            Ok(self.accounts.to_owned())
        } else {
            Ok(Vec::new())
        }
    }

    async fn disconnect(&self) -> Result<(), WalletTransportError> {
        self.has_session.store(false, Ordering::SeqCst);
        Ok(())
    }

    async fn sign_transaction_groups(
        &self,
        groups: Vec<Vec<Transaction>>,
    ) -> Result<Vec<Vec<u8>>, WalletTransportError> {
        match &self.sign_script {
            SignScript::Approve => {
                self.sign_calls.lock().unwrap().push(groups.to_owned());
                if let Some(gate) = &self.sign_gate {
                    gate.acquire().await.unwrap().forget();
                }
                let mut signed: Vec<Vec<u8>> = Vec::new();
                for group in &groups {
                    for txn in group {
                        // Pretend-signature: the canonical encoding stands in
                        // for signed bytes, in matching order
                        signed.push(serde_json::to_vec(txn).unwrap());
                    }
                }
                Ok(signed)
            }
            SignScript::Reject(message) => {
                Err(WalletTransportError::Rejected(message.to_owned()))
            }
        }
    }

    fn subscribe_disconnect(&self, tx: mpsc::Sender<()>) {
        *self.disconnect_tx.lock().unwrap() = Some(tx);
    }

    fn unsubscribe_disconnect(&self) {
        *self.disconnect_tx.lock().unwrap() = None;
    }
}
