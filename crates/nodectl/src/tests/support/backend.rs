//! Backend double that records each call as a short description.

use std::sync::{Arc, Mutex};

use crate::backend::Backend;
use crate::console::{SessionId, Transfer};

/// Shares its call log across clones.
#[derive(Debug, Clone, Default)]
pub struct RecordingBackend {
    calls: Arc<Mutex<Vec<String>>>,
}

impl RecordingBackend {
    /// Calls recorded so far, oldest first.
    #[must_use]
    pub fn calls(&self) -> Vec<String> {
        self.calls.lock().expect("backend mutex poisoned").clone()
    }

    fn record(&self, call: String) {
        self.calls.lock().expect("backend mutex poisoned").push(call);
    }
}

impl Backend for RecordingBackend {
    fn create_blockchain(&self, address: &str, session: &SessionId) {
        self.record(format!("createblockchain {address} @{session}"));
    }

    fn get_balance(&self, address: &str, session: &SessionId) {
        self.record(format!("getbalance {address} @{session}"));
    }

    fn send(&self, transfer: &Transfer, session: &SessionId) {
        self.record(format!(
            "send {}->{} {} mine={} @{session}",
            transfer.from, transfer.to, transfer.amount, transfer.mine
        ));
    }

    fn create_wallet(&self, session: &SessionId) {
        self.record(format!("createwallet @{session}"));
    }

    fn list_addresses(&self, session: &SessionId) {
        self.record(format!("listaddresses @{session}"));
    }

    fn print_chain(&self, session: &SessionId) {
        self.record(format!("printchain @{session}"));
    }

    fn reindex_utxo(&self, session: &SessionId) {
        self.record(format!("reindexutxo @{session}"));
    }
}
