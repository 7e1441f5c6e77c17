//! Boundary to the node backend invoked by validated console commands.
//!
//! Each [`Command`](crate::console::Command) maps to exactly one method. The
//! calls run to completion on the listener thread; any richer failure
//! reporting is the backend's own concern.

use tracing::info;

use crate::console::{SessionId, Transfer};

const BACKEND_TARGET: &str = concat!(env!("CARGO_PKG_NAME"), "::backend");

/// Operations performed on behalf of the operator.
#[cfg_attr(test, mockall::automock)]
pub trait Backend: Send {
    /// Creates a ledger and sends the genesis reward to `address`.
    fn create_blockchain(&self, address: &str, session: &SessionId);

    /// Computes and reports the balance of `address`.
    fn get_balance(&self, address: &str, session: &SessionId);

    /// Submits a value transfer.
    fn send(&self, transfer: &Transfer, session: &SessionId);

    /// Generates a wallet key pair.
    fn create_wallet(&self, session: &SessionId);

    /// Lists wallet addresses.
    fn list_addresses(&self, session: &SessionId);

    /// Prints the chain.
    fn print_chain(&self, session: &SessionId);

    /// Rebuilds the unspent output index.
    fn reindex_utxo(&self, session: &SessionId);
}

/// Backend that records each invocation as a structured log event.
///
/// Used when the binary runs without an attached node implementation.
#[derive(Debug, Default, Clone, Copy)]
pub struct TracingBackend;

impl Backend for TracingBackend {
    fn create_blockchain(&self, address: &str, session: &SessionId) {
        info!(target: BACKEND_TARGET, operation = "create_blockchain", address, %session, "backend call");
    }

    fn get_balance(&self, address: &str, session: &SessionId) {
        info!(target: BACKEND_TARGET, operation = "get_balance", address, %session, "backend call");
    }

    fn send(&self, transfer: &Transfer, session: &SessionId) {
        info!(
            target: BACKEND_TARGET,
            operation = "send",
            from = %transfer.from,
            to = %transfer.to,
            amount = transfer.amount,
            mine = transfer.mine,
            %session,
            "backend call"
        );
    }

    fn create_wallet(&self, session: &SessionId) {
        info!(target: BACKEND_TARGET, operation = "create_wallet", %session, "backend call");
    }

    fn list_addresses(&self, session: &SessionId) {
        info!(target: BACKEND_TARGET, operation = "list_addresses", %session, "backend call");
    }

    fn print_chain(&self, session: &SessionId) {
        info!(target: BACKEND_TARGET, operation = "print_chain", %session, "backend call");
    }

    fn reindex_utxo(&self, session: &SessionId) {
        info!(target: BACKEND_TARGET, operation = "reindex_utxo", %session, "backend call");
    }
}
