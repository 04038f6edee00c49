// Copyright (c) Mysten Labs, Inc.
// Copyright (c) Soma Contributors
// SPDX-License-Identifier: Apache-2.0

use async_trait::async_trait;
use stellar_xdr::curr::{AccountId, TransactionEnvelope};

use crate::types::{
    AccountState, NetworkInfo, SendTransactionResponse, SimulateTransactionResponse,
};

pub mod client;
pub mod error;

use error::Result;

/// The subset of the Soroban RPC surface the custody pipeline consumes.
///
/// [`client::Client`] is the HTTP binding; tests substitute in-memory doubles.
#[async_trait]
pub trait LedgerRpc: Send + Sync {
    /// Network passphrase and protocol version served by the endpoint.
    async fn get_network(&self) -> Result<NetworkInfo>;

    /// Current sequence state of an account.
    async fn get_account(&self, account_id: &AccountId) -> Result<AccountState>;

    /// Dry-run an envelope against current ledger state without committing it.
    async fn simulate_transaction(
        &self,
        envelope: &TransactionEnvelope,
    ) -> Result<SimulateTransactionResponse>;

    /// Relay a signed envelope. Returns as soon as the network has accepted or
    /// rejected it; does not wait for ledger inclusion.
    async fn send_transaction(
        &self,
        envelope: &TransactionEnvelope,
    ) -> Result<SendTransactionResponse>;
}
