// Copyright (c) Mysten Labs, Inc.
// Copyright (c) Soma Contributors
// SPDX-License-Identifier: Apache-2.0

use serde::{Deserialize, Serialize};
use stellar_xdr::curr::{AccountId, PublicKey, Uint256};

/// Sequence snapshot of a ledger account, the input every envelope is built from.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct AccountState {
    pub account_id: AccountId,
    pub sequence: i64,
}

impl AccountState {
    pub fn new(account_id: AccountId, sequence: i64) -> Self {
        Self { account_id, sequence }
    }

    /// Sequence number the next transaction from this account must carry.
    pub fn next_sequence(&self) -> i64 {
        self.sequence.saturating_add(1)
    }
}

/// Result of `getNetwork`.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NetworkInfo {
    pub passphrase: String,
    #[serde(default)]
    pub protocol_version: u32,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub friendbot_url: Option<String>,
}

/// Result of `getLedgerEntries`.
#[derive(Clone, Debug, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LedgerEntriesResponse {
    #[serde(default)]
    pub entries: Option<Vec<LedgerEntryResult>>,
    #[serde(default)]
    pub latest_ledger: u32,
}

#[derive(Clone, Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LedgerEntryResult {
    pub key: String,
    /// Base64 `LedgerEntryData`.
    pub xdr: String,
    #[serde(default)]
    pub last_modified_ledger_seq: u32,
}

/// `G...` strkey rendering of an account id.
pub fn account_strkey(account_id: &AccountId) -> String {
    let PublicKey::PublicKeyTypeEd25519(Uint256(bytes)) = &account_id.0;
    stellar_strkey::ed25519::PublicKey(*bytes).to_string()
}
