// Copyright (c) Mysten Labs, Inc.
// Copyright (c) Soma Contributors
// SPDX-License-Identifier: Apache-2.0

use std::fmt::{self, Display, Formatter};

use serde::{Deserialize, Serialize};

/// Status reported by `sendTransaction` at submission time.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum SendTransactionStatus {
    Pending,
    Duplicate,
    TryAgainLater,
    Error,
}

impl SendTransactionStatus {
    /// Whether the network took the transaction for inclusion.
    pub fn is_accepted(self) -> bool {
        matches!(self, Self::Pending | Self::Duplicate)
    }
}

impl Display for SendTransactionStatus {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        let status = match self {
            Self::Pending => "PENDING",
            Self::Duplicate => "DUPLICATE",
            Self::TryAgainLater => "TRY_AGAIN_LATER",
            Self::Error => "ERROR",
        };
        f.write_str(status)
    }
}

/// Result of `sendTransaction`.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SendTransactionResponse {
    /// Hex transaction hash, the proof token for the submitted action.
    pub hash: String,
    pub status: SendTransactionStatus,
    #[serde(default)]
    pub latest_ledger: u32,
    /// Base64 `TransactionResult` when the status is `ERROR`.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error_result_xdr: Option<String>,
}
