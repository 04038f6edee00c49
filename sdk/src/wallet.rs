// Copyright (c) Mysten Labs, Inc.
// Copyright (c) Soma Contributors
// SPDX-License-Identifier: Apache-2.0

//! Boundary to the external signer.
//!
//! The custody client never holds keys. It hands the assembled transaction to a
//! [`WalletCapability`] and relays whatever comes back.

use std::fmt::{self, Display, Formatter};

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use strum_macros::IntoStaticStr;

use crate::types::LedgerAddress;

/// Network a transaction is bound to, as handed to the signer.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct NetworkTarget {
    /// Short network name understood by wallets, e.g. `TESTNET`.
    pub name: String,
    pub passphrase: String,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, IntoStaticStr)]
pub enum SignerErrorKind {
    /// The user refused the request.
    Declined,
    /// No signer is installed, running or reachable.
    Unavailable,
    Other,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct SignerError {
    pub kind: SignerErrorKind,
    pub message: String,
}

impl SignerError {
    pub fn new(kind: SignerErrorKind, message: impl Into<String>) -> Self {
        Self { kind, message: message.into() }
    }

    /// Build an error from an unstructured signer message.
    pub fn from_message(message: impl Into<String>) -> Self {
        let message = message.into();
        Self::new(classify_signer_message(&message), message)
    }

    pub fn is_declined(&self) -> bool {
        self.kind == SignerErrorKind::Declined
    }
}

impl Display for SignerError {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        match self.kind {
            SignerErrorKind::Declined => write!(
                f,
                "signing was declined ({}); approve the request in your wallet and try again",
                self.message
            ),
            SignerErrorKind::Unavailable => write!(
                f,
                "no signer available ({}); install or start your wallet signer and try again",
                self.message
            ),
            SignerErrorKind::Other => f.write_str(&self.message),
        }
    }
}

impl std::error::Error for SignerError {}

/// Classify a free-form signer message.
///
/// Only for adapters that cannot report a structured [`SignerErrorKind`]. Matching is
/// case-insensitive:
/// - "declined", "rejected", "denied", "cancel" => [`SignerErrorKind::Declined`]
/// - "not installed", "not found", "not running", "not connected", "unavailable",
///   "no such file" => [`SignerErrorKind::Unavailable`]
/// - anything else => [`SignerErrorKind::Other`]
pub fn classify_signer_message(message: &str) -> SignerErrorKind {
    const DECLINED: [&str; 4] = ["declined", "rejected", "denied", "cancel"];
    const UNAVAILABLE: [&str; 6] = [
        "not installed",
        "not found",
        "not running",
        "not connected",
        "unavailable",
        "no such file",
    ];

    let message = message.to_ascii_lowercase();
    if DECLINED.iter().any(|needle| message.contains(needle)) {
        SignerErrorKind::Declined
    } else if UNAVAILABLE.iter().any(|needle| message.contains(needle)) {
        SignerErrorKind::Unavailable
    } else {
        SignerErrorKind::Other
    }
}

/// Wallet as seen by the custody client: connection probe, account access, signing.
///
/// `sign_transaction` may wait on a human for an unbounded time.
#[async_trait]
pub trait WalletCapability: Send + Sync {
    async fn is_connected(&self) -> bool;

    /// Address the wallet will sign with.
    async fn request_access(&self) -> Result<LedgerAddress, SignerError>;

    /// Sign a base64 transaction envelope, returning the signed base64 envelope.
    async fn sign_transaction(
        &self,
        transaction_xdr: &str,
        network: &NetworkTarget,
    ) -> Result<String, SignerError>;
}
