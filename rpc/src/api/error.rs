// Copyright (c) Mysten Labs, Inc.
// Copyright (c) Soma Contributors
// SPDX-License-Identifier: Apache-2.0

use strum_macros::IntoStaticStr;
use thiserror::Error;

pub type Result<T, E = RpcError> = std::result::Result<T, E>;

/// An error encountered while talking to a Soroban RPC endpoint.
#[derive(Debug, Error, IntoStaticStr)]
pub enum RpcError {
    #[error("Invalid RPC endpoint {url}: {reason}")]
    InvalidEndpoint { url: String, reason: String },
    #[error("Transport error: {0}")]
    Transport(#[from] reqwest::Error),
    #[error("RPC endpoint returned HTTP {status}: {body}")]
    HttpStatus { status: u16, body: String },
    #[error("RPC error {code}: {message}")]
    Server { code: i64, message: String },
    #[error("Malformed RPC response: {0}")]
    MalformedResponse(String),
    #[error("XDR error: {0}")]
    Xdr(#[from] stellar_xdr::curr::Error),
    #[error("Account {0} not found")]
    AccountNotFound(String),
}

impl RpcError {
    pub fn malformed(message: impl Into<String>) -> Self {
        Self::MalformedResponse(message.into())
    }

    /// True when the failure happened before the endpoint produced an answer.
    pub fn is_unreachable(&self) -> bool {
        matches!(self, Self::Transport(e) if e.is_connect() || e.is_timeout())
    }
}
