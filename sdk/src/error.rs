// Copyright (c) Mysten Labs, Inc.
// Copyright (c) Soma Contributors
// SPDX-License-Identifier: Apache-2.0

pub use custody_rpc::RpcError;
use strum_macros::IntoStaticStr;
use thiserror::Error;

use crate::wallet::SignerError;

pub type CustodyResult<T = ()> = Result<T, Error>;

/// Pipeline stage an [`Error`] originated from.
#[derive(Clone, Copy, Debug, PartialEq, Eq, IntoStaticStr)]
#[strum(serialize_all = "snake_case")]
pub enum Stage {
    Startup,
    Encoding,
    Resolution,
    Simulation,
    Assembly,
    Signing,
    Submission,
}

impl std::fmt::Display for Stage {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let name: &'static str = self.into();
        f.write_str(name)
    }
}

/// An argument that cannot be represented as a contract value.
#[derive(Clone, Debug, Error, PartialEq, Eq, IntoStaticStr)]
pub enum EncodingError {
    #[error("{field} address is empty")]
    EmptyAddress { field: &'static str },
    #[error("{field} address {value:?} is not a valid strkey: {reason}")]
    InvalidAddress {
        field: &'static str,
        value: String,
        reason: String,
    },
    #[error("{field} must be an account (G...) address, got {value}")]
    NotAnAccount { field: &'static str, value: String },
    #[error("{field} must be a contract (C...) address, got {value}")]
    NotAContract { field: &'static str, value: String },
    #[error("item name is empty")]
    EmptyItem,
    #[error("item name {0:?} is longer than 32 characters")]
    ItemTooLong(String),
    #[error("item name {name:?} contains {ch:?}; only ASCII letters, digits and '_' are allowed")]
    InvalidItemChar { name: String, ch: char },
    #[error("XDR encoding failed: {0}")]
    Xdr(String),
}

impl From<stellar_xdr::curr::Error> for EncodingError {
    fn from(value: stellar_xdr::curr::Error) -> Self {
        Self::Xdr(value.to_string())
    }
}

#[derive(Debug, Error)]
pub enum Error {
    #[error("Encoding failed: {0}")]
    Encoding(#[from] EncodingError),
    #[error("Account resolution failed for {address}: {source}")]
    Resolution {
        address: String,
        #[source]
        source: RpcError,
    },
    #[error("Simulation failed: {message}")]
    Simulation {
        message: String,
        #[source]
        source: Option<RpcError>,
    },
    #[error("Assembly failed: {0}")]
    Assembly(String),
    #[error("Signing failed: {0}")]
    Signing(#[from] SignerError),
    #[error("Submission failed: {message}")]
    Submission {
        message: String,
        #[source]
        source: Option<RpcError>,
    },
    #[error("Invalid configuration: {0}")]
    Config(String),
    #[error("Error initializing RPC client: {0}")]
    ClientInitError(#[source] RpcError),
    #[error("Network check failed: {0}")]
    NetworkCheck(#[source] RpcError),
    #[error("Network mismatch: endpoint serves {actual:?}, configured {expected:?}")]
    NetworkMismatch { expected: String, actual: String },
}

impl Error {
    pub fn stage(&self) -> Stage {
        match self {
            Error::Encoding(_) => Stage::Encoding,
            Error::Resolution { .. } => Stage::Resolution,
            Error::Simulation { .. } => Stage::Simulation,
            Error::Assembly(_) => Stage::Assembly,
            Error::Signing(_) => Stage::Signing,
            Error::Submission { .. } => Stage::Submission,
            Error::Config(_)
            | Error::ClientInitError(_)
            | Error::NetworkCheck(_)
            | Error::NetworkMismatch { .. } => Stage::Startup,
        }
    }

    /// True when the RPC endpoint could not be reached at all.
    pub fn is_unreachable(&self) -> bool {
        let source = match self {
            Error::NetworkCheck(source) | Error::Resolution { source, .. } => Some(source),
            Error::Simulation { source, .. } | Error::Submission { source, .. } => source.as_ref(),
            _ => None,
        };
        source.is_some_and(RpcError::is_unreachable)
    }

    pub(crate) fn simulation(message: impl Into<String>) -> Self {
        Error::Simulation { message: message.into(), source: None }
    }

    pub(crate) fn submission(message: impl Into<String>) -> Self {
        Error::Submission { message: message.into(), source: None }
    }
}
