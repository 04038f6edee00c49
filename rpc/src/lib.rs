// Copyright (c) Mysten Labs, Inc.
// Copyright (c) Soma Contributors
// SPDX-License-Identifier: Apache-2.0

//! Soroban JSON-RPC binding used by the custody client.

pub mod api;
pub mod types;

pub use api::client::Client;
pub use api::error::{Result, RpcError};
pub use api::LedgerRpc;
