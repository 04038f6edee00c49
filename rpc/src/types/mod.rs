// Copyright (c) Mysten Labs, Inc.
// Copyright (c) Soma Contributors
// SPDX-License-Identifier: Apache-2.0

mod account;
mod simulation;
mod transaction;

pub use account::{
    account_strkey, AccountState, LedgerEntriesResponse, LedgerEntryResult, NetworkInfo,
};
pub use simulation::{
    RawSimulateHostFunctionResult, RawSimulateTransactionResponse, SimulateHostFunctionResult,
    SimulateTransactionResponse,
};
pub use transaction::{SendTransactionResponse, SendTransactionStatus};
