// Copyright (c) Mysten Labs, Inc.
// Copyright (c) Soma Contributors
// SPDX-License-Identifier: Apache-2.0

#![allow(dead_code)]

pub mod fake_ledger;
pub mod scripted_wallet;

use std::sync::Arc;

use custody_sdk::wallet::NetworkTarget;
use custody_sdk::{CustodyClient, CustodySettings, LedgerAddress, TESTNET_PASSPHRASE};

pub use fake_ledger::FakeLedger;
pub use scripted_wallet::ScriptedWallet;

pub const LENDER: &str = "GAAQCAIBAEAQCAIBAEAQCAIBAEAQCAIBAEAQCAIBAEAQCAIBAEAQDZ7H";
pub const BORROWER: &str = "GABAEAQCAIBAEAQCAIBAEAQCAIBAEAQCAIBAEAQCAIBAEAQCAIBAEJXA";
pub const STRANGER: &str = "GABQGAYDAMBQGAYDAMBQGAYDAMBQGAYDAMBQGAYDAMBQGAYDAMBQHGPC";
pub const CONTRACT: &str = "CADQOBYHA4DQOBYHA4DQOBYHA4DQOBYHA4DQOBYHA4DQOBYHA4DQP5KR";

pub fn testnet() -> NetworkTarget {
    NetworkTarget { name: "TESTNET".to_string(), passphrase: TESTNET_PASSPHRASE.to_string() }
}

pub fn client(ledger: &Arc<FakeLedger>, wallet: &Arc<ScriptedWallet>) -> CustodyClient {
    let contract: LedgerAddress = CONTRACT.parse().unwrap();
    CustodyClient::new(ledger.clone(), wallet.clone(), CustodySettings::new(contract, testnet()))
        .unwrap()
}
