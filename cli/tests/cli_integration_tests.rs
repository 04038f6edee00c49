// Copyright (c) Mysten Labs, Inc.
// Copyright (c) Soma Contributors
// SPDX-License-Identifier: Apache-2.0

//! Library-level tests for CLI responses. No network needed.

use custody_cli::response::{
    CustodianOutput, CustodyAction, CustodyCommandResponse, TransactionOutput,
};
use custody_sdk::{LedgerAddress, TransactionHash};

const LENDER: &str = "GAAQCAIBAEAQCAIBAEAQCAIBAEAQCAIBAEAQCAIBAEAQCAIBAEAQDZ7H";
const BORROWER: &str = "GABAEAQCAIBAEAQCAIBAEAQCAIBAEAQCAIBAEAQCAIBAEAQCAIBAEJXA";

fn lent() -> TransactionOutput {
    TransactionOutput {
        action: CustodyAction::Lend,
        item: "laptop".to_string(),
        lender: LENDER.parse().unwrap(),
        borrower: Some(BORROWER.parse().unwrap()),
        hash: TransactionHash::new("abc123"),
        explorer_url: Some("https://stellar.expert/explorer/testnet/tx/abc123".to_string()),
    }
}

#[test]
fn test_lend_summary_abbreviates_borrower() {
    assert_eq!(lent().summary(), "I lent laptop to GABAEA...EJXA.");
}

#[test]
fn test_lend_display_has_hash_and_link() {
    let display = format!("{}", CustodyCommandResponse::Transaction(lent()));
    assert!(display.contains("I lent laptop to GABAEA...EJXA."), "{display}");
    assert!(display.contains("abc123"), "{display}");
    assert!(display.contains("https://stellar.expert/explorer/testnet/tx/abc123"), "{display}");
}

#[test]
fn test_take_back_summary() {
    let output = TransactionOutput {
        action: CustodyAction::TakeBack,
        borrower: None,
        explorer_url: None,
        ..lent()
    };
    assert_eq!(output.summary(), "I took back laptop.");
    assert!(!format!("{output}").contains("Explorer"));
}

#[test]
fn test_transaction_json() {
    let json = serde_json::to_value(CustodyCommandResponse::Transaction(lent())).unwrap();
    assert_eq!(json["action"], "lend");
    assert_eq!(json["hash"], "abc123");
    assert_eq!(json["borrower"], BORROWER);
    assert_eq!(json["lender"], LENDER);
}

#[test]
fn test_custodian_display() {
    let borrower: LedgerAddress = BORROWER.parse().unwrap();
    let with = CustodianOutput { item: "drill".into(), custodian: Some(borrower) };
    assert!(format!("{with}").contains(BORROWER));

    let without = CustodianOutput { item: "nonexistent".into(), custodian: None };
    assert!(format!("{without}").contains("not lent to anyone"));

    let json = serde_json::to_value(CustodyCommandResponse::Custodian(without)).unwrap();
    assert!(json["custodian"].is_null());
}
