// Copyright (c) Mysten Labs, Inc.
// Copyright (c) Soma Contributors
// SPDX-License-Identifier: Apache-2.0

//! Client for recording item custody on a Soroban contract.
//!
//! A write goes through [`CustodyClient`]: the signer's account is resolved, a single
//! contract invocation is built and simulated, the simulation is merged back into the
//! transaction, the wallet signs it and the signed envelope is submitted. Reads stop
//! after simulation and decode the returned custodian.

pub mod assembler;
pub mod client_config;
pub mod custody_client;
pub mod error;
pub mod external_wallet;
pub mod simulation;
pub mod submitter;
pub mod transaction_builder;
pub mod types;
pub mod wallet;

pub use custody_client::{CustodyClient, CustodySettings};
pub use error::{CustodyResult, Error, Stage};
pub use types::{ItemName, LedgerAddress, TransactionHash};
pub use wallet::{NetworkTarget, SignerError, SignerErrorKind, WalletCapability};

pub const TESTNET_RPC_URL: &str = "https://soroban-testnet.stellar.org";
pub const FUTURENET_RPC_URL: &str = "https://rpc-futurenet.stellar.org";
pub const LOCAL_RPC_URL: &str = "http://localhost:8000/soroban/rpc";

pub const TESTNET_PASSPHRASE: &str = "Test SDF Network ; September 2015";
pub const FUTURENET_PASSPHRASE: &str = "Test SDF Future Network ; October 2022";
pub const STANDALONE_PASSPHRASE: &str = "Standalone Network ; February 2017";

/// Custody contract deployed on testnet.
pub const DEFAULT_CONTRACT_ID: &str = "CCU4KAUC6AFHKLQ7BP2HPW4VSXHEJVVQIXTE3IEH7J2JOPQPM2CGECQM";

pub const TESTNET_EXPLORER_URL: &str = "https://stellar.expert/explorer/testnet";
