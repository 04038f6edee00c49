// Copyright (c) Mysten Labs, Inc.
// Copyright (c) Soma Contributors
// SPDX-License-Identifier: Apache-2.0

use std::fmt::{self, Display, Formatter};
use std::path::PathBuf;

use colored::Colorize;
use custody_sdk::client_config::CustodyEnv;
use custody_sdk::{LedgerAddress, TransactionHash};
use serde::Serialize;

/// Response from custody command execution
#[derive(Debug, Serialize)]
#[serde(untagged)]
pub enum CustodyCommandResponse {
    Transaction(TransactionOutput),
    Custodian(CustodianOutput),
    Env(EnvOutput),
    Init(InitOutput),
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum CustodyAction {
    Lend,
    TakeBack,
}

/// A custody change accepted by the network
#[derive(Debug, Clone, Serialize)]
pub struct TransactionOutput {
    pub action: CustodyAction,
    pub item: String,
    pub lender: LedgerAddress,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub borrower: Option<LedgerAddress>,
    pub hash: TransactionHash,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub explorer_url: Option<String>,
}

#[derive(Debug, Clone, Serialize)]
pub struct CustodianOutput {
    pub item: String,
    pub custodian: Option<LedgerAddress>,
}

#[derive(Debug, Clone, Serialize)]
pub struct EnvOutput {
    pub config_path: PathBuf,
    pub env: CustodyEnv,
    pub active_address: Option<LedgerAddress>,
    pub signer: Option<String>,
}

#[derive(Debug, Clone, Serialize)]
pub struct InitOutput {
    pub config_path: PathBuf,
    pub active_env: String,
}

impl TransactionOutput {
    /// The sentence confirming what was recorded.
    pub fn summary(&self) -> String {
        match (self.action, &self.borrower) {
            (CustodyAction::Lend, Some(borrower)) => {
                format!("I lent {} to {}.", self.item, borrower.abbreviated())
            }
            (CustodyAction::Lend, None) => format!("I lent {}.", self.item),
            (CustodyAction::TakeBack, _) => format!("I took back {}.", self.item),
        }
    }
}

impl Display for TransactionOutput {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        writeln!(f, "{}", self.summary().green().bold())?;
        writeln!(f, "{}: {}", "Transaction".bold(), self.hash)?;
        if let Some(url) = &self.explorer_url {
            writeln!(f, "{}: {}", "Explorer".bold(), url)?;
        }
        Ok(())
    }
}

impl Display for CustodianOutput {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        match &self.custodian {
            Some(custodian) => writeln!(f, "{} is with {}.", self.item.bold(), custodian),
            None => writeln!(f, "{} is not lent to anyone.", self.item.bold()),
        }
    }
}

impl Display for EnvOutput {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        writeln!(f, "{}", self.env)?;
        match &self.active_address {
            Some(address) => writeln!(f, "Active address: {address}")?,
            None => writeln!(f, "Active address: None")?,
        }
        writeln!(f, "Signer: {}", self.signer.as_deref().unwrap_or("interactive"))?;
        writeln!(f, "Config: {}", self.config_path.display())
    }
}

impl Display for InitOutput {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        writeln!(
            f,
            "Wrote client config to {} (active env: {})",
            self.config_path.display(),
            self.active_env
        )
    }
}

impl Display for CustodyCommandResponse {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        match self {
            CustodyCommandResponse::Transaction(output) => write!(f, "{output}"),
            CustodyCommandResponse::Custodian(output) => write!(f, "{output}"),
            CustodyCommandResponse::Env(output) => write!(f, "{output}"),
            CustodyCommandResponse::Init(output) => write!(f, "{output}"),
        }
    }
}

impl CustodyCommandResponse {
    /// Print the response with optional JSON formatting
    pub fn print(&self, json: bool) {
        if json {
            match serde_json::to_string_pretty(self) {
                Ok(s) => println!("{}", s),
                Err(e) => eprintln!("Failed to serialize response: {}", e),
            }
        } else {
            print!("{}", self);
        }
    }
}
