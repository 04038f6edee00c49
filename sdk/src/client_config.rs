// Copyright (c) Mysten Labs, Inc.
// Copyright (c) Soma Contributors
// SPDX-License-Identifier: Apache-2.0

use std::fmt::{Display, Formatter, Write};
use std::path::Path;
use std::time::Duration;

use anyhow::anyhow;
use custody_config::Config;
use custody_rpc::Client;
use serde::{Deserialize, Serialize};

use crate::custody_client::CustodySettings;
use crate::error::{CustodyResult, Error};
use crate::external_wallet::SignerCommand;
use crate::types::{LedgerAddress, TransactionHash};
use crate::wallet::NetworkTarget;
use crate::{
    DEFAULT_CONTRACT_ID, FUTURENET_PASSPHRASE, FUTURENET_RPC_URL, LOCAL_RPC_URL,
    STANDALONE_PASSPHRASE, TESTNET_EXPLORER_URL, TESTNET_PASSPHRASE, TESTNET_RPC_URL,
};

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct CustodyClientConfig {
    /// List of environments that the client can connect to.
    pub envs: Vec<CustodyEnv>,
    /// The alias of the currently active environment.
    pub active_env: Option<String>,
    /// Default lender when none is given on the command line.
    pub active_address: Option<LedgerAddress>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub signer: Option<SignerCommand>,
}

impl Default for CustodyClientConfig {
    fn default() -> Self {
        Self {
            envs: vec![CustodyEnv::testnet(), CustodyEnv::futurenet(), CustodyEnv::localnet()],
            active_env: Some("testnet".to_string()),
            active_address: None,
            signer: None,
        }
    }
}

impl CustodyClientConfig {
    /// Read `path`, or fall back to the built-in environments when it does not exist.
    pub fn load_or_default(path: &Path) -> Result<Self, anyhow::Error> {
        if path.exists() {
            Self::load(path)
        } else {
            Ok(Self::default())
        }
    }

    pub fn get_env(&self, alias: &Option<String>) -> Option<&CustodyEnv> {
        if let Some(alias) = alias {
            self.envs.iter().find(|env| &env.alias == alias)
        } else {
            self.envs.first()
        }
    }

    pub fn get_active_env(&self) -> Result<&CustodyEnv, anyhow::Error> {
        self.get_env(&self.active_env).ok_or_else(|| {
            anyhow!(
                "Environment configuration not found for env [{}]",
                self.active_env.as_deref().unwrap_or("None")
            )
        })
    }

    pub fn add_env(&mut self, env: CustodyEnv) {
        if !self.envs.iter().any(|other_env| other_env.alias == env.alias) {
            self.envs.push(env)
        }
    }
}

impl Config for CustodyClientConfig {}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct CustodyEnv {
    pub alias: String,
    /// Soroban JSON-RPC endpoint.
    pub rpc: String,
    /// Network name handed to wallets, e.g. `TESTNET`.
    pub network: String,
    pub network_passphrase: String,
    pub contract_id: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub explorer: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub placeholder_account: Option<LedgerAddress>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub request_timeout_secs: Option<u64>,
}

impl CustodyEnv {
    pub fn testnet() -> Self {
        Self {
            alias: "testnet".to_string(),
            rpc: TESTNET_RPC_URL.into(),
            network: "TESTNET".to_string(),
            network_passphrase: TESTNET_PASSPHRASE.into(),
            contract_id: DEFAULT_CONTRACT_ID.into(),
            explorer: Some(TESTNET_EXPLORER_URL.into()),
            placeholder_account: None,
            request_timeout_secs: None,
        }
    }

    pub fn futurenet() -> Self {
        Self {
            alias: "futurenet".to_string(),
            rpc: FUTURENET_RPC_URL.into(),
            network: "FUTURENET".to_string(),
            network_passphrase: FUTURENET_PASSPHRASE.into(),
            contract_id: DEFAULT_CONTRACT_ID.into(),
            explorer: Some("https://stellar.expert/explorer/futurenet".into()),
            placeholder_account: None,
            request_timeout_secs: None,
        }
    }

    pub fn localnet() -> Self {
        Self {
            alias: "local".to_string(),
            rpc: LOCAL_RPC_URL.into(),
            network: "STANDALONE".to_string(),
            network_passphrase: STANDALONE_PASSPHRASE.into(),
            contract_id: DEFAULT_CONTRACT_ID.into(),
            explorer: None,
            placeholder_account: None,
            request_timeout_secs: None,
        }
    }

    pub fn with_contract_id(mut self, contract_id: impl Into<String>) -> Self {
        self.contract_id = contract_id.into();
        self
    }

    pub fn network_target(&self) -> NetworkTarget {
        NetworkTarget { name: self.network.clone(), passphrase: self.network_passphrase.clone() }
    }

    pub fn settings(&self) -> CustodyResult<CustodySettings> {
        let contract = LedgerAddress::parse_contract("contract", &self.contract_id)
            .map_err(|e| Error::Config(format!("env {}: {e}", self.alias)))?;
        let mut settings = CustodySettings::new(contract, self.network_target());
        if let Some(placeholder) = self.placeholder_account {
            settings.read_source = placeholder;
        }
        Ok(settings)
    }

    pub fn create_rpc_client(&self) -> CustodyResult<Client> {
        match self.request_timeout_secs {
            Some(secs) => Client::with_timeout(&self.rpc, Duration::from_secs(secs)),
            None => Client::new(&self.rpc),
        }
        .map_err(Error::ClientInitError)
    }

    /// Explorer page for a submitted transaction, when the env has an explorer.
    pub fn explorer_tx_url(&self, hash: &TransactionHash) -> Option<String> {
        self.explorer
            .as_deref()
            .map(|explorer| format!("{}/tx/{hash}", explorer.trim_end_matches('/')))
    }
}

impl Display for CustodyEnv {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        let mut writer = String::new();
        writeln!(writer, "Active environment : {}", self.alias)?;
        writeln!(writer, "RPC URL: {}", self.rpc)?;
        writeln!(writer, "Network: {} ({})", self.network, self.network_passphrase)?;
        write!(writer, "Contract: {}", self.contract_id)?;
        if let Some(explorer) = &self.explorer {
            writeln!(writer)?;
            write!(writer, "Explorer: {}", explorer)?;
        }
        write!(f, "{}", writer)
    }
}

impl Display for CustodyClientConfig {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        let mut writer = String::new();
        write!(writer, "Active address: ")?;
        match self.active_address {
            Some(r) => writeln!(writer, "{}", r)?,
            None => writeln!(writer, "None")?,
        };
        match &self.signer {
            Some(signer) => writeln!(writer, "Signer: {}", signer.program)?,
            None => writeln!(writer, "Signer: interactive")?,
        };
        if let Ok(env) = self.get_active_env() {
            write!(writer, "{}", env)?;
        }
        write!(f, "{}", writer)
    }
}
