// Copyright (c) Mysten Labs, Inc.
// Copyright (c) Soma Contributors
// SPDX-License-Identifier: Apache-2.0

use std::sync::Arc;

use anyhow::Context as _;
use custody_sdk::client_config::{CustodyClientConfig, CustodyEnv};
use custody_sdk::external_wallet::CommandWallet;
use custody_sdk::{CustodyClient, LedgerAddress, WalletCapability};
use tracing::{debug, info};

use crate::custody_commands::CustodyEnvConfig;
use crate::prompt_wallet::PromptWallet;

/// A connected custody client plus the config it was built from.
pub struct CustodyContext {
    pub config: CustodyClientConfig,
    pub env: CustodyEnv,
    pub client: CustodyClient,
}

impl CustodyContext {
    /// Build the client for the selected env and check the endpoint serves its network.
    pub async fn connect(env_config: &CustodyEnvConfig) -> anyhow::Result<Self> {
        let config = env_config.load()?;
        let env = env_config.resolve_env(&config)?;

        let wallet: Arc<dyn WalletCapability> = match &config.signer {
            Some(command) => {
                debug!(program = %command.program, "Using external signer");
                Arc::new(CommandWallet::new(command.clone()).with_network(env.network_target()))
            }
            None => Arc::new(PromptWallet),
        };
        let rpc = Arc::new(env.create_rpc_client()?);
        let client = CustodyClient::new(rpc, wallet, env.settings()?)?;

        if let Err(e) = client.verify_network().await {
            let reason = if e.is_unreachable() { "Cannot reach" } else { "Cannot use" };
            return Err(anyhow::Error::new(e)
                .context(format!("{reason} env {} at {}", env.alias, env.rpc)));
        }
        info!(env = %env.alias, contract = %client.contract(), "Connected");

        Ok(Self { config, env, client })
    }

    /// Explicit lender, else the config's active address, else whatever the wallet reports.
    pub async fn lender(&self, explicit: Option<String>) -> anyhow::Result<String> {
        if let Some(lender) = explicit {
            return Ok(lender);
        }
        if let Some(address) = self.config.active_address {
            return Ok(address.to_string());
        }
        let address: LedgerAddress =
            self.client.active_signer().await.context("Cannot determine the lender account")?;
        Ok(address.to_string())
    }
}
