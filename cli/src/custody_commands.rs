// Copyright (c) Mysten Labs, Inc.
// Copyright (c) Soma Contributors
// SPDX-License-Identifier: Apache-2.0

use std::path::PathBuf;

use anyhow::Context as _;
use clap::Parser;
use custody_config::{custody_config_dir, CUSTODY_CLIENT_CONFIG};
use custody_sdk::client_config::{CustodyClientConfig, CustodyEnv};

use crate::commands;
use crate::error::CliError;

/// Environment variable that overrides the contract id of the active env.
pub const CUSTODY_CONTRACT_ID_ENV: &str = "CUSTODY_CONTRACT_ID";

#[derive(Parser, Debug, Default, Clone)]
#[clap(rename_all = "kebab-case")]
pub struct CustodyEnvConfig {
    /// Client config file (built-in testnet defaults are used when it does not exist)
    #[clap(long, global = true)]
    pub config: Option<PathBuf>,
    /// Environment alias to use instead of the config's active env
    #[clap(long, global = true)]
    pub env: Option<String>,
    /// Custody contract id to use instead of the env's
    #[clap(long, global = true, env = CUSTODY_CONTRACT_ID_ENV)]
    pub contract: Option<String>,
}

impl CustodyEnvConfig {
    pub fn config_path(&self) -> anyhow::Result<PathBuf> {
        match &self.config {
            Some(path) => Ok(path.clone()),
            None => Ok(custody_config_dir().map_err(CliError::from)?.join(CUSTODY_CLIENT_CONFIG)),
        }
    }

    pub fn load(&self) -> anyhow::Result<CustodyClientConfig> {
        let path = self.config_path()?;
        CustodyClientConfig::load_or_default(&path)
            .with_context(|| format!("Cannot load client config {}", path.display()))
    }

    /// The env selected by `--env` or the config, with any contract override applied.
    pub fn resolve_env(&self, config: &CustodyClientConfig) -> anyhow::Result<CustodyEnv> {
        let env = match &self.env {
            Some(alias) => config
                .get_env(&Some(alias.clone()))
                .ok_or_else(|| CliError::UnknownEnv(alias.clone()))?,
            None => config.get_active_env()?,
        };
        Ok(match &self.contract {
            Some(contract) => env.clone().with_contract_id(contract),
            None => env.clone(),
        })
    }
}

#[derive(Parser, Debug)]
#[clap(rename_all = "kebab-case")]
pub enum CustodyCommand {
    /// Record that an item was lent to a borrower
    #[clap(name = "lend")]
    Lend {
        /// Item name (letters, digits and '_', at most 32 characters)
        #[clap(long)]
        item: String,
        /// Address of the borrower
        #[clap(long)]
        borrower: String,
        /// Lender account that signs (defaults to the config's active address)
        #[clap(long)]
        lender: Option<String>,
    },

    /// Record that a lent item came back
    #[clap(name = "take-back")]
    TakeBack {
        #[clap(long)]
        item: String,
        /// Lender account that signs (defaults to the config's active address)
        #[clap(long)]
        lender: Option<String>,
    },

    /// Show who currently holds an item
    #[clap(name = "query")]
    Query {
        #[clap(long)]
        item: String,
    },

    /// Show the active environment
    #[clap(name = "env")]
    Env,

    /// Write a client config with the built-in environments
    #[clap(name = "init")]
    Init {
        /// Overwrite an existing config
        #[clap(long)]
        force: bool,
    },
}

impl CustodyCommand {
    pub async fn execute(self, env_config: CustodyEnvConfig, json: bool) -> anyhow::Result<()> {
        let response = match self {
            CustodyCommand::Lend { item, borrower, lender } => {
                commands::lend::execute(&env_config, item, borrower, lender).await?
            }
            CustodyCommand::TakeBack { item, lender } => {
                commands::take_back::execute(&env_config, item, lender).await?
            }
            CustodyCommand::Query { item } => commands::query::execute(&env_config, item).await?,
            CustodyCommand::Env => commands::env::show(&env_config)?,
            CustodyCommand::Init { force } => commands::env::init(&env_config, force)?,
        };
        response.print(json);
        Ok(())
    }
}
