// Copyright (c) Mysten Labs, Inc.
// Copyright (c) Soma Contributors
// SPDX-License-Identifier: Apache-2.0

use anyhow::Result;
use custody_config::Config;
use custody_sdk::client_config::CustodyClientConfig;

use crate::custody_commands::CustodyEnvConfig;
use crate::error::CliError;
use crate::response::{CustodyCommandResponse, EnvOutput, InitOutput};

/// Show the env that commands would run against. Does not contact the network.
pub fn show(env_config: &CustodyEnvConfig) -> Result<CustodyCommandResponse> {
    let config_path = env_config.config_path()?;
    let config = env_config.load()?;
    let env = env_config.resolve_env(&config)?;

    Ok(CustodyCommandResponse::Env(EnvOutput {
        config_path,
        env,
        active_address: config.active_address,
        signer: config.signer.map(|signer| signer.program),
    }))
}

/// Write the default client config.
pub fn init(env_config: &CustodyEnvConfig, force: bool) -> Result<CustodyCommandResponse> {
    let config_path = env_config.config_path()?;
    if config_path.exists() && !force {
        return Err(CliError::ConfigExists(config_path).into());
    }
    if let Some(parent) = config_path.parent() {
        std::fs::create_dir_all(parent)?;
    }

    let config = CustodyClientConfig::default();
    let active_env = config.get_active_env()?.alias.clone();
    config.save(&config_path)?;

    Ok(CustodyCommandResponse::Init(InitOutput { config_path, active_env }))
}
