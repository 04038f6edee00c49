// Copyright (c) Mysten Labs, Inc.
// Copyright (c) Soma Contributors
// SPDX-License-Identifier: Apache-2.0

use std::path::PathBuf;

use custody_config::error::CustodyConfigError;
use strum_macros::IntoStaticStr;
use thiserror::Error;

#[derive(Clone, Debug, Error, IntoStaticStr)]
pub enum CliError {
    #[error("Custody config error: {0}")]
    CustodyConfig(#[from] CustodyConfigError),
    #[error("Environment '{0}' not found in the client config")]
    UnknownEnv(String),
    #[error("Config already exists at {0}; pass --force to overwrite it")]
    ConfigExists(PathBuf),
}
