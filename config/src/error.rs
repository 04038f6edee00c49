// Copyright (c) Mysten Labs, Inc.
// Copyright (c) Soma Contributors
// SPDX-License-Identifier: Apache-2.0

use strum_macros::IntoStaticStr;
use thiserror::Error;

#[derive(Clone, Debug, Error, IntoStaticStr)]
pub enum CustodyConfigError {
    #[error("Cannot obtain home directory path")]
    HomeDirectoryError,
    #[error("Failed creating directory: {0}")]
    CreateDirectoryError(String),
}

pub type CustodyConfigResult<T> = Result<T, CustodyConfigError>;
