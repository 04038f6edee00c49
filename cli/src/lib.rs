// Copyright (c) Mysten Labs, Inc.
// Copyright (c) Soma Contributors
// SPDX-License-Identifier: Apache-2.0

pub mod commands;
pub mod context;
pub mod custody_commands;
pub mod error;
pub mod prompt_wallet;
pub mod response;
