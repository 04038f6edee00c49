// Copyright (c) Mysten Labs, Inc.
// Copyright (c) Soma Contributors
// SPDX-License-Identifier: Apache-2.0

// Command modules for top-level CLI commands
pub mod env;
pub mod lend;
pub mod query;
pub mod take_back;
