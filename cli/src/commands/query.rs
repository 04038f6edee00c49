// Copyright (c) Mysten Labs, Inc.
// Copyright (c) Soma Contributors
// SPDX-License-Identifier: Apache-2.0

use anyhow::{Context as _, Result};
use custody_sdk::ItemName;

use crate::context::CustodyContext;
use crate::custody_commands::CustodyEnvConfig;
use crate::response::{CustodianOutput, CustodyCommandResponse};

/// Execute the query command. A failed query is an error, never "not lent".
pub async fn execute(
    env_config: &CustodyEnvConfig,
    item: String,
) -> Result<CustodyCommandResponse> {
    ItemName::new(&item)?;

    let context = CustodyContext::connect(env_config).await?;
    let custodian = context
        .client
        .try_query_custody(&item)
        .await
        .with_context(|| format!("Cannot look up custody of {item}"))?;

    Ok(CustodyCommandResponse::Custodian(CustodianOutput { item, custodian }))
}
