// Copyright (c) Mysten Labs, Inc.
// Copyright (c) Soma Contributors
// SPDX-License-Identifier: Apache-2.0

use anyhow::Result;
use custody_sdk::{ItemName, LedgerAddress};

use crate::context::CustodyContext;
use crate::custody_commands::CustodyEnvConfig;
use crate::response::{CustodyAction, CustodyCommandResponse, TransactionOutput};

/// Execute the take-back command (release custody of an item)
pub async fn execute(
    env_config: &CustodyEnvConfig,
    item: String,
    lender: Option<String>,
) -> Result<CustodyCommandResponse> {
    ItemName::new(&item)?;
    if let Some(lender) = &lender {
        LedgerAddress::parse_account("lender", lender)?;
    }

    let context = CustodyContext::connect(env_config).await?;
    let lender = context.lender(lender).await?;
    let hash = context.client.release_custody(&lender, &item).await?;

    Ok(CustodyCommandResponse::Transaction(TransactionOutput {
        action: CustodyAction::TakeBack,
        explorer_url: context.env.explorer_tx_url(&hash),
        item,
        lender: LedgerAddress::parse_account("lender", &lender)?,
        borrower: None,
        hash,
    }))
}
