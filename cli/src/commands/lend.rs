// Copyright (c) Mysten Labs, Inc.
// Copyright (c) Soma Contributors
// SPDX-License-Identifier: Apache-2.0

use anyhow::Result;
use custody_sdk::{ItemName, LedgerAddress};

use crate::context::CustodyContext;
use crate::custody_commands::CustodyEnvConfig;
use crate::response::{CustodyAction, CustodyCommandResponse, TransactionOutput};

/// Execute the lend command (assign custody of an item to a borrower)
pub async fn execute(
    env_config: &CustodyEnvConfig,
    item: String,
    borrower: String,
    lender: Option<String>,
) -> Result<CustodyCommandResponse> {
    // Reject bad input before touching the network.
    ItemName::new(&item)?;
    let borrower_address = LedgerAddress::parse("borrower", &borrower)?;
    if let Some(lender) = &lender {
        LedgerAddress::parse_account("lender", lender)?;
    }

    let context = CustodyContext::connect(env_config).await?;
    let lender = context.lender(lender).await?;
    let hash = context.client.assign_custody(&lender, &item, &borrower).await?;

    Ok(CustodyCommandResponse::Transaction(TransactionOutput {
        action: CustodyAction::Lend,
        explorer_url: context.env.explorer_tx_url(&hash),
        item,
        lender: LedgerAddress::parse_account("lender", &lender)?,
        borrower: Some(borrower_address),
        hash,
    }))
}
