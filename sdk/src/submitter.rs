// Copyright (c) Mysten Labs, Inc.
// Copyright (c) Soma Contributors
// SPDX-License-Identifier: Apache-2.0

use custody_rpc::types::SendTransactionStatus;
use custody_rpc::LedgerRpc;
use serde::Serialize;
use stellar_xdr::curr::{Limits, ReadXdr, TransactionEnvelope};
use tracing::info;

use crate::assembler::AssembledTransaction;
use crate::error::{CustodyResult, Error};
use crate::types::TransactionHash;
use crate::wallet::{SignerError, SignerErrorKind};

#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct SubmissionResult {
    pub hash: TransactionHash,
    pub status: SendTransactionStatus,
    pub latest_ledger: u32,
}

/// Decode what the signer returned and check it is exactly `assembled` plus a signature.
pub fn parse_signed(
    signed_xdr: &str,
    assembled: &AssembledTransaction,
) -> CustodyResult<TransactionEnvelope> {
    let rejected =
        |message: String| Error::Signing(SignerError::new(SignerErrorKind::Other, message));

    let envelope = TransactionEnvelope::from_xdr_base64(signed_xdr.trim(), Limits::none())
        .map_err(|e| rejected(format!("signer returned an undecodable envelope: {e}")))?;

    let TransactionEnvelope::Tx(signed) = &envelope else {
        return Err(rejected("signer returned a different envelope type".to_string()));
    };
    if signed.signatures.is_empty() {
        return Err(rejected("signer returned an unsigned envelope".to_string()));
    }
    if signed.tx != *assembled.transaction() {
        return Err(rejected("signer returned a different transaction".to_string()));
    }
    Ok(envelope)
}

/// Relay a signed envelope and return its hash once the network accepts it.
pub async fn submit(
    rpc: &dyn LedgerRpc,
    envelope: &TransactionEnvelope,
) -> CustodyResult<SubmissionResult> {
    let response = rpc
        .send_transaction(envelope)
        .await
        .map_err(|e| Error::Submission { message: e.to_string(), source: Some(e) })?;

    if !response.status.is_accepted() {
        let message = match response.error_result_xdr {
            Some(result) => format!("network returned {} ({result})", response.status),
            None => format!("network returned {}", response.status),
        };
        return Err(Error::submission(message));
    }

    info!(hash = %response.hash, status = %response.status, "Transaction accepted");
    Ok(SubmissionResult {
        hash: TransactionHash::new(response.hash),
        status: response.status,
        latest_ledger: response.latest_ledger,
    })
}
