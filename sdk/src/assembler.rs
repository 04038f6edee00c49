// Copyright (c) Mysten Labs, Inc.
// Copyright (c) Soma Contributors
// SPDX-License-Identifier: Apache-2.0

use stellar_xdr::curr::{
    HostFunction, InvokeHostFunctionOp, Limits, OperationBody, Transaction, TransactionEnvelope,
    TransactionExt, TransactionV1Envelope, VecM, WriteXdr,
};
use tracing::debug;

use crate::error::{CustodyResult, Error};
use crate::simulation::SimulatedInvocation;
use crate::transaction_builder::CustodyCall;

/// A simulated transaction with resources, fee and authorization filled in, ready to
/// be signed.
#[derive(Clone, Debug, PartialEq)]
pub struct AssembledTransaction {
    call: CustodyCall,
    transaction: Transaction,
}

impl AssembledTransaction {
    pub(crate) fn new(call: CustodyCall, transaction: Transaction) -> Self {
        Self { call, transaction }
    }

    pub fn call(&self) -> &CustodyCall {
        &self.call
    }

    pub fn transaction(&self) -> &Transaction {
        &self.transaction
    }

    pub fn fee(&self) -> u32 {
        self.transaction.fee
    }

    pub fn envelope(&self) -> TransactionEnvelope {
        TransactionEnvelope::Tx(TransactionV1Envelope {
            tx: self.transaction.clone(),
            signatures: VecM::default(),
        })
    }

    /// Unsigned base64 envelope handed to the signer.
    pub fn to_xdr_base64(&self) -> CustodyResult<String> {
        self.envelope()
            .to_xdr_base64(Limits::none())
            .map_err(|e| Error::Assembly(format!("cannot encode transaction: {e}")))
    }
}

/// Merge simulation output into the transaction.
///
/// The fee becomes the built fee plus the minimum resource fee. The simulated
/// resources are attached as the transaction extension, and simulated authorization
/// entries fill operations that carry none.
pub fn assemble(simulated: SimulatedInvocation) -> CustodyResult<AssembledTransaction> {
    let (invocation, transaction_data, min_resource_fee, auth) = simulated.into_parts();
    let method = invocation.call.method();
    let mut transaction = invocation.transaction;

    let Some(transaction_data) = transaction_data else {
        return Err(Error::Assembly(format!("simulation of {method} returned no transaction data")));
    };

    let fee = u32::try_from(min_resource_fee)
        .ok()
        .and_then(|resource_fee| transaction.fee.checked_add(resource_fee))
        .ok_or_else(|| {
            Error::Assembly(format!(
                "fee {} + resource fee {min_resource_fee} does not fit in a transaction fee",
                transaction.fee
            ))
        })?;

    let mut operations = transaction.operations.to_vec();
    for operation in operations.iter_mut() {
        if let OperationBody::InvokeHostFunction(InvokeHostFunctionOp {
            host_function: HostFunction::InvokeContract(_),
            auth: op_auth,
        }) = &mut operation.body
        {
            if op_auth.is_empty() && !auth.is_empty() {
                *op_auth = auth
                    .clone()
                    .try_into()
                    .map_err(|e| Error::Assembly(format!("too many auth entries: {e}")))?;
            }
        }
    }
    transaction.operations = operations
        .try_into()
        .map_err(|e| Error::Assembly(format!("cannot rebuild operations: {e}")))?;
    transaction.fee = fee;
    transaction.ext = TransactionExt::V1(transaction_data);

    debug!(method, fee, auth_entries = auth.len(), "Assembled transaction");
    Ok(AssembledTransaction::new(invocation.call, transaction))
}
