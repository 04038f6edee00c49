// Copyright (c) Mysten Labs, Inc.
// Copyright (c) Soma Contributors
// SPDX-License-Identifier: Apache-2.0

use std::time::Duration;

use custody_rpc::types::AccountState;
use stellar_xdr::curr::{
    HostFunction, InvokeContractArgs, InvokeHostFunctionOp, Limits, Memo, MuxedAccount,
    Operation, OperationBody, Preconditions, PublicKey, ScVal, SequenceNumber, TimeBounds,
    TimePoint, Transaction, TransactionEnvelope, TransactionExt, TransactionV1Envelope, VecM,
    WriteXdr,
};

use crate::error::EncodingError;
use crate::types::{symbol, ItemName, LedgerAddress};

/// Fee offered per operation before resource fees are added, in stroops.
pub const BASE_FEE: u32 = 100;
/// Validity window of a built transaction.
pub const TX_TIMEOUT: Duration = Duration::from_secs(30);

pub const ASSIGN_CUSTODY: &str = "assign_custody";
pub const RELEASE_CUSTODY: &str = "release_custody";
pub const QUERY_CUSTODY: &str = "query_custody";

/// One call into the custody contract, with validated arguments.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum CustodyCall {
    Assign {
        lender: LedgerAddress,
        item: ItemName,
        borrower: LedgerAddress,
    },
    Release {
        lender: LedgerAddress,
        item: ItemName,
    },
    Query {
        item: ItemName,
    },
}

impl CustodyCall {
    pub fn method(&self) -> &'static str {
        match self {
            CustodyCall::Assign { .. } => ASSIGN_CUSTODY,
            CustodyCall::Release { .. } => RELEASE_CUSTODY,
            CustodyCall::Query { .. } => QUERY_CUSTODY,
        }
    }

    /// Contract arguments in call order.
    pub fn args(&self) -> Result<Vec<ScVal>, EncodingError> {
        Ok(match self {
            CustodyCall::Assign { lender, item, borrower } => {
                vec![lender.to_sc_val(), item.to_sc_val()?, borrower.to_sc_val()]
            }
            CustodyCall::Release { lender, item } => vec![lender.to_sc_val(), item.to_sc_val()?],
            CustodyCall::Query { item } => vec![item.to_sc_val()?],
        })
    }

    /// Account that must authorize the call. Reads have none.
    pub fn signer(&self) -> Option<&LedgerAddress> {
        match self {
            CustodyCall::Assign { lender, .. } | CustodyCall::Release { lender, .. } => {
                Some(lender)
            }
            CustodyCall::Query { .. } => None,
        }
    }

    pub fn item(&self) -> &ItemName {
        match self {
            CustodyCall::Assign { item, .. }
            | CustodyCall::Release { item, .. }
            | CustodyCall::Query { item } => item,
        }
    }

    pub fn is_write(&self) -> bool {
        self.signer().is_some()
    }
}

/// A freshly built transaction that has not been simulated yet.
#[derive(Clone, Debug, PartialEq)]
pub struct UnsignedInvocation {
    pub call: CustodyCall,
    pub transaction: Transaction,
}

impl UnsignedInvocation {
    /// Envelope with no signatures, as sent to simulation.
    pub fn envelope(&self) -> TransactionEnvelope {
        TransactionEnvelope::Tx(TransactionV1Envelope {
            tx: self.transaction.clone(),
            signatures: VecM::default(),
        })
    }

    pub fn to_xdr_base64(&self) -> Result<String, EncodingError> {
        Ok(self.envelope().to_xdr_base64(Limits::none())?)
    }
}

/// Builds single-operation contract invocations against a fixed contract.
#[derive(Clone, Debug)]
pub struct InvocationBuilder {
    contract: LedgerAddress,
    base_fee: u32,
    timeout: Duration,
}

impl InvocationBuilder {
    pub fn new(contract: LedgerAddress) -> Result<Self, EncodingError> {
        if contract.is_account() {
            return Err(EncodingError::NotAContract {
                field: "contract",
                value: contract.to_string(),
            });
        }
        Ok(Self { contract, base_fee: BASE_FEE, timeout: TX_TIMEOUT })
    }

    pub fn with_base_fee(mut self, base_fee: u32) -> Self {
        self.base_fee = base_fee;
        self
    }

    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    pub fn contract(&self) -> &LedgerAddress {
        &self.contract
    }

    pub fn base_fee(&self) -> u32 {
        self.base_fee
    }

    /// Build the invocation for `call` with `source` as the transaction source.
    ///
    /// Deterministic for a given `now_unix`: the transaction is valid from time zero
    /// until `now_unix + timeout`.
    pub fn build(
        &self,
        source: &AccountState,
        call: CustodyCall,
        now_unix: u64,
    ) -> Result<UnsignedInvocation, EncodingError> {
        let args: VecM<ScVal> = call.args()?.try_into()?;
        let invoke = InvokeContractArgs {
            contract_address: self.contract.to_sc_address(),
            function_name: symbol(call.method())?,
            args,
        };
        let operation = Operation {
            source_account: None,
            body: OperationBody::InvokeHostFunction(InvokeHostFunctionOp {
                host_function: HostFunction::InvokeContract(invoke),
                auth: VecM::default(),
            }),
        };

        let PublicKey::PublicKeyTypeEd25519(key) = &source.account_id.0;
        let source_account = MuxedAccount::Ed25519(key.clone());

        let transaction = Transaction {
            source_account,
            fee: self.base_fee,
            seq_num: SequenceNumber(source.next_sequence()),
            cond: Preconditions::Time(TimeBounds {
                min_time: TimePoint(0),
                max_time: TimePoint(now_unix.saturating_add(self.timeout.as_secs())),
            }),
            memo: Memo::None,
            operations: vec![operation].try_into()?,
            ext: TransactionExt::V0,
        };

        Ok(UnsignedInvocation { call, transaction })
    }
}

/// The contract call carried by a transaction, if it is a single invocation.
pub fn invoke_contract_args(transaction: &Transaction) -> Option<&InvokeContractArgs> {
    match transaction.operations.as_slice() {
        [Operation {
            body:
                OperationBody::InvokeHostFunction(InvokeHostFunctionOp {
                    host_function: HostFunction::InvokeContract(args),
                    ..
                }),
            ..
        }] => Some(args),
        _ => None,
    }
}
