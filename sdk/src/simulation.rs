// Copyright (c) Mysten Labs, Inc.
// Copyright (c) Soma Contributors
// SPDX-License-Identifier: Apache-2.0

//! Dry-run stage. A [`SimulatedInvocation`] can only be obtained from a successful
//! simulation, so nothing downstream can assemble an unsimulated transaction.

use custody_rpc::LedgerRpc;
use stellar_xdr::curr::{ScVal, SorobanAuthorizationEntry, SorobanTransactionData};
use tracing::{debug, info};

use crate::error::{CustodyResult, Error};
use crate::transaction_builder::UnsignedInvocation;
use crate::types::LedgerAddress;

#[derive(Clone, Debug)]
pub struct SimulatedInvocation {
    invocation: UnsignedInvocation,
    transaction_data: Option<SorobanTransactionData>,
    min_resource_fee: u64,
    auth: Vec<SorobanAuthorizationEntry>,
    retval: ScVal,
    latest_ledger: u32,
}

impl SimulatedInvocation {
    pub fn invocation(&self) -> &UnsignedInvocation {
        &self.invocation
    }

    pub fn transaction_data(&self) -> Option<&SorobanTransactionData> {
        self.transaction_data.as_ref()
    }

    pub fn min_resource_fee(&self) -> u64 {
        self.min_resource_fee
    }

    pub fn auth(&self) -> &[SorobanAuthorizationEntry] {
        &self.auth
    }

    /// Value the contract returned during the dry run.
    pub fn retval(&self) -> &ScVal {
        &self.retval
    }

    pub fn latest_ledger(&self) -> u32 {
        self.latest_ledger
    }

    pub(crate) fn into_parts(
        self,
    ) -> (UnsignedInvocation, Option<SorobanTransactionData>, u64, Vec<SorobanAuthorizationEntry>)
    {
        (self.invocation, self.transaction_data, self.min_resource_fee, self.auth)
    }
}

/// Simulate `invocation` once. Network failures, contract errors and archived state
/// all surface as [`Error::Simulation`].
pub async fn simulate(
    rpc: &dyn LedgerRpc,
    invocation: UnsignedInvocation,
) -> CustodyResult<SimulatedInvocation> {
    let method = invocation.call.method();
    let response = rpc
        .simulate_transaction(&invocation.envelope())
        .await
        .map_err(|e| Error::Simulation { message: e.to_string(), source: Some(e) })?;

    if let Some(error) = response.error {
        info!(method, %error, "Simulation rejected invocation");
        return Err(Error::simulation(error));
    }
    if response.restore_required {
        return Err(Error::simulation(format!(
            "{method} touches archived ledger state that must be restored first"
        )));
    }
    let Some(result) = response.results.into_iter().next() else {
        return Err(Error::simulation(format!("{method} simulation returned no result")));
    };

    debug!(
        method,
        min_resource_fee = response.min_resource_fee,
        auth_entries = result.auth.len(),
        latest_ledger = response.latest_ledger,
        "Simulation succeeded"
    );

    Ok(SimulatedInvocation {
        invocation,
        transaction_data: response.transaction_data,
        min_resource_fee: response.min_resource_fee,
        auth: result.auth,
        retval: result.retval,
        latest_ledger: response.latest_ledger,
    })
}

/// Decode the `query_custody` return value: `Void` is unassigned, an address is the
/// current custodian.
pub fn decode_custodian(value: &ScVal) -> CustodyResult<Option<LedgerAddress>> {
    match value {
        ScVal::Void => Ok(None),
        ScVal::Address(address) => LedgerAddress::from_sc_address(address)
            .map(Some)
            .ok_or_else(|| Error::simulation("custodian is not a recognised address")),
        other => Err(Error::simulation(format!("unexpected custodian value {other:?}"))),
    }
}
