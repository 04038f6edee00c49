// Copyright (c) Mysten Labs, Inc.
// Copyright (c) Soma Contributors
// SPDX-License-Identifier: Apache-2.0

use std::sync::Arc;
use std::time::{Duration, SystemTime, UNIX_EPOCH};

use custody_rpc::types::AccountState;
use custody_rpc::LedgerRpc;
use stellar_xdr::curr::AccountId;
use tracing::{debug, info, warn};

use crate::assembler::assemble;
use crate::error::{CustodyResult, Error};
use crate::simulation::{decode_custodian, simulate};
use crate::submitter::{parse_signed, submit, SubmissionResult};
use crate::transaction_builder::{CustodyCall, InvocationBuilder, BASE_FEE, TX_TIMEOUT};
use crate::types::{ItemName, LedgerAddress, TransactionHash};
use crate::wallet::{NetworkTarget, SignerError, SignerErrorKind, WalletCapability};

/// Everything a [`CustodyClient`] needs besides its collaborators.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct CustodySettings {
    pub contract: LedgerAddress,
    pub network: NetworkTarget,
    pub base_fee: u32,
    pub timeout: Duration,
    /// Source account for read-only simulations. Never needs to exist on-chain.
    pub read_source: LedgerAddress,
}

impl CustodySettings {
    pub fn new(contract: LedgerAddress, network: NetworkTarget) -> Self {
        Self {
            contract,
            network,
            base_fee: BASE_FEE,
            timeout: TX_TIMEOUT,
            read_source: LedgerAddress::PLACEHOLDER,
        }
    }
}

/// Records and reads item custody on the ledger.
///
/// Writes run resolve, build, simulate, assemble, sign and submit in order and stop
/// at the first failing stage. Nothing is retried.
#[derive(Clone)]
pub struct CustodyClient {
    rpc: Arc<dyn LedgerRpc>,
    wallet: Arc<dyn WalletCapability>,
    builder: InvocationBuilder,
    network: NetworkTarget,
    read_account: AccountId,
}

impl CustodyClient {
    pub fn new(
        rpc: Arc<dyn LedgerRpc>,
        wallet: Arc<dyn WalletCapability>,
        settings: CustodySettings,
    ) -> CustodyResult<Self> {
        let builder = InvocationBuilder::new(settings.contract)?
            .with_base_fee(settings.base_fee)
            .with_timeout(settings.timeout);
        let read_account = settings.read_source.account_id().ok_or_else(|| {
            Error::Config(format!(
                "read source {} must be an account address",
                settings.read_source
            ))
        })?;
        Ok(Self { rpc, wallet, builder, network: settings.network, read_account })
    }

    pub fn contract(&self) -> &LedgerAddress {
        self.builder.contract()
    }

    pub fn network(&self) -> &NetworkTarget {
        &self.network
    }

    /// Fail unless the endpoint serves the configured network.
    pub async fn verify_network(&self) -> CustodyResult {
        let info = self.rpc.get_network().await.map_err(Error::NetworkCheck)?;
        if info.passphrase != self.network.passphrase {
            return Err(Error::NetworkMismatch {
                expected: self.network.passphrase.clone(),
                actual: info.passphrase,
            });
        }
        debug!(protocol_version = info.protocol_version, "Endpoint network verified");
        Ok(())
    }

    pub async fn wallet_connected(&self) -> bool {
        self.wallet.is_connected().await
    }

    /// Address the wallet signs with. A wallet that is not connected is never asked.
    pub async fn active_signer(&self) -> CustodyResult<LedgerAddress> {
        if !self.wallet.is_connected().await {
            let unavailable = SignerError::new(SignerErrorKind::Unavailable, "no signer is connected");
            return Err(unavailable.into());
        }
        Ok(self.wallet.request_access().await?)
    }

    /// Record that `lender` handed `item` to `borrower`.
    pub async fn assign_custody(
        &self,
        lender: &str,
        item: &str,
        borrower: &str,
    ) -> CustodyResult<TransactionHash> {
        let call = CustodyCall::Assign {
            lender: LedgerAddress::parse_account("lender", lender)?,
            item: ItemName::new(item)?,
            borrower: LedgerAddress::parse("borrower", borrower)?,
        };
        Ok(self.execute(call).await?.hash)
    }

    /// Record that `lender` has `item` back.
    pub async fn release_custody(
        &self,
        lender: &str,
        item: &str,
    ) -> CustodyResult<TransactionHash> {
        let call = CustodyCall::Release {
            lender: LedgerAddress::parse_account("lender", lender)?,
            item: ItemName::new(item)?,
        };
        Ok(self.execute(call).await?.hash)
    }

    /// Run a write call through the full pipeline.
    pub async fn execute(&self, call: CustodyCall) -> CustodyResult<SubmissionResult> {
        let Some(signer) = call.signer().copied() else {
            return Err(Error::Config(format!("{} does not modify custody", call.method())));
        };
        let method = call.method();
        info!(method, signer = %signer, item = %call.item(), "Starting custody transaction");

        let state = self.resolve(&signer).await?;
        let invocation = self.builder.build(&state, call, now_unix())?;
        let simulated = simulate(self.rpc.as_ref(), invocation).await?;
        let assembled = assemble(simulated)?;

        let unsigned = assembled.to_xdr_base64()?;
        info!(method, fee = assembled.fee(), "Requesting signature");
        let signed = self.wallet.sign_transaction(&unsigned, &self.network).await?;
        let envelope = parse_signed(&signed, &assembled)?;

        submit(self.rpc.as_ref(), &envelope).await
    }

    /// Current custodian of `item`, `None` when nobody holds it.
    ///
    /// Errors are preserved so callers can tell "unassigned" from "could not ask".
    pub async fn try_query_custody(&self, item: &str) -> CustodyResult<Option<LedgerAddress>> {
        let call = CustodyCall::Query { item: ItemName::new(item)? };
        let source = AccountState::new(self.read_account.clone(), 0);
        let invocation = self.builder.build(&source, call, now_unix())?;
        let simulated = simulate(self.rpc.as_ref(), invocation).await?;
        decode_custodian(simulated.retval())
    }

    /// Like [`Self::try_query_custody`] but any failure reads as unassigned.
    pub async fn query_custody(&self, item: &str) -> Option<LedgerAddress> {
        match self.try_query_custody(item).await {
            Ok(custodian) => custodian,
            Err(e) => {
                warn!(item, stage = %e.stage(), error = %e, "Custody query failed");
                None
            }
        }
    }

    async fn resolve(&self, signer: &LedgerAddress) -> CustodyResult<AccountState> {
        let Some(account_id) = signer.account_id() else {
            return Err(Error::Config(format!("{signer} cannot sign transactions")));
        };
        let state = self.rpc.get_account(&account_id).await.map_err(|source| {
            Error::Resolution { address: signer.to_string(), source }
        })?;
        debug!(account = %signer, sequence = state.sequence, "Resolved signer account");
        Ok(state)
    }
}

fn now_unix() -> u64 {
    SystemTime::now().duration_since(UNIX_EPOCH).map(|d| d.as_secs()).unwrap_or_default()
}
