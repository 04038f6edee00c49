// Copyright (c) Mysten Labs, Inc.
// Copyright (c) Soma Contributors
// SPDX-License-Identifier: Apache-2.0

use std::collections::{HashMap, VecDeque};
use std::sync::Mutex;

use async_trait::async_trait;
use custody_rpc::types::{
    AccountState, NetworkInfo, SendTransactionResponse, SendTransactionStatus,
    SimulateHostFunctionResult, SimulateTransactionResponse,
};
use custody_rpc::{LedgerRpc, RpcError};
use custody_sdk::transaction_builder::{
    invoke_contract_args, ASSIGN_CUSTODY, QUERY_CUSTODY, RELEASE_CUSTODY,
};
use custody_sdk::{ItemName, LedgerAddress, TESTNET_PASSPHRASE};
use stellar_xdr::curr::{
    AccountId, InvokeContractArgs, Limits, ReadXdr, ScVal, SorobanAuthorizationEntry,
    SorobanAuthorizedFunction, SorobanAuthorizedInvocation, SorobanCredentials,
    SorobanTransactionData, Transaction, TransactionEnvelope, VecM,
};

pub const MIN_RESOURCE_FEE: u64 = 5_000;

/// In-memory custody contract behind the RPC surface.
pub struct FakeLedger {
    passphrase: String,
    state: Mutex<State>,
}

#[derive(Default)]
struct State {
    accounts: HashMap<LedgerAddress, i64>,
    custody: HashMap<String, LedgerAddress>,
    hashes: VecDeque<String>,
    simulation_error: Option<String>,
    account_calls: usize,
    simulate_calls: usize,
    sent: Vec<TransactionEnvelope>,
}

impl FakeLedger {
    pub fn new() -> Self {
        Self { passphrase: TESTNET_PASSPHRASE.to_string(), state: Mutex::new(State::default()) }
    }

    pub fn with_passphrase(passphrase: &str) -> Self {
        Self { passphrase: passphrase.to_string(), state: Mutex::new(State::default()) }
    }

    pub fn fund(&self, address: &str, sequence: i64) {
        let address: LedgerAddress = address.parse().unwrap();
        self.state.lock().unwrap().accounts.insert(address, sequence);
    }

    /// Hashes handed out by successive submissions.
    pub fn queue_hashes(&self, hashes: &[&str]) {
        let mut state = self.state.lock().unwrap();
        state.hashes.extend(hashes.iter().map(|hash| hash.to_string()));
    }

    pub fn fail_simulations(&self, error: &str) {
        self.state.lock().unwrap().simulation_error = Some(error.to_string());
    }

    pub fn account_calls(&self) -> usize {
        self.state.lock().unwrap().account_calls
    }

    pub fn simulate_calls(&self) -> usize {
        self.state.lock().unwrap().simulate_calls
    }

    pub fn submissions(&self) -> Vec<TransactionEnvelope> {
        self.state.lock().unwrap().sent.clone()
    }

    pub fn sequence(&self, address: &str) -> Option<i64> {
        let address: LedgerAddress = address.parse().unwrap();
        self.state.lock().unwrap().accounts.get(&address).copied()
    }
}

pub fn transaction_data(resource_fee: i64) -> SorobanTransactionData {
    let mut bytes = vec![0u8; 32];
    bytes[24..].copy_from_slice(&resource_fee.to_be_bytes());
    SorobanTransactionData::from_xdr(bytes, Limits::none()).unwrap()
}

pub fn transaction(envelope: &TransactionEnvelope) -> &Transaction {
    match envelope {
        TransactionEnvelope::Tx(v1) => &v1.tx,
        other => panic!("unexpected envelope {other:?}"),
    }
}

fn call(envelope: &TransactionEnvelope) -> &InvokeContractArgs {
    invoke_contract_args(transaction(envelope)).expect("single contract invocation")
}

fn method(args: &InvokeContractArgs) -> String {
    String::from_utf8(args.function_name.0.to_vec()).unwrap()
}

fn item_arg(args: &InvokeContractArgs, index: usize) -> String {
    ItemName::from_sc_val(&args.args.as_slice()[index]).unwrap().to_string()
}

fn source_auth(args: &InvokeContractArgs) -> SorobanAuthorizationEntry {
    SorobanAuthorizationEntry {
        credentials: SorobanCredentials::SourceAccount,
        root_invocation: SorobanAuthorizedInvocation {
            function: SorobanAuthorizedFunction::ContractFn(args.clone()),
            sub_invocations: VecM::default(),
        },
    }
}

#[async_trait]
impl LedgerRpc for FakeLedger {
    async fn get_network(&self) -> custody_rpc::Result<NetworkInfo> {
        Ok(NetworkInfo {
            passphrase: self.passphrase.clone(),
            protocol_version: 22,
            friendbot_url: None,
        })
    }

    async fn get_account(&self, account_id: &AccountId) -> custody_rpc::Result<AccountState> {
        let mut state = self.state.lock().unwrap();
        state.account_calls += 1;
        let address = LedgerAddress::from_account_id(account_id);
        match state.accounts.get(&address) {
            Some(sequence) => Ok(AccountState::new(account_id.clone(), *sequence)),
            None => Err(RpcError::AccountNotFound(address.to_string())),
        }
    }

    async fn simulate_transaction(
        &self,
        envelope: &TransactionEnvelope,
    ) -> custody_rpc::Result<SimulateTransactionResponse> {
        let mut state = self.state.lock().unwrap();
        state.simulate_calls += 1;
        if let Some(error) = &state.simulation_error {
            return Ok(SimulateTransactionResponse::failed(100, error.clone()));
        }

        let args = call(envelope);
        let (retval, auth) = match method(args).as_str() {
            QUERY_CUSTODY => {
                let custodian = state.custody.get(&item_arg(args, 0));
                (custodian.map(LedgerAddress::to_sc_val).unwrap_or(ScVal::Void), vec![])
            }
            ASSIGN_CUSTODY | RELEASE_CUSTODY => (ScVal::Void, vec![source_auth(args)]),
            other => {
                return Ok(SimulateTransactionResponse::failed(100, format!("no method {other}")))
            }
        };

        Ok(SimulateTransactionResponse {
            latest_ledger: 100,
            error: None,
            transaction_data: Some(transaction_data(MIN_RESOURCE_FEE as i64)),
            min_resource_fee: MIN_RESOURCE_FEE,
            results: vec![SimulateHostFunctionResult { auth, retval }],
            restore_required: false,
        })
    }

    async fn send_transaction(
        &self,
        envelope: &TransactionEnvelope,
    ) -> custody_rpc::Result<SendTransactionResponse> {
        let mut state = self.state.lock().unwrap();
        state.sent.push(envelope.clone());

        let tx = transaction(envelope);
        let args = call(envelope);
        let item = item_arg(args, 1);
        match method(args).as_str() {
            ASSIGN_CUSTODY => {
                let borrower = LedgerAddress::from_sc_val(&args.args.as_slice()[2]).unwrap();
                state.custody.insert(item, borrower);
            }
            RELEASE_CUSTODY => {
                state.custody.remove(&item);
            }
            other => panic!("{other} should never be submitted"),
        }

        let signer = match &tx.source_account {
            stellar_xdr::curr::MuxedAccount::Ed25519(key) => LedgerAddress::Account(key.0),
            other => panic!("unexpected source {other:?}"),
        };
        state.accounts.insert(signer, tx.seq_num.0);

        let count = state.sent.len();
        let hash = state.hashes.pop_front().unwrap_or_else(|| format!("{count:064x}"));
        Ok(SendTransactionResponse {
            hash,
            status: SendTransactionStatus::Pending,
            latest_ledger: 101,
            error_result_xdr: None,
        })
    }
}
