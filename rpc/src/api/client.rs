// Copyright (c) Mysten Labs, Inc.
// Copyright (c) Soma Contributors
// SPDX-License-Identifier: Apache-2.0

use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use stellar_xdr::curr::{
    AccountId, LedgerEntryData, LedgerKey, LedgerKeyAccount, Limits, ReadXdr, TransactionEnvelope,
    WriteXdr,
};
use tracing::debug;
use url::Url;

use crate::api::error::{Result, RpcError};
use crate::api::LedgerRpc;
use crate::types::{
    account_strkey, AccountState, LedgerEntriesResponse, NetworkInfo,
    RawSimulateTransactionResponse, SendTransactionResponse, SimulateTransactionResponse,
};

pub const DEFAULT_REQUEST_TIMEOUT: Duration = Duration::from_secs(30);

/// JSON-RPC 2.0 client for a Soroban RPC endpoint.
#[derive(Clone, Debug)]
pub struct Client {
    url: Url,
    http: reqwest::Client,
    next_id: Arc<AtomicU64>,
}

#[derive(Serialize)]
struct JsonRpcRequest<'a, P> {
    jsonrpc: &'static str,
    id: u64,
    method: &'a str,
    #[serde(skip_serializing_if = "Option::is_none")]
    params: Option<P>,
}

#[derive(Deserialize)]
struct JsonRpcResponse<R> {
    #[serde(default = "Option::default")]
    result: Option<R>,
    #[serde(default)]
    error: Option<JsonRpcErrorObject>,
}

#[derive(Debug, Deserialize)]
struct JsonRpcErrorObject {
    code: i64,
    message: String,
    #[serde(default)]
    data: Option<serde_json::Value>,
}

impl From<JsonRpcErrorObject> for RpcError {
    fn from(error: JsonRpcErrorObject) -> Self {
        let message = match error.data {
            Some(serde_json::Value::String(data)) => format!("{}: {}", error.message, data),
            Some(data) if !data.is_null() => format!("{}: {}", error.message, data),
            _ => error.message,
        };
        RpcError::Server { code: error.code, message }
    }
}

impl Client {
    pub fn new(url: &str) -> Result<Self> {
        Self::with_timeout(url, DEFAULT_REQUEST_TIMEOUT)
    }

    pub fn with_timeout(url: &str, request_timeout: Duration) -> Result<Self> {
        let parsed = Url::parse(url).map_err(|e| RpcError::InvalidEndpoint {
            url: url.to_string(),
            reason: e.to_string(),
        })?;
        if !matches!(parsed.scheme(), "http" | "https") {
            return Err(RpcError::InvalidEndpoint {
                url: url.to_string(),
                reason: format!("unsupported scheme {}", parsed.scheme()),
            });
        }
        let http = reqwest::Client::builder().timeout(request_timeout).build()?;

        Ok(Self {
            url: parsed,
            http,
            next_id: Arc::new(AtomicU64::new(1)),
        })
    }

    pub fn url(&self) -> &Url {
        &self.url
    }

    async fn request<P, R>(&self, method: &str, params: Option<P>) -> Result<R>
    where
        P: Serialize,
        R: DeserializeOwned,
    {
        let id = self.next_id.fetch_add(1, Ordering::Relaxed);
        debug!(method, id, url = %self.url, "sending RPC request");

        let response = self
            .http
            .post(self.url.clone())
            .json(&JsonRpcRequest { jsonrpc: "2.0", id, method, params })
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(RpcError::HttpStatus { status: status.as_u16(), body });
        }

        let body: JsonRpcResponse<R> = response.json().await?;
        if let Some(error) = body.error {
            return Err(error.into());
        }
        body.result.ok_or_else(|| {
            RpcError::malformed(format!("{method} returned neither result nor error"))
        })
    }
}

#[async_trait]
impl LedgerRpc for Client {
    async fn get_network(&self) -> Result<NetworkInfo> {
        self.request::<(), _>("getNetwork", None).await
    }

    async fn get_account(&self, account_id: &AccountId) -> Result<AccountState> {
        let key = LedgerKey::Account(LedgerKeyAccount { account_id: account_id.clone() })
            .to_xdr_base64(Limits::none())?;
        let response: LedgerEntriesResponse = self
            .request("getLedgerEntries", Some(serde_json::json!({ "keys": [key] })))
            .await?;

        let entry = response
            .entries
            .unwrap_or_default()
            .into_iter()
            .next()
            .ok_or_else(|| RpcError::AccountNotFound(account_strkey(account_id)))?;

        match LedgerEntryData::from_xdr_base64(&entry.xdr, Limits::none())? {
            LedgerEntryData::Account(account) => {
                Ok(AccountState::new(account_id.clone(), account.seq_num.0))
            }
            _ => Err(RpcError::malformed("getLedgerEntries did not return an account entry")),
        }
    }

    async fn simulate_transaction(
        &self,
        envelope: &TransactionEnvelope,
    ) -> Result<SimulateTransactionResponse> {
        let transaction = envelope.to_xdr_base64(Limits::none())?;
        let raw: RawSimulateTransactionResponse = self
            .request(
                "simulateTransaction",
                Some(serde_json::json!({ "transaction": transaction })),
            )
            .await?;
        raw.try_into()
    }

    async fn send_transaction(
        &self,
        envelope: &TransactionEnvelope,
    ) -> Result<SendTransactionResponse> {
        let transaction = envelope.to_xdr_base64(Limits::none())?;
        self.request(
            "sendTransaction",
            Some(serde_json::json!({ "transaction": transaction })),
        )
        .await
    }
}
