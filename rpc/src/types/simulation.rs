// Copyright (c) Mysten Labs, Inc.
// Copyright (c) Soma Contributors
// SPDX-License-Identifier: Apache-2.0

use serde::{Deserialize, Serialize};
use stellar_xdr::curr::{Limits, ReadXdr, ScVal, SorobanAuthorizationEntry, SorobanTransactionData};

use crate::api::error::RpcError;

/// `simulateTransaction` result as it appears on the wire.
#[derive(Clone, Debug, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RawSimulateTransactionResponse {
    #[serde(default)]
    pub latest_ledger: u32,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub transaction_data: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub min_resource_fee: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub results: Option<Vec<RawSimulateHostFunctionResult>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub restore_preamble: Option<serde_json::Value>,
}

#[derive(Clone, Debug, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RawSimulateHostFunctionResult {
    #[serde(default)]
    pub auth: Option<Vec<String>>,
    pub xdr: String,
}

/// Decoded simulation outcome.
#[derive(Clone, Debug, PartialEq)]
pub struct SimulateTransactionResponse {
    pub latest_ledger: u32,
    /// Diagnostic reported by the network when the dry run failed.
    pub error: Option<String>,
    pub transaction_data: Option<SorobanTransactionData>,
    pub min_resource_fee: u64,
    pub results: Vec<SimulateHostFunctionResult>,
    /// Archived entries must be restored before this invocation can run.
    pub restore_required: bool,
}

#[derive(Clone, Debug, PartialEq)]
pub struct SimulateHostFunctionResult {
    pub auth: Vec<SorobanAuthorizationEntry>,
    pub retval: ScVal,
}

impl SimulateTransactionResponse {
    pub fn failed(latest_ledger: u32, error: impl Into<String>) -> Self {
        Self {
            latest_ledger,
            error: Some(error.into()),
            transaction_data: None,
            min_resource_fee: 0,
            results: vec![],
            restore_required: false,
        }
    }
}

impl TryFrom<RawSimulateTransactionResponse> for SimulateTransactionResponse {
    type Error = RpcError;

    fn try_from(raw: RawSimulateTransactionResponse) -> Result<Self, Self::Error> {
        if let Some(error) = raw.error {
            return Ok(Self::failed(raw.latest_ledger, error));
        }

        let transaction_data = match raw.transaction_data.as_deref() {
            None | Some("") => None,
            Some(data) => Some(SorobanTransactionData::from_xdr_base64(data, Limits::none())?),
        };

        let min_resource_fee = match raw.min_resource_fee.as_deref() {
            None | Some("") => 0,
            Some(fee) => fee
                .parse::<u64>()
                .map_err(|e| RpcError::malformed(format!("minResourceFee {fee:?}: {e}")))?,
        };

        let results = raw
            .results
            .unwrap_or_default()
            .into_iter()
            .map(|result| -> Result<SimulateHostFunctionResult, RpcError> {
                let auth = result
                    .auth
                    .unwrap_or_default()
                    .iter()
                    .map(|entry| SorobanAuthorizationEntry::from_xdr_base64(entry, Limits::none()))
                    .collect::<Result<Vec<_>, _>>()?;
                let retval = ScVal::from_xdr_base64(&result.xdr, Limits::none())?;
                Ok(SimulateHostFunctionResult { auth, retval })
            })
            .collect::<Result<Vec<_>, _>>()?;

        Ok(Self {
            latest_ledger: raw.latest_ledger,
            error: None,
            transaction_data,
            min_resource_fee,
            results,
            restore_required: raw.restore_preamble.is_some(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use stellar_xdr::curr::WriteXdr;

    // ext, empty footprint, zeroed resources, then the resource fee.
    fn transaction_data_base64(resource_fee: i64) -> String {
        let mut bytes = [0u8; 32];
        bytes[24..].copy_from_slice(&resource_fee.to_be_bytes());
        SorobanTransactionData::from_xdr(bytes, Limits::none())
            .unwrap()
            .to_xdr_base64(Limits::none())
            .unwrap()
    }

    #[test]
    fn test_decode_successful_simulation() {
        let json = serde_json::json!({
            "latestLedger": 1_200,
            "minResourceFee": "58181",
            "transactionData": transaction_data_base64(58_181),
            "results": [{ "auth": [], "xdr": ScVal::Void.to_xdr_base64(Limits::none()).unwrap() }],
        });
        let raw: RawSimulateTransactionResponse = serde_json::from_value(json).unwrap();
        let decoded = SimulateTransactionResponse::try_from(raw).unwrap();

        assert!(decoded.error.is_none());
        assert_eq!(decoded.latest_ledger, 1_200);
        assert_eq!(decoded.min_resource_fee, 58_181);
        assert_eq!(decoded.transaction_data.unwrap().resource_fee, 58_181);
        assert_eq!(decoded.results.len(), 1);
        assert_eq!(decoded.results[0].retval, ScVal::Void);
        assert!(!decoded.restore_required);
    }

    #[test]
    fn test_decode_failed_simulation_keeps_message() {
        let json = serde_json::json!({
            "latestLedger": 7,
            "error": "HostError: Error(Auth, InvalidAction)",
        });
        let raw: RawSimulateTransactionResponse = serde_json::from_value(json).unwrap();
        let decoded = SimulateTransactionResponse::try_from(raw).unwrap();

        assert_eq!(decoded.error.as_deref(), Some("HostError: Error(Auth, InvalidAction)"));
        assert!(decoded.transaction_data.is_none());
    }

    #[test]
    fn test_decode_restore_preamble() {
        let json = serde_json::json!({
            "latestLedger": 9,
            "minResourceFee": "100",
            "transactionData": transaction_data_base64(100),
            "results": [],
            "restorePreamble": { "minResourceFee": "50", "transactionData": "" },
        });
        let raw: RawSimulateTransactionResponse = serde_json::from_value(json).unwrap();
        let decoded = SimulateTransactionResponse::try_from(raw).unwrap();
        assert!(decoded.restore_required);
    }

    #[test]
    fn test_decode_rejects_bad_fee() {
        let raw = RawSimulateTransactionResponse {
            min_resource_fee: Some("lots".into()),
            ..Default::default()
        };
        let err = SimulateTransactionResponse::try_from(raw).unwrap_err();
        assert!(matches!(err, RpcError::MalformedResponse(_)), "{err}");
    }

    #[test]
    fn test_decode_rejects_bad_xdr() {
        let raw = RawSimulateTransactionResponse {
            results: Some(vec![RawSimulateHostFunctionResult { auth: None, xdr: "!!".into() }]),
            ..Default::default()
        };
        let err = SimulateTransactionResponse::try_from(raw).unwrap_err();
        assert!(matches!(err, RpcError::Xdr(_)), "{err}");
    }
}
