// Copyright (c) Mysten Labs, Inc.
// Copyright (c) Soma Contributors
// SPDX-License-Identifier: Apache-2.0

use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Mutex;

use async_trait::async_trait;
use custody_sdk::{LedgerAddress, NetworkTarget, SignerError, SignerErrorKind, WalletCapability};
use stellar_xdr::curr::{
    BytesM, DecoratedSignature, Limits, ReadXdr, Signature, SignatureHint, TransactionEnvelope,
    WriteXdr,
};

/// Wallet that signs with a dummy signature or refuses with a canned message.
pub struct ScriptedWallet {
    address: Option<LedgerAddress>,
    refusal: Option<String>,
    raise_fee: bool,
    sign_calls: AtomicUsize,
    networks: Mutex<Vec<NetworkTarget>>,
}

impl ScriptedWallet {
    pub fn approving(address: &str) -> Self {
        Self {
            address: Some(address.parse().unwrap()),
            refusal: None,
            raise_fee: false,
            sign_calls: AtomicUsize::new(0),
            networks: Mutex::new(vec![]),
        }
    }

    pub fn refusing(message: &str) -> Self {
        Self {
            address: None,
            refusal: Some(message.to_string()),
            raise_fee: false,
            sign_calls: AtomicUsize::new(0),
            networks: Mutex::new(vec![]),
        }
    }

    /// Signs, but bumps the fee of what it was asked to sign first.
    pub fn raising_fee(address: &str) -> Self {
        Self { raise_fee: true, ..Self::approving(address) }
    }

    /// Neither connected nor able to grant access.
    pub fn absent() -> Self {
        Self { address: None, refusal: None, ..Self::approving(super::LENDER) }
    }

    pub fn sign_calls(&self) -> usize {
        self.sign_calls.load(Ordering::SeqCst)
    }

    pub fn networks(&self) -> Vec<NetworkTarget> {
        self.networks.lock().unwrap().clone()
    }
}

#[async_trait]
impl WalletCapability for ScriptedWallet {
    async fn is_connected(&self) -> bool {
        self.address.is_some()
    }

    async fn request_access(&self) -> Result<LedgerAddress, SignerError> {
        match (&self.address, &self.refusal) {
            (Some(address), _) => Ok(*address),
            (None, Some(refusal)) => Err(SignerError::from_message(refusal.clone())),
            (None, None) => Err(SignerError::new(SignerErrorKind::Unavailable, "no wallet")),
        }
    }

    async fn sign_transaction(
        &self,
        transaction_xdr: &str,
        network: &NetworkTarget,
    ) -> Result<String, SignerError> {
        self.sign_calls.fetch_add(1, Ordering::SeqCst);
        self.networks.lock().unwrap().push(network.clone());
        if let Some(refusal) = &self.refusal {
            return Err(SignerError::from_message(refusal.clone()));
        }

        let mut envelope = TransactionEnvelope::from_xdr_base64(transaction_xdr, Limits::none())
            .map_err(|e| SignerError::new(SignerErrorKind::Other, e.to_string()))?;
        if let TransactionEnvelope::Tx(v1) = &mut envelope {
            if self.raise_fee {
                v1.tx.fee += 1_000;
            }
            let mut signatures = v1.signatures.to_vec();
            signatures.push(DecoratedSignature {
                hint: SignatureHint([0, 0, 0, 1]),
                signature: Signature(BytesM::try_from(vec![1u8; 64]).unwrap()),
            });
            v1.signatures = signatures.try_into().unwrap();
        }
        Ok(envelope.to_xdr_base64(Limits::none()).unwrap())
    }
}
