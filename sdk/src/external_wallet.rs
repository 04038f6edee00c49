// Copyright (c) Mysten Labs, Inc.
// Copyright (c) Soma Contributors
// SPDX-License-Identifier: Apache-2.0

use std::process::Stdio;

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use tokio::io::AsyncWriteExt;
use tokio::process::Command;
use tracing::debug;

use crate::types::LedgerAddress;
use crate::wallet::{
    classify_signer_message, NetworkTarget, SignerError, SignerErrorKind, WalletCapability,
};

/// External program that signs transactions on behalf of the user.
///
/// The unsigned base64 envelope is written to the program's stdin and the signed
/// envelope is read from its stdout. Arguments may contain `{network}` and
/// `{passphrase}` placeholders.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct SignerCommand {
    pub program: String,
    #[serde(default)]
    pub sign_args: Vec<String>,
    /// Arguments that make the program print the signing address. Without them the
    /// wallet cannot answer access requests.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub address_args: Option<Vec<String>>,
}

impl SignerCommand {
    pub fn new(program: impl Into<String>, sign_args: Vec<String>) -> Self {
        Self { program: program.into(), sign_args, address_args: None }
    }

    pub fn with_address_args(mut self, address_args: Vec<String>) -> Self {
        self.address_args = Some(address_args);
        self
    }
}

/// [`WalletCapability`] backed by a [`SignerCommand`].
#[derive(Clone, Debug)]
pub struct CommandWallet {
    command: SignerCommand,
    network: Option<NetworkTarget>,
}

impl CommandWallet {
    pub fn new(command: SignerCommand) -> Self {
        Self { command, network: None }
    }

    /// Network used to fill placeholders when asking for the signing address.
    pub fn with_network(mut self, network: NetworkTarget) -> Self {
        self.network = Some(network);
        self
    }

    async fn run(
        &self,
        args: &[String],
        network: Option<&NetworkTarget>,
        input: Option<&str>,
    ) -> Result<String, SignerError> {
        let args: Vec<String> = args.iter().map(|arg| substitute(arg, network)).collect();
        debug!(program = %self.command.program, ?args, "Invoking signer");

        let mut child = Command::new(&self.command.program)
            .args(&args)
            .stdin(Stdio::piped())
            .stdout(Stdio::piped())
            .stderr(Stdio::piped())
            .kill_on_drop(true)
            .spawn()
            .map_err(|e| {
                SignerError::new(
                    SignerErrorKind::Unavailable,
                    format!("cannot start signer {:?}: {e}", self.command.program),
                )
            })?;

        if let Some(mut stdin) = child.stdin.take() {
            if let Some(input) = input {
                stdin.write_all(input.as_bytes()).await.map_err(|e| {
                    SignerError::new(SignerErrorKind::Other, format!("cannot write to signer: {e}"))
                })?;
            }
            // Closing stdin signals end of input.
            drop(stdin);
        }

        let output = child.wait_with_output().await.map_err(|e| {
            SignerError::new(SignerErrorKind::Other, format!("signer did not finish: {e}"))
        })?;

        if !output.status.success() {
            let stderr = String::from_utf8_lossy(&output.stderr).trim().to_string();
            let message = if stderr.is_empty() {
                format!("signer exited with {}", output.status)
            } else {
                stderr
            };
            return Err(SignerError::new(classify_signer_message(&message), message));
        }

        let stdout = String::from_utf8_lossy(&output.stdout).trim().to_string();
        if stdout.is_empty() {
            return Err(SignerError::new(SignerErrorKind::Other, "signer produced no output"));
        }
        Ok(stdout)
    }
}

fn substitute(arg: &str, network: Option<&NetworkTarget>) -> String {
    match network {
        Some(network) => arg
            .replace("{network}", &network.name)
            .replace("{passphrase}", &network.passphrase),
        None => arg.to_string(),
    }
}

#[async_trait]
impl WalletCapability for CommandWallet {
    async fn is_connected(&self) -> bool {
        self.request_access().await.is_ok()
    }

    async fn request_access(&self) -> Result<LedgerAddress, SignerError> {
        let Some(address_args) = &self.command.address_args else {
            return Err(SignerError::new(
                SignerErrorKind::Unavailable,
                "signer is not configured to report an address",
            ));
        };
        let output = self.run(address_args, self.network.as_ref(), None).await?;
        LedgerAddress::parse_account("signer", &output)
            .map_err(|e| SignerError::new(SignerErrorKind::Other, e.to_string()))
    }

    async fn sign_transaction(
        &self,
        transaction_xdr: &str,
        network: &NetworkTarget,
    ) -> Result<String, SignerError> {
        self.run(&self.command.sign_args, Some(network), Some(transaction_xdr)).await
    }
}

#[cfg(all(test, unix))]
mod tests {
    use super::*;

    const LENDER: &str = "GAAQCAIBAEAQCAIBAEAQCAIBAEAQCAIBAEAQCAIBAEAQCAIBAEAQDZ7H";

    fn testnet() -> NetworkTarget {
        NetworkTarget {
            name: "TESTNET".to_string(),
            passphrase: "Test SDF Network ; September 2015".to_string(),
        }
    }

    fn sh(script: &str) -> SignerCommand {
        SignerCommand::new("sh", vec!["-c".to_string(), script.to_string()])
    }

    #[tokio::test]
    async fn test_sign_pipes_envelope_through_program() {
        let wallet = CommandWallet::new(sh("cat"));
        let signed = wallet.sign_transaction("AAAAAgAAAAB=", &testnet()).await.unwrap();
        assert_eq!(signed, "AAAAAgAAAAB=");
    }

    #[tokio::test]
    async fn test_placeholders_are_substituted() {
        let wallet = CommandWallet::new(sh("echo {network}"));
        let signed = wallet.sign_transaction("ignored", &testnet()).await.unwrap();
        assert_eq!(signed, "TESTNET");
    }

    #[tokio::test]
    async fn test_missing_program_is_unavailable() {
        let wallet = CommandWallet::new(SignerCommand::new("custody-no-such-signer", vec![]));
        let err = wallet.sign_transaction("AAAA", &testnet()).await.unwrap_err();
        assert_eq!(err.kind, SignerErrorKind::Unavailable);
    }

    #[tokio::test]
    async fn test_refusal_is_declined() {
        let wallet = CommandWallet::new(sh("echo 'User declined access' >&2; exit 1"));
        let err = wallet.sign_transaction("AAAA", &testnet()).await.unwrap_err();
        assert_eq!(err.kind, SignerErrorKind::Declined);
        assert_eq!(err.message, "User declined access");
    }

    #[tokio::test]
    async fn test_empty_output_is_an_error() {
        let wallet = CommandWallet::new(sh("true"));
        let err = wallet.sign_transaction("AAAA", &testnet()).await.unwrap_err();
        assert_eq!(err.kind, SignerErrorKind::Other);
    }

    #[tokio::test]
    async fn test_request_access_reads_address() {
        let command = sh("cat").with_address_args(vec!["-c".to_string(), format!("echo {LENDER}")]);
        let wallet = CommandWallet::new(command).with_network(testnet());
        let address = wallet.request_access().await.unwrap();
        assert_eq!(address.to_string(), LENDER);
        assert!(wallet.is_connected().await);
    }

    #[tokio::test]
    async fn test_request_access_without_address_args() {
        let wallet = CommandWallet::new(sh("cat"));
        let err = wallet.request_access().await.unwrap_err();
        assert_eq!(err.kind, SignerErrorKind::Unavailable);
        assert!(!wallet.is_connected().await);
    }
}
