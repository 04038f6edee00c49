// Copyright (c) Mysten Labs, Inc.
// Copyright (c) Soma Contributors
// SPDX-License-Identifier: Apache-2.0

//! Interactive signer: shows the unsigned transaction and waits for the user to paste
//! it back signed, e.g. from `stellar tx sign` or a hardware wallet companion app.

use std::io::{self, BufRead, IsTerminal, Write};

use async_trait::async_trait;
use custody_sdk::{LedgerAddress, NetworkTarget, SignerError, SignerErrorKind, WalletCapability};

#[derive(Clone, Copy, Debug, Default)]
pub struct PromptWallet;

#[async_trait]
impl WalletCapability for PromptWallet {
    async fn is_connected(&self) -> bool {
        io::stdin().is_terminal()
    }

    async fn request_access(&self) -> Result<LedgerAddress, SignerError> {
        let answer = prompt("Lender account address (G...): ".to_string()).await?;
        if answer.is_empty() {
            return Err(SignerError::new(SignerErrorKind::Declined, "User declined access"));
        }
        LedgerAddress::parse_account("lender", &answer)
            .map_err(|e| SignerError::new(SignerErrorKind::Other, e.to_string()))
    }

    async fn sign_transaction(
        &self,
        transaction_xdr: &str,
        network: &NetworkTarget,
    ) -> Result<String, SignerError> {
        let message = format!(
            "Sign this transaction for {} ({}):\n\n{transaction_xdr}\n\n\
             Signed transaction XDR (empty to decline): ",
            network.name, network.passphrase
        );
        let answer = prompt(message).await?;
        if answer.is_empty() {
            return Err(SignerError::new(SignerErrorKind::Declined, "User declined signing"));
        }
        Ok(answer)
    }
}

async fn prompt(message: String) -> Result<String, SignerError> {
    tokio::task::spawn_blocking(move || {
        let mut stderr = io::stderr();
        let _ = write!(stderr, "{message}");
        let _ = stderr.flush();
        read_answer(&mut io::stdin().lock())
    })
    .await
    .map_err(|e| SignerError::new(SignerErrorKind::Other, e.to_string()))?
}

/// Read one trimmed line. End of input means nobody is there to answer.
fn read_answer(reader: &mut impl BufRead) -> Result<String, SignerError> {
    let mut line = String::new();
    match reader.read_line(&mut line) {
        Ok(0) => Err(SignerError::new(SignerErrorKind::Unavailable, "no terminal input available")),
        Ok(_) => Ok(line.trim().to_string()),
        Err(e) => Err(SignerError::new(SignerErrorKind::Unavailable, e.to_string())),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_read_answer_trims_line() {
        let mut input = io::Cursor::new("AAAAAgAAAA==\n");
        assert_eq!(read_answer(&mut input).unwrap(), "AAAAAgAAAA==");
    }

    #[test]
    fn test_blank_line_is_empty_answer() {
        let mut input = io::Cursor::new("\n");
        assert_eq!(read_answer(&mut input).unwrap(), "");
    }

    #[test]
    fn test_closed_input_is_unavailable() {
        let mut input = io::Cursor::new("");
        let err = read_answer(&mut input).unwrap_err();
        assert_eq!(err.kind, SignerErrorKind::Unavailable);
    }
}
