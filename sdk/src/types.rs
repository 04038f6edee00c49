// Copyright (c) Mysten Labs, Inc.
// Copyright (c) Soma Contributors
// SPDX-License-Identifier: Apache-2.0

use std::fmt::{self, Display, Formatter};
use std::str::FromStr;

use serde::{Deserialize, Deserializer, Serialize, Serializer};
use stellar_strkey::Strkey;
use stellar_xdr::curr::{
    AccountId, Hash, MuxedAccount, PublicKey, ScAddress, ScSymbol, ScVal, StringM, Uint256,
};

use crate::error::EncodingError;

/// Maximum length of a contract symbol.
pub const MAX_ITEM_NAME_LEN: usize = 32;

/// A ledger identity in strkey form: a `G...` account or a `C...` contract.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum LedgerAddress {
    Account([u8; 32]),
    Contract([u8; 32]),
}

impl LedgerAddress {
    /// The all-zero account, used as the source of read-only simulations.
    pub const PLACEHOLDER: LedgerAddress = LedgerAddress::Account([0; 32]);

    /// Parse any supported address, naming `field` in the error.
    pub fn parse(field: &'static str, value: &str) -> Result<Self, EncodingError> {
        if value.is_empty() {
            return Err(EncodingError::EmptyAddress { field });
        }
        match Strkey::from_string(value) {
            Ok(Strkey::PublicKeyEd25519(key)) => Ok(LedgerAddress::Account(key.0)),
            Ok(Strkey::Contract(contract)) => Ok(LedgerAddress::Contract(contract.0)),
            Ok(_) => Err(EncodingError::InvalidAddress {
                field,
                value: value.to_string(),
                reason: "unsupported strkey type".into(),
            }),
            Err(e) => Err(EncodingError::InvalidAddress {
                field,
                value: value.to_string(),
                reason: format!("{e:?}"),
            }),
        }
    }

    /// Parse an address that must be able to sign, i.e. a `G...` account.
    pub fn parse_account(field: &'static str, value: &str) -> Result<Self, EncodingError> {
        let address = Self::parse(field, value)?;
        if !address.is_account() {
            return Err(EncodingError::NotAnAccount { field, value: value.to_string() });
        }
        Ok(address)
    }

    /// Parse a contract id, i.e. a `C...` address.
    pub fn parse_contract(field: &'static str, value: &str) -> Result<Self, EncodingError> {
        let address = Self::parse(field, value)?;
        if address.is_account() {
            return Err(EncodingError::NotAContract { field, value: value.to_string() });
        }
        Ok(address)
    }

    pub fn is_account(&self) -> bool {
        matches!(self, LedgerAddress::Account(_))
    }

    pub fn account_id(&self) -> Option<AccountId> {
        match self {
            LedgerAddress::Account(key) => {
                Some(AccountId(PublicKey::PublicKeyTypeEd25519(Uint256(*key))))
            }
            LedgerAddress::Contract(_) => None,
        }
    }

    pub fn muxed_account(&self) -> Option<MuxedAccount> {
        match self {
            LedgerAddress::Account(key) => Some(MuxedAccount::Ed25519(Uint256(*key))),
            LedgerAddress::Contract(_) => None,
        }
    }

    pub fn to_sc_address(&self) -> ScAddress {
        match self {
            LedgerAddress::Account(key) => {
                ScAddress::Account(AccountId(PublicKey::PublicKeyTypeEd25519(Uint256(*key))))
            }
            LedgerAddress::Contract(id) => ScAddress::Contract(Hash(*id)),
        }
    }

    pub fn to_sc_val(&self) -> ScVal {
        ScVal::Address(self.to_sc_address())
    }

    #[allow(unreachable_patterns)]
    pub fn from_sc_address(address: &ScAddress) -> Option<Self> {
        match address {
            ScAddress::Account(AccountId(PublicKey::PublicKeyTypeEd25519(Uint256(key)))) => {
                Some(LedgerAddress::Account(*key))
            }
            ScAddress::Contract(Hash(id)) => Some(LedgerAddress::Contract(*id)),
            _ => None,
        }
    }

    pub fn from_sc_val(value: &ScVal) -> Option<Self> {
        match value {
            ScVal::Address(address) => Self::from_sc_address(address),
            _ => None,
        }
    }

    pub fn from_account_id(account_id: &AccountId) -> Self {
        let PublicKey::PublicKeyTypeEd25519(Uint256(key)) = &account_id.0;
        LedgerAddress::Account(*key)
    }

    /// `GABCDE...WXYZ` form used in confirmations.
    pub fn abbreviated(&self) -> String {
        let full = self.to_string();
        format!("{}...{}", &full[..6], &full[full.len() - 4..])
    }
}

impl Display for LedgerAddress {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        match self {
            LedgerAddress::Account(key) => {
                write!(f, "{}", stellar_strkey::ed25519::PublicKey(*key))
            }
            LedgerAddress::Contract(id) => write!(f, "{}", stellar_strkey::Contract(*id)),
        }
    }
}

impl FromStr for LedgerAddress {
    type Err = EncodingError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse("ledger", s)
    }
}

impl Serialize for LedgerAddress {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

impl<'de> Deserialize<'de> for LedgerAddress {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let value = String::deserialize(deserializer)?;
        value.parse().map_err(serde::de::Error::custom)
    }
}

/// Name of a trackable item, encoded on-chain as a contract symbol.
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize)]
pub struct ItemName(String);

impl ItemName {
    pub fn new(name: &str) -> Result<Self, EncodingError> {
        if name.is_empty() {
            return Err(EncodingError::EmptyItem);
        }
        if name.len() > MAX_ITEM_NAME_LEN {
            return Err(EncodingError::ItemTooLong(name.to_string()));
        }
        if let Some(ch) = name.chars().find(|c| !(c.is_ascii_alphanumeric() || *c == '_')) {
            return Err(EncodingError::InvalidItemChar { name: name.to_string(), ch });
        }
        Ok(Self(name.to_string()))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn to_sc_val(&self) -> Result<ScVal, EncodingError> {
        Ok(ScVal::Symbol(symbol(&self.0)?))
    }

    pub fn from_sc_val(value: &ScVal) -> Option<Self> {
        match value {
            ScVal::Symbol(ScSymbol(name)) => {
                String::from_utf8(name.to_vec()).ok().and_then(|name| Self::new(&name).ok())
            }
            _ => None,
        }
    }
}

impl Display for ItemName {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl FromStr for ItemName {
    type Err = EncodingError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::new(s)
    }
}

pub(crate) fn symbol(name: &str) -> Result<ScSymbol, EncodingError> {
    Ok(ScSymbol(StringM::try_from(name.as_bytes().to_vec())?))
}

/// Hex hash of a submitted transaction, the proof that an action took place.
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct TransactionHash(String);

impl TransactionHash {
    pub fn new(hash: impl Into<String>) -> Self {
        Self(hash.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl Display for TransactionHash {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl PartialEq<&str> for TransactionHash {
    fn eq(&self, other: &&str) -> bool {
        self.0 == *other
    }
}
