//! Signing accounts derived from secret URIs.

use std::fmt;
use std::str::FromStr;

use subxt::utils::AccountId32;
use subxt_signer::sr25519::Keypair;
use subxt_signer::SecretUri;

use crate::error::ChainError;

/// A signing identity plus its derived on-chain address.
///
/// Immutable once created; cloned into whichever worker submits on its
/// behalf.
#[derive(Clone)]
pub struct Account {
    signer: Keypair,
    id: AccountId32,
}

impl Account {
    /// Derives an account from a secret URI (`//Alice`) or a mnemonic phrase.
    pub fn from_uri(uri: &str) -> Result<Self, ChainError> {
        let parsed = SecretUri::from_str(uri)
            .map_err(|e| ChainError::InvalidParams(format!("bad account seed: {e}")))?;
        let signer = Keypair::from_uri(&parsed)
            .map_err(|e| ChainError::InvalidParams(format!("bad account seed: {e}")))?;
        Ok(Self::from_signer(signer))
    }

    /// Well-known dev sudo account.
    pub fn alice() -> Self {
        Self::from_signer(subxt_signer::sr25519::dev::alice())
    }

    /// Well-known dev account used as the maker in stress runs.
    pub fn bob() -> Self {
        Self::from_signer(subxt_signer::sr25519::dev::bob())
    }

    fn from_signer(signer: Keypair) -> Self {
        let id = AccountId32(signer.public_key().0);
        Self { signer, id }
    }

    /// Account id used in call arguments.
    pub fn id(&self) -> &AccountId32 {
        &self.id
    }

    /// SS58 address string.
    pub fn address(&self) -> String {
        self.id.to_string()
    }

    /// The underlying signer.
    pub fn signer(&self) -> &Keypair {
        &self.signer
    }
}

impl fmt::Debug for Account {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Account").field("address", &self.address()).finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn dev_accounts_are_distinct() {
        assert_ne!(Account::alice().id(), Account::bob().id());
    }

    #[test]
    fn uri_derivation_matches_dev_keyring() {
        let derived = Account::from_uri("//Alice").unwrap();
        assert_eq!(derived.id(), Account::alice().id());
        assert_eq!(derived.address(), Account::alice().address());
    }

    #[test]
    fn garbage_seed_is_invalid_params() {
        let err = Account::from_uri("not a valid mnemonic phrase at all words").unwrap_err();
        assert!(matches!(err, ChainError::InvalidParams(_)));
    }
}
