use crate::Error;
use derive_more::{AsRef, Deref, Display, Into};
use serde::{Deserialize, Serialize};

/// This is a public key, which identifies an actor (usually a person)
/// and is shared, as a hex string.
///
/// This crate does not verify keys cryptographically; it only checks that
/// the string is well formed. Key handling belongs to the surrounding
/// application.
#[derive(
    AsRef, Clone, Debug, Deref, Deserialize, Display, Eq, Hash, Into, PartialEq, Serialize,
)]
pub struct PublicKeyHex(String);

impl PublicKeyHex {
    /// Try from &str
    pub fn try_from_str(s: &str) -> Result<PublicKeyHex, Error> {
        Self::try_from_string(s.to_owned())
    }

    /// Try from String
    pub fn try_from_string(s: String) -> Result<PublicKeyHex, Error> {
        if s.len() != 64 {
            return Err(Error::InvalidPublicKey);
        }
        let vec: Vec<u8> = hex::decode(&s)?;
        if vec.len() != 32 {
            return Err(Error::InvalidPublicKey);
        }
        Ok(PublicKeyHex(s))
    }

    /// As &str
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Into String
    pub fn into_string(self) -> String {
        self.0
    }

    // Mock data for testing
    #[allow(dead_code)]
    pub(crate) fn mock() -> PublicKeyHex {
        PublicKeyHex("ee11a5dff40c19a555f41fe42b48f00e618c91225622ae37b6c2bb67b76c4e49".to_owned())
    }
}

impl TryFrom<&str> for PublicKeyHex {
    type Error = Error;

    fn try_from(s: &str) -> Result<PublicKeyHex, Error> {
        PublicKeyHex::try_from_str(s)
    }
}
