use super::PublicKeyHex;
use serde::{Deserialize, Serialize};

/// The subset of a person's profile that zapping needs: who they are and
/// their lightning addresses, if any.
#[derive(Clone, Debug, Deserialize, Eq, PartialEq, Serialize)]
pub struct ZapProfile {
    /// Their public key
    pub pubkey: PublicKeyHex,

    /// Their LNURL (bech32 encoded), if any
    pub lud06: Option<String>,

    /// Their lightning address, if any
    pub lud16: Option<String>,
}

impl ZapProfile {
    /// Whether this person can receive zaps at all. True if they published
    /// either a lud06 LNURL or a lud16 lightning address.
    pub fn can_receive_zaps(&self) -> bool {
        let has = |field: &Option<String>| field.as_deref().is_some_and(|s| !s.is_empty());
        has(&self.lud06) || has(&self.lud16)
    }

    // Mock data for testing
    #[allow(dead_code)]
    pub(crate) fn mock() -> ZapProfile {
        ZapProfile {
            pubkey: PublicKeyHex::mock(),
            lud06: None,
            lud16: Some("decentbun13@walletofsatoshi.com".to_owned()),
        }
    }
}
