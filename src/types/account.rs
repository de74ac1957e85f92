use super::{PublicKeyHex, RelayUrl};
use serde::{Deserialize, Serialize};

/// What a quick zap sends when the user has not picked anything:
/// the account's configured default amount, message and emoji.
#[derive(Clone, Debug, Deserialize, Eq, PartialEq, Serialize)]
pub struct ZapDefaults {
    /// Default zap amount in sats
    pub amount: u64,

    /// Default zap message
    pub message: String,

    /// Default zap emoji, if configured
    pub emoji: Option<String>,
}

impl Default for ZapDefaults {
    fn default() -> Self {
        ZapDefaults {
            amount: 10,
            message: "".to_owned(),
            emoji: None,
        }
    }
}

/// The signed-in account as seen by the zap subsystem
#[derive(Clone, Debug, Deserialize, Eq, PartialEq, Serialize)]
pub struct Account {
    /// The account public key, if the user is signed in
    pub public_key: Option<PublicKeyHex>,

    /// Relays the account is connected to
    pub relays: Vec<RelayUrl>,

    /// The account's default zap settings
    pub default_zap: ZapDefaults,
}

impl Account {
    /// Whether a signed-in identity is present
    pub fn has_public_key(&self) -> bool {
        self.public_key.is_some()
    }

    // Mock data for testing
    #[allow(dead_code)]
    pub(crate) fn mock() -> Account {
        Account {
            public_key: Some(PublicKeyHex::mock()),
            relays: vec![RelayUrl::mock()],
            default_zap: ZapDefaults::default(),
        }
    }
}
