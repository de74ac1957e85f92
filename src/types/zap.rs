use super::ZapDefaults;
use serde::{Deserialize, Serialize};

/// The parameters of a single zap action, fixed at the moment the user
/// commits the gesture. Passed by value through the settlement flow and
/// into the success/failure callbacks.
#[derive(Clone, Debug, Deserialize, Eq, PartialEq, Serialize)]
pub struct ZapCommit {
    /// The amount in sats
    pub amount: u64,

    /// The zap message, possibly empty
    pub message: String,

    /// An emoji attached to the zap, if any
    pub emoji: Option<String>,
}

impl ZapCommit {
    /// A quick zap carries the account's defaults
    pub fn from_defaults(defaults: &ZapDefaults) -> ZapCommit {
        ZapCommit {
            amount: defaults.amount,
            message: defaults.message.clone(),
            emoji: defaults.emoji.clone(),
        }
    }

    // Mock data for testing
    #[allow(dead_code)]
    pub(crate) fn mock() -> ZapCommit {
        ZapCommit {
            amount: 42,
            message: "onward".to_owned(),
            emoji: Some("⚡".to_owned()),
        }
    }
}
