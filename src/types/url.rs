use derive_more::{AsMut, AsRef, Deref, Display, From, FromStr, Into};
use serde::{Deserialize, Serialize};

/// A relay Url, unchecked. Relay connectivity is owned by the surrounding
/// application; this crate only needs to know which relays are available.
#[derive(
    AsMut,
    AsRef,
    Clone,
    Debug,
    Deref,
    Deserialize,
    Display,
    Eq,
    From,
    FromStr,
    Hash,
    Into,
    Ord,
    PartialEq,
    PartialOrd,
    Serialize,
)]
pub struct RelayUrl(pub String);

impl RelayUrl {
    // Mock data for testing
    #[allow(dead_code)]
    pub(crate) fn mock() -> RelayUrl {
        RelayUrl("wss://relay.example.com".to_string())
    }
}
