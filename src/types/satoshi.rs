use derive_more::{AsMut, AsRef, Deref, Display, From, Into};
use serde::{Deserialize, Serialize};
use std::ops::Add;

/// Bitcoin amount measured in millisatoshi
#[derive(
    AsMut,
    AsRef,
    Clone,
    Copy,
    Debug,
    Deref,
    Deserialize,
    Display,
    Eq,
    From,
    Into,
    Ord,
    PartialEq,
    PartialOrd,
    Serialize,
)]
pub struct MilliSatoshi(pub u64);

impl MilliSatoshi {
    /// Whole satoshis, rounded down. This is the display unit for zaps.
    pub fn to_sats(&self) -> u64 {
        self.0 / 1000
    }

    // Mock data for testing
    #[allow(dead_code)]
    pub(crate) fn mock() -> MilliSatoshi {
        MilliSatoshi(15423000)
    }
}

impl Add<MilliSatoshi> for MilliSatoshi {
    type Output = Self;

    fn add(self, rhs: MilliSatoshi) -> Self::Output {
        MilliSatoshi(self.0 + rhs.0)
    }
}
