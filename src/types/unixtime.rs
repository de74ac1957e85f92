use derive_more::{AsMut, AsRef, Deref, From, Into};
use serde::{Deserialize, Serialize};
use std::ops::Add;
use std::time::{SystemTime, UNIX_EPOCH};

/// An integer count of the number of seconds from 1st January 1970.
/// This does not count any of the leap seconds that have occurred, it
/// simply presumes UTC never had leap seconds; yet it is well known
/// and well understood.
#[derive(
    AsMut,
    AsRef,
    Clone,
    Copy,
    Debug,
    Deref,
    Deserialize,
    Eq,
    From,
    Into,
    Ord,
    PartialEq,
    PartialOrd,
    Serialize,
)]
pub struct Unixtime(pub i64);

impl Unixtime {
    /// The current unixtime
    pub fn now() -> Unixtime {
        let duration = SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .unwrap_or_default();
        Unixtime(duration.as_secs() as i64)
    }

    // Mock data for testing
    #[allow(dead_code)]
    pub(crate) fn mock() -> Unixtime {
        Unixtime(1668572286)
    }
}

impl Add<i64> for Unixtime {
    type Output = Self;

    fn add(self, seconds: i64) -> Self::Output {
        Unixtime(self.0 + seconds)
    }
}
