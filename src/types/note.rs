use super::ZapProfile;
use derive_more::{AsRef, Deref, Display, From, Into};
use serde::{Deserialize, Serialize};

/// The identifier of a note, as the client addresses it
#[derive(
    AsRef, Clone, Debug, Deref, Deserialize, Display, Eq, From, Hash, Into, PartialEq, Serialize,
)]
pub struct NoteId(pub String);

/// A note that can be zapped: its id and the profile of its author,
/// who is the zap recipient.
#[derive(Clone, Debug, Deserialize, Eq, PartialEq, Serialize)]
pub struct Note {
    /// The note id
    pub id: NoteId,

    /// The author of the note
    pub author: ZapProfile,
}

impl Note {
    // Mock data for testing
    #[allow(dead_code)]
    pub(crate) fn mock() -> Note {
        Note {
            id: NoteId("note1qqqqqqqqqqqqqqqqqqqqqqqqqqqqqqqqqqqqqqqqqqqqqqqqqqqqqq".to_owned()),
            author: ZapProfile::mock(),
        }
    }
}
