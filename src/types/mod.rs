mod account;
pub use account::{Account, ZapDefaults};

mod invoice;
pub use invoice::{Invoice, InvoiceSection, SectionValue};

#[cfg(test)]
pub(crate) use invoice::test_encode;

mod note;
pub use note::{Note, NoteId};

mod profile;
pub use profile::ZapProfile;

mod public_key;
pub use public_key::PublicKeyHex;

mod satoshi;
pub use satoshi::MilliSatoshi;

mod state;
pub use state::{RepostMenuState, ZapUiState};

mod unixtime;
pub use unixtime::Unixtime;

mod url;
pub use url::RelayUrl;

mod zap;
pub use zap::ZapCommit;
