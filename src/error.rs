use thiserror::Error;

/// Errors that can occur in the nostr-zaps crate
#[derive(Error, Debug)]
pub enum Error {
    /// The animation engine failed to start playback
    #[error("Animation Engine Error: {0}")]
    AnimationEngine(String),

    /// Bech32 error
    #[error("Bech32 Error: {0}")]
    Bech32(#[from] bech32::Error),

    /// From utf8 Error
    #[error("From UTF-8 Error")]
    FromUtf8(#[from] std::string::FromUtf8Error),

    /// Hex string decoding error
    #[error("Hex Decode Error: {0}")]
    HexDecode(#[from] hex::FromHexError),

    /// Payment request string did not parse as a bolt11 invoice
    #[error("Invalid Invoice: {0}")]
    InvalidInvoice(String),

    /// Invalid public key
    #[error("Invalid Public Key")]
    InvalidPublicKey,

    /// No signed-in identity; surfaced as a get-started prompt, not a toast
    #[error("No signed-in identity")]
    NoIdentity,

    /// No relays are connected
    #[error("No relays connected")]
    NoRelays,

    /// Integer parsing error
    #[error("Integer Parse Error: {0}")]
    ParseInt(#[from] std::num::ParseIntError),

    /// The zap recipient has no way to receive zaps
    #[error("Recipient cannot receive zaps")]
    RecipientCannotReceiveZaps,

    /// The settlement operation rejected or resolved unsuccessfully
    #[error("Zap settlement failed")]
    SettlementFailed,
}
