use serde::{Deserialize, Serialize};

/// Per-note reactive zap state, owned by the note's footer. One instance
/// per displayed note; mutated only by the gesture controller and the
/// settlement flow for that note.
///
/// `sats_zapped` is bumped optimistically before settlement resolves and is
/// deliberately not rolled back when settlement fails. `zapped` only becomes
/// true once the animation gate has signaled completion.
#[derive(Clone, Copy, Debug, Default, Deserialize, Eq, PartialEq, Serialize)]
pub struct ZapUiState {
    /// A zap gesture is in flight
    pub is_zapping: bool,

    /// The signed-in user has zapped this note
    pub zapped: bool,

    /// Total sats this user has zapped to this note, including
    /// optimistically counted amounts
    pub sats_zapped: u64,

    /// The zap animation should be playing
    pub show_zap_anim: bool,

    /// The static zap icon is hidden while the animation plays over it
    pub hide_zap_icon: bool,
}

/// Per-note repost menu state. The same optimistic-counter shape as zaps,
/// without the timing and animation coupling.
#[derive(Clone, Copy, Debug, Default, Deserialize, Eq, PartialEq, Serialize)]
pub struct RepostMenuState {
    /// The repost/quote menu is open
    pub is_repost_menu_visible: bool,

    /// The signed-in user has reposted this note
    pub reposted: bool,

    /// Repost count, including optimistically counted reposts
    pub reposts: u64,
}
