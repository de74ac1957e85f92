use crate::types::RepostMenuState;

/// A stream of global pointer events. The menu subscribes while visible so
/// a pointer-down outside of it can dismiss it; the subscription is a guard
/// value that unsubscribes when dropped.
pub trait PointerEvents {
    /// The guard for one active subscription
    type Subscription;

    /// Start listening for global pointer events
    fn subscribe(&self) -> Self::Subscription;
}

/// The repost/quote menu for one note: its optimistic state plus the
/// outside-pointer dismissal lifecycle.
///
/// The pointer subscription exists only while the menu is visible; hiding
/// the menu drops it immediately. This replaces an ambient global listener
/// with an explicit lifecycle tied to visibility.
pub struct RepostMenu<P: PointerEvents> {
    /// The menu state
    pub state: RepostMenuState,

    subscription: Option<P::Subscription>,
}

impl<P: PointerEvents> RepostMenu<P> {
    /// A fresh, hidden menu
    pub fn new() -> RepostMenu<P> {
        RepostMenu {
            state: RepostMenuState::default(),
            subscription: None,
        }
    }

    /// Show or hide the menu, keeping the pointer subscription in lockstep
    /// with visibility
    pub fn set_visible(&mut self, stream: &P, visible: bool) {
        self.state.is_repost_menu_visible = visible;
        if visible {
            if self.subscription.is_none() {
                self.subscription = Some(stream.subscribe());
            }
        } else {
            self.subscription = None;
        }
    }

    /// A pointer went down outside the menu; dismiss it
    pub fn outside_pointer(&mut self, stream: &P) {
        self.set_visible(stream, false);
    }

    /// A repost went through; bump the optimistic counter
    pub fn register_repost(&mut self) {
        self.state.reposts += 1;
        self.state.reposted = true;
    }
}

impl<P: PointerEvents> std::fmt::Debug for RepostMenu<P> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("RepostMenu")
            .field("state", &self.state)
            .field("subscribed", &self.subscription.is_some())
            .finish()
    }
}

impl<P: PointerEvents> Default for RepostMenu<P> {
    fn default() -> Self {
        RepostMenu::new()
    }
}
