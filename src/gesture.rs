use crate::types::{Account, ZapCommit, ZapProfile, ZapUiState};
use crate::NoticeSink;
use std::time::Duration;
use tokio::task::JoinHandle;
use tracing::{event, Level};

/// How long a zap press must be held before it escalates to the
/// custom-amount dialog. A release before this commits a quick zap.
pub const QUICK_ZAP_DELAY: Duration = Duration::from_millis(500);

/// Where a zap gesture currently is
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum GesturePhase {
    /// No gesture in progress
    #[default]
    Idle,

    /// Pressed, the escalation delay is running
    Pending,

    /// The delay fired and the custom-amount dialog owns the outcome
    DialogOpen,
}

/// What the caller must do after feeding an event to the gesture machine
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum GestureOutcome {
    /// Nothing; the event was absorbed
    None,

    /// Arm the single-shot escalation timer for [`QUICK_ZAP_DELAY`]
    DelayArmed,

    /// The gesture was aborted; a notice has already been reported
    Aborted,

    /// Open the custom-amount dialog
    DialogRequested,

    /// Exactly one zap commit; hand it to the settlement flow
    Commit(ZapCommit),
}

/// Classifies a press/release interaction as a quick zap or a custom zap.
///
/// The machine is event driven and owns no timer itself: on `DelayArmed` the
/// caller arms a [`QuickZapTimer`] that feeds back `delay_elapsed`, and on
/// any release it cancels that timer (cancelling is idempotent, so a release
/// that races the timer is safe). At most one [`ZapCommit`] is produced per
/// gesture, in every interleaving of press, release, timer and dialog events.
#[derive(Clone, Copy, Debug, Default)]
pub struct ZapGesture {
    phase: GesturePhase,
}

impl ZapGesture {
    /// A fresh gesture controller for one note
    pub fn new() -> ZapGesture {
        ZapGesture::default()
    }

    /// The current phase
    pub fn phase(&self) -> GesturePhase {
        self.phase
    }

    /// The pointer went down on the zap button.
    ///
    /// Eligibility is checked before the timer is armed: a missing identity
    /// gets the get-started prompt, missing relays and an unzappable
    /// recipient get a warning. Any failed check aborts without arming.
    pub fn press(
        &mut self,
        account: &Account,
        recipient: &ZapProfile,
        state: &mut ZapUiState,
        notices: &dyn NoticeSink,
    ) -> GestureOutcome {
        if self.phase != GesturePhase::Idle {
            return GestureOutcome::None;
        }

        if !account.has_public_key() {
            notices.show_get_started();
            state.is_zapping = false;
            return GestureOutcome::Aborted;
        }

        if account.relays.is_empty() {
            notices.warn("No relays connected");
            return GestureOutcome::Aborted;
        }

        if !recipient.can_receive_zaps() {
            notices.warn("This user can't receive zaps");
            state.is_zapping = false;
            return GestureOutcome::Aborted;
        }

        self.phase = GesturePhase::Pending;
        GestureOutcome::DelayArmed
    }

    /// The escalation delay fired without a release. Escalates to the
    /// custom-amount dialog, whose confirm/dismiss re-enters this machine.
    pub fn delay_elapsed(&mut self, state: &mut ZapUiState) -> GestureOutcome {
        if self.phase != GesturePhase::Pending {
            return GestureOutcome::None;
        }
        event!(Level::DEBUG, "zap gesture escalated to custom dialog");
        self.phase = GesturePhase::DialogOpen;
        state.is_zapping = true;
        GestureOutcome::DialogRequested
    }

    /// The pointer was released. The caller must always cancel its timer
    /// alongside this call.
    ///
    /// A release while pending commits a quick zap with the account's
    /// defaults. A release with the dialog open produces nothing; the
    /// dialog's own confirm/dismiss decides the outcome. A release while
    /// idle is a duplicate pointer/touch pair and is ignored.
    pub fn release(
        &mut self,
        account: &Account,
        recipient: &ZapProfile,
        notices: &dyn NoticeSink,
    ) -> GestureOutcome {
        match self.phase {
            GesturePhase::Idle | GesturePhase::DialogOpen => GestureOutcome::None,
            GesturePhase::Pending => {
                self.phase = GesturePhase::Idle;

                if !account.has_public_key() {
                    notices.show_get_started();
                    return GestureOutcome::Aborted;
                }

                if account.relays.is_empty() || !recipient.can_receive_zaps() {
                    return GestureOutcome::Aborted;
                }

                GestureOutcome::Commit(ZapCommit::from_defaults(&account.default_zap))
            }
        }
    }

    /// The custom-amount dialog was confirmed with the user's choice
    pub fn dialog_confirmed(&mut self, commit: ZapCommit) -> GestureOutcome {
        if self.phase != GesturePhase::DialogOpen {
            return GestureOutcome::None;
        }
        self.phase = GesturePhase::Idle;
        GestureOutcome::Commit(commit)
    }

    /// The custom-amount dialog was dismissed; no zap happens
    pub fn dialog_dismissed(&mut self, state: &mut ZapUiState) -> GestureOutcome {
        if self.phase != GesturePhase::DialogOpen {
            return GestureOutcome::None;
        }
        self.phase = GesturePhase::Idle;
        state.is_zapping = false;
        GestureOutcome::None
    }
}

/// A single-shot timer for the escalation delay.
///
/// `cancel` is idempotent and remains safe after the timer has already
/// fired; aborting a finished task is a no-op.
#[derive(Debug, Default)]
pub struct QuickZapTimer {
    task: Option<JoinHandle<()>>,
}

impl QuickZapTimer {
    /// A fresh, unarmed timer
    pub fn new() -> QuickZapTimer {
        QuickZapTimer::default()
    }

    /// Arm the timer. Re-arming cancels any previous arming.
    pub fn arm<F>(&mut self, delay: Duration, on_elapsed: F)
    where
        F: FnOnce() + Send + 'static,
    {
        self.cancel();
        self.task = Some(tokio::spawn(async move {
            tokio::time::sleep(delay).await;
            on_elapsed();
        }));
    }

    /// Cancel the timer if it has not fired yet
    pub fn cancel(&mut self) {
        if let Some(task) = self.task.take() {
            task.abort();
        }
    }
}

impl Drop for QuickZapTimer {
    fn drop(&mut self) {
        self.cancel();
    }
}
