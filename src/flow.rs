use crate::anim::{AnimationEngine, ZapAnimation};
use crate::types::{Account, Note, PublicKeyHex, RelayUrl, ZapCommit, ZapUiState};
use crate::Error;
use async_trait::async_trait;
use std::fmt;
use tokio::sync::Mutex;
use tracing::{event, Level};

/// Where user-visible notices go. A missing identity gets the get-started
/// prompt; everything else that the user must hear about is a warning.
pub trait NoticeSink: Send + Sync {
    /// Show a warning toast
    fn warn(&self, message: &str);

    /// Show the get-started prompt for signed-out users
    fn show_get_started(&self);
}

/// Opens the bare (no footer) invoice presentation when a payment path
/// requires showing a generated invoice for out-of-band scanning.
pub trait InvoicePresentation: Send + Sync {
    /// Present the payment request; `on_dismiss` closes the presentation
    fn show(&self, payment_request: &str, on_dismiss: Box<dyn FnOnce() + Send>);
}

/// The external settlement operation. Resolves true when the zap settled,
/// false or an error when it did not. May call back into `invoices` when
/// the payment requires out-of-band presentation.
#[async_trait]
pub trait ZapSettler: Send + Sync {
    /// Request settlement of one zap
    async fn settle(
        &self,
        note: &Note,
        payer: &PublicKeyHex,
        amount: u64,
        message: &str,
        relays: &[RelayUrl],
        invoices: &dyn InvoicePresentation,
    ) -> Result<bool, Error>;
}

/// Success/failure callbacks supplied by whoever opened the zap, quick or
/// custom. The committed parameters are passed back on both paths.
pub struct ZapCallbacks {
    on_success: Box<dyn Fn(&ZapCommit) + Send + Sync>,
    on_fail: Box<dyn Fn(&ZapCommit) + Send + Sync>,
}

impl ZapCallbacks {
    /// Build from the two outcome callbacks
    pub fn new<S, F>(on_success: S, on_fail: F) -> ZapCallbacks
    where
        S: Fn(&ZapCommit) + Send + Sync + 'static,
        F: Fn(&ZapCommit) + Send + Sync + 'static,
    {
        ZapCallbacks {
            on_success: Box::new(on_success),
            on_fail: Box::new(on_fail),
        }
    }
}

impl fmt::Debug for ZapCallbacks {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "ZapCallbacks")
    }
}

/// Drive one committed zap through settlement.
///
/// UI state is updated optimistically: the counter bump and the animation
/// start before the network result is known, trading a rollback risk for
/// perceived responsiveness. The user-visible `zapped` flag is gated: it is
/// set only after both the settlement result and the animation completion
/// signal are in (a join, not a race), and only on success. A failed
/// settlement clears `is_zapping` and reports through `callbacks`, but does
/// not roll `sats_zapped` back.
///
/// Finalization runs exactly once per commit, whatever the ordering of the
/// settlement resolving and the animation completing. Nothing here retries;
/// a failure is terminal for this commit and needs a fresh gesture.
#[allow(clippy::too_many_arguments)]
pub async fn commit_zap(
    note: &Note,
    account: &Account,
    commit: ZapCommit,
    state: &Mutex<ZapUiState>,
    settler: &dyn ZapSettler,
    animation: &ZapAnimation,
    engine: &mut dyn AnimationEngine,
    invoices: &dyn InvoicePresentation,
    callbacks: &ZapCallbacks,
    notices: &dyn NoticeSink,
) -> Result<(), Error> {
    let payer = match &account.public_key {
        Some(pk) => pk.clone(),
        None => {
            notices.show_get_started();
            state.lock().await.is_zapping = false;
            return Err(Error::NoIdentity);
        }
    };

    if account.relays.is_empty() {
        notices.warn("No relays connected");
        state.lock().await.is_zapping = false;
        return Err(Error::NoRelays);
    }

    if !note.author.can_receive_zaps() {
        notices.warn("This user can't receive zaps");
        state.lock().await.is_zapping = false;
        return Err(Error::RecipientCannotReceiveZaps);
    }

    // Optimistic: counter and animation move before the network call goes out
    {
        let mut s = state.lock().await;
        s.is_zapping = true;
        s.sats_zapped += commit.amount;
        s.show_zap_anim = true;
        s.hide_zap_icon = true;
    }

    event!(
        Level::DEBUG,
        "zapping {} sats to note {}",
        commit.amount,
        note.id
    );

    let gate = animation.play(engine);
    let settled = settler.settle(
        note,
        &payer,
        commit.amount,
        &commit.message,
        &account.relays,
        invoices,
    );

    // Join: finalization happens-after both the settlement result and the
    // animation completion signal. A dropped gate sender counts as complete
    // so the flow can never hang on the animation.
    let (result, _) = tokio::join!(settled, gate);

    let mut s = state.lock().await;
    s.show_zap_anim = false;
    s.hide_zap_icon = false;
    s.is_zapping = false;

    match result {
        Ok(true) => {
            s.zapped = true;
            drop(s);
            (callbacks.on_success)(&commit);
            Ok(())
        }
        Ok(false) => {
            drop(s);
            (callbacks.on_fail)(&commit);
            Err(Error::SettlementFailed)
        }
        Err(e) => {
            drop(s);
            event!(Level::WARN, "zap settlement failed: {e}");
            (callbacks.on_fail)(&commit);
            Err(e)
        }
    }
}

#[cfg(test)]
mod test {
    use super::*;
    use crate::anim::AnimationAsset;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::sync::Arc;
    use std::time::Duration;

    struct OkEngine;

    impl AnimationEngine for OkEngine {
        fn seek(&mut self, _frame: u64) -> Result<(), Error> {
            Ok(())
        }

        fn play(&mut self) -> Result<(), Error> {
            Ok(())
        }
    }

    struct BrokenEngine;

    impl AnimationEngine for BrokenEngine {
        fn seek(&mut self, _frame: u64) -> Result<(), Error> {
            Ok(())
        }

        fn play(&mut self) -> Result<(), Error> {
            Err(Error::AnimationEngine("no canvas".to_owned()))
        }
    }

    #[derive(Default)]
    struct SilentNotices {
        warnings: AtomicUsize,
        get_started: AtomicUsize,
    }

    impl NoticeSink for SilentNotices {
        fn warn(&self, _message: &str) {
            let _ = self.warnings.fetch_add(1, Ordering::SeqCst);
        }

        fn show_get_started(&self) {
            let _ = self.get_started.fetch_add(1, Ordering::SeqCst);
        }
    }

    #[derive(Default)]
    struct NoInvoices {
        shown: AtomicUsize,
    }

    impl InvoicePresentation for NoInvoices {
        fn show(&self, _payment_request: &str, _on_dismiss: Box<dyn FnOnce() + Send>) {
            let _ = self.shown.fetch_add(1, Ordering::SeqCst);
        }
    }

    struct TestSettler {
        delay: Duration,
        result: Result<bool, ()>,
        present_invoice: bool,
        calls: AtomicUsize,
    }

    impl TestSettler {
        fn resolving(result: bool, delay: Duration) -> TestSettler {
            TestSettler {
                delay,
                result: Ok(result),
                present_invoice: false,
                calls: AtomicUsize::new(0),
            }
        }

        fn failing() -> TestSettler {
            TestSettler {
                delay: Duration::ZERO,
                result: Err(()),
                present_invoice: false,
                calls: AtomicUsize::new(0),
            }
        }
    }

    #[async_trait]
    impl ZapSettler for TestSettler {
        async fn settle(
            &self,
            _note: &Note,
            _payer: &PublicKeyHex,
            _amount: u64,
            _message: &str,
            _relays: &[RelayUrl],
            invoices: &dyn InvoicePresentation,
        ) -> Result<bool, Error> {
            let _ = self.calls.fetch_add(1, Ordering::SeqCst);
            if self.present_invoice {
                invoices.show("lnbc50n1...", Box::new(|| {}));
            }
            tokio::time::sleep(self.delay).await;
            self.result.map_err(|()| Error::SettlementFailed)
        }
    }

    struct Fixture {
        note: Note,
        account: Account,
        state: Arc<Mutex<ZapUiState>>,
        notices: SilentNotices,
        invoices: NoInvoices,
        successes: Arc<AtomicUsize>,
        failures: Arc<AtomicUsize>,
        callbacks: ZapCallbacks,
    }

    impl Fixture {
        fn new() -> Fixture {
            let successes = Arc::new(AtomicUsize::new(0));
            let failures = Arc::new(AtomicUsize::new(0));
            let (s, f) = (successes.clone(), failures.clone());
            Fixture {
                note: Note::mock(),
                account: Account::mock(),
                state: Arc::new(Mutex::new(ZapUiState::default())),
                notices: SilentNotices::default(),
                invoices: NoInvoices::default(),
                successes,
                failures,
                callbacks: ZapCallbacks::new(
                    move |_| {
                        let _ = s.fetch_add(1, Ordering::SeqCst);
                    },
                    move |_| {
                        let _ = f.fetch_add(1, Ordering::SeqCst);
                    },
                ),
            }
        }

        async fn commit(&self, settler: &TestSettler) -> Result<(), Error> {
            commit_zap(
                &self.note,
                &self.account,
                ZapCommit::mock(),
                &self.state,
                settler,
                &ZapAnimation::new(),
                &mut OkEngine,
                &self.invoices,
                &self.callbacks,
                &self.notices,
            )
            .await
        }
    }

    fn gate_duration() -> Duration {
        AnimationAsset::zap_medium().duration()
    }

    #[tokio::test(start_paused = true)]
    async fn test_successful_zap_settles_after_animation() {
        let fx = Arc::new(Fixture::new());
        let settler = Arc::new(TestSettler::resolving(true, Duration::ZERO));

        let task = {
            let fx = fx.clone();
            let settler = settler.clone();
            tokio::spawn(async move { fx.commit(&settler).await })
        };

        // settlement resolves immediately, but zapped must stay gated
        // until the animation duration has elapsed
        tokio::time::sleep(gate_duration() / 2).await;
        {
            let s = fx.state.lock().await;
            assert!(s.is_zapping);
            assert!(s.show_zap_anim);
            assert!(s.hide_zap_icon);
            assert!(!s.zapped, "zapped before the animation gate completed");
            assert_eq!(s.sats_zapped, ZapCommit::mock().amount);
        }

        tokio::time::sleep(gate_duration()).await;
        assert!(task.await.unwrap().is_ok());
        {
            let s = fx.state.lock().await;
            assert!(s.zapped);
            assert!(!s.is_zapping);
            assert!(!s.show_zap_anim);
            assert!(!s.hide_zap_icon);
        }
        assert_eq!(fx.successes.load(Ordering::SeqCst), 1);
        assert_eq!(fx.failures.load(Ordering::SeqCst), 0);
    }

    #[tokio::test(start_paused = true)]
    async fn test_slow_settlement_gates_on_both() {
        let fx = Arc::new(Fixture::new());
        let slow = gate_duration() * 3;
        let settler = Arc::new(TestSettler::resolving(true, slow));

        let task = {
            let fx = fx.clone();
            let settler = settler.clone();
            tokio::spawn(async move { fx.commit(&settler).await })
        };

        // animation is long done, settlement is not: still not zapped
        tokio::time::sleep(gate_duration() * 2).await;
        assert!(!fx.state.lock().await.zapped);

        tokio::time::sleep(slow).await;
        assert!(task.await.unwrap().is_ok());
        assert!(fx.state.lock().await.zapped);
    }

    #[tokio::test(start_paused = true)]
    async fn test_failed_settlement_keeps_optimistic_sats() {
        // Known-risk property, preserved on purpose: the optimistic counter
        // bump is not rolled back when settlement fails.
        let fx = Fixture::new();
        let settler = TestSettler::resolving(false, Duration::ZERO);

        let result = fx.commit(&settler).await;
        assert!(matches!(result, Err(Error::SettlementFailed)));

        let s = fx.state.lock().await;
        assert!(!s.is_zapping);
        assert!(!s.zapped);
        assert_eq!(s.sats_zapped, ZapCommit::mock().amount);
        assert_eq!(fx.failures.load(Ordering::SeqCst), 1);
        assert_eq!(fx.successes.load(Ordering::SeqCst), 0);
    }

    #[tokio::test(start_paused = true)]
    async fn test_rejected_settlement_reports_failure() {
        let fx = Fixture::new();
        let settler = TestSettler::failing();

        assert!(fx.commit(&settler).await.is_err());
        let s = fx.state.lock().await;
        assert!(!s.is_zapping);
        assert!(!s.zapped);
        assert_eq!(fx.failures.load(Ordering::SeqCst), 1);
    }

    #[tokio::test(start_paused = true)]
    async fn test_no_identity_aborts_without_mutation() {
        let mut fx = Fixture::new();
        fx.account.public_key = None;
        fx.state.lock().await.is_zapping = true;
        let settler = TestSettler::resolving(true, Duration::ZERO);

        let result = fx.commit(&settler).await;
        assert!(matches!(result, Err(Error::NoIdentity)));
        assert_eq!(fx.notices.get_started.load(Ordering::SeqCst), 1);
        assert_eq!(settler.calls.load(Ordering::SeqCst), 0);

        let s = fx.state.lock().await;
        assert!(!s.is_zapping);
        assert_eq!(s.sats_zapped, 0);
        assert!(!s.show_zap_anim);
    }

    #[tokio::test(start_paused = true)]
    async fn test_no_relays_aborts_with_warning() {
        let mut fx = Fixture::new();
        fx.account.relays.clear();
        let settler = TestSettler::resolving(true, Duration::ZERO);

        assert!(matches!(fx.commit(&settler).await, Err(Error::NoRelays)));
        assert_eq!(fx.notices.warnings.load(Ordering::SeqCst), 1);
        assert_eq!(fx.state.lock().await.sats_zapped, 0);
    }

    #[tokio::test(start_paused = true)]
    async fn test_unzappable_recipient_aborts() {
        let mut fx = Fixture::new();
        fx.note.author.lud06 = None;
        fx.note.author.lud16 = None;
        let settler = TestSettler::resolving(true, Duration::ZERO);

        assert!(matches!(
            fx.commit(&settler).await,
            Err(Error::RecipientCannotReceiveZaps)
        ));
        assert_eq!(fx.notices.warnings.load(Ordering::SeqCst), 1);
    }

    #[tokio::test(start_paused = true)]
    async fn test_broken_animation_engine_never_hangs() {
        let fx = Fixture::new();
        let settler = TestSettler::resolving(true, Duration::ZERO);

        let result = commit_zap(
            &fx.note,
            &fx.account,
            ZapCommit::mock(),
            &fx.state,
            &settler,
            &ZapAnimation::new(),
            &mut BrokenEngine,
            &fx.invoices,
            &fx.callbacks,
            &fx.notices,
        )
        .await;

        assert!(result.is_ok());
        assert!(fx.state.lock().await.zapped);
    }

    #[tokio::test(start_paused = true)]
    async fn test_settler_can_present_an_invoice() {
        let fx = Fixture::new();
        let settler = TestSettler {
            delay: Duration::ZERO,
            result: Ok(true),
            present_invoice: true,
            calls: AtomicUsize::new(0),
        };

        assert!(fx.commit(&settler).await.is_ok());
        assert_eq!(fx.invoices.shown.load(Ordering::SeqCst), 1);
    }

    #[tokio::test(start_paused = true)]
    async fn test_monotone_sats_across_commits() {
        let fx = Fixture::new();

        let ok = TestSettler::resolving(true, Duration::ZERO);
        assert!(fx.commit(&ok).await.is_ok());
        let after_success = fx.state.lock().await.sats_zapped;

        let bad = TestSettler::resolving(false, Duration::ZERO);
        assert!(fx.commit(&bad).await.is_err());
        let after_failure = fx.state.lock().await.sats_zapped;

        assert!(after_failure >= after_success);
        assert_eq!(after_failure, ZapCommit::mock().amount * 2);
    }
}
