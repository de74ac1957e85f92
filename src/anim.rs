use tokio::sync::oneshot;
use tracing::{event, Level};

/// Playback metadata of an animation asset. The completion signal for the
/// zap effect is derived from this, not from the engine.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AnimationAsset {
    /// Total frames from start to out-point
    pub total_frames: u64,

    /// Frames per second
    pub frame_rate: u64,
}

impl AnimationAsset {
    /// The stock medium zap effect
    pub fn zap_medium() -> AnimationAsset {
        AnimationAsset {
            total_frames: 45,
            frame_rate: 30,
        }
    }

    /// Fixed playback duration: total_frames / frame_rate, in milliseconds
    pub fn duration(&self) -> std::time::Duration {
        std::time::Duration::from_millis(self.total_frames * 1_000 / self.frame_rate)
    }
}

/// The external playback engine. Both operations may fail; a failure on
/// start must never stall the settlement flow.
pub trait AnimationEngine: Send {
    /// Seek to a frame
    fn seek(&mut self, frame: u64) -> Result<(), crate::Error>;

    /// Start playback
    fn play(&mut self) -> Result<(), crate::Error>;
}

/// Screen offset of the zap effect for a button layout. `large` wins
/// over `wide`.
pub fn animation_offset(wide: bool, large: bool) -> (i32, i32) {
    if large {
        (2, -9)
    } else if wide {
        (15, -6)
    } else {
        (13, -6)
    }
}

// Delivers the completion signal at most once, however many times it is
// asked to.
#[derive(Debug)]
struct CompletionOnce(Option<oneshot::Sender<()>>);

impl CompletionOnce {
    fn signal(&mut self) {
        if let Some(tx) = self.0.take() {
            let _ = tx.send(());
        }
    }
}

/// The zap effect as the settlement flow sees it: something that plays for
/// a fixed duration and then signals completion exactly once.
#[derive(Debug, Clone, Copy)]
pub struct ZapAnimation {
    /// The asset being played
    pub asset: AnimationAsset,
}

impl ZapAnimation {
    /// The gate for the stock zap effect
    pub fn new() -> ZapAnimation {
        ZapAnimation {
            asset: AnimationAsset::zap_medium(),
        }
    }

    /// Start playback and return the completion signal.
    ///
    /// If the engine fails to start, completion is signaled immediately so
    /// the settlement flow never hangs on a broken animation. Otherwise a
    /// timer signals completion after the asset's fixed duration.
    pub fn play(&self, engine: &mut dyn AnimationEngine) -> oneshot::Receiver<()> {
        let (tx, rx) = oneshot::channel();
        let mut done = CompletionOnce(Some(tx));

        if let Err(e) = engine.seek(0).and_then(|()| engine.play()) {
            event!(Level::WARN, "failed to play zap animation: {e}");
            done.signal();
            return rx;
        }

        let duration = self.asset.duration();
        let _ = tokio::spawn(async move {
            tokio::time::sleep(duration).await;
            done.signal();
        });
        rx
    }
}

impl Default for ZapAnimation {
    fn default() -> Self {
        ZapAnimation::new()
    }
}
