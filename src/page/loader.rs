//! Delayed reveal of listing results.
//!
//! Each recompute of the listing results is shown after a short cosmetic
//! delay. The delay runs as a tokio task that sends a [`Reveal`] carrying the
//! generation it was scheduled for. Scheduling a new reveal aborts the
//! previous task, and the reducer drops any reveal whose generation is no
//! longer current, so the most recent request always wins even if an aborted
//! task's message was already queued.

use std::time::Duration;

use tokio::sync::mpsc;
use tokio::task::JoinHandle;

/// Default cosmetic delay before results are revealed.
pub const DEFAULT_REVEAL_DELAY: Duration = Duration::from_millis(300);

/// Sent when the delay for `generation` has elapsed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Reveal {
    pub generation: u64,
}

pub struct RevealScheduler {
    delay: Duration,
    tx: mpsc::Sender<Reveal>,
    rx: mpsc::Receiver<Reveal>,
    handle: Option<JoinHandle<()>>,
}

impl RevealScheduler {
    pub fn new(delay: Duration) -> Self {
        let (tx, rx) = mpsc::channel(8);
        Self {
            delay,
            tx,
            rx,
            handle: None,
        }
    }

    pub fn delay(&self) -> Duration {
        self.delay
    }

    /// Start the delay for `generation`, superseding any pending one.
    ///
    /// Must be called from within a tokio runtime.
    pub fn schedule(&mut self, generation: u64) {
        if let Some(handle) = self.handle.take() {
            handle.abort();
            tracing::debug!("Aborted previous reveal task");
        }

        let tx = self.tx.clone();
        let delay = self.delay;
        tracing::debug!(generation, delay_ms = delay.as_millis() as u64, "Scheduling reveal");

        self.handle = Some(tokio::spawn(async move {
            tokio::time::sleep(delay).await;
            if let Err(e) = tx.send(Reveal { generation }).await {
                tracing::warn!(error = %e, "Failed to send reveal (receiver dropped)");
            }
        }));
    }

    /// Whether a scheduled delay has not fired yet.
    pub fn is_pending(&self) -> bool {
        self.handle.as_ref().is_some_and(|h| !h.is_finished())
    }

    /// Wait for the next reveal. Stale ones are returned too; the reducer
    /// filters them by generation.
    pub async fn next(&mut self) -> Option<Reveal> {
        self.rx.recv().await
    }

    /// Non-blocking variant of [`RevealScheduler::next`].
    pub fn try_next(&mut self) -> Option<Reveal> {
        self.rx.try_recv().ok()
    }
}

impl Drop for RevealScheduler {
    fn drop(&mut self) {
        if let Some(handle) = self.handle.take() {
            handle.abort();
        }
    }
}
