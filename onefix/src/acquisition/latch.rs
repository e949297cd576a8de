//! Result latch - single-assignment completion cell.
//!
//! The latch is what turns a repeating callback stream into a one-shot
//! result. Two writers race to resolve it: the subscription callback (on
//! the provider's context) and an external cancellation caller. Exactly
//! one wins, decided by a lock-free compare-and-swap on the claim flag.
//!
//! # Two-Phase Resolution
//!
//! Resolution is split into [`try_claim`](ResultLatch::try_claim) and
//! [`complete`](ResultLatch::complete) so the winner can tear down the
//! subscription *between* winning the race and publishing the outcome.
//! No lock is held across the teardown call. The loser of the claim race
//! observes `try_claim() == false` and must have no further effects.

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, Mutex};

use tokio::sync::oneshot;

use super::outcome::AcquisitionOutcome;

/// Single-assignment completion cell for an acquisition outcome.
///
/// Cloneable; all clones share the same claim flag and value slot.
#[derive(Clone)]
pub struct ResultLatch {
    inner: Arc<LatchInner>,
}

struct LatchInner {
    /// Set once by the first successful claim; never cleared.
    claimed: AtomicBool,

    /// Sender for the stored outcome, taken by the claim winner.
    tx: Mutex<Option<oneshot::Sender<AcquisitionOutcome>>>,
}

impl ResultLatch {
    /// Create a latch and the waiter that receives its outcome.
    pub fn new() -> (Self, ResultWaiter) {
        let (tx, rx) = oneshot::channel();
        let latch = Self {
            inner: Arc::new(LatchInner {
                claimed: AtomicBool::new(false),
                tx: Mutex::new(Some(tx)),
            }),
        };
        (latch, ResultWaiter { rx })
    }

    /// Attempt to win the resolution race.
    ///
    /// Returns true for exactly one caller over the latch's lifetime.
    /// The winner must follow up with [`complete`](Self::complete) after
    /// performing its teardown; losers must do nothing further.
    pub fn try_claim(&self) -> bool {
        self.inner
            .claimed
            .compare_exchange(false, true, Ordering::AcqRel, Ordering::Acquire)
            .is_ok()
    }

    /// Publish the outcome. Only meaningful for the claim winner.
    ///
    /// A no-op if the value was already published or the waiter is gone.
    pub fn complete(&self, outcome: AcquisitionOutcome) {
        let tx = self.inner.tx.lock().unwrap().take();
        if let Some(tx) = tx {
            // Send fails only if the waiter was dropped; nothing to do.
            let _ = tx.send(outcome);
        }
    }

    /// Claim and publish in one step, for writers with no teardown to order.
    ///
    /// Returns true if this call won the race; false leaves the stored
    /// outcome untouched.
    pub fn resolve(&self, outcome: AcquisitionOutcome) -> bool {
        if self.try_claim() {
            self.complete(outcome);
            true
        } else {
            false
        }
    }

    /// Has the resolution race been won?
    ///
    /// Once true, no further callback effects are observable.
    pub fn is_resolved(&self) -> bool {
        self.inner.claimed.load(Ordering::Acquire)
    }
}

/// Consume-once awaiter for the latch outcome.
///
/// The session has exactly one caller awaiting, so the waiter is not
/// cloneable.
pub struct ResultWaiter {
    rx: oneshot::Receiver<AcquisitionOutcome>,
}

impl ResultWaiter {
    /// Wait until the latch resolves and return the stored outcome.
    ///
    /// If every latch handle is dropped before resolution (the session
    /// was abandoned), this reports `Cancelled`.
    pub async fn outcome(self) -> AcquisitionOutcome {
        self.rx.await.unwrap_or(AcquisitionOutcome::Cancelled)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::acquisition::outcome::FailureReason;
    use crate::acquisition::sample::PositionSample;

    #[tokio::test]
    async fn test_resolve_stores_outcome() {
        let (latch, waiter) = ResultLatch::new();

        assert!(!latch.is_resolved());
        assert!(latch.resolve(AcquisitionOutcome::Cancelled));
        assert!(latch.is_resolved());

        assert_eq!(waiter.outcome().await, AcquisitionOutcome::Cancelled);
    }

    #[tokio::test]
    async fn test_first_resolve_wins() {
        let (latch, waiter) = ResultLatch::new();
        let sample = PositionSample::new(53.5, 10.0, 12.0);

        assert!(latch.resolve(AcquisitionOutcome::Success(sample.clone())));
        assert!(!latch.resolve(AcquisitionOutcome::Cancelled));
        assert!(!latch.resolve(AcquisitionOutcome::Failure(FailureReason::PermissionDenied)));

        assert_eq!(
            waiter.outcome().await,
            AcquisitionOutcome::Success(sample)
        );
    }

    #[test]
    fn test_try_claim_exactly_once() {
        let (latch, _waiter) = ResultLatch::new();

        assert!(latch.try_claim());
        assert!(!latch.try_claim());
        assert!(!latch.try_claim());
        assert!(latch.is_resolved());
    }

    #[tokio::test]
    async fn test_two_phase_resolution() {
        let (latch, waiter) = ResultLatch::new();

        assert!(latch.try_claim());
        // Teardown would happen here, before the value is published.
        latch.complete(AcquisitionOutcome::Cancelled);

        assert_eq!(waiter.outcome().await, AcquisitionOutcome::Cancelled);
    }

    #[tokio::test]
    async fn test_concurrent_resolvers_single_winner() {
        let (latch, waiter) = ResultLatch::new();

        let mut handles = Vec::new();
        for i in 0..16 {
            let latch = latch.clone();
            handles.push(tokio::spawn(async move {
                let outcome = if i % 2 == 0 {
                    AcquisitionOutcome::Cancelled
                } else {
                    AcquisitionOutcome::Success(PositionSample::new(i as f64, 0.0, 10.0))
                };
                latch.resolve(outcome)
            }));
        }

        let mut winners = 0;
        for handle in handles {
            if handle.await.unwrap() {
                winners += 1;
            }
        }
        assert_eq!(winners, 1);

        // Whatever won, an outcome was stored.
        let _ = waiter.outcome().await;
    }

    #[tokio::test]
    async fn test_waiter_reports_cancelled_when_latch_dropped() {
        let (latch, waiter) = ResultLatch::new();
        drop(latch);

        assert_eq!(waiter.outcome().await, AcquisitionOutcome::Cancelled);
    }
}
