//! Acquisition session state machine.
//!
//! One session per acquisition call: gate on permission, check provider
//! availability, subscribe, resolve with the first qualifying sample.
//! The session is discarded after reaching `Resolved`; it is never reused.
//!
//! # Resolution Race
//!
//! Three writers can end a session: the subscription callback (on the
//! source's context), an external `cancel()`, and `start()` itself for
//! precondition failures. All of them go through the [`ResultLatch`]
//! claim: the winner stops the subscription, marks the state `Resolved`,
//! and publishes the outcome, in that order. Losers have no effect.
//!
//! # Teardown Ownership
//!
//! The subscription handle lives in an `Option` behind a short-lived
//! mutex; whoever takes it stops it, so `stop()` is invoked exactly once.
//! If the first qualifying sample arrives while `request_updates` is
//! still returning, the handle is not stored yet - `start()` notices the
//! latch is already resolved after storing it and performs the stop
//! itself.

use std::sync::atomic::{AtomicU8, Ordering};
use std::sync::{Arc, Mutex};
use std::time::Instant;

use tracing::{debug, info, trace, warn};

use super::filter;
use super::latch::{ResultLatch, ResultWaiter};
use super::outcome::{AcquisitionOutcome, FailureReason, SessionState};
use super::request::{AcquisitionRequest, RequestError};
use super::sample::PositionSample;
use crate::platform::{
    LocationSource, PermissionKind, PermissionProbe, ProviderKind, ProviderStatus, SampleSink,
    UpdateSubscription,
};

/// A single acquisition attempt.
///
/// Cloneable: all clones drive the same session, so a host can hand one
/// clone to a timeout task for cancellation while awaiting the waiter on
/// another.
#[derive(Clone)]
pub struct AcquisitionSession {
    inner: Arc<SessionInner>,
}

struct SessionInner {
    request: AcquisitionRequest,
    state: AtomicU8,
    latch: ResultLatch,
    subscription: Mutex<Option<Box<dyn UpdateSubscription>>>,
}

impl AcquisitionSession {
    /// Create a session for a validated request.
    ///
    /// Returns the session and the waiter that yields its single outcome.
    ///
    /// # Errors
    ///
    /// Fails if the request does not validate; nothing is subscribed and
    /// no latch is created in that case.
    pub fn new(request: AcquisitionRequest) -> Result<(Self, ResultWaiter), RequestError> {
        request.validate()?;
        let (latch, waiter) = ResultLatch::new();
        let session = Self {
            inner: Arc::new(SessionInner {
                request,
                state: AtomicU8::new(SessionState::Idle as u8),
                latch,
                subscription: Mutex::new(None),
            }),
        };
        Ok((session, waiter))
    }

    /// Current session state.
    pub fn state(&self) -> SessionState {
        SessionState::from_u8(self.inner.state.load(Ordering::Acquire))
    }

    /// Begin the acquisition.
    ///
    /// Permission and provider preconditions are read once, synchronously,
    /// before any subscription is created; a failed precondition resolves
    /// the waiter immediately with the corresponding failure. A second
    /// `start()` on the same session is ignored.
    pub fn start<P, V, S>(&self, permissions: &P, providers: &V, source: &S)
    where
        P: PermissionProbe + ?Sized,
        V: ProviderStatus + ?Sized,
        S: LocationSource + ?Sized,
    {
        if !self
            .inner
            .transition(SessionState::Idle, SessionState::Subscribing)
        {
            warn!(state = %self.state(), "start ignored, session is not idle");
            return;
        }

        // Cancelled before start() ran; don't touch the platform at all.
        if self.inner.latch.is_resolved() {
            self.inner.store_resolved();
            return;
        }

        if !(permissions.granted(PermissionKind::FineLocation)
            && permissions.granted(PermissionKind::CoarseLocation))
        {
            info!("location permission not granted, resolving without subscribing");
            self.inner
                .fail(AcquisitionOutcome::Failure(FailureReason::PermissionDenied));
            return;
        }

        if !providers.enabled(ProviderKind::Gps) {
            info!(provider = %ProviderKind::Gps, "provider disabled, resolving without subscribing");
            self.inner.fail(AcquisitionOutcome::Failure(
                FailureReason::ProviderUnavailable,
            ));
            return;
        }

        debug!(
            max_age_minutes = self.inner.request.max_age_minutes,
            max_accuracy_meters = self.inner.request.max_accuracy_meters,
            "subscribing to location updates"
        );

        let callback_inner = Arc::clone(&self.inner);
        let sink: SampleSink = Arc::new(move |sample| callback_inner.on_sample(sample));
        let handle = source.request_updates(&self.inner.request, sink);

        *self.inner.subscription.lock().unwrap() = Some(handle);

        // A sample (or cancel) may have resolved the session while the
        // handle was unstored; the race winner could not stop it, so the
        // duty falls to us.
        if self.inner.latch.is_resolved() {
            self.inner.stop_subscription();
        } else {
            // Harmless if this loses to a concurrent resolution: the
            // transition refuses to leave Resolved.
            self.inner
                .transition(SessionState::Subscribing, SessionState::AwaitingSample);
        }
    }

    /// Cancel the acquisition.
    ///
    /// Cooperative and idempotent: safe at any time, including before
    /// `start()` and after resolution, where it is a no-op.
    pub fn cancel(&self) {
        if !self.inner.latch.try_claim() {
            trace!("cancel after resolution is a no-op");
            return;
        }
        self.inner.stop_subscription();
        self.inner.store_resolved();
        info!("acquisition cancelled");
        self.inner.latch.complete(AcquisitionOutcome::Cancelled);
    }
}

impl SessionInner {
    /// Subscription callback; runs on the source's context.
    fn on_sample(&self, sample: PositionSample) {
        if self.latch.is_resolved() {
            trace!("sample delivered after resolution, ignoring");
            return;
        }

        let now = Instant::now();
        if !filter::qualifies(&sample, &self.request, now) {
            debug!(
                age_minutes = filter::age_minutes(&sample, now),
                accuracy_meters = sample.accuracy_meters,
                "discarding non-qualifying sample"
            );
            return;
        }

        if !self.latch.try_claim() {
            trace!("qualifying sample lost the resolution race, ignoring");
            return;
        }

        self.stop_subscription();
        self.store_resolved();
        info!(
            latitude = sample.latitude,
            longitude = sample.longitude,
            accuracy_meters = sample.accuracy_meters,
            "acquired qualifying fix"
        );
        self.latch.complete(AcquisitionOutcome::Success(sample));
    }

    /// Resolve a precondition failure. The claim can only be lost to a
    /// cancel that raced `start()`, in which case the cancel outcome stands.
    fn fail(&self, outcome: AcquisitionOutcome) {
        if self.latch.try_claim() {
            self.store_resolved();
            self.latch.complete(outcome);
        }
    }

    /// Take and stop the subscription handle, if it has been stored.
    fn stop_subscription(&self) {
        let handle = self.subscription.lock().unwrap().take();
        if let Some(handle) = handle {
            handle.stop();
        }
    }

    fn store_resolved(&self) {
        self.state
            .store(SessionState::Resolved as u8, Ordering::Release);
    }

    /// Transition `from` -> `to`; fails if any other state is current.
    /// `Resolved` can never be left because no transition starts there.
    fn transition(&self, from: SessionState, to: SessionState) -> bool {
        self.state
            .compare_exchange(from as u8, to as u8, Ordering::AcqRel, Ordering::Acquire)
            .is_ok()
    }
}
