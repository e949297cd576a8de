//! Simulated platform capabilities for tests and the CLI demo.
//!
//! [`ScriptedSource`] replays a fixed sequence of samples on a spawned
//! tokio task, honouring `stop()` through a `CancellationToken`. It also
//! counts `request_updates` and `stop` invocations so tests can assert
//! the no-leak property (subscription created once, stopped once).

use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;
use std::time::Duration;

use tokio_util::sync::CancellationToken;
use tracing::debug;

use super::{
    LocationSource, PermissionKind, PermissionProbe, ProviderKind, ProviderStatus, SampleSink,
    UpdateSubscription,
};
use crate::acquisition::{AcquisitionRequest, PositionSample};

/// Fixed-answer permission probe.
#[derive(Debug, Clone, Copy)]
pub struct StaticPermissions {
    /// Fine (GPS-class) permission granted?
    pub fine: bool,
    /// Coarse permission granted?
    pub coarse: bool,
}

impl StaticPermissions {
    /// Both permissions granted.
    pub fn granted_all() -> Self {
        Self {
            fine: true,
            coarse: true,
        }
    }

    /// Both permissions denied.
    pub fn denied() -> Self {
        Self {
            fine: false,
            coarse: false,
        }
    }
}

impl PermissionProbe for StaticPermissions {
    fn granted(&self, kind: PermissionKind) -> bool {
        match kind {
            PermissionKind::FineLocation => self.fine,
            PermissionKind::CoarseLocation => self.coarse,
        }
    }
}

/// Fixed-answer provider status.
#[derive(Debug, Clone, Copy)]
pub struct StaticProviders {
    /// GPS provider enabled?
    pub gps: bool,
    /// Network provider enabled?
    pub network: bool,
}

impl StaticProviders {
    /// All providers enabled.
    pub fn all_enabled() -> Self {
        Self {
            gps: true,
            network: true,
        }
    }

    /// GPS disabled, network still up.
    pub fn gps_disabled() -> Self {
        Self {
            gps: false,
            network: true,
        }
    }
}

impl ProviderStatus for StaticProviders {
    fn enabled(&self, kind: ProviderKind) -> bool {
        match kind {
            ProviderKind::Gps => self.gps,
            ProviderKind::Network => self.network,
        }
    }
}

/// One entry in a scripted delivery sequence.
#[derive(Debug, Clone)]
pub struct ScriptedUpdate {
    /// Delay before delivering this sample. `None` uses the request's
    /// poll interval, like a real provider pacing its updates.
    pub delay: Option<Duration>,

    /// The sample to deliver.
    pub sample: PositionSample,
}

impl ScriptedUpdate {
    /// Deliver at the request's poll interval.
    pub fn new(sample: PositionSample) -> Self {
        Self {
            delay: None,
            sample,
        }
    }

    /// Deliver after an explicit delay.
    pub fn after(delay: Duration, sample: PositionSample) -> Self {
        Self {
            delay: Some(delay),
            sample,
        }
    }
}

/// Location source that replays a fixed script.
///
/// Each `request_updates` call spawns a delivery task replaying the whole
/// script from the beginning. Must be called from within a tokio runtime.
pub struct ScriptedSource {
    script: Vec<ScriptedUpdate>,
    request_count: Arc<AtomicUsize>,
    stop_count: Arc<AtomicUsize>,
}

impl ScriptedSource {
    /// Create a source that will replay `script` in order.
    pub fn new(script: Vec<ScriptedUpdate>) -> Self {
        Self {
            script,
            request_count: Arc::new(AtomicUsize::new(0)),
            stop_count: Arc::new(AtomicUsize::new(0)),
        }
    }

    /// How many subscriptions have been requested.
    pub fn request_count(&self) -> usize {
        self.request_count.load(Ordering::SeqCst)
    }

    /// How many times `stop()` has been invoked across all subscriptions.
    pub fn stop_count(&self) -> usize {
        self.stop_count.load(Ordering::SeqCst)
    }
}

impl LocationSource for ScriptedSource {
    fn request_updates(
        &self,
        request: &AcquisitionRequest,
        sink: SampleSink,
    ) -> Box<dyn UpdateSubscription> {
        self.request_count.fetch_add(1, Ordering::SeqCst);

        let token = CancellationToken::new();
        let delivery_token = token.clone();
        let script = self.script.clone();
        let pace = request.poll_interval;

        tokio::spawn(async move {
            for update in script {
                let delay = update.delay.unwrap_or(pace);
                tokio::select! {
                    _ = delivery_token.cancelled() => {
                        debug!("scripted source stopped, ending delivery");
                        return;
                    }
                    _ = tokio::time::sleep(delay) => {}
                }
                sink(update.sample);
            }
            debug!("scripted source exhausted its script");
        });

        Box::new(ScriptedSubscription {
            token,
            stop_count: Arc::clone(&self.stop_count),
        })
    }
}

struct ScriptedSubscription {
    token: CancellationToken,
    stop_count: Arc<AtomicUsize>,
}

impl UpdateSubscription for ScriptedSubscription {
    fn stop(&self) {
        self.stop_count.fetch_add(1, Ordering::SeqCst);
        self.token.cancel();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Mutex;

    fn fast_request() -> AcquisitionRequest {
        AcquisitionRequest::default()
            .with_poll_interval(Duration::from_millis(10))
            .with_fastest_interval(Duration::from_millis(5))
    }

    fn collecting_sink() -> (SampleSink, Arc<Mutex<Vec<PositionSample>>>) {
        let collected = Arc::new(Mutex::new(Vec::new()));
        let sink_target = Arc::clone(&collected);
        let sink: SampleSink = Arc::new(move |sample| {
            sink_target.lock().unwrap().push(sample);
        });
        (sink, collected)
    }

    #[test]
    fn test_static_permissions() {
        let granted = StaticPermissions::granted_all();
        assert!(granted.granted(PermissionKind::FineLocation));
        assert!(granted.granted(PermissionKind::CoarseLocation));

        let denied = StaticPermissions::denied();
        assert!(!denied.granted(PermissionKind::FineLocation));

        let fine_only = StaticPermissions {
            fine: true,
            coarse: false,
        };
        assert!(fine_only.granted(PermissionKind::FineLocation));
        assert!(!fine_only.granted(PermissionKind::CoarseLocation));
    }

    #[test]
    fn test_static_providers() {
        let enabled = StaticProviders::all_enabled();
        assert!(enabled.enabled(ProviderKind::Gps));
        assert!(enabled.enabled(ProviderKind::Network));

        let disabled = StaticProviders::gps_disabled();
        assert!(!disabled.enabled(ProviderKind::Gps));
        assert!(disabled.enabled(ProviderKind::Network));
    }

    #[tokio::test]
    async fn test_scripted_source_delivers_in_order() {
        let source = ScriptedSource::new(vec![
            ScriptedUpdate::after(
                Duration::from_millis(5),
                PositionSample::new(1.0, 0.0, 10.0),
            ),
            ScriptedUpdate::after(
                Duration::from_millis(5),
                PositionSample::new(2.0, 0.0, 10.0),
            ),
        ]);
        let (sink, collected) = collecting_sink();

        let _subscription = source.request_updates(&fast_request(), sink);
        tokio::time::sleep(Duration::from_millis(100)).await;

        let samples = collected.lock().unwrap();
        assert_eq!(samples.len(), 2);
        assert_eq!(samples[0].latitude, 1.0);
        assert_eq!(samples[1].latitude, 2.0);
        assert_eq!(source.request_count(), 1);
    }

    #[tokio::test]
    async fn test_stop_halts_delivery() {
        let source = ScriptedSource::new(vec![
            ScriptedUpdate::after(
                Duration::from_millis(5),
                PositionSample::new(1.0, 0.0, 10.0),
            ),
            ScriptedUpdate::after(
                Duration::from_millis(200),
                PositionSample::new(2.0, 0.0, 10.0),
            ),
        ]);
        let (sink, collected) = collecting_sink();

        let subscription = source.request_updates(&fast_request(), sink);
        tokio::time::sleep(Duration::from_millis(50)).await;
        subscription.stop();
        tokio::time::sleep(Duration::from_millis(250)).await;

        assert_eq!(collected.lock().unwrap().len(), 1);
        assert_eq!(source.stop_count(), 1);
    }

    #[tokio::test]
    async fn test_unspecified_delay_uses_poll_interval() {
        let source = ScriptedSource::new(vec![ScriptedUpdate::new(PositionSample::new(
            1.0, 0.0, 10.0,
        ))]);
        let (sink, collected) = collecting_sink();

        let _subscription = source.request_updates(&fast_request(), sink);

        // Poll interval is 10ms; nothing should arrive immediately.
        assert!(collected.lock().unwrap().is_empty());
        tokio::time::sleep(Duration::from_millis(60)).await;
        assert_eq!(collected.lock().unwrap().len(), 1);
    }
}
