//! Collaborator capabilities consumed by the acquisition session.
//!
//! The session treats the host platform as three narrow capabilities:
//!
//! - [`PermissionProbe`] - is a location permission granted?
//! - [`ProviderStatus`] - is a provider kind currently enabled?
//! - [`LocationSource`] - subscribe a sample callback, get a stop handle
//!
//! Real platform bindings implement these; tests and the CLI demo use the
//! [`simulated`] implementations.

use std::sync::Arc;

use crate::acquisition::{AcquisitionRequest, PositionSample};

pub mod simulated;

pub use simulated::{ScriptedSource, ScriptedUpdate, StaticPermissions, StaticProviders};

/// Location permission kinds.
///
/// Acquisition requires both: fine for GPS-class fixes, coarse because
/// some hosts gate provider access on it as well.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PermissionKind {
    /// Precise (GPS-class) location access.
    FineLocation,
    /// Approximate (cell/wifi-class) location access.
    CoarseLocation,
}

impl std::fmt::Display for PermissionKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::FineLocation => write!(f, "fine location"),
            Self::CoarseLocation => write!(f, "coarse location"),
        }
    }
}

/// Location provider kinds.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ProviderKind {
    /// High-accuracy satellite provider. Required for acquisition.
    Gps,
    /// Low-power network provider.
    Network,
}

impl std::fmt::Display for ProviderKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Gps => write!(f, "GPS"),
            Self::Network => write!(f, "network"),
        }
    }
}

/// Reads the host's permission state. No side effects, no retries.
pub trait PermissionProbe: Send + Sync {
    /// Is the given permission currently granted?
    fn granted(&self, kind: PermissionKind) -> bool;
}

/// Reads the host's provider state.
pub trait ProviderStatus: Send + Sync {
    /// Is the given provider currently enabled?
    fn enabled(&self, kind: ProviderKind) -> bool;
}

/// Callback invoked by a source for every delivered sample.
///
/// Sources call this from their own context (thread or task); it must be
/// safe to invoke concurrently with the subscriber's other operations.
pub type SampleSink = Arc<dyn Fn(PositionSample) + Send + Sync>;

/// Handle to a live update subscription.
pub trait UpdateSubscription: Send + Sync {
    /// Stop delivering samples.
    ///
    /// Best-effort and irrevocable: samples already in flight may still
    /// arrive after this returns, and subscribers must tolerate that.
    fn stop(&self);
}

/// A stream of position updates.
pub trait LocationSource: Send + Sync {
    /// Begin delivering samples to `sink`, paced per `request`.
    ///
    /// Returns the handle used to stop delivery.
    fn request_updates(
        &self,
        request: &AcquisitionRequest,
        sink: SampleSink,
    ) -> Box<dyn UpdateSubscription>;
}
