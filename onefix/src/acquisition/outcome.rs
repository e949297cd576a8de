//! Acquisition outcome and session state types.

use super::sample::PositionSample;

/// Why an acquisition failed without ever subscribing.
///
/// Both reasons are caller-fixable preconditions, not transient errors:
/// the session never retries them. Retrying an acquisition is the caller's
/// responsibility (e.g. start a new session after permission is granted).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FailureReason {
    /// Fine or coarse location permission is not granted.
    PermissionDenied,
    /// The high-accuracy (GPS-class) provider is disabled on the host.
    ProviderUnavailable,
}

impl std::fmt::Display for FailureReason {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::PermissionDenied => write!(f, "location permission denied"),
            Self::ProviderUnavailable => write!(f, "location provider unavailable"),
        }
    }
}

/// Terminal result of an acquisition session.
///
/// Exactly one outcome is ever produced per session.
#[derive(Debug, Clone, PartialEq)]
pub enum AcquisitionOutcome {
    /// The first qualifying sample, in delivery order.
    Success(PositionSample),
    /// A precondition failed before subscribing.
    Failure(FailureReason),
    /// The caller cancelled before a qualifying sample arrived.
    Cancelled,
}

impl AcquisitionOutcome {
    /// Returns true if the acquisition produced a qualifying sample.
    pub fn is_success(&self) -> bool {
        matches!(self, Self::Success(_))
    }

    /// The acquired sample, if any.
    pub fn sample(&self) -> Option<&PositionSample> {
        match self {
            Self::Success(sample) => Some(sample),
            _ => None,
        }
    }
}

impl std::fmt::Display for AcquisitionOutcome {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Success(sample) => write!(
                f,
                "fix at {:.6}, {:.6} (±{:.0} m)",
                sample.latitude, sample.longitude, sample.accuracy_meters
            ),
            Self::Failure(reason) => write!(f, "{reason}"),
            Self::Cancelled => write!(f, "cancelled"),
        }
    }
}

/// Lifecycle state of an acquisition session.
///
/// `Resolved` is terminal: once entered, no further transitions or
/// callback effects are observable.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[repr(u8)]
pub enum SessionState {
    /// Created, not yet started.
    #[default]
    Idle = 0,
    /// Preconditions passed, subscribing to the update stream.
    Subscribing = 1,
    /// Subscribed, waiting for the first qualifying sample.
    AwaitingSample = 2,
    /// Outcome produced, subscription torn down.
    Resolved = 3,
}

impl SessionState {
    /// Returns true if the session has produced its outcome.
    pub fn is_terminal(&self) -> bool {
        matches!(self, Self::Resolved)
    }

    pub(crate) fn from_u8(value: u8) -> Self {
        match value {
            0 => Self::Idle,
            1 => Self::Subscribing,
            2 => Self::AwaitingSample,
            _ => Self::Resolved,
        }
    }
}

impl std::fmt::Display for SessionState {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Idle => write!(f, "Idle"),
            Self::Subscribing => write!(f, "Subscribing"),
            Self::AwaitingSample => write!(f, "AwaitingSample"),
            Self::Resolved => write!(f, "Resolved"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_outcome_is_success() {
        let sample = PositionSample::new(53.5, 10.0, 12.0);
        assert!(AcquisitionOutcome::Success(sample).is_success());
        assert!(!AcquisitionOutcome::Cancelled.is_success());
        assert!(!AcquisitionOutcome::Failure(FailureReason::PermissionDenied).is_success());
    }

    #[test]
    fn test_outcome_sample_accessor() {
        let sample = PositionSample::new(53.5, 10.0, 12.0);
        let outcome = AcquisitionOutcome::Success(sample.clone());
        assert_eq!(outcome.sample(), Some(&sample));
        assert_eq!(AcquisitionOutcome::Cancelled.sample(), None);
    }

    #[test]
    fn test_failure_reason_display() {
        assert_eq!(
            FailureReason::PermissionDenied.to_string(),
            "location permission denied"
        );
        assert_eq!(
            FailureReason::ProviderUnavailable.to_string(),
            "location provider unavailable"
        );
    }

    #[test]
    fn test_session_state_is_terminal() {
        assert!(!SessionState::Idle.is_terminal());
        assert!(!SessionState::Subscribing.is_terminal());
        assert!(!SessionState::AwaitingSample.is_terminal());
        assert!(SessionState::Resolved.is_terminal());
    }

    #[test]
    fn test_session_state_default() {
        assert_eq!(SessionState::default(), SessionState::Idle);
    }

    #[test]
    fn test_session_state_round_trip() {
        for state in [
            SessionState::Idle,
            SessionState::Subscribing,
            SessionState::AwaitingSample,
            SessionState::Resolved,
        ] {
            assert_eq!(SessionState::from_u8(state as u8), state);
        }
    }

    #[test]
    fn test_session_state_display() {
        assert_eq!(SessionState::AwaitingSample.to_string(), "AwaitingSample");
        assert_eq!(SessionState::Resolved.to_string(), "Resolved");
    }
}
