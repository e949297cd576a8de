//! Acquisition request configuration.
//!
//! An [`AcquisitionRequest`] carries the freshness and accuracy thresholds
//! a sample must meet, plus the pacing hints forwarded to the location
//! source. It is a plain immutable value: sessions take a validated copy
//! at construction and never mutate it.

use std::time::Duration;

use thiserror::Error;

/// Errors from validating an [`AcquisitionRequest`].
#[derive(Debug, Error, PartialEq)]
pub enum RequestError {
    /// Accuracy threshold must be a positive number of meters.
    #[error("max accuracy must be positive, got {0} m")]
    NonPositiveAccuracy(f32),

    /// Poll interval must be non-zero.
    #[error("poll interval must be positive")]
    ZeroPollInterval,

    /// Fastest interval must be non-zero.
    #[error("fastest interval must be positive")]
    ZeroFastestInterval,

    /// Fastest interval may not exceed the poll interval.
    #[error("fastest interval {fastest:?} exceeds poll interval {poll:?}")]
    FastestExceedsPoll { fastest: Duration, poll: Duration },
}

/// Configuration for a single acquisition.
///
/// # Thresholds
///
/// A sample qualifies when its age in whole minutes is at most
/// `max_age_minutes` *and* its accuracy radius is at most
/// `max_accuracy_meters`. Both comparisons are inclusive.
///
/// # Pacing
///
/// `poll_interval` and `fastest_interval` are hints for the underlying
/// provider: the nominal update cadence and the fastest cadence the caller
/// is willing to receive. They do not affect qualification.
#[derive(Debug, Clone, PartialEq)]
pub struct AcquisitionRequest {
    /// Maximum sample age in whole minutes (inclusive).
    pub max_age_minutes: u32,

    /// Maximum accuracy radius in meters (inclusive, must be positive).
    pub max_accuracy_meters: f32,

    /// Nominal update interval requested from the provider.
    pub poll_interval: Duration,

    /// Fastest update interval the caller accepts (<= `poll_interval`).
    pub fastest_interval: Duration,
}

impl Default for AcquisitionRequest {
    fn default() -> Self {
        Self {
            max_age_minutes: 0,
            max_accuracy_meters: 30.0,
            poll_interval: Duration::from_millis(3000),
            fastest_interval: Duration::from_millis(1000),
        }
    }
}

impl AcquisitionRequest {
    /// Set the maximum sample age in whole minutes.
    pub fn with_max_age_minutes(mut self, minutes: u32) -> Self {
        self.max_age_minutes = minutes;
        self
    }

    /// Set the maximum accuracy radius in meters.
    pub fn with_max_accuracy_meters(mut self, meters: f32) -> Self {
        self.max_accuracy_meters = meters;
        self
    }

    /// Set the nominal provider update interval.
    pub fn with_poll_interval(mut self, interval: Duration) -> Self {
        self.poll_interval = interval;
        self
    }

    /// Set the fastest provider update interval.
    pub fn with_fastest_interval(mut self, interval: Duration) -> Self {
        self.fastest_interval = interval;
        self
    }

    /// Validate the request.
    ///
    /// # Errors
    ///
    /// Returns an error when the accuracy threshold is not positive, an
    /// interval is zero, or the fastest interval exceeds the poll interval.
    pub fn validate(&self) -> Result<(), RequestError> {
        if !(self.max_accuracy_meters > 0.0) {
            return Err(RequestError::NonPositiveAccuracy(self.max_accuracy_meters));
        }
        if self.poll_interval.is_zero() {
            return Err(RequestError::ZeroPollInterval);
        }
        if self.fastest_interval.is_zero() {
            return Err(RequestError::ZeroFastestInterval);
        }
        if self.fastest_interval > self.poll_interval {
            return Err(RequestError::FastestExceedsPoll {
                fastest: self.fastest_interval,
                poll: self.poll_interval,
            });
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_request_is_valid() {
        let request = AcquisitionRequest::default();
        assert!(request.validate().is_ok());
        assert_eq!(request.max_age_minutes, 0);
        assert_eq!(request.max_accuracy_meters, 30.0);
        assert_eq!(request.poll_interval, Duration::from_millis(3000));
        assert_eq!(request.fastest_interval, Duration::from_millis(1000));
    }

    #[test]
    fn test_builder_methods() {
        let request = AcquisitionRequest::default()
            .with_max_age_minutes(2)
            .with_max_accuracy_meters(19.0)
            .with_poll_interval(Duration::from_secs(5))
            .with_fastest_interval(Duration::from_secs(2));

        assert_eq!(request.max_age_minutes, 2);
        assert_eq!(request.max_accuracy_meters, 19.0);
        assert_eq!(request.poll_interval, Duration::from_secs(5));
        assert_eq!(request.fastest_interval, Duration::from_secs(2));
        assert!(request.validate().is_ok());
    }

    #[test]
    fn test_non_positive_accuracy_rejected() {
        let request = AcquisitionRequest::default().with_max_accuracy_meters(0.0);
        assert_eq!(
            request.validate(),
            Err(RequestError::NonPositiveAccuracy(0.0))
        );

        let request = AcquisitionRequest::default().with_max_accuracy_meters(-5.0);
        assert!(matches!(
            request.validate(),
            Err(RequestError::NonPositiveAccuracy(_))
        ));
    }

    #[test]
    fn test_nan_accuracy_rejected() {
        let request = AcquisitionRequest::default().with_max_accuracy_meters(f32::NAN);
        assert!(matches!(
            request.validate(),
            Err(RequestError::NonPositiveAccuracy(_))
        ));
    }

    #[test]
    fn test_zero_intervals_rejected() {
        let request = AcquisitionRequest::default().with_poll_interval(Duration::ZERO);
        assert_eq!(request.validate(), Err(RequestError::ZeroPollInterval));

        let request = AcquisitionRequest::default().with_fastest_interval(Duration::ZERO);
        assert_eq!(request.validate(), Err(RequestError::ZeroFastestInterval));
    }

    #[test]
    fn test_fastest_exceeding_poll_rejected() {
        let request = AcquisitionRequest::default()
            .with_poll_interval(Duration::from_secs(1))
            .with_fastest_interval(Duration::from_secs(2));

        assert!(matches!(
            request.validate(),
            Err(RequestError::FastestExceedsPoll { .. })
        ));
    }

    #[test]
    fn test_fastest_equal_to_poll_accepted() {
        let request = AcquisitionRequest::default()
            .with_poll_interval(Duration::from_secs(1))
            .with_fastest_interval(Duration::from_secs(1));

        assert!(request.validate().is_ok());
    }
}
