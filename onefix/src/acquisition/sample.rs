//! Position sample type.
//!
//! A [`PositionSample`] is one reported fix from the underlying provider.
//! Its capture time is a monotonic [`Instant`], never wall-clock time, so
//! age computation is immune to clock skew.

use std::time::{Duration, Instant};

/// One reported position fix.
#[derive(Debug, Clone, PartialEq)]
pub struct PositionSample {
    /// Latitude in degrees (-90 to 90).
    pub latitude: f64,

    /// Longitude in degrees (-180 to 180).
    pub longitude: f64,

    /// Provider-reported uncertainty radius in meters (smaller is better).
    pub accuracy_meters: f32,

    /// When this fix was captured, on the monotonic clock.
    pub captured_at: Instant,
}

impl PositionSample {
    /// Create a sample captured now.
    pub fn new(latitude: f64, longitude: f64, accuracy_meters: f32) -> Self {
        Self {
            latitude,
            longitude,
            accuracy_meters,
            captured_at: Instant::now(),
        }
    }

    /// Create a sample captured `age` ago.
    ///
    /// Providers that replay cached fixes report them with their original
    /// capture time; this constructor builds the backdated `Instant` for
    /// them. Falls back to `now` if the clock cannot be wound back that far.
    pub fn with_age(latitude: f64, longitude: f64, accuracy_meters: f32, age: Duration) -> Self {
        let now = Instant::now();
        Self {
            latitude,
            longitude,
            accuracy_meters,
            captured_at: now.checked_sub(age).unwrap_or(now),
        }
    }

    /// Age of this sample relative to `now`.
    ///
    /// Saturates to zero for samples captured after `now`.
    pub fn age(&self, now: Instant) -> Duration {
        now.saturating_duration_since(self.captured_at)
    }
}
