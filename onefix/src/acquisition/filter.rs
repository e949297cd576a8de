//! Sample qualification predicate.
//!
//! Pure functions with no state and no side effects, safe to call from
//! any thread. A sample is judged solely on its own age and accuracy;
//! the session accepts the *first* qualifying sample in delivery order,
//! not the best one seen over a window.

use std::time::Instant;

use super::request::AcquisitionRequest;
use super::sample::PositionSample;

/// Sample age in whole minutes at `now`.
///
/// Truncating division is intentional: a sample anywhere inside the
/// boundary minute still counts as that many whole minutes old, so a
/// fix exactly at the age threshold qualifies.
pub fn age_minutes(sample: &PositionSample, now: Instant) -> u64 {
    (sample.age(now).as_millis() / 60_000) as u64
}

/// Does `sample` satisfy the request's freshness and accuracy thresholds?
///
/// Both comparisons are inclusive: age in whole minutes at most
/// `max_age_minutes`, accuracy radius at most `max_accuracy_meters`.
pub fn qualifies(sample: &PositionSample, request: &AcquisitionRequest, now: Instant) -> bool {
    age_minutes(sample, now) <= u64::from(request.max_age_minutes)
        && sample.accuracy_meters <= request.max_accuracy_meters
}
