//! OneFix - single-shot location fix acquisition
//!
//! This library converts a repeating, callback-driven location provider
//! into a one-shot asynchronous result: the first position sample that is
//! both fresh enough and accurate enough resolves the acquisition, and the
//! underlying subscription is torn down on every exit path.
//!
//! # High-Level API
//!
//! ```ignore
//! use onefix::acquisition::{AcquisitionOutcome, AcquisitionRequest, AcquisitionSession};
//!
//! let request = AcquisitionRequest::default().with_max_accuracy_meters(19.0);
//! let (session, waiter) = AcquisitionSession::new(request)?;
//!
//! session.start(&permissions, &providers, &source);
//!
//! match waiter.outcome().await {
//!     AcquisitionOutcome::Success(sample) => {
//!         println!("lat: {} lon: {}", sample.latitude, sample.longitude);
//!     }
//!     AcquisitionOutcome::Failure(reason) => eprintln!("failed: {reason}"),
//!     AcquisitionOutcome::Cancelled => {}
//! }
//! ```
//!
//! The session can be cloned and cancelled from another task at any time;
//! cancellation, precondition failures, and the first qualifying sample all
//! race to resolve the same single-assignment latch, and exactly one wins.

pub mod acquisition;
pub mod logging;
pub mod platform;

/// Version of the OneFix library and CLI.
///
/// This is synchronized across all components in the workspace.
/// The version is defined in `Cargo.toml` and injected at compile time.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
