//! Acquisition session - one fix per call, exactly one outcome.
//!
//! This module is the core of OneFix. An [`AcquisitionSession`] gates on
//! location permission, checks provider availability, subscribes to the
//! update stream, and resolves with the *first* sample that satisfies the
//! freshness and accuracy thresholds of its [`AcquisitionRequest`].
//!
//! # Control Flow
//!
//! ```text
//! start() ── permission denied ──────────► Failure(PermissionDenied)
//!    │
//!    ├───── GPS provider disabled ───────► Failure(ProviderUnavailable)
//!    │
//!    └───── subscribe ──► AwaitingSample ─┬─ first qualifying sample ─► Success(sample)
//!                                         └─ cancel() ───────────────► Cancelled
//! ```
//!
//! Every terminal transition stops the subscription exactly once, so a
//! sample delivered after resolution has no observable effect.
//!
//! # Components
//!
//! - [`request`] - `AcquisitionRequest` thresholds and pacing configuration
//! - [`sample`] - `PositionSample` with a monotonic capture timestamp
//! - [`outcome`] - `AcquisitionOutcome`, `FailureReason`, `SessionState`
//! - [`filter`] - pure sample qualification predicate
//! - [`latch`] - `ResultLatch`, the single-assignment completion cell
//! - [`session`] - `AcquisitionSession`, the state machine composing the rest

mod filter;
mod latch;
mod outcome;
mod request;
mod sample;
mod session;

pub use filter::{age_minutes, qualifies};
pub use latch::{ResultLatch, ResultWaiter};
pub use outcome::{AcquisitionOutcome, FailureReason, SessionState};
pub use request::{AcquisitionRequest, RequestError};
pub use sample::PositionSample;
pub use session::AcquisitionSession;
