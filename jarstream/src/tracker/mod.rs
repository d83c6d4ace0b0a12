//! Concurrency-safe download ledger.
//!
//! The [`DownloadTracker`] is the only shared mutable component of the
//! loader. It maps `(scope, part-name)` keys to download records and
//! guarantees the single-flight property: no matter how many tasks request
//! a part concurrently, the provider is invoked at most once per key and
//! every caller observes the same terminal outcome.
//!
//! # Record lifecycle
//!
//! ```text
//! NotStarted ──ensure_downloaded──► InFlight ──► Done
//!                                      │
//!                                      └─────► Failed (sticky)
//! ```
//!
//! States never regress. A `Failed` record re-raises the same reason on
//! every later request; retrying means constructing a fresh loader.
//!
//! # Synchronization granularity
//!
//! Records live in a sharded concurrent map and each record carries its own
//! once-cell. Waiting for an in-flight download holds no lock that another
//! key could contend on; unrelated parts download in parallel freely.

mod download;
mod metrics;
mod record;

pub use download::DownloadTracker;
pub use metrics::{TrackerMetrics, TrackerSnapshot};
pub use record::{DownloadError, DownloadState, PartKey};
