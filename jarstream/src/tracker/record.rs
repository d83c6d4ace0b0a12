//! Download record keys, states and errors.

use std::fmt;
use std::sync::Arc;

use thiserror::Error;

use crate::provider::ProviderError;
use crate::scope::ScopeId;

/// Ledger key: a part name qualified by its owning scope.
///
/// Two scopes may both declare a part named `"lazy-package"`; their keys
/// differ and their downloads are tracked independently.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct PartKey {
    scope: ScopeId,
    part: String,
}

impl PartKey {
    /// Create a key for a part within a scope.
    pub fn new(scope: ScopeId, part: impl Into<String>) -> Self {
        Self {
            scope,
            part: part.into(),
        }
    }

    /// The owning scope.
    pub fn scope(&self) -> ScopeId {
        self.scope
    }

    /// The part name.
    pub fn part(&self) -> &str {
        &self.part
    }
}

impl fmt::Display for PartKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}@{}", self.part, self.scope)
    }
}

/// Observable state of one download record.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DownloadState {
    /// No request has referenced the key yet.
    NotStarted,
    /// A fetch is running; concurrent requests wait for its outcome.
    InFlight,
    /// The part is materialized locally.
    Done,
    /// The fetch failed; the outcome is sticky.
    Failed,
}

impl DownloadState {
    /// Whether the state is terminal (`Done` or `Failed`).
    pub fn is_terminal(self) -> bool {
        matches!(self, DownloadState::Done | DownloadState::Failed)
    }
}

impl fmt::Display for DownloadState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            DownloadState::NotStarted => "not started",
            DownloadState::InFlight => "in flight",
            DownloadState::Done => "downloaded",
            DownloadState::Failed => "failed",
        };
        write!(f, "{}", label)
    }
}

/// Terminal failure of a part download.
///
/// Cloneable so the one terminal outcome of a key can be handed to every
/// concurrent waiter and re-raised on every later request.
#[derive(Debug, Clone, Error)]
pub enum DownloadError {
    /// The provider failed to fetch the part's archives.
    #[error("failed to download part {part}: {reason}")]
    FetchFailed {
        /// Name of the part that failed.
        part: String,
        /// The provider failure, shared between all observers of the key.
        reason: Arc<ProviderError>,
    },
}
