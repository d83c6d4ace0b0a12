//! Single-flight download tracking.

use std::sync::Arc;

use dashmap::DashMap;
use tokio::sync::OnceCell;
use tracing::{debug, info, warn};

use crate::catalog::Part;
use crate::provider::JarProvider;
use crate::scope::{ExtensionGraph, ScopeId};

use super::metrics::{TrackerMetrics, TrackerSnapshot};
use super::record::{DownloadError, DownloadState, PartKey};

type Record = Arc<OnceCell<Result<(), DownloadError>>>;

/// Ledger of part downloads for one loader instance.
///
/// Owned by the [`ApplicationLoader`](crate::loader::ApplicationLoader);
/// never process-wide, so loader instances (and tests) stay fully isolated
/// from each other.
pub struct DownloadTracker {
    provider: Arc<dyn JarProvider>,
    graph: Arc<ExtensionGraph>,
    records: DashMap<PartKey, Record>,
    metrics: TrackerMetrics,
}

impl DownloadTracker {
    /// Create an empty ledger backed by the given provider.
    pub fn new(provider: Arc<dyn JarProvider>, graph: Arc<ExtensionGraph>) -> Self {
        Self {
            provider,
            graph,
            records: DashMap::new(),
            metrics: TrackerMetrics::new(),
        }
    }

    /// Make sure the part is materialized, downloading it if necessary.
    ///
    /// The first caller for a key performs the fetch; concurrent callers
    /// wait for that fetch and share its outcome. Once a key is terminal
    /// the stored outcome is returned without touching the provider again,
    /// including the failure case, which is sticky by design.
    pub async fn ensure_downloaded(
        &self,
        scope: ScopeId,
        part: &Part,
    ) -> Result<(), DownloadError> {
        let key = PartKey::new(scope, part.name());
        let record = self
            .records
            .entry(key.clone())
            .or_insert_with(|| Arc::new(OnceCell::new()))
            .clone();

        if let Some(outcome) = record.get() {
            debug!(%key, "part already terminal, reusing outcome");
            return outcome.clone();
        }

        let mut fetched = false;
        let outcome = record
            .get_or_init(|| {
                fetched = true;
                self.fetch_part(scope, part)
            })
            .await;

        if !fetched {
            self.metrics.wait_coalesced();
            debug!(%key, "waited for in-flight download");
        }
        outcome.clone()
    }

    async fn fetch_part(&self, scope: ScopeId, part: &Part) -> Result<(), DownloadError> {
        let identity = self.graph.identity(scope);
        self.metrics.fetch_started();
        debug!(part = part.name(), %identity, jars = part.jars().len(), "downloading part");

        match self.provider.fetch(identity, part.name(), part.jars()).await {
            Ok(()) => {
                self.metrics.fetch_succeeded();
                info!(part = part.name(), %identity, "part downloaded");
                Ok(())
            }
            Err(err) => {
                self.metrics.fetch_failed();
                warn!(part = part.name(), %identity, error = %err, "part download failed");
                Err(DownloadError::FetchFailed {
                    part: part.name().to_string(),
                    reason: Arc::new(err),
                })
            }
        }
    }

    /// Whether the part's state is `Done`. Non-blocking.
    pub fn is_downloaded(&self, scope: ScopeId, part_name: &str) -> bool {
        self.state(scope, part_name) == DownloadState::Done
    }

    /// Observe the record state for a key. Non-blocking.
    pub fn state(&self, scope: ScopeId, part_name: &str) -> DownloadState {
        let key = PartKey::new(scope, part_name);
        match self.records.get(&key) {
            None => DownloadState::NotStarted,
            Some(record) => match record.get() {
                None => DownloadState::InFlight,
                Some(Ok(())) => DownloadState::Done,
                Some(Err(_)) => DownloadState::Failed,
            },
        }
    }

    /// Point-in-time metrics.
    pub fn metrics(&self) -> TrackerSnapshot {
        self.metrics.snapshot()
    }
}

impl std::fmt::Debug for DownloadTracker {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("DownloadTracker")
            .field("records", &self.records.len())
            .field("metrics", &self.metrics)
            .finish()
    }
}
