//! The application loader.

use std::sync::Arc;

use futures::stream::{self, StreamExt};
use tracing::{debug, info};

use crate::catalog::{Part, PartCatalog};
use crate::config::LoaderConfig;
use crate::descriptor::{ApplicationDescriptor, JarRef};
use crate::provider::JarProvider;
use crate::scope::{Extension, ExtensionGraph, ScopeId, ScopeIdentity};
use crate::tracker::{DownloadState, DownloadTracker, TrackerSnapshot};

use super::error::{LoaderError, ResolutionError};

/// Outcome of a successful class resolution.
///
/// The caller materializes the class definition from the part's jars; that
/// step belongs to the class-loading host, not to this crate.
#[derive(Debug, Clone)]
pub struct ResolvedClass {
    /// Scope owning the class.
    pub scope: ScopeIdentity,
    /// Name of the part that was downloaded (or already present).
    pub part: String,
    /// The part's archives, in declaration order.
    pub jars: Vec<JarRef>,
}

/// Per-application dispatcher from class names to downloaded parts.
///
/// One instance per application run. The graph and catalog are built once
/// at [`start`](Self::start) and read-only afterwards; the tracker is the
/// single shared mutable component and is owned here rather than being
/// process-wide, so separate loader instances never observe each other.
///
/// # Example
///
/// ```ignore
/// use std::sync::Arc;
/// use jarstream::config::LoaderConfig;
/// use jarstream::loader::ApplicationLoader;
/// use jarstream::provider::DryRunJarProvider;
///
/// let loader = ApplicationLoader::start(
///     descriptor,
///     Arc::new(DryRunJarProvider::new()),
///     LoaderConfig::default(),
/// )
/// .await?;
///
/// let resolved = loader.resolve("com.example.Main").await?;
/// println!("{} -> {} jars", resolved.part, resolved.jars.len());
/// ```
#[derive(Debug)]
pub struct ApplicationLoader {
    graph: Arc<ExtensionGraph>,
    catalog: PartCatalog,
    tracker: DownloadTracker,
    search_order: Vec<ScopeId>,
}

impl ApplicationLoader {
    /// Build the loader and run the eager pre-pass.
    ///
    /// Every part flagged eager in any reachable scope is downloaded before
    /// this returns, concurrently across independent keys but never more
    /// than `config.eager_concurrency` at once. An eager failure is fatal:
    /// the error is returned and no loader is produced.
    pub async fn start(
        descriptor: ApplicationDescriptor,
        provider: Arc<dyn JarProvider>,
        config: LoaderConfig,
    ) -> Result<Self, LoaderError> {
        let graph = Arc::new(ExtensionGraph::build(&descriptor));
        let catalog = PartCatalog::build(&graph, &descriptor)?;
        let tracker = DownloadTracker::new(provider, Arc::clone(&graph));
        let search_order = graph.search_order(ScopeId::MAIN);

        let loader = Self {
            graph,
            catalog,
            tracker,
            search_order,
        };
        loader.download_eager_parts(config.eager_concurrency).await?;

        info!(
            scopes = loader.graph.scope_count(),
            parts = loader
                .search_order
                .iter()
                .map(|&s| loader.catalog.parts_in(s).len())
                .sum::<usize>(),
            "application loader ready"
        );
        Ok(loader)
    }

    async fn download_eager_parts(&self, concurrency: usize) -> Result<(), LoaderError> {
        let eager: Vec<(ScopeId, &Part)> = self
            .search_order
            .iter()
            .flat_map(|&scope| {
                self.catalog
                    .parts_in(scope)
                    .iter()
                    .filter(|part| part.is_eager())
                    .map(move |part| (scope, part))
            })
            .collect();

        if eager.is_empty() {
            return Ok(());
        }

        info!(parts = eager.len(), concurrency, "downloading eager parts");
        let results: Vec<_> = stream::iter(eager)
            .map(|(scope, part)| self.tracker.ensure_downloaded(scope, part))
            .buffer_unordered(concurrency)
            .collect()
            .await;

        // All downloads are terminal at this point; report the first failure.
        for result in results {
            result?;
        }
        Ok(())
    }

    /// Resolve a class to the jars of its owning part, downloading the part
    /// if it is not yet present.
    ///
    /// Scopes are consulted in the deterministic search order; the first
    /// scope declaring an owner wins and later scopes are not scanned.
    pub async fn resolve(&self, class_name: &str) -> Result<ResolvedClass, ResolutionError> {
        for &scope in &self.search_order {
            if let Some(part) = self.catalog.part_for(scope, class_name) {
                debug!(
                    class = class_name,
                    part = part.name(),
                    scope = %self.graph.identity(scope),
                    "class owner found"
                );
                self.tracker.ensure_downloaded(scope, part).await?;
                return Ok(ResolvedClass {
                    scope: self.graph.identity(scope).clone(),
                    part: part.name().to_string(),
                    jars: part.jars().to_vec(),
                });
            }
        }

        debug!(class = class_name, "no owning part in any scope");
        Err(ResolutionError::ClassNotOwned {
            class: class_name.to_string(),
        })
    }

    /// Whether the main-scope part is downloaded. Non-blocking.
    pub fn is_part_downloaded(&self, part_name: &str) -> bool {
        self.tracker.is_downloaded(ScopeId::MAIN, part_name)
    }

    /// Whether the extension's part is downloaded. Non-blocking; an unknown
    /// extension or part is simply not downloaded.
    pub fn is_part_downloaded_in(&self, part_name: &str, extension: &Extension) -> bool {
        match self.graph.scope_for_url(extension.url()) {
            Some(scope) => self.tracker.is_downloaded(scope, part_name),
            None => false,
        }
    }

    /// Download a main-scope part by name.
    pub async fn download_part(&self, part_name: &str) -> Result<(), ResolutionError> {
        self.download_in_scope(ScopeId::MAIN, part_name).await
    }

    /// Download an extension's part by name.
    pub async fn download_part_in(
        &self,
        part_name: &str,
        extension: &Extension,
    ) -> Result<(), ResolutionError> {
        let scope = self.graph.scope_for_url(extension.url()).ok_or_else(|| {
            ResolutionError::UnknownExtension {
                url: extension.url().to_string(),
            }
        })?;
        self.download_in_scope(scope, part_name).await
    }

    async fn download_in_scope(
        &self,
        scope: ScopeId,
        part_name: &str,
    ) -> Result<(), ResolutionError> {
        let part = self.catalog.part_named(scope, part_name).ok_or_else(|| {
            ResolutionError::UnknownPart {
                part: part_name.to_string(),
                scope: self.graph.identity(scope).clone(),
            }
        })?;
        self.tracker.ensure_downloaded(scope, part).await?;
        Ok(())
    }

    /// Observe the download state of a main-scope part. Non-blocking.
    pub fn part_state(&self, part_name: &str) -> DownloadState {
        self.tracker.state(ScopeId::MAIN, part_name)
    }

    /// Observe the download state of an extension's part. Non-blocking.
    pub fn part_state_in(&self, part_name: &str, extension: &Extension) -> DownloadState {
        match self.graph.scope_for_url(extension.url()) {
            Some(scope) => self.tracker.state(scope, part_name),
            None => DownloadState::NotStarted,
        }
    }

    /// Point-in-time download metrics.
    pub fn metrics(&self) -> TrackerSnapshot {
        self.tracker.metrics()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::atomic::{AtomicUsize, Ordering};

    use crate::descriptor::{ExtensionDescriptor, PartDefinition};
    use crate::provider::{BoxFuture, ProviderError};

    struct CountingProvider {
        fetches: AtomicUsize,
        fail_parts: Vec<String>,
    }

    impl CountingProvider {
        fn new() -> Self {
            Self {
                fetches: AtomicUsize::new(0),
                fail_parts: Vec::new(),
            }
        }

        fn failing(part: &str) -> Self {
            Self {
                fetches: AtomicUsize::new(0),
                fail_parts: vec![part.to_string()],
            }
        }

        fn fetch_count(&self) -> usize {
            self.fetches.load(Ordering::SeqCst)
        }
    }

    impl JarProvider for CountingProvider {
        fn fetch<'a>(
            &'a self,
            _scope: &'a ScopeIdentity,
            part: &'a str,
            _jars: &'a [JarRef],
        ) -> BoxFuture<'a, Result<(), ProviderError>> {
            Box::pin(async move {
                self.fetches.fetch_add(1, Ordering::SeqCst);
                if self.fail_parts.iter().any(|p| p == part) {
                    return Err(ProviderError::Unavailable("mirror offline".to_string()));
                }
                Ok(())
            })
        }
    }

    async fn start(
        descriptor: ApplicationDescriptor,
        provider: Arc<CountingProvider>,
    ) -> ApplicationLoader {
        ApplicationLoader::start(descriptor, provider, LoaderConfig::default())
            .await
            .unwrap()
    }

    #[tokio::test]
    async fn test_eager_parts_download_at_start() {
        let provider = Arc::new(CountingProvider::new());
        let descriptor = ApplicationDescriptor::new()
            .with_part(PartDefinition::new("eager-package").with_eager(true))
            .with_part(PartDefinition::new("lazy-package"));

        let loader = start(descriptor, Arc::clone(&provider)).await;

        assert!(loader.is_part_downloaded("eager-package"));
        assert!(!loader.is_part_downloaded("lazy-package"));
        assert_eq!(provider.fetch_count(), 1);
    }

    #[tokio::test]
    async fn test_eager_failure_is_fatal() {
        let provider = Arc::new(CountingProvider::failing("eager-package"));
        let descriptor = ApplicationDescriptor::new()
            .with_part(PartDefinition::new("eager-package").with_eager(true));

        let result = ApplicationLoader::start(descriptor, provider, LoaderConfig::default()).await;

        assert!(matches!(result, Err(LoaderError::EagerDownloadFailed(_))));
    }

    #[tokio::test]
    async fn test_resolve_downloads_owner() {
        let provider = Arc::new(CountingProvider::new());
        let descriptor = ApplicationDescriptor::new().with_part(
            PartDefinition::new("lazy-package")
                .with_jar("lazy.jar")
                .with_class("com.example.A"),
        );

        let loader = start(descriptor, Arc::clone(&provider)).await;
        let resolved = loader.resolve("com.example.A").await.unwrap();

        assert_eq!(resolved.part, "lazy-package");
        assert_eq!(resolved.scope, ScopeIdentity::Main);
        assert_eq!(resolved.jars, vec![JarRef::new("lazy.jar")]);
        assert!(loader.is_part_downloaded("lazy-package"));
    }

    #[tokio::test]
    async fn test_resolve_unowned_class() {
        let provider = Arc::new(CountingProvider::new());
        let loader = start(ApplicationDescriptor::new(), provider).await;

        let err = loader.resolve("com.example.Missing").await.unwrap_err();
        assert!(matches!(err, ResolutionError::ClassNotOwned { .. }));
    }

    #[tokio::test]
    async fn test_download_part_unknown_name() {
        let provider = Arc::new(CountingProvider::new());
        let loader = start(ApplicationDescriptor::new(), provider).await;

        let err = loader.download_part("nope").await.unwrap_err();
        assert!(matches!(err, ResolutionError::UnknownPart { .. }));
    }

    #[tokio::test]
    async fn test_download_part_unknown_extension() {
        let provider = Arc::new(CountingProvider::new());
        let descriptor = ApplicationDescriptor::new().with_extension(
            ExtensionDescriptor::new("http://example.com/ext.jnlp")
                .with_part(PartDefinition::new("p")),
        );
        let loader = start(descriptor, provider).await;

        let err = loader
            .download_part_in("p", &Extension::new("http://example.com/other.jnlp"))
            .await
            .unwrap_err();
        assert!(matches!(err, ResolutionError::UnknownExtension { .. }));
    }

    #[tokio::test]
    async fn test_part_state_transitions() {
        let provider = Arc::new(CountingProvider::new());
        let descriptor =
            ApplicationDescriptor::new().with_part(PartDefinition::new("lazy-package"));
        let loader = start(descriptor, provider).await;

        assert_eq!(
            loader.part_state("lazy-package"),
            DownloadState::NotStarted
        );
        loader.download_part("lazy-package").await.unwrap();
        assert_eq!(loader.part_state("lazy-package"), DownloadState::Done);
    }
}
