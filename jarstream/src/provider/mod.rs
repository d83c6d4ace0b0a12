//! Jar provider abstraction.
//!
//! The core decides *what* to download and *when*; the actual byte-level
//! fetch/cache/unpack mechanism is an external collaborator behind the
//! [`JarProvider`] trait. The trait is dyn-compatible (`Arc<dyn
//! JarProvider>`) via `Pin<Box<dyn Future>>` returns, so any backend can be
//! plugged in without generics leaking into the loader.
//!
//! The [`DownloadTracker`](crate::tracker::DownloadTracker) calls
//! [`JarProvider::fetch`] exactly once per successful single-flight
//! download of a part. A failed fetch is sticky for the loader's lifetime;
//! a fresh loader instance is the retry mechanism.

mod dry_run;

use std::future::Future;
use std::pin::Pin;

use thiserror::Error;

use crate::descriptor::JarRef;
use crate::scope::ScopeIdentity;

pub use dry_run::DryRunJarProvider;

/// Boxed future type for dyn-compatible async methods.
pub type BoxFuture<'a, T> = Pin<Box<dyn Future<Output = T> + Send + 'a>>;

/// Errors a provider can report from a fetch.
#[derive(Debug, Error)]
pub enum ProviderError {
    /// I/O failure while fetching or materializing an archive.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// A referenced archive does not exist at its declared location.
    #[error("resource not found: {0}")]
    NotFound(String),

    /// The provider cannot serve requests at the moment.
    #[error("provider unavailable: {0}")]
    Unavailable(String),
}

/// Capability to fetch and locally materialize the archives of a part.
///
/// Implementations perform the real transport and storage work; the core
/// only forwards the part's jar references verbatim. A fetch either
/// materializes *all* archives of the part or fails as a whole; partial
/// results must not be observable to later callers.
///
/// # Thread Safety
///
/// Implementations must be `Send + Sync`; the tracker invokes them from
/// concurrent resolution tasks.
pub trait JarProvider: Send + Sync {
    /// Fetch all archives of one part into local storage.
    ///
    /// # Arguments
    ///
    /// * `scope` - Identity of the scope owning the part
    /// * `part` - Part name, unique within that scope
    /// * `jars` - The part's archive references, in declaration order
    fn fetch<'a>(
        &'a self,
        scope: &'a ScopeIdentity,
        part: &'a str,
        jars: &'a [JarRef],
    ) -> BoxFuture<'a, Result<(), ProviderError>>;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_provider_error_display() {
        let err = ProviderError::NotFound("lazy.jar".to_string());
        assert_eq!(err.to_string(), "resource not found: lazy.jar");

        let err = ProviderError::Unavailable("mirror offline".to_string());
        assert_eq!(err.to_string(), "provider unavailable: mirror offline");
    }

    #[test]
    fn test_provider_error_from_io() {
        let io_err = std::io::Error::new(std::io::ErrorKind::NotFound, "no such file");
        let err: ProviderError = io_err.into();
        assert!(matches!(err, ProviderError::Io(_)));
    }
}
