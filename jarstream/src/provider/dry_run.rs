//! No-op provider for harnesses and descriptor debugging.

use tracing::info;

use crate::descriptor::JarRef;
use crate::scope::ScopeIdentity;

use super::{BoxFuture, JarProvider, ProviderError};

/// Provider that fetches nothing and always succeeds.
///
/// Useful to dry-run a descriptor through the loader: every download
/// decision (which part, which scope, when) is made and logged exactly as
/// with a real backend, but no bytes move. The CLI's `simulate` command is
/// built on this.
#[derive(Debug, Default)]
pub struct DryRunJarProvider;

impl DryRunJarProvider {
    /// Create a dry-run provider.
    pub fn new() -> Self {
        Self
    }
}

impl JarProvider for DryRunJarProvider {
    fn fetch<'a>(
        &'a self,
        scope: &'a ScopeIdentity,
        part: &'a str,
        jars: &'a [JarRef],
    ) -> BoxFuture<'a, Result<(), ProviderError>> {
        Box::pin(async move {
            info!(%scope, part, jars = jars.len(), "dry-run fetch");
            Ok(())
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_dry_run_fetch_succeeds() {
        let provider = DryRunJarProvider::new();
        let jars = vec![JarRef::new("a.jar"), JarRef::new("b.jar")];

        let result = provider
            .fetch(&ScopeIdentity::Main, "lazy-package", &jars)
            .await;

        assert!(result.is_ok());
    }
}
