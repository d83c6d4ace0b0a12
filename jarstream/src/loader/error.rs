//! Loader error types.

use thiserror::Error;

use crate::catalog::CatalogError;
use crate::scope::ScopeIdentity;
use crate::tracker::DownloadError;

/// Construction-time failures. Either of these means no loader instance is
/// produced at all.
#[derive(Debug, Error)]
pub enum LoaderError {
    /// The descriptor's part definitions are inconsistent.
    #[error(transparent)]
    Catalog(#[from] CatalogError),

    /// An eager part could not be downloaded during the construction
    /// pre-pass.
    #[error("eager download failed: {0}")]
    EagerDownloadFailed(#[from] DownloadError),
}

/// Resolution-time failures, returned to the immediate caller. They never
/// affect unrelated parts or scopes.
#[derive(Debug, Error)]
pub enum ResolutionError {
    /// No part in any reachable scope declares the class.
    #[error("no part in any reachable scope declares class {class}")]
    ClassNotOwned {
        /// The requested class name.
        class: String,
    },

    /// The named part does not exist in the target scope.
    #[error("unknown part {part} in {scope}")]
    UnknownPart {
        /// The requested part name.
        part: String,
        /// The scope that was searched.
        scope: ScopeIdentity,
    },

    /// The extension URL names no scope of this application.
    #[error("unknown extension {url}")]
    UnknownExtension {
        /// The unrecognized descriptor URL.
        url: String,
    },

    /// The owning part was found but its download failed.
    #[error(transparent)]
    DownloadFailed(#[from] DownloadError),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_class_not_owned_display() {
        let err = ResolutionError::ClassNotOwned {
            class: "com.example.A".to_string(),
        };
        assert_eq!(
            err.to_string(),
            "no part in any reachable scope declares class com.example.A"
        );
    }

    #[test]
    fn test_unknown_part_display() {
        let err = ResolutionError::UnknownPart {
            part: "lazy-package".to_string(),
            scope: ScopeIdentity::Main,
        };
        assert_eq!(err.to_string(), "unknown part lazy-package in main scope");
    }
}
