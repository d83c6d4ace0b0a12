//! Jarstream - on-demand part loading for network-deployed applications
//!
//! An application descriptor groups its code archives into named **parts**
//! and may delegate to **extensions**, each contributing parts of its own.
//! Jarstream decides, per class-resolution request, which part must be
//! materialized locally before the class can be defined, downloads every
//! part at most once per scope even under concurrent requests, and supports
//! eager (at construction) and lazy (on first reference) loading policies.
//!
//! Descriptor parsing, transport, archive handling and signature
//! verification are external collaborators; the crate covers the
//! resolution, scheduling and tracking logic only.
//!
//! # Components
//!
//! - [`descriptor`]: the plain-data graph handed in by the parser
//! - [`scope`]: scope identities and the extension tree
//! - [`catalog`]: the immutable class → part index per scope
//! - [`tracker`]: the single-flight download ledger
//! - [`provider`]: the `JarProvider` collaborator trait
//! - [`loader`]: the `ApplicationLoader` dispatcher tying it together

pub mod catalog;
pub mod config;
pub mod descriptor;
pub mod loader;
pub mod provider;
pub mod scope;
pub mod tracker;

pub use catalog::{CatalogError, Part, PartCatalog};
pub use config::LoaderConfig;
pub use descriptor::{ApplicationDescriptor, ExtensionDescriptor, JarRef, PartDefinition};
pub use loader::{ApplicationLoader, LoaderError, ResolutionError, ResolvedClass};
pub use provider::{DryRunJarProvider, JarProvider, ProviderError};
pub use scope::{Extension, ExtensionGraph, ScopeId, ScopeIdentity};
pub use tracker::{DownloadError, DownloadState, DownloadTracker, TrackerSnapshot};

/// Crate version, for banners and diagnostics.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
