//! Class-resolution dispatch.
//!
//! The [`ApplicationLoader`] ties the read-only components (extension
//! graph, part catalog) to the download tracker and exposes the surface the
//! class-loading host calls:
//!
//! - [`ApplicationLoader::resolve`]: find the part owning a class across
//!   the scope search order, download it if needed, hand back its jars
//! - `is_part_downloaded` / `download_part` (and their `_in` variants for
//!   extension scopes): the download-service query/command surface
//!
//! Construction runs the eager pre-pass: every eager part of every
//! reachable scope is downloaded before `start` returns, and any eager
//! failure aborts construction; a loader is never partially usable.

mod application;
mod error;

pub use application::{ApplicationLoader, ResolvedClass};
pub use error::{LoaderError, ResolutionError};
