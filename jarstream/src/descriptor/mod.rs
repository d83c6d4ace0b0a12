//! Application descriptor input model.
//!
//! The descriptor parser lives outside this crate; what it hands us is a
//! fully-formed graph of parts and extensions as plain data. This module
//! defines that interchange model:
//!
//! - [`ApplicationDescriptor`]: the main application's parts plus the
//!   extensions it (directly or transitively) delegates to
//! - [`ExtensionDescriptor`]: one extension descriptor, identified by URL
//! - [`PartDefinition`]: a named, downloadable group of jars with its
//!   loading policy and declared class ownership
//! - [`JarRef`]: an opaque archive reference, resolved by the
//!   [`JarProvider`](crate::provider::JarProvider)
//!
//! All types derive serde so harnesses can load descriptors from JSON.
//! Declaration order is preserved everywhere; the scope search order
//! depends on it.

mod model;

pub use model::{ApplicationDescriptor, ExtensionDescriptor, JarRef, PartDefinition};
