//! Scope-aware part catalog.
//!
//! The catalog is the immutable index from class name to owning
//! [`Part`], built once from the descriptor graph and consulted on every
//! class-resolution request. Lookups are pure; all validation happens at
//! construction:
//!
//! - a jar location claimed by two parts of one scope,
//! - a class or package rule claimed by two parts of one scope,
//! - a part name declared twice within one scope,
//!
//! all fail fast with a [`CatalogError`] instead of surfacing at lookup
//! time. Same-named parts in *different* scopes are distinct by design.

mod index;
mod part;

pub use index::{CatalogError, PartCatalog};
pub use part::Part;
