//! Scopes and the extension graph.
//!
//! A scope is the main application descriptor or one extension; part names
//! are unique only within their owning scope. Extensions form a tree rooted
//! at the main scope, represented as an arena of nodes addressed by
//! [`ScopeId`] with children stored by owning index. Resolution traverses
//! child indices only, never parent pointers.
//!
//! [`ExtensionGraph::search_order`] defines the order in which scopes are
//! consulted to resolve a class: the requesting scope first, then its
//! declared extensions in declaration order, recursively depth-first. The
//! order is deterministic and stable across calls.

mod graph;
mod model;

pub use graph::ExtensionGraph;
pub use model::{Extension, ScopeId, ScopeIdentity};
