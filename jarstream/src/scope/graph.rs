//! Arena-based extension graph.

use std::collections::HashMap;

use tracing::debug;

use crate::descriptor::ApplicationDescriptor;

use super::{ScopeId, ScopeIdentity};

/// One scope node in the arena.
#[derive(Debug)]
struct ScopeNode {
    identity: ScopeIdentity,
    parent: Option<ScopeId>,
    /// Declared extensions of this scope, in declaration order.
    children: Vec<ScopeId>,
}

/// The tree of scopes rooted at the main application.
///
/// Built once from the descriptor and immutable afterwards. Extension URLs
/// are interned while folding the descriptor list: the first reference to a
/// URL (as a declared extension or as a parent pointer) creates its node,
/// later references reuse it. Distinct URLs are distinct scopes even when
/// their part names coincide.
#[derive(Debug)]
pub struct ExtensionGraph {
    nodes: Vec<ScopeNode>,
    by_url: HashMap<String, ScopeId>,
}

impl ExtensionGraph {
    /// Build the graph from a descriptor.
    pub fn build(descriptor: &ApplicationDescriptor) -> Self {
        let mut graph = Self {
            nodes: vec![ScopeNode {
                identity: ScopeIdentity::Main,
                parent: None,
                children: Vec::new(),
            }],
            by_url: HashMap::new(),
        };

        // Intern declared extensions first so ids follow declaration order.
        for extension in &descriptor.extensions {
            graph.intern(&extension.url);
        }

        // Wire parents and children. A parent URL the descriptor never
        // declares is interned here and later attached under the main scope.
        for extension in &descriptor.extensions {
            let id = graph.by_url[&extension.url];
            let parent = match &extension.parent {
                Some(url) => graph.intern(url),
                None => ScopeId::MAIN,
            };
            graph.nodes[id.index()].parent = Some(parent);
            graph.nodes[parent.index()].children.push(id);
        }

        // Scopes referenced only as parents hang off the main scope.
        for index in 1..graph.nodes.len() {
            if graph.nodes[index].parent.is_none() {
                graph.nodes[index].parent = Some(ScopeId::MAIN);
                graph.nodes[0].children.push(ScopeId(index));
            }
        }

        debug!(
            scopes = graph.nodes.len(),
            extensions = graph.nodes.len() - 1,
            "extension graph built"
        );
        graph
    }

    fn intern(&mut self, url: &str) -> ScopeId {
        if let Some(&id) = self.by_url.get(url) {
            return id;
        }
        let id = ScopeId(self.nodes.len());
        self.nodes.push(ScopeNode {
            identity: ScopeIdentity::Extension {
                url: url.to_string(),
            },
            parent: None,
            children: Vec::new(),
        });
        self.by_url.insert(url.to_string(), id);
        id
    }

    /// The order in which scopes are consulted to resolve a class for the
    /// given requesting scope: the scope itself, then its declared
    /// extensions in declaration order, recursively depth-first.
    pub fn search_order(&self, scope: ScopeId) -> Vec<ScopeId> {
        let mut order = Vec::with_capacity(self.nodes.len());
        let mut visited = vec![false; self.nodes.len()];
        self.walk(scope, &mut order, &mut visited);
        order
    }

    fn walk(&self, scope: ScopeId, order: &mut Vec<ScopeId>, visited: &mut [bool]) {
        if visited[scope.index()] {
            return;
        }
        visited[scope.index()] = true;
        order.push(scope);
        for &child in &self.nodes[scope.index()].children {
            self.walk(child, order, visited);
        }
    }

    /// Look up the scope for an extension URL.
    ///
    /// Pure lookup: the graph is complete after construction, so a URL the
    /// descriptor never referenced has no scope.
    pub fn scope_for_url(&self, url: &str) -> Option<ScopeId> {
        self.by_url.get(url).copied()
    }

    /// The identity of a scope.
    pub fn identity(&self, scope: ScopeId) -> &ScopeIdentity {
        &self.nodes[scope.index()].identity
    }

    /// Number of scopes, the main scope included.
    pub fn scope_count(&self) -> usize {
        self.nodes.len()
    }

    /// All scope ids, main first, extensions in interning order.
    pub fn scope_ids(&self) -> impl Iterator<Item = ScopeId> + '_ {
        (0..self.nodes.len()).map(ScopeId)
    }
}
