//! Catalog construction and lookup.

use std::collections::HashMap;

use thiserror::Error;
use tracing::debug;

use crate::descriptor::{ApplicationDescriptor, PartDefinition};
use crate::scope::{ExtensionGraph, ScopeId, ScopeIdentity};

use super::part::Part;

/// Errors detected while building the catalog. All are construction-time
/// and fatal; lookups never fail.
#[derive(Debug, Error)]
pub enum CatalogError {
    /// A jar location or class rule is claimed by two parts of one scope.
    #[error(
        "conflicting part definition in {scope}: {resource} is claimed by \
         both {first_part} and {second_part}"
    )]
    ConflictingPartDefinition {
        scope: ScopeIdentity,
        resource: String,
        first_part: String,
        second_part: String,
    },

    /// The same part name is declared twice within one scope.
    #[error("duplicate part name in {scope}: {part}")]
    DuplicatePartName { scope: ScopeIdentity, part: String },
}

/// Per-scope part index.
#[derive(Debug, Default)]
struct ScopeIndex {
    parts: Vec<Part>,
    by_name: HashMap<String, usize>,
}

/// Immutable, scope-aware index from class name to owning [`Part`].
///
/// One index per scope, aligned with the [`ExtensionGraph`] arena; a class
/// lookup in one scope never observes another scope's parts (same-named
/// parts in different scopes stay distinct).
#[derive(Debug)]
pub struct PartCatalog {
    scopes: Vec<ScopeIndex>,
}

impl PartCatalog {
    /// Build the catalog for every scope of the graph.
    ///
    /// Fails fast on the first conflicting definition; a catalog is either
    /// complete and consistent or not produced at all.
    pub fn build(
        graph: &ExtensionGraph,
        descriptor: &ApplicationDescriptor,
    ) -> Result<Self, CatalogError> {
        let mut scopes: Vec<ScopeIndex> = Vec::with_capacity(graph.scope_count());
        for _ in 0..graph.scope_count() {
            scopes.push(ScopeIndex::default());
        }

        Self::index_scope(
            &mut scopes[ScopeId::MAIN.index()],
            graph.identity(ScopeId::MAIN),
            &descriptor.parts,
        )?;

        for extension in &descriptor.extensions {
            let scope = graph
                .scope_for_url(&extension.url)
                .expect("graph was built from the same descriptor");
            Self::index_scope(
                &mut scopes[scope.index()],
                graph.identity(scope),
                &extension.parts,
            )?;
        }

        let catalog = Self { scopes };
        debug!(
            scopes = catalog.scopes.len(),
            parts = catalog.scopes.iter().map(|s| s.parts.len()).sum::<usize>(),
            "part catalog built"
        );
        Ok(catalog)
    }

    fn index_scope(
        index: &mut ScopeIndex,
        identity: &ScopeIdentity,
        definitions: &[PartDefinition],
    ) -> Result<(), CatalogError> {
        let mut jar_owners: HashMap<&str, usize> = HashMap::new();
        let mut rule_owners: HashMap<&str, usize> = HashMap::new();

        for definition in definitions {
            let slot = index.parts.len();

            if index.by_name.insert(definition.name.clone(), slot).is_some() {
                return Err(CatalogError::DuplicatePartName {
                    scope: identity.clone(),
                    part: definition.name.clone(),
                });
            }

            for jar in &definition.jars {
                if let Some(&owner) = jar_owners.get(jar.location.as_str()) {
                    if owner != slot {
                        return Err(CatalogError::ConflictingPartDefinition {
                            scope: identity.clone(),
                            resource: jar.location.clone(),
                            first_part: definitions[owner].name.clone(),
                            second_part: definition.name.clone(),
                        });
                    }
                }
                jar_owners.insert(jar.location.as_str(), slot);
            }

            for class in &definition.classes {
                if let Some(&owner) = rule_owners.get(class.as_str()) {
                    if owner != slot {
                        return Err(CatalogError::ConflictingPartDefinition {
                            scope: identity.clone(),
                            resource: class.clone(),
                            first_part: definitions[owner].name.clone(),
                            second_part: definition.name.clone(),
                        });
                    }
                }
                rule_owners.insert(class.as_str(), slot);
            }

            index.parts.push(Part::from_definition(definition));
        }
        Ok(())
    }

    /// The part owning the class within one scope, if any.
    ///
    /// An exact class declaration always beats a package rule; among
    /// package rules the longest matching prefix wins. Pure lookup, no side
    /// effects.
    pub fn part_for(&self, scope: ScopeId, class_name: &str) -> Option<&Part> {
        self.scopes[scope.index()]
            .parts
            .iter()
            .filter_map(|part| part.match_specificity(class_name).map(|s| (s, part)))
            .max_by_key(|&(specificity, _)| specificity)
            .map(|(_, part)| part)
    }

    /// The part with the given name within one scope, if any.
    pub fn part_named(&self, scope: ScopeId, part_name: &str) -> Option<&Part> {
        let index = &self.scopes[scope.index()];
        index.by_name.get(part_name).map(|&slot| &index.parts[slot])
    }

    /// All parts of one scope, in declaration order.
    pub fn parts_in(&self, scope: ScopeId) -> &[Part] {
        &self.scopes[scope.index()].parts
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::descriptor::ExtensionDescriptor;

    const EXT: &str = "http://example.com/ext.jnlp";

    fn build(descriptor: &ApplicationDescriptor) -> (ExtensionGraph, PartCatalog) {
        let graph = ExtensionGraph::build(descriptor);
        let catalog = PartCatalog::build(&graph, descriptor).unwrap();
        (graph, catalog)
    }

    #[test]
    fn test_part_for_exact_class() {
        let descriptor = ApplicationDescriptor::new().with_part(
            PartDefinition::new("lazy-package")
                .with_jar("lazy.jar")
                .with_class("com.example.A"),
        );
        let (_, catalog) = build(&descriptor);

        let part = catalog.part_for(ScopeId::MAIN, "com.example.A").unwrap();
        assert_eq!(part.name(), "lazy-package");
        assert!(catalog.part_for(ScopeId::MAIN, "com.example.B").is_none());
    }

    #[test]
    fn test_part_for_package_rule() {
        let descriptor = ApplicationDescriptor::new()
            .with_part(PartDefinition::new("base").with_class("com.example.*"))
            .with_part(PartDefinition::new("util").with_class("com.example.util.*"));
        let (_, catalog) = build(&descriptor);

        // Longest matching prefix wins.
        let part = catalog
            .part_for(ScopeId::MAIN, "com.example.util.Strings")
            .unwrap();
        assert_eq!(part.name(), "util");

        let part = catalog.part_for(ScopeId::MAIN, "com.example.Main").unwrap();
        assert_eq!(part.name(), "base");
    }

    #[test]
    fn test_part_for_exact_beats_package() {
        let descriptor = ApplicationDescriptor::new()
            .with_part(PartDefinition::new("bulk").with_class("com.example.*"))
            .with_part(PartDefinition::new("pinned").with_class("com.example.Main"));
        let (_, catalog) = build(&descriptor);

        let part = catalog.part_for(ScopeId::MAIN, "com.example.Main").unwrap();
        assert_eq!(part.name(), "pinned");
    }

    #[test]
    fn test_same_part_name_in_two_scopes() {
        let descriptor = ApplicationDescriptor::new()
            .with_part(PartDefinition::new("shared").with_class("main.A"))
            .with_extension(
                ExtensionDescriptor::new(EXT)
                    .with_part(PartDefinition::new("shared").with_class("ext.A")),
            );
        let (graph, catalog) = build(&descriptor);
        let ext = graph.scope_for_url(EXT).unwrap();

        // Same name, distinct parts per scope.
        assert!(catalog.part_named(ScopeId::MAIN, "shared").is_some());
        assert!(catalog.part_named(ext, "shared").is_some());
        assert!(catalog.part_for(ext, "main.A").is_none());
        assert!(catalog.part_for(ext, "ext.A").is_some());
    }

    #[test]
    fn test_conflicting_jar_rejected() {
        let descriptor = ApplicationDescriptor::new()
            .with_part(PartDefinition::new("one").with_jar("shared.jar"))
            .with_part(PartDefinition::new("two").with_jar("shared.jar"));
        let graph = ExtensionGraph::build(&descriptor);

        let err = PartCatalog::build(&graph, &descriptor).unwrap_err();
        assert!(matches!(
            err,
            CatalogError::ConflictingPartDefinition { ref resource, .. }
                if resource == "shared.jar"
        ));
    }

    #[test]
    fn test_conflicting_class_rule_rejected() {
        let descriptor = ApplicationDescriptor::new()
            .with_part(PartDefinition::new("one").with_class("com.example.A"))
            .with_part(PartDefinition::new("two").with_class("com.example.A"));
        let graph = ExtensionGraph::build(&descriptor);

        assert!(PartCatalog::build(&graph, &descriptor).is_err());
    }

    #[test]
    fn test_same_jar_in_two_scopes_allowed() {
        let descriptor = ApplicationDescriptor::new()
            .with_part(PartDefinition::new("main").with_jar("common.jar"))
            .with_extension(
                ExtensionDescriptor::new(EXT)
                    .with_part(PartDefinition::new("ext").with_jar("common.jar")),
            );
        let graph = ExtensionGraph::build(&descriptor);

        assert!(PartCatalog::build(&graph, &descriptor).is_ok());
    }

    #[test]
    fn test_duplicate_part_name_rejected() {
        let descriptor = ApplicationDescriptor::new()
            .with_part(PartDefinition::new("dup"))
            .with_part(PartDefinition::new("dup"));
        let graph = ExtensionGraph::build(&descriptor);

        let err = PartCatalog::build(&graph, &descriptor).unwrap_err();
        assert!(matches!(err, CatalogError::DuplicatePartName { ref part, .. } if part == "dup"));
    }

    #[test]
    fn test_parts_in_declaration_order() {
        let descriptor = ApplicationDescriptor::new()
            .with_part(PartDefinition::new("first"))
            .with_part(PartDefinition::new("second"));
        let (_, catalog) = build(&descriptor);

        let names: Vec<_> = catalog
            .parts_in(ScopeId::MAIN)
            .iter()
            .map(Part::name)
            .collect();
        assert_eq!(names, vec!["first", "second"]);
    }
}
