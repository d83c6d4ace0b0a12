//! Runtime part representation.

use std::fmt;

use crate::descriptor::{JarRef, PartDefinition};

/// How one `classes` entry of a part definition matches class names.
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) enum ClassRule {
    /// Fully-qualified class name, exact match.
    Exact(String),
    /// Package prefix (declared `com.example.*`); matches the whole
    /// subtree. Stored without the trailing `*`, dot included.
    Package(String),
}

impl ClassRule {
    pub(crate) fn parse(declared: &str) -> Self {
        match declared.strip_suffix(".*") {
            Some(prefix) => ClassRule::Package(format!("{}.", prefix)),
            None => ClassRule::Exact(declared.to_string()),
        }
    }

    /// Length of the matching prefix, used to pick the most specific rule.
    pub(crate) fn specificity(&self) -> usize {
        match self {
            ClassRule::Exact(name) => name.len(),
            ClassRule::Package(prefix) => prefix.len(),
        }
    }

    pub(crate) fn matches(&self, class_name: &str) -> bool {
        match self {
            ClassRule::Exact(name) => name == class_name,
            ClassRule::Package(prefix) => class_name.starts_with(prefix.as_str()),
        }
    }
}

impl fmt::Display for ClassRule {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ClassRule::Exact(name) => write!(f, "{}", name),
            ClassRule::Package(prefix) => write!(f, "{}*", prefix),
        }
    }
}

/// A named, downloadable group of jars within one scope.
///
/// Immutable after catalog construction; the owning scope is implicit in
/// where the part is indexed (part names are unique per scope only).
#[derive(Debug, Clone)]
pub struct Part {
    name: String,
    eager: bool,
    jars: Vec<JarRef>,
    rules: Vec<ClassRule>,
}

impl Part {
    pub(crate) fn from_definition(definition: &PartDefinition) -> Self {
        Self {
            name: definition.name.clone(),
            eager: definition.eager,
            jars: definition.jars.clone(),
            rules: definition.classes.iter().map(|c| ClassRule::parse(c)).collect(),
        }
    }

    /// Part name, unique within the owning scope.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Whether the part is downloaded at loader construction.
    pub fn is_eager(&self) -> bool {
        self.eager
    }

    /// Archives belonging to this part, in declaration order.
    pub fn jars(&self) -> &[JarRef] {
        &self.jars
    }

    pub(crate) fn rules(&self) -> &[ClassRule] {
        &self.rules
    }

    /// The most specific rule of this part matching the class, if any.
    pub(crate) fn match_specificity(&self, class_name: &str) -> Option<usize> {
        self.rules
            .iter()
            .filter(|rule| rule.matches(class_name))
            .map(ClassRule::specificity)
            .max()
    }
}

impl fmt::Display for Part {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} ({}, {} jars)",
            self.name,
            if self.eager { "eager" } else { "lazy" },
            self.jars.len()
        )
    }
}
