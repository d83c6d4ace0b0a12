//! Plain-data types produced by the external descriptor parser.

use std::fmt;

use serde::{Deserialize, Serialize};

/// Opaque reference to a downloadable archive.
///
/// The core never interprets the location; it is forwarded verbatim to the
/// [`JarProvider`](crate::provider::JarProvider) when the owning part is
/// materialized.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct JarRef {
    /// Archive location as declared in the descriptor.
    pub location: String,
}

impl JarRef {
    /// Create a jar reference.
    pub fn new(location: impl Into<String>) -> Self {
        Self {
            location: location.into(),
        }
    }
}

impl fmt::Display for JarRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.location)
    }
}

/// A named, downloadable group of jars within one scope.
///
/// `classes` carries the descriptor's declared class ownership: each entry
/// is either a fully-qualified class name (exact match) or a package prefix
/// written `com.example.*` (matches the whole package subtree). The
/// ordering of `jars` is preserved and handed to the provider unchanged.
///
/// # Example
///
/// ```
/// use jarstream::descriptor::PartDefinition;
///
/// let part = PartDefinition::new("lazy-package")
///     .with_jar("lazy.jar")
///     .with_class("com.example.A");
///
/// assert_eq!(part.name, "lazy-package");
/// assert!(!part.eager);
/// assert_eq!(part.jars.len(), 1);
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PartDefinition {
    /// Part name, unique within its owning scope.
    pub name: String,

    /// Loading policy: eager parts are downloaded at loader construction,
    /// lazy parts on first reference.
    #[serde(default)]
    pub eager: bool,

    /// Archives belonging to this part, in declaration order.
    #[serde(default)]
    pub jars: Vec<JarRef>,

    /// Declared class ownership: exact class names or `pkg.*` prefixes.
    #[serde(default)]
    pub classes: Vec<String>,
}

impl PartDefinition {
    /// Create a lazy part with no jars or class declarations.
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            eager: false,
            jars: Vec::new(),
            classes: Vec::new(),
        }
    }

    /// Set the loading policy.
    pub fn with_eager(mut self, eager: bool) -> Self {
        self.eager = eager;
        self
    }

    /// Append a jar reference.
    pub fn with_jar(mut self, location: impl Into<String>) -> Self {
        self.jars.push(JarRef::new(location));
        self
    }

    /// Append a class-ownership declaration.
    pub fn with_class(mut self, class: impl Into<String>) -> Self {
        self.classes.push(class.into());
        self
    }
}

/// One extension descriptor, identified by its URL.
///
/// `parent` is `None` when the main descriptor declared the extension and
/// `Some(url)` when another extension did. Distinct URLs denote distinct
/// extensions even when their part names coincide.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ExtensionDescriptor {
    /// Descriptor location; the extension's identity.
    pub url: String,

    /// URL of the declaring extension, or `None` for the main scope.
    #[serde(default)]
    pub parent: Option<String>,

    /// Parts contributed by this extension, in declaration order.
    #[serde(default)]
    pub parts: Vec<PartDefinition>,
}

impl ExtensionDescriptor {
    /// Create an extension declared by the main scope.
    pub fn new(url: impl Into<String>) -> Self {
        Self {
            url: url.into(),
            parent: None,
            parts: Vec::new(),
        }
    }

    /// Mark this extension as declared by another extension.
    pub fn with_parent(mut self, url: impl Into<String>) -> Self {
        self.parent = Some(url.into());
        self
    }

    /// Append a part.
    pub fn with_part(mut self, part: PartDefinition) -> Self {
        self.parts.push(part);
        self
    }
}

/// The fully-formed application graph handed in at loader construction.
///
/// # Example
///
/// ```
/// use jarstream::descriptor::{ApplicationDescriptor, PartDefinition};
///
/// let descriptor = ApplicationDescriptor::new()
///     .with_part(PartDefinition::new("eager-package").with_eager(true))
///     .with_part(PartDefinition::new("lazy-package"));
///
/// assert_eq!(descriptor.parts.len(), 2);
/// assert!(descriptor.extensions.is_empty());
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ApplicationDescriptor {
    /// Parts of the main scope, in declaration order.
    #[serde(default)]
    pub parts: Vec<PartDefinition>,

    /// Extensions reachable from the main scope, in declaration order.
    #[serde(default)]
    pub extensions: Vec<ExtensionDescriptor>,
}

impl ApplicationDescriptor {
    /// Create an empty descriptor.
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a main-scope part.
    pub fn with_part(mut self, part: PartDefinition) -> Self {
        self.parts.push(part);
        self
    }

    /// Append an extension.
    pub fn with_extension(mut self, extension: ExtensionDescriptor) -> Self {
        self.extensions.push(extension);
        self
    }

    /// Total number of parts across all scopes.
    pub fn part_count(&self) -> usize {
        self.parts.len() + self.extensions.iter().map(|e| e.parts.len()).sum::<usize>()
    }
}
