//! Scope identity types.

use std::fmt;

/// Stable index of a scope in the [`ExtensionGraph`](super::ExtensionGraph)
/// arena.
///
/// The main scope is always [`ScopeId::MAIN`]; extension ids follow in the
/// order their URLs were first referenced by the descriptor.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ScopeId(pub(crate) usize);

impl ScopeId {
    /// The main application scope.
    pub const MAIN: ScopeId = ScopeId(0);

    pub(crate) fn index(self) -> usize {
        self.0
    }
}

impl fmt::Display for ScopeId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if *self == ScopeId::MAIN {
            write!(f, "scope:main")
        } else {
            write!(f, "scope:{}", self.0)
        }
    }
}

/// What a scope is: the main application or one extension.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum ScopeIdentity {
    /// The main application descriptor.
    Main,
    /// An extension descriptor, identified by its URL.
    Extension {
        /// Descriptor location.
        url: String,
    },
}

impl ScopeIdentity {
    /// The extension URL, if this is an extension scope.
    pub fn url(&self) -> Option<&str> {
        match self {
            ScopeIdentity::Main => None,
            ScopeIdentity::Extension { url } => Some(url),
        }
    }
}

impl fmt::Display for ScopeIdentity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ScopeIdentity::Main => write!(f, "main scope"),
            ScopeIdentity::Extension { url } => write!(f, "extension {}", url),
        }
    }
}

/// Caller-facing handle for an extension scope.
///
/// Used with the by-extension query and command surface of
/// [`ApplicationLoader`](crate::loader::ApplicationLoader); only the URL
/// identifies the extension.
///
/// # Example
///
/// ```
/// use jarstream::scope::Extension;
///
/// let ext = Extension::new("http://example.com/ext.jnlp");
/// assert_eq!(ext.url(), "http://example.com/ext.jnlp");
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Extension {
    url: String,
}

impl Extension {
    /// Create a handle for the extension at the given descriptor URL.
    pub fn new(url: impl Into<String>) -> Self {
        Self { url: url.into() }
    }

    /// The extension's descriptor URL.
    pub fn url(&self) -> &str {
        &self.url
    }
}

impl fmt::Display for Extension {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.url)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_scope_id_main() {
        assert_eq!(ScopeId::MAIN, ScopeId(0));
        assert_eq!(ScopeId::MAIN.to_string(), "scope:main");
    }

    #[test]
    fn test_scope_identity_url() {
        let main = ScopeIdentity::Main;
        let ext = ScopeIdentity::Extension {
            url: "http://example.com/ext.jnlp".to_string(),
        };

        assert_eq!(main.url(), None);
        assert_eq!(ext.url(), Some("http://example.com/ext.jnlp"));
    }

    #[test]
    fn test_scope_identity_display() {
        let ext = ScopeIdentity::Extension {
            url: "http://example.com/ext.jnlp".to_string(),
        };

        assert_eq!(ScopeIdentity::Main.to_string(), "main scope");
        assert_eq!(ext.to_string(), "extension http://example.com/ext.jnlp");
    }

    #[test]
    fn test_extension_handle_equality() {
        let a = Extension::new("http://example.com/a.jnlp");
        let b = Extension::new("http://example.com/a.jnlp");
        let c = Extension::new("http://example.com/c.jnlp");

        assert_eq!(a, b);
        assert_ne!(a, c);
    }
}
