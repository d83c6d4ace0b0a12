//! CLI subcommands.

pub mod inspect;
pub mod simulate;

use std::fs;

use jarstream::descriptor::ApplicationDescriptor;

use crate::error::CliError;

/// Load a JSON application descriptor from disk.
pub fn load_descriptor(path: &str) -> Result<ApplicationDescriptor, CliError> {
    let contents = fs::read_to_string(path).map_err(|source| CliError::Read {
        path: path.to_string(),
        source,
    })?;
    serde_json::from_str(&contents).map_err(|source| CliError::Descriptor {
        path: path.to_string(),
        source,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn test_load_descriptor() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(
            file,
            r#"{{ "parts": [{{ "name": "lazy-package" }}], "extensions": [] }}"#
        )
        .unwrap();

        let descriptor = load_descriptor(file.path().to_str().unwrap()).unwrap();
        assert_eq!(descriptor.parts.len(), 1);
    }

    #[test]
    fn test_load_descriptor_missing_file() {
        let err = load_descriptor("/nonexistent/app.json").unwrap_err();
        assert!(err.to_string().contains("failed to read"));
    }
}
