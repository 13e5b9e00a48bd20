//! Store configuration
//!
//! All paths are explicit; nothing is read from the environment here. The
//! binaries build a `StoreConfig` from their flags and hand it to
//! `DocumentStore::new`.

use std::path::{Path, PathBuf};

/// Seed written when the canonical document does not exist yet
pub const DEFAULT_DOCUMENT: &str = r#"# Homepage Services Configuration
# This file defines the services displayed on your homepage dashboard
# Documentation: https://gethomepage.dev/en/configs/services/

# Example service configuration:
# - Group Name:
#     - Service Name:
#         href: http://localhost:8080
#         description: Service description
#         icon: service-icon

- Development:
    - YAML Editor:
        href: http://localhost:8080
        description: Edit services configuration
        icon: mdi-pencil

# Add your services below:
"#;

/// Locations of the canonical document and its backup directory
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StoreConfig {
    pub document_path: PathBuf,
    pub backup_dir: PathBuf,
    /// Content persisted on first access when the document is absent
    pub default_content: String,
}

impl StoreConfig {
    pub fn new(document_path: impl Into<PathBuf>, backup_dir: impl Into<PathBuf>) -> Self {
        Self {
            document_path: document_path.into(),
            backup_dir: backup_dir.into(),
            default_content: DEFAULT_DOCUMENT.to_string(),
        }
    }

    /// Replace the first-access seed content
    pub fn with_default_content(mut self, content: impl Into<String>) -> Self {
        self.default_content = content.into();
        self
    }

    /// Conventional layout: `<root>/services.yaml` and `<root>/backups`
    pub fn rooted_at(root: &Path) -> Self {
        Self::new(root.join("services.yaml"), root.join("backups"))
    }
}

impl Default for StoreConfig {
    fn default() -> Self {
        Self::new("/data/services.yaml", "/data/backups")
    }
}
