use docvault_core_types::RequestId;
use std::path::Path;
use thiserror::Error;

/// Result type alias using the structured error facility
pub type Result<T> = std::result::Result<T, ExError>;

// ========== Error Facility ==========

/// Canonical error kind taxonomy
///
/// Every failure a docvault operation can report is classified into one of
/// these kinds. Each kind maps to a stable error code that the service
/// boundary and the CLI use for status mapping and tests.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExErrorKind {
    // Input
    /// Candidate text failed to parse as YAML
    InvalidYaml,
    /// Snapshot filename failed the safety check (traversal, separators, extension)
    InvalidFilename,

    // Lookup
    /// Snapshot absent, or its path resolves outside the backup directory
    NotFound,

    // Integration/IO
    Io,

    // Internal
    Internal,
}

impl ExErrorKind {
    /// Get the stable error code for this kind
    pub fn code(&self) -> &'static str {
        match self {
            ExErrorKind::InvalidYaml => "ERR_INVALID_YAML",
            ExErrorKind::InvalidFilename => "ERR_INVALID_FILENAME",
            ExErrorKind::NotFound => "ERR_NOT_FOUND",
            ExErrorKind::Io => "ERR_IO",
            ExErrorKind::Internal => "ERR_INTERNAL",
        }
    }

    /// Whether the caller supplied something unusable (as opposed to a server-side failure)
    pub fn is_client_error(&self) -> bool {
        matches!(
            self,
            ExErrorKind::InvalidYaml
                | ExErrorKind::InvalidFilename
                | ExErrorKind::NotFound
        )
    }
}

/// Canonical structured error type
///
/// Carries a classification (`kind`) for programmatic handling plus
/// optional context: the operation, the snapshot filename and filesystem
/// path involved, and the request that triggered it.
#[derive(Debug, Clone)]
pub struct ExError {
    kind: ExErrorKind,
    op: Option<String>,
    filename: Option<String>,
    path: Option<String>,
    request_id: Option<RequestId>,
    message: String,
    source: Option<Box<ExError>>,
}

impl ExError {
    /// Create a new error with the specified kind
    pub fn new(kind: ExErrorKind) -> Self {
        Self {
            kind,
            op: None,
            filename: None,
            path: None,
            request_id: None,
            message: String::new(),
            source: None,
        }
    }

    /// Add operation context
    pub fn with_op(mut self, op: impl Into<String>) -> Self {
        self.op = Some(op.into());
        self
    }

    /// Add snapshot filename context
    pub fn with_filename(mut self, filename: impl Into<String>) -> Self {
        self.filename = Some(filename.into());
        self
    }

    /// Add filesystem path context
    pub fn with_path(mut self, path: impl AsRef<Path>) -> Self {
        self.path = Some(path.as_ref().display().to_string());
        self
    }

    /// Add request ID context
    pub fn with_request_id(mut self, request_id: RequestId) -> Self {
        self.request_id = Some(request_id);
        self
    }

    /// Add custom message
    pub fn with_message(mut self, message: impl Into<String>) -> Self {
        self.message = message.into();
        self
    }

    /// Add source error
    pub fn with_source(mut self, source: ExError) -> Self {
        self.source = Some(Box::new(source));
        self
    }

    /// Get the error kind
    pub fn kind(&self) -> ExErrorKind {
        self.kind
    }

    /// Get the stable error code
    pub fn code(&self) -> &'static str {
        self.kind.code()
    }

    /// Get the operation context, if any
    pub fn op(&self) -> Option<&str> {
        self.op.as_deref()
    }

    /// Get the snapshot filename context, if any
    pub fn filename(&self) -> Option<&str> {
        self.filename.as_deref()
    }

    /// Get the filesystem path context, if any
    pub fn path(&self) -> Option<&str> {
        self.path.as_deref()
    }

    /// Get the request ID context, if any
    pub fn request_id(&self) -> Option<&RequestId> {
        self.request_id.as_ref()
    }

    /// Get the error message
    pub fn message(&self) -> &str {
        &self.message
    }

    /// Get the source error, if any
    pub fn source_error(&self) -> Option<&ExError> {
        self.source.as_deref()
    }
}

impl std::fmt::Display for ExError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "[{}]", self.code())?;
        if let Some(op) = &self.op {
            write!(f, " in operation '{}'", op)?;
        }
        if !self.message.is_empty() {
            write!(f, ": {}", self.message)?;
        }
        if let Some(filename) = &self.filename {
            write!(f, " (filename: {})", filename)?;
        }
        if let Some(path) = &self.path {
            write!(f, " (path: {})", path)?;
        }
        if let Some(source) = &self.source {
            write!(f, " caused by {}", source)?;
        }
        Ok(())
    }
}

impl std::error::Error for ExError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        self.source
            .as_deref()
            .map(|e| e as &(dyn std::error::Error + 'static))
    }
}

// ========== End Error Facility ==========

/// Domain error taxonomy for document and snapshot operations
#[derive(Error, Debug, Clone, PartialEq)]
pub enum VaultError {
    /// Candidate content is not valid YAML
    #[error("YAML syntax error: {message}")]
    InvalidYaml { message: String },

    /// Snapshot filename contains a traversal marker, a separator, or the wrong extension
    #[error("Invalid filename: {filename}")]
    UnsafeFilename { filename: String },

    /// No snapshot with this filename exists
    #[error("Backup file not found: {filename}")]
    SnapshotNotFound { filename: String },

    /// Snapshot path resolves outside the backup directory
    #[error("Backup path escapes the backup directory: {filename}")]
    EscapesBackupDir { filename: String },

    /// Filesystem failure
    #[error("I/O failure during {op} on {path}: {message}")]
    Io {
        op: String,
        path: String,
        message: String,
    },
}

impl VaultError {
    /// Build an `Io` variant from a std I/O error
    pub fn io(op: &str, path: impl AsRef<Path>, err: &std::io::Error) -> Self {
        VaultError::Io {
            op: op.to_string(),
            path: path.as_ref().display().to_string(),
            message: err.to_string(),
        }
    }
}

/// Conversion from VaultError to ExError
impl From<VaultError> for ExError {
    fn from(err: VaultError) -> Self {
        match err {
            VaultError::InvalidYaml { message } => ExError::new(ExErrorKind::InvalidYaml)
                .with_op("validate")
                .with_message(message),

            VaultError::UnsafeFilename { filename } => {
                ExError::new(ExErrorKind::InvalidFilename)
                    .with_filename(filename)
                    .with_message("Invalid filename")
            }

            VaultError::SnapshotNotFound { filename } => ExError::new(ExErrorKind::NotFound)
                .with_filename(filename)
                .with_message("Backup file not found"),

            VaultError::EscapesBackupDir { filename } => ExError::new(ExErrorKind::NotFound)
                .with_filename(filename)
                .with_message("Backup path resolves outside the backup directory"),

            VaultError::Io { op, path, message } => ExError::new(ExErrorKind::Io)
                .with_op(op)
                .with_path(path)
                .with_message(message),
        }
    }
}

/// Identity conversion so `log_op_error!` accepts an `ExError` directly
impl From<&ExError> for ExError {
    fn from(err: &ExError) -> Self {
        err.clone()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_kind_codes() {
        let cases = [
            (ExErrorKind::InvalidYaml, "ERR_INVALID_YAML"),
            (ExErrorKind::InvalidFilename, "ERR_INVALID_FILENAME"),
            (ExErrorKind::NotFound, "ERR_NOT_FOUND"),
            (ExErrorKind::Io, "ERR_IO"),
            (ExErrorKind::Internal, "ERR_INTERNAL"),
        ];
        for (kind, expected_code) in cases {
            assert_eq!(kind.code(), expected_code, "Wrong code for {:?}", kind);
        }
    }

    #[test]
    fn test_client_error_classification() {
        assert!(ExErrorKind::NotFound.is_client_error());
        assert!(ExErrorKind::InvalidFilename.is_client_error());
        assert!(!ExErrorKind::Io.is_client_error());
        assert!(!ExErrorKind::Internal.is_client_error());
    }

    #[test]
    fn test_display_includes_context() {
        let err = ExError::new(ExErrorKind::Io)
            .with_op("write_document")
            .with_path("/data/services.yaml")
            .with_message("permission denied");
        let rendered = err.to_string();
        assert!(rendered.starts_with("[ERR_IO]"));
        assert!(rendered.contains("write_document"));
        assert!(rendered.contains("/data/services.yaml"));
        assert!(rendered.contains("permission denied"));
    }

    #[test]
    fn test_source_chain_exposed() {
        let inner = ExError::new(ExErrorKind::Io).with_message("disk full");
        let outer = ExError::new(ExErrorKind::Internal).with_source(inner);
        assert_eq!(outer.source_error().map(|e| e.kind()), Some(ExErrorKind::Io));
        assert!(std::error::Error::source(&outer).is_some());
    }
}
