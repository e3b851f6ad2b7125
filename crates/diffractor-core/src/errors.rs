use thiserror::Error;

/// Result type alias using DiffractorError
pub type Result<T> = std::result::Result<T, DiffractorError>;

// ========== Error Facility ==========

/// Canonical error kind taxonomy
///
/// Each kind maps to a stable error code that can be used for programmatic
/// error handling, testing, and machine-readable CLI output.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExErrorKind {
    // Collaborators
    /// File enumeration for a snapshot root failed
    List,
    /// A snapshot file could not be read as text
    Read,

    // Reconciliation
    /// Two raw paths normalized to the same relative path
    DuplicatePath,

    // Diffing (non-fatal per file)
    DiffComputation,

    // Options / validation
    InvalidThreshold,
    InvalidInput,
    Config,

    // Output
    Serialization,

    // Internal
    Internal,
}

impl ExErrorKind {
    /// Get the stable error code for this kind
    pub fn code(&self) -> &'static str {
        match self {
            ExErrorKind::List => "ERR_LIST",
            ExErrorKind::Read => "ERR_READ",
            ExErrorKind::DuplicatePath => "ERR_DUPLICATE_PATH",
            ExErrorKind::DiffComputation => "ERR_DIFF_COMPUTATION",
            ExErrorKind::InvalidThreshold => "ERR_INVALID_THRESHOLD",
            ExErrorKind::InvalidInput => "ERR_INVALID_INPUT",
            ExErrorKind::Config => "ERR_CONFIG",
            ExErrorKind::Serialization => "ERR_SERIALIZATION",
            ExErrorKind::Internal => "ERR_INTERNAL",
        }
    }

    /// Whether an error of this kind aborts a comparison run.
    ///
    /// Only per-file diff failures are recoverable; everything else breaks
    /// the completeness the reconciliation relies on.
    pub fn is_fatal(&self) -> bool {
        !matches!(self, ExErrorKind::DiffComputation)
    }
}

/// Canonical structured error type
///
/// Carries a classification for programmatic handling plus the operation
/// and file path context needed to diagnose a failed run.
#[derive(Debug, Clone)]
pub struct ExError {
    kind: ExErrorKind,
    op: Option<String>,
    path: Option<String>,
    message: String,
    source: Option<Box<ExError>>,
}

impl ExError {
    /// Create a new error with the specified kind
    pub fn new(kind: ExErrorKind) -> Self {
        Self {
            kind,
            op: None,
            path: None,
            message: String::new(),
            source: None,
        }
    }

    /// Add operation context
    pub fn with_op(mut self, op: impl Into<String>) -> Self {
        self.op = Some(op.into());
        self
    }

    /// Add file path context
    pub fn with_path(mut self, path: impl Into<String>) -> Self {
        self.path = Some(path.into());
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

    /// Get the file path context, if any
    pub fn path(&self) -> Option<&str> {
        self.path.as_deref()
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
        if let Some(path) = &self.path {
            write!(f, " (path: {})", path)?;
        }
        if let Some(source) = &self.source {
            write!(f, "; caused by {}", source)?;
        }
        Ok(())
    }
}

impl std::error::Error for ExError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        self.source
            .as_deref()
            .map(|s| s as &(dyn std::error::Error + 'static))
    }
}

// ========== End Error Facility ==========

/// Domain error taxonomy for the change-clustering engine
#[derive(Error, Debug, Clone, PartialEq)]
pub enum DiffractorError {
    // ===== Collaborator Errors (fatal) =====
    /// The file lister could not enumerate a snapshot root
    #[error("Failed to list files under {root}: {reason}")]
    ListError { root: String, reason: String },

    /// A snapshot file could not be read as text
    #[error("Failed to read {path}: {reason}")]
    ReadError { path: String, reason: String },

    // ===== Reconciliation Errors (fatal) =====
    /// Two distinct raw paths normalized to the same relative path
    #[error("Paths {first_raw} and {second_raw} both normalize to {normalized}")]
    DuplicatePath {
        normalized: String,
        first_raw: String,
        second_raw: String,
    },

    // ===== Diff Errors (non-fatal) =====
    /// The line diff could not be computed for one file
    #[error("Diff computation failed for {path}: {reason}")]
    DiffComputation { path: String, reason: String },

    // ===== Validation Errors =====
    /// Similarity threshold outside [0, 1] or not finite
    #[error("Similarity threshold must be within [0, 1], got {value}")]
    InvalidThreshold { value: f64 },

    /// Input rejected by validation
    #[error("Invalid input: {reason}")]
    InvalidInput { reason: String },

    /// Configuration could not be loaded or failed validation
    #[error("Configuration error: {reason}")]
    Config { reason: String },

    // ===== Generic Errors =====
    /// Serialization error (JSON/TOML encoding or decoding)
    #[error("Serialization error: {message}")]
    Serialization { message: String },

    /// Generic internal error
    #[error("Internal error: {message}")]
    Internal { message: String },
}

impl DiffractorError {
    /// Canonical kind for this error
    pub fn kind(&self) -> ExErrorKind {
        match self {
            DiffractorError::ListError { .. } => ExErrorKind::List,
            DiffractorError::ReadError { .. } => ExErrorKind::Read,
            DiffractorError::DuplicatePath { .. } => ExErrorKind::DuplicatePath,
            DiffractorError::DiffComputation { .. } => ExErrorKind::DiffComputation,
            DiffractorError::InvalidThreshold { .. } => ExErrorKind::InvalidThreshold,
            DiffractorError::InvalidInput { .. } => ExErrorKind::InvalidInput,
            DiffractorError::Config { .. } => ExErrorKind::Config,
            DiffractorError::Serialization { .. } => ExErrorKind::Serialization,
            DiffractorError::Internal { .. } => ExErrorKind::Internal,
        }
    }

    /// Whether this error aborts the whole comparison run
    pub fn is_fatal(&self) -> bool {
        self.kind().is_fatal()
    }
}

/// Conversion from DiffractorError to ExError
///
/// Keeps the typed variant's message and lifts its path into the
/// structured `path` field where the variant has one.
impl From<DiffractorError> for ExError {
    fn from(err: DiffractorError) -> Self {
        let message = err.to_string();
        let base = ExError::new(err.kind()).with_message(message);
        match err {
            DiffractorError::ListError { root, .. } => base.with_op("list_files").with_path(root),
            DiffractorError::ReadError { path, .. } => base.with_op("read_file").with_path(path),
            DiffractorError::DuplicatePath { normalized, .. } => {
                base.with_op("reconcile").with_path(normalized)
            }
            DiffractorError::DiffComputation { path, .. } => {
                base.with_op("extract_hunks").with_path(path)
            }
            DiffractorError::InvalidThreshold { .. } => base.with_op("cluster"),
            DiffractorError::InvalidInput { .. }
            | DiffractorError::Config { .. }
            | DiffractorError::Serialization { .. }
            | DiffractorError::Internal { .. } => base,
        }
    }
}

/// Conversion from serde_json::Error to DiffractorError
impl From<serde_json::Error> for DiffractorError {
    fn from(err: serde_json::Error) -> Self {
        DiffractorError::Serialization {
            message: err.to_string(),
        }
    }
}
