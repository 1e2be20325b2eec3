use thiserror::Error;

/// Result type alias using ChronicleError
pub type Result<T> = std::result::Result<T, ChronicleError>;

// ========== Error Facility ==========

/// Canonical error kind taxonomy
///
/// Each kind maps to a stable error code usable for programmatic handling,
/// tests, and CLI exit reporting. The reconciliation and diff engine itself
/// is total; these kinds cover the surfaces around it.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExErrorKind {
    // Extraction
    /// Model output contains no JSON object
    NoJson,
    /// Model output contains a JSON object that does not decode as a summary
    InvalidExtraction,
    /// Model output decoded but carries no characters
    EmptyExtraction,

    // Configuration
    InvalidThreshold,
    InvalidConfig,

    // Integration/IO
    Io,
}

impl ExErrorKind {
    /// Get the stable error code for this kind
    pub fn code(&self) -> &'static str {
        match self {
            ExErrorKind::NoJson => "ERR_NO_JSON",
            ExErrorKind::InvalidExtraction => "ERR_INVALID_EXTRACTION",
            ExErrorKind::EmptyExtraction => "ERR_EMPTY_EXTRACTION",
            ExErrorKind::InvalidThreshold => "ERR_INVALID_THRESHOLD",
            ExErrorKind::InvalidConfig => "ERR_INVALID_CONFIG",
            ExErrorKind::Io => "ERR_IO",
        }
    }
}

/// Canonical structured error type
///
/// Carries a classification kind plus optional operation context and a
/// human-readable message.
#[derive(Debug, Clone)]
pub struct ExError {
    kind: ExErrorKind,
    op: Option<String>,
    story_id: Option<String>,
    chunk_index: Option<usize>,
    message: String,
}

impl ExError {
    /// Create a new error with the specified kind
    pub fn new(kind: ExErrorKind) -> Self {
        Self {
            kind,
            op: None,
            story_id: None,
            chunk_index: None,
            message: String::new(),
        }
    }

    /// Add operation context
    pub fn with_op(mut self, op: impl Into<String>) -> Self {
        self.op = Some(op.into());
        self
    }

    /// Add story context
    pub fn with_story_id(mut self, id: impl Into<String>) -> Self {
        self.story_id = Some(id.into());
        self
    }

    /// Add chunk context
    pub fn with_chunk_index(mut self, index: usize) -> Self {
        self.chunk_index = Some(index);
        self
    }

    /// Add custom message
    pub fn with_message(mut self, message: impl Into<String>) -> Self {
        self.message = message.into();
        self
    }

    pub fn kind(&self) -> ExErrorKind {
        self.kind
    }

    /// Get the stable error code
    pub fn code(&self) -> &'static str {
        self.kind.code()
    }

    pub fn op(&self) -> Option<&str> {
        self.op.as_deref()
    }

    pub fn story_id(&self) -> Option<&str> {
        self.story_id.as_deref()
    }

    pub fn chunk_index(&self) -> Option<usize> {
        self.chunk_index
    }

    pub fn message(&self) -> &str {
        &self.message
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
        if let Some(story_id) = &self.story_id {
            write!(f, " (story_id: {})", story_id)?;
        }
        if let Some(chunk) = self.chunk_index {
            write!(f, " (chunk: {})", chunk)?;
        }
        Ok(())
    }
}

impl std::error::Error for ExError {}

// ========== End Error Facility ==========

/// Error taxonomy for the fallible surfaces around the engine
#[derive(Error, Debug, Clone, PartialEq)]
pub enum ChronicleError {
    /// No `{ ... }` object could be located in the model output
    #[error("no JSON object found in model output: {detail}")]
    NoJson { detail: String },

    /// The located object failed to decode
    #[error("failed to decode extraction JSON: {message}")]
    Json { message: String },

    /// Decoded batch has no characters
    #[error("extraction produced no characters")]
    EmptyExtraction,

    /// Similarity threshold outside [0, 1]
    #[error("threshold `{name}` must be within [0, 1], got {value}")]
    InvalidThreshold { name: String, value: f64 },

    /// Configuration could not be read or is inconsistent
    #[error("invalid configuration: {message}")]
    Config { message: String },

    /// Filesystem failure
    #[error("I/O error on {path}: {message}")]
    Io { path: String, message: String },
}

impl From<ChronicleError> for ExError {
    fn from(err: ChronicleError) -> Self {
        match err {
            ChronicleError::NoJson { detail } => ExError::new(ExErrorKind::NoJson)
                .with_op("parse_extraction")
                .with_message(detail),

            ChronicleError::Json { message } => ExError::new(ExErrorKind::InvalidExtraction)
                .with_op("parse_extraction")
                .with_message(message),

            ChronicleError::EmptyExtraction => ExError::new(ExErrorKind::EmptyExtraction)
                .with_op("parse_extraction")
                .with_message("extraction produced no characters"),

            ChronicleError::InvalidThreshold { name, value } => {
                ExError::new(ExErrorKind::InvalidThreshold)
                    .with_op("validate_config")
                    .with_message(format!("{} = {}", name, value))
            }

            ChronicleError::Config { message } => ExError::new(ExErrorKind::InvalidConfig)
                .with_op("load_config")
                .with_message(message),

            ChronicleError::Io { path, message } => ExError::new(ExErrorKind::Io)
                .with_message(format!("{}: {}", path, message)),
        }
    }
}

impl From<serde_json::Error> for ChronicleError {
    fn from(err: serde_json::Error) -> Self {
        ChronicleError::Json {
            message: err.to_string(),
        }
    }
}

impl From<toml::de::Error> for ChronicleError {
    fn from(err: toml::de::Error) -> Self {
        ChronicleError::Config {
            message: err.to_string(),
        }
    }
}
