use std::fmt;

// === CreateError ===

/// Errors raised while submitting a bookmark to the creation backend.
#[derive(Debug, Clone, PartialEq)]
pub enum CreateError {
    /// A creation is already in flight.
    Busy,
    /// The request never reached the backend or the connection failed.
    Transport(String),
    /// The backend answered with a non-success status.
    Status(u16),
    /// The backend answered successfully but the body could not be decoded.
    MalformedResponse(String),
}

impl CreateError {
    /// True when the backend was reached and rejected the request.
    pub fn is_rejection(&self) -> bool {
        matches!(self, CreateError::Status(_))
    }
}

impl fmt::Display for CreateError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CreateError::Busy => write!(f, "A bookmark is already being saved"),
            CreateError::Transport(msg) => write!(f, "Bookmark transport error: {}", msg),
            CreateError::Status(code) => write!(f, "Bookmark backend returned status {}", code),
            CreateError::MalformedResponse(msg) => {
                write!(f, "Malformed bookmark response: {}", msg)
            }
        }
    }
}

impl std::error::Error for CreateError {}

// === SessionError ===

/// Errors raised while starting a dashboard session.
#[derive(Debug, Clone, PartialEq)]
pub enum SessionError {
    /// No authenticated user; the caller should redirect to the given path.
    Unauthenticated { redirect: String },
}

impl fmt::Display for SessionError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SessionError::Unauthenticated { redirect } => {
                write!(f, "Not authenticated, redirect to {}", redirect)
            }
        }
    }
}

impl std::error::Error for SessionError {}

// === SnapshotError ===

/// Errors raised while reading a hydration snapshot.
#[derive(Debug)]
pub enum SnapshotError {
    /// The snapshot file could not be read.
    IoError(String),
    /// The snapshot JSON could not be parsed.
    ParseError(String),
}

impl fmt::Display for SnapshotError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SnapshotError::IoError(msg) => write!(f, "Snapshot I/O error: {}", msg),
            SnapshotError::ParseError(msg) => write!(f, "Snapshot parse error: {}", msg),
        }
    }
}

impl std::error::Error for SnapshotError {}

// === ConfigError ===

/// Errors related to dashboard configuration.
#[derive(Debug)]
pub enum ConfigError {
    /// An I/O error occurred while reading or writing the config file.
    IoError(String),
    /// Failed to serialize or deserialize the config.
    SerializationError(String),
    /// The provided config key is invalid.
    InvalidKey(String),
    /// The provided config value is invalid.
    InvalidValue(String),
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConfigError::IoError(msg) => write!(f, "Config I/O error: {}", msg),
            ConfigError::SerializationError(msg) => {
                write!(f, "Config serialization error: {}", msg)
            }
            ConfigError::InvalidKey(key) => write!(f, "Invalid config key: {}", key),
            ConfigError::InvalidValue(msg) => write!(f, "Invalid config value: {}", msg),
        }
    }
}

impl std::error::Error for ConfigError {}
