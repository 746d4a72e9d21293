//! Error type shared by every pipeline stage.

use std::fmt;
use std::path::PathBuf;

/// Error type for pipeline operations
#[derive(Debug)]
pub enum PipelineError {
    /// A file could not be opened, created, read or written
    Io {
        path: PathBuf,
        source: std::io::Error,
    },
    /// Delimited-text parse or write failure (including rows with the wrong column count)
    Csv(csv::Error),
    /// The header line names the same column more than once
    DuplicateHeader {
        field: String,
    },
    /// A required column is absent from a record
    MissingField {
        field: String,
        line: u64,
    },
    /// Two records derived the same badge id and the policy is `reject`
    DuplicateId {
        id: String,
        line: u64,
    },
    /// Invalid or unreadable configuration
    Config(String),
}

impl PipelineError {
    pub fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        PipelineError::Io {
            path: path.into(),
            source,
        }
    }
}

impl fmt::Display for PipelineError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PipelineError::Io { path, source } => {
                write!(f, "IO error on {}: {}", path.display(), source)
            }
            PipelineError::Csv(e) => write!(f, "{}", e),
            PipelineError::DuplicateHeader { field } => {
                write!(f, "Header names column '{}' more than once", field)
            }
            PipelineError::MissingField { field, line } => {
                write!(f, "Required field '{}' is missing (line {})", field, line)
            }
            PipelineError::DuplicateId { id, line } => {
                write!(f, "Duplicate badge id '{}' (line {})", id, line)
            }
            PipelineError::Config(msg) => write!(f, "Config error: {}", msg),
        }
    }
}

impl std::error::Error for PipelineError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            PipelineError::Io { source, .. } => Some(source),
            PipelineError::Csv(e) => Some(e),
            _ => None,
        }
    }
}

impl From<csv::Error> for PipelineError {
    fn from(err: csv::Error) -> Self {
        PipelineError::Csv(err)
    }
}

pub type Result<T> = std::result::Result<T, PipelineError>;
