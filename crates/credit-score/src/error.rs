use std::path::PathBuf;

/// Fatal problems with the transaction source. Any of these aborts the run
/// before a single record is normalized.
#[derive(Debug, thiserror::Error)]
pub enum SourceError {
    #[error("Transaction source not found at {}", path.display())]
    NotFound { path: PathBuf },
    #[error("Could not read transaction source {}: {source}", path.display())]
    Unreadable {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("Transaction source {} is not valid JSON: {source}", path.display())]
    NotParseable {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },
    #[error("Transaction source {} must hold a JSON array of records", path.display())]
    NotAnArray { path: PathBuf },
}

impl SourceError {
    pub const fn is_not_found(&self) -> bool {
        matches!(self, Self::NotFound { .. })
    }

    /// True for every variant meaning "the file exists but its content is unusable".
    pub const fn is_not_parseable(&self) -> bool {
        matches!(self, Self::NotParseable { .. } | Self::NotAnArray { .. })
    }
}

/// A single raw record that cannot be normalized. Records failing this way are
/// logged and skipped, the run carries on with the rest of the batch.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum MalformedRecordError {
    #[error("Record #{index} is not a JSON object")]
    NotAnObject { index: usize },
    #[error("Record #{index} is missing field '{field}'")]
    MissingField { index: usize, field: &'static str },
    #[error("Record #{index} has an invalid '{field}': {reason}")]
    InvalidField {
        index: usize,
        field: &'static str,
        reason: String,
    },
    #[error("Record #{index} wraps '{field}' in '{wrapper}' without an inner value")]
    EmptyWrapper {
        index: usize,
        field: &'static str,
        wrapper: &'static str,
    },
}

impl MalformedRecordError {
    pub const fn index(&self) -> usize {
        match self {
            Self::NotAnObject { index }
            | Self::MissingField { index, .. }
            | Self::InvalidField { index, .. }
            | Self::EmptyWrapper { index, .. } => *index,
        }
    }
}
