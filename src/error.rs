//! Error types for snapshot loading and analysis.

use std::io;

/// Result alias used across the crate.
pub type Result<T> = std::result::Result<T, Error>;

#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("snapshot source {source_id} not found")]
    SourceNotFound { source_id: String },

    #[error("failed to read snapshot source {source_id}: {source}")]
    Io {
        source_id: String,
        #[source]
        source: io::Error,
    },

    #[error("malformed record in {source_id} at line {line}: {reason}")]
    MalformedRecord {
        source_id: String,
        line: usize,
        reason: String,
    },

    #[error("at least one snapshot source is required")]
    EmptySequence,

    #[error("configuration error: {0}")]
    Config(#[from] ConfigError),
}

impl Error {
    pub(crate) fn io(source_id: &str, err: io::Error) -> Self {
        if err.kind() == io::ErrorKind::NotFound {
            Error::SourceNotFound {
                source_id: source_id.to_string(),
            }
        } else {
            Error::Io {
                source_id: source_id.to_string(),
                source: err,
            }
        }
    }
}

#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("cannot read config file {path}: {source}")]
    Read {
        path: String,
        #[source]
        source: io::Error,
    },

    #[error("invalid TOML in {path}: {message}")]
    Parse { path: String, message: String },

    #[error("invalid value for {field}: {message}")]
    Invalid { field: String, message: String },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn not_found_io_error_maps_to_source_not_found() {
        let err = Error::io("rib.out", io::Error::from(io::ErrorKind::NotFound));
        assert!(matches!(err, Error::SourceNotFound { ref source_id } if source_id == "rib.out"));
    }

    #[test]
    fn other_io_errors_are_kept() {
        let err = Error::io("rib.out", io::Error::from(io::ErrorKind::PermissionDenied));
        assert!(matches!(err, Error::Io { .. }));
        assert!(err.to_string().starts_with("failed to read snapshot source rib.out"));
    }
}
