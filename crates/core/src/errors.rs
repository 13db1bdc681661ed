//! Error types for the conflictsweep core library.
//!
//! Each subsystem has its own error type derived with `thiserror`. The CLI
//! wraps them in `anyhow` with context at its call sites.
//!
//! Malformed conflict markers have no variant: a region that does not parse
//! is not a region and is left untouched.

use thiserror::Error;

// ---------------------------------------------------------------------------
// Resolve errors
// ---------------------------------------------------------------------------

/// Errors from reading or rewriting a single file.
///
/// These never abort a batch; the resolver turns them into
/// [`FileOutcome::Error`](crate::conflict::FileOutcome::Error).
#[derive(Debug, Error)]
pub enum ResolveError {
    /// The file could not be read (permissions, invalid UTF-8, ...).
    #[error("failed to read '{path}': {source}")]
    Read {
        path: String,
        #[source]
        source: std::io::Error,
    },

    /// The resolved content could not be written back.
    #[error("failed to write '{path}': {source}")]
    Write {
        path: String,
        #[source]
        source: std::io::Error,
    },
}

impl ResolveError {
    /// The underlying I/O error message, without the path prefix.
    pub fn cause(&self) -> String {
        match self {
            Self::Read { source, .. } | Self::Write { source, .. } => source.to_string(),
        }
    }
}

// ---------------------------------------------------------------------------
// Configuration errors
// ---------------------------------------------------------------------------

/// Errors from configuration loading and validation.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// Config file not found.
    #[error("configuration file not found: {0}")]
    FileNotFound(String),

    /// TOML parse error.
    #[error("configuration parse error: {0}")]
    ParseError(String),

    /// TOML serialization error.
    #[error("configuration serialize error: {0}")]
    SerializeError(String),

    /// A config value is invalid.
    #[error("invalid configuration value for '{field}': {detail}")]
    InvalidValue {
        field: String,
        detail: String,
    },

    /// Refused to overwrite an existing file.
    #[error("file already exists: {0}")]
    AlreadyExists(String),

    /// Generic I/O error reading or writing the config file.
    #[error("configuration I/O error: {0}")]
    IoError(#[from] std::io::Error),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display_messages() {
        let err = ConfigError::FileNotFound("/tmp/sweep.toml".into());
        assert_eq!(
            err.to_string(),
            "configuration file not found: /tmp/sweep.toml"
        );

        let err = ConfigError::InvalidValue {
            field: "markers.incoming_label".into(),
            detail: "must not be empty".into(),
        };
        assert!(err.to_string().contains("markers.incoming_label"));

        let err = ResolveError::Write {
            path: "a.ts".into(),
            source: std::io::Error::new(std::io::ErrorKind::PermissionDenied, "denied"),
        };
        assert_eq!(err.to_string(), "failed to write 'a.ts': denied");
    }

    #[test]
    fn test_resolve_error_cause_omits_path() {
        let err = ResolveError::Read {
            path: "src/a.ts".into(),
            source: std::io::Error::new(std::io::ErrorKind::NotFound, "gone"),
        };
        assert_eq!(err.cause(), "gone");
    }
}
