//! Per-file and per-batch results.

use std::fmt;
use std::path::{Path, PathBuf};

use super::resolver::ResolutionPolicy;

/// The result of processing one existing file.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FileOutcome {
    /// The file contained a start marker and was rewritten.
    Resolved {
        path: PathBuf,
        /// Number of regions removed or replaced.
        regions: usize,
    },
    /// The file contained no start marker; nothing was written.
    NoConflictFound { path: PathBuf },
    /// Reading or writing the file failed.
    Error { path: PathBuf, cause: String },
}

impl FileOutcome {
    /// The path this outcome refers to.
    pub fn path(&self) -> &Path {
        match self {
            Self::Resolved { path, .. }
            | Self::NoConflictFound { path }
            | Self::Error { path, .. } => path,
        }
    }

    /// Short human-readable label for logging.
    pub fn label(&self) -> &'static str {
        match self {
            Self::Resolved { .. } => "resolved",
            Self::NoConflictFound { .. } => "no-conflict",
            Self::Error { .. } => "error",
        }
    }

    pub fn is_error(&self) -> bool {
        matches!(self, Self::Error { .. })
    }
}

/// Renders the progress line printed for each processed file.
impl fmt::Display for FileOutcome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Resolved { path, .. } => {
                write!(f, "Resolved conflicts in: {}", path.display())
            }
            Self::NoConflictFound { path } => {
                write!(f, "No conflicts found in: {}", path.display())
            }
            Self::Error { path, cause } => {
                write!(f, "Error processing {}: {}", path.display(), cause)
            }
        }
    }
}

/// Outcomes of one named batch, in input order.
#[derive(Debug, Clone)]
pub struct BatchReport {
    pub name: String,
    pub policy: ResolutionPolicy,
    pub outcomes: Vec<FileOutcome>,
}

impl BatchReport {
    pub fn resolved(&self) -> usize {
        self.count(|o| matches!(o, FileOutcome::Resolved { .. }))
    }

    pub fn no_conflict(&self) -> usize {
        self.count(|o| matches!(o, FileOutcome::NoConflictFound { .. }))
    }

    pub fn errors(&self) -> usize {
        self.count(FileOutcome::is_error)
    }

    /// Total regions rewritten across the batch.
    pub fn regions(&self) -> usize {
        self.outcomes
            .iter()
            .map(|o| match o {
                FileOutcome::Resolved { regions, .. } => *regions,
                _ => 0,
            })
            .sum()
    }

    fn count(&self, pred: impl Fn(&FileOutcome) -> bool) -> usize {
        self.outcomes.iter().filter(|o| pred(*o)).count()
    }
}
