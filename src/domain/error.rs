// ============================================================
// Layer 3: Data Errors
// ============================================================
// Typed failures of the batching pipeline. The application
// layer wraps these in anyhow with extra context; library
// code returns them directly so callers can match on them.
//
//   Io                 → a corpus file is missing or unreadable
//   Parse              → a line holds a token that is not an id
//   Encoding           → a line is not valid UTF-8
//   LineCountMismatch  → one corpus file ended before the other
//   Index              → batch index past the last batch
//   Config             → invalid construction parameters
//
// Filtering of too-short / too-long pairs is NOT an error.

use std::path::PathBuf;

#[derive(Debug, thiserror::Error)]
pub enum DataError {
    #[error("cannot read '{}': {source}", .path.display())]
    Io {
        path:   PathBuf,
        source: std::io::Error,
    },

    #[error("invalid token id '{token}' at {}:{line}", .path.display())]
    Parse {
        path:  PathBuf,
        line:  usize,
        token: String,
    },

    #[error("line {line} of '{}' is not valid UTF-8", .path.display())]
    Encoding {
        path: PathBuf,
        line: usize,
    },

    #[error("'{}' ended at line {line} while its counterpart still has lines", .shorter.display())]
    LineCountMismatch {
        shorter: PathBuf,
        line:    usize,
    },

    #[error("batch index {index} out of range ({len} batches)")]
    Index {
        index: usize,
        len:   usize,
    },

    #[error("invalid configuration: {0}")]
    Config(String),
}

impl DataError {
    /// Wrap an I/O error with the path it happened on.
    pub fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::Io { path: path.into(), source }
    }

    /// True when the files were readable but their contents are malformed.
    pub fn is_format_error(&self) -> bool {
        matches!(
            self,
            Self::Parse { .. } | Self::Encoding { .. } | Self::LineCountMismatch { .. }
        )
    }
}
