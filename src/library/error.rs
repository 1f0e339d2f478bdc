use std::fmt;
use std::io;
use std::path::PathBuf;

use thiserror::Error;

// ERRORS //

/// Failures while walking the marker stream of a single file.
#[derive(Debug, Error)]
pub enum ScanError {
    #[error("ran out of data reading segment length at offset {offset}")]
    TruncatedHeader { offset: u64 },

    #[error("ran out of data reading segment payload at offset {offset} ({missing} bytes missing)")]
    TruncatedPayload { offset: u64, missing: u64 },

    /// The sink refused scan output; the input itself was fine.
    #[error("unable to write scan output: {0}")]
    Sink(#[source] io::Error),

    #[error(transparent)]
    Io(#[from] io::Error),
}

/// The file operation that was running when an I/O error occurred.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Operation {
    Open,
    Read,
    Truncate,
    RemoveComment,
    KeepDate,
    Report,
}

impl fmt::Display for Operation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Operation::Open => "open",
            Operation::Read => "read",
            Operation::Truncate => "truncate",
            Operation::RemoveComment => "remove comment",
            Operation::KeepDate => "restore modification time",
            Operation::Report => "write report",
        };
        f.write_str(name)
    }
}

/// Per-file failure as reported to the caller. Every variant names the file.
#[derive(Debug, Error)]
pub enum JpegError {
    #[error("{}: does not appear to be a JPEG file", path.display())]
    NotAJpeg { path: PathBuf },

    #[error("{}: {source}", path.display())]
    Scan {
        path: PathBuf,
        #[source]
        source: ScanError,
    },

    #[error("{}: unable to {operation}: {source}", path.display())]
    Io {
        operation: Operation,
        path: PathBuf,
        #[source]
        source: io::Error,
    },
}

impl JpegError {
    pub fn io(operation: Operation, path: impl Into<PathBuf>, source: io::Error) -> Self {
        JpegError::Io {
            operation,
            path: path.into(),
            source,
        }
    }

    /// Wraps a scan failure. Output failures are reported as such, not as a
    /// problem with the file.
    pub fn scan(path: impl Into<PathBuf>, source: ScanError) -> Self {
        match source {
            ScanError::Sink(e) => JpegError::io(Operation::Report, path, e),
            source => JpegError::Scan {
                path: path.into(),
                source,
            },
        }
    }
}
