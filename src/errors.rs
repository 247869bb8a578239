/*!
 * Error types for the trsmerge application.
 *
 * This module contains custom error types for different parts of the application,
 * using the thiserror crate for ergonomic error definitions.
 */

use std::path::PathBuf;

use thiserror::Error;

/// Errors raised by a decision provider while asking for a resolution
#[derive(Error, Debug)]
pub enum DecisionError {
    /// Reading the answer or writing the prompt failed
    #[error("Failed to talk to the decision maker: {0}")]
    Io(#[from] std::io::Error),

    /// Input ended while a replacement line was expected
    #[error("Input closed while waiting for a new translation of line {0}")]
    InputClosed(usize),

    /// The provider cannot supply replacement text
    #[error("No replacement translation available for line {0}")]
    Unavailable(usize),
}

/// Errors that end a validation run
#[derive(Error, Debug)]
pub enum ValidationError {
    /// Validation finished with unresolved diagnostics
    #[error("{report}")]
    Rejected {
        /// Human readable report of all diagnostics
        report: String,
    },
}

/// Contract violations between validation and merge
#[derive(Error, Debug, PartialEq, Eq)]
pub enum MergeError {
    /// A translation line carries a prefix that differs from its English line
    #[error("invalid file state around line {line}")]
    InvalidState {
        /// 1-based line number
        line: usize,
    },

    /// The two sequences cannot be paired line by line
    #[error("cannot merge sequences of different length: {preferred} vs {fallback}")]
    LengthMismatch {
        /// Line count of the preferred sequence
        preferred: usize,
        /// Line count of the fallback sequence
        fallback: usize,
    },
}

/// Errors from reading and writing translation files
#[derive(Error, Debug)]
pub enum FileError {
    /// Underlying I/O failure
    #[error("I/O error on {path:?}: {source}")]
    Io {
        /// File involved
        path: PathBuf,
        /// Original error
        #[source]
        source: std::io::Error,
    },

    /// The file is not valid in the requested encoding
    #[error("{path:?} is not valid {encoding} - please set an encoding and make sure all files comply with that one")]
    Malformed {
        /// File involved
        path: PathBuf,
        /// Encoding name
        encoding: &'static str,
    },

    /// Some characters cannot be represented in the output encoding
    #[error("cannot write {path:?}: some characters are not representable in {encoding}")]
    Unencodable {
        /// File involved
        path: PathBuf,
        /// Encoding name
        encoding: &'static str,
    },
}

/// Main application error type that wraps all other errors
#[derive(Error, Debug)]
pub enum AppError {
    /// Error from a file operation
    #[error("File error: {0}")]
    File(#[from] FileError),

    /// Error from validation
    #[error("Validation error: {0}")]
    Validation(#[from] ValidationError),

    /// Error from merging
    #[error("Merge error: {0}")]
    Merge(#[from] MergeError),
}
