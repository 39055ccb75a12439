//! Error types for loading sweeps and building reports.

use std::path::PathBuf;
use thiserror::Error;

/// A path expression that does not follow the `name[i].name` grammar.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("bad path expression '{expr}': {reason}")]
pub struct PathSyntaxError {
    pub expr: String,
    pub reason: String,
}

/// A well-formed path expression that does not resolve against a record.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum AddressError {
    #[error("'{expr}': no field '{segment}'")]
    MissingField { expr: String, segment: String },

    #[error("'{expr}': cannot look up '{segment}' in a value of type {kind}")]
    NotABlock {
        expr: String,
        segment: String,
        kind: &'static str,
    },

    #[error("'{expr}': '{segment}' has type {kind} and cannot be indexed")]
    NotAList {
        expr: String,
        segment: String,
        kind: &'static str,
    },

    #[error("'{expr}': index {index} out of range in '{segment}' (length {len})")]
    IndexOutOfRange {
        expr: String,
        segment: String,
        index: usize,
        len: usize,
    },
}

/// Failure while extracting report values from a sweep.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ReportError {
    #[error(transparent)]
    InvalidPath(#[from] PathSyntaxError),

    #[error("state {record}: {source}")]
    Address {
        record: usize,
        #[source]
        source: AddressError,
    },

    #[error("state {record}: '{expr}' has type {kind}, expected integer, float or text")]
    NotScalar {
        record: usize,
        expr: String,
        kind: &'static str,
    },
}

/// Syntax error in a parameter file or state file.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("line {line}: {message}")]
pub struct ParseError {
    pub line: usize,
    pub message: String,
}

impl ParseError {
    pub fn new(line: usize, message: impl Into<String>) -> Self {
        Self {
            line,
            message: message.into(),
        }
    }
}

#[derive(Debug, Error)]
pub enum SweepError {
    #[error("not a directory or file: {}", .0.display())]
    Argument(PathBuf),

    #[error("{}: {reason}", .path.display())]
    Configuration { path: PathBuf, reason: String },

    #[error("state index {index} out of range (sweep has {len} states)")]
    Index { index: usize, len: usize },

    #[error("read {}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("parse {}", .path.display())]
    Parse {
        path: PathBuf,
        #[source]
        source: ParseError,
    },

    #[error(transparent)]
    Report(#[from] ReportError),
}
