use std::error::Error;
use std::fmt;
use std::path::PathBuf;

/// Failures that abort a report run.
#[derive(Debug)]
pub enum ReportError {
    /// The results file does not exist.
    InputNotFound(PathBuf),
    /// A column is missing or a cell cannot be interpreted. Row 0 is the header.
    MalformedInput { row: usize, message: String },
    /// The output directory cannot be created or written to.
    OutputUnwritable(PathBuf),
    /// A render setting is out of range.
    InvalidConfig(String),
}

impl ReportError {
    pub fn malformed(row: usize, message: impl Into<String>) -> Self {
        ReportError::MalformedInput {
            row,
            message: message.into(),
        }
    }
}

impl fmt::Display for ReportError {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            ReportError::InputNotFound(path) => {
                write!(f, "Results file not found: {}", path.display())
            }
            ReportError::MalformedInput { row: 0, message } => {
                write!(f, "Malformed header: {}", message)
            }
            ReportError::MalformedInput { row, message } => {
                write!(f, "Malformed input at row {}: {}", row, message)
            }
            ReportError::OutputUnwritable(path) => {
                write!(f, "Output directory is not writable: {}", path.display())
            }
            ReportError::InvalidConfig(message) => {
                write!(f, "Invalid render configuration: {}", message)
            }
        }
    }
}

impl Error for ReportError {}
