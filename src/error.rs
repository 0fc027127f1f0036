//! Error types.
//!
//! - `AppError`: process-level failure with an exit code (CLI usage, file writes,
//!   terminal setup, encoder failures).
//! - `LoadError`: why an input file was rejected. These never abort a run; the
//!   loader swaps in the sample dataset and surfaces the error as a warning.

use thiserror::Error;

#[derive(Clone)]
pub struct AppError {
    exit_code: u8,
    message: String,
}

impl AppError {
    pub fn new(exit_code: u8, message: impl Into<String>) -> Self {
        Self {
            exit_code,
            message: message.into(),
        }
    }

    pub fn exit_code(&self) -> u8 {
        self.exit_code
    }
}

impl std::fmt::Display for AppError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.message)
    }
}

impl std::fmt::Debug for AppError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AppError")
            .field("exit_code", &self.exit_code)
            .field("message", &self.message)
            .finish()
    }
}

impl std::error::Error for AppError {}

/// Coarse classification of a rejected input.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LoadErrorKind {
    /// The file is structurally fine but does not carry the required schema.
    Validation,
    /// A row or value could not be parsed.
    Parse,
    /// The file could not be read at all.
    Io,
}

/// A rejected input file.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum LoadError {
    #[error("Missing required columns: {}", .missing.join(", "))]
    MissingColumns { missing: Vec<&'static str> },

    #[error("File has a header but no data rows")]
    NoRows,

    #[error("Line {line}: {message}")]
    Parse {
        line: usize,
        column: Option<&'static str>,
        message: String,
    },

    #[error("Failed to read '{path}': {message}")]
    Io { path: String, message: String },
}

impl LoadError {
    pub fn kind(&self) -> LoadErrorKind {
        match self {
            LoadError::MissingColumns { .. } | LoadError::NoRows => LoadErrorKind::Validation,
            LoadError::Parse { .. } => LoadErrorKind::Parse,
            LoadError::Io { .. } => LoadErrorKind::Io,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn load_error_kinds() {
        let missing = LoadError::MissingColumns {
            missing: vec!["Likes", "Shares"],
        };
        assert_eq!(missing.kind(), LoadErrorKind::Validation);
        assert_eq!(missing.to_string(), "Missing required columns: Likes, Shares");

        let parse = LoadError::Parse {
            line: 3,
            column: Some("Date"),
            message: "Invalid date 'soon'".to_string(),
        };
        assert_eq!(parse.kind(), LoadErrorKind::Parse);
        assert_eq!(parse.to_string(), "Line 3: Invalid date 'soon'");

        assert_eq!(LoadError::NoRows.kind(), LoadErrorKind::Validation);
    }
}
