//! Error types module
//!
//! All fatal and per-item failures of the sync orchestrator and the asset
//! uploader are unified under [`AppError`]. Each variant maps to one
//! [`ErrorCategory`], which decides whether the run aborts and which exit code
//! the process reports.

/// Broad classification of a failure.
#[derive(Debug, Clone, Copy, PartialEq, Eq, serde::Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ErrorCategory {
    /// A required external executable is not invocable
    MissingTool,
    /// Required configuration values are absent or malformed
    MissingConfiguration,
    /// A subprocess exited non-zero
    ProcessFailure,
    /// A single item of a batch failed; the batch continues
    Item,
}

#[derive(Debug, thiserror::Error)]
pub enum AppError {
    #[error("'{tool}' not found in PATH")]
    ToolNotFound { tool: String },

    #[error("Missing configuration: {}", vars.join(", "))]
    MissingConfiguration { vars: Vec<String> },

    #[error("Invalid configuration: {0}")]
    InvalidConfiguration(String),

    #[error("{tool} exited with {}: {stderr}", exit_status_label(*code))]
    ProcessFailed {
        tool: String,
        code: Option<i32>,
        stderr: String,
    },

    #[error("{tool} returned unexpected output: {output}")]
    UnexpectedOutput { tool: String, output: String },

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Storage error: {0}")]
    Storage(String),
}

fn exit_status_label(code: Option<i32>) -> String {
    match code {
        Some(code) => format!("exit code {}", code),
        None => "no exit code (terminated by signal)".to_string(),
    }
}

impl AppError {
    pub fn category(&self) -> ErrorCategory {
        match self {
            AppError::ToolNotFound { .. } => ErrorCategory::MissingTool,
            AppError::MissingConfiguration { .. } | AppError::InvalidConfiguration(_) => {
                ErrorCategory::MissingConfiguration
            }
            AppError::ProcessFailed { .. } | AppError::UnexpectedOutput { .. } => {
                ErrorCategory::ProcessFailure
            }
            AppError::Io(_) | AppError::Storage(_) => ErrorCategory::Item,
        }
    }

    /// Whether this error aborts the whole run.
    ///
    /// Item errors are only fatal when they escape the per-item boundary, which
    /// callers decide; the category alone treats them as recoverable.
    pub fn is_fatal(&self) -> bool {
        !matches!(self.category(), ErrorCategory::Item)
    }

    /// Process exit code for this error.
    ///
    /// Mirrors the failing tool's exit code when one is available, else 1.
    pub fn exit_code(&self) -> u8 {
        match self {
            AppError::ProcessFailed {
                code: Some(code), ..
            } if *code > 0 && *code <= u8::MAX as i32 => *code as u8,
            _ => 1,
        }
    }
}

/// Result type for orchestrator and uploader operations
pub type AppResult<T> = Result<T, AppError>;
