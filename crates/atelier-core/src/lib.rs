//! Atelier Core Library
//!
//! Configuration, error taxonomy and shared constants used by the database
//! sync orchestrator and the asset uploader.

pub mod config;
pub mod constants;
pub mod error;
pub mod redact;
pub mod storage_types;

// Re-export commonly used types
pub use config::{SyncConfig, ToolPaths, UploadConfig};
pub use error::{AppError, AppResult, ErrorCategory};
pub use redact::redact_connection_string;
pub use storage_types::StorageBackend;
