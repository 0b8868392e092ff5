//! Atelier Assets
//!
//! Walks a local directory, selects model files by extension and uploads each
//! one to object storage under its path relative to the root.

pub mod content_type;
pub mod discovery;
pub mod uploader;

pub use content_type::content_type_for;
pub use discovery::{relative_key, AssetRecord, AssetWalk};
pub use uploader::{AssetUploader, FailedUpload, UploadSummary, UploadedAsset};
