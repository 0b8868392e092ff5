//! Atelier Storage Library
//!
//! Storage abstraction and implementations for the asset uploader: S3 (and
//! S3-compatible providers) through `object_store`, and the local filesystem.
//!
//! # Storage key format
//!
//! Keys are caller-chosen, `/`-separated relative paths such as
//! `models/shoe.glb`. Keys must not contain `..` segments or a leading `/`;
//! validation is centralized in the `keys` module so all backends agree.

pub mod factory;
pub mod keys;
#[cfg(feature = "storage-local")]
pub mod local;
#[cfg(feature = "storage-s3")]
pub mod s3;
pub mod traits;

// Re-export commonly used types
pub use atelier_core::StorageBackend;
pub use factory::create_storage;
#[cfg(feature = "storage-local")]
pub use local::LocalStorage;
#[cfg(feature = "storage-s3")]
pub use s3::S3Storage;
pub use traits::{Storage, StorageError, StorageResult};
