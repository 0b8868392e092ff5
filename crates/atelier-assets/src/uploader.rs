//! Asset upload: walk → filter → upload each match, collecting per-file results.

use std::path::{Path, PathBuf};
use std::sync::Arc;
use std::time::Instant;

use atelier_core::{AppError, AppResult};
use atelier_storage::Storage;
use serde::Serialize;

use crate::discovery::{AssetRecord, AssetWalk};

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct UploadedAsset {
    pub path: PathBuf,
    pub key: String,
    pub content_type: String,
    pub size_bytes: u64,
    pub url: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FailedUpload {
    pub path: PathBuf,
    pub key: String,
    pub error: String,
}

/// Outcome of one uploader run.
#[derive(Debug, Clone, Default, Serialize)]
pub struct UploadSummary {
    pub uploaded: Vec<UploadedAsset>,
    pub failed: Vec<FailedUpload>,
    /// Files under the root that did not match the extension
    pub skipped: usize,
    pub duration_ms: f64,
}

impl UploadSummary {
    pub fn is_clean(&self) -> bool {
        self.failed.is_empty()
    }

    pub fn total_bytes(&self) -> u64 {
        self.uploaded.iter().map(|a| a.size_bytes).sum()
    }
}

/// Uploads every matching file under `root`, overwriting remote copies.
///
/// A failing file is recorded in the summary and the walk moves on.
pub struct AssetUploader {
    storage: Arc<dyn Storage>,
    root: PathBuf,
    extension: String,
}

impl AssetUploader {
    pub fn new(
        storage: Arc<dyn Storage>,
        root: impl Into<PathBuf>,
        extension: impl Into<String>,
    ) -> Self {
        Self {
            storage,
            root: root.into(),
            extension: extension.into(),
        }
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    pub async fn run(&self) -> AppResult<UploadSummary> {
        if !self.root.is_dir() {
            return Err(AppError::InvalidConfiguration(format!(
                "asset root {} is not a directory",
                self.root.display()
            )));
        }

        let start = Instant::now();
        let mut summary = UploadSummary::default();
        let mut walk = AssetWalk::new(&self.root, &self.extension);

        for record in walk.by_ref() {
            match self.upload_one(&record).await {
                Ok(asset) => summary.uploaded.push(asset),
                Err(failure) => summary.failed.push(failure),
            }
        }

        summary.skipped = walk.skipped();
        summary.duration_ms = start.elapsed().as_secs_f64() * 1000.0;

        tracing::info!(
            uploaded = summary.uploaded.len(),
            failed = summary.failed.len(),
            skipped = summary.skipped,
            total_bytes = summary.total_bytes(),
            duration_ms = summary.duration_ms,
            "Asset sync complete"
        );

        Ok(summary)
    }

    /// Read and upload a single file.
    pub async fn upload_one(&self, record: &AssetRecord) -> Result<UploadedAsset, FailedUpload> {
        tracing::info!(
            "Uploading {} -> {} ({})",
            record.path.display(),
            record.key,
            record.content_type
        );

        let result = self.try_upload(record).await;
        result.map_err(|e| {
            let file_name = record
                .path
                .file_name()
                .map(|n| n.to_string_lossy().into_owned())
                .unwrap_or_else(|| record.path.display().to_string());
            tracing::error!(
                key = %record.key,
                error = %e,
                "Failed to upload {}",
                file_name
            );
            FailedUpload {
                path: record.path.clone(),
                key: record.key.clone(),
                error: e.to_string(),
            }
        })
    }

    async fn try_upload(&self, record: &AssetRecord) -> AppResult<UploadedAsset> {
        let data = tokio::fs::read(&record.path).await?;
        let size_bytes = data.len() as u64;

        let url = self
            .storage
            .upload_with_key(&record.key, data, record.content_type)
            .await
            .map_err(|e| AppError::Storage(e.to_string()))?;

        Ok(UploadedAsset {
            path: record.path.clone(),
            key: record.key.clone(),
            content_type: record.content_type.to_string(),
            size_bytes,
            url,
        })
    }
}
