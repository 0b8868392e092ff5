//! Configuration module
//!
//! Run configuration for the database sync orchestrator and the asset uploader.
//! Both are plain values built once at startup from compiled-in defaults and
//! environment overrides, then passed by reference to every operation.

use std::env;
use std::path::PathBuf;

use crate::constants::*;
use crate::error::{AppError, AppResult};
use crate::storage_types::StorageBackend;

/// Executable names (or paths) of the PostgreSQL client tools.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ToolPaths {
    pub psql: String,
    pub pg_dump: String,
    pub pg_restore: String,
}

impl Default for ToolPaths {
    fn default() -> Self {
        Self {
            psql: DEFAULT_PSQL.to_string(),
            pg_dump: DEFAULT_PG_DUMP.to_string(),
            pg_restore: DEFAULT_PG_RESTORE.to_string(),
        }
    }
}

impl ToolPaths {
    /// Tools in preflight order.
    pub fn all(&self) -> [&str; 3] {
        [&self.psql, &self.pg_dump, &self.pg_restore]
    }
}

/// Database sync configuration
#[derive(Clone, Debug)]
pub struct SyncConfig {
    pub source_url: String,
    pub destination_url: String,
    pub schema: String,
    /// Tables whose destination data is neither truncated nor reloaded
    pub exclude_tables: Vec<String>,
    pub truncate_destination: bool,
    pub disable_triggers: bool,
    /// Compare per-table row counts after restore
    pub verify_row_counts: bool,
    pub tools: ToolPaths,
}

impl Default for SyncConfig {
    fn default() -> Self {
        Self {
            source_url: DEFAULT_SOURCE_DATABASE_URL.to_string(),
            destination_url: DEFAULT_DESTINATION_DATABASE_URL.to_string(),
            schema: DEFAULT_SCHEMA.to_string(),
            exclude_tables: DEFAULT_EXCLUDE_TABLES
                .iter()
                .map(|t| t.to_string())
                .collect(),
            truncate_destination: true,
            disable_triggers: true,
            verify_row_counts: false,
            tools: ToolPaths::default(),
        }
    }
}

impl SyncConfig {
    pub fn from_env() -> AppResult<Self> {
        Self::from_lookup(|name| env::var(name).ok())
    }

    /// Build from compiled-in defaults, overriding with any value `lookup` returns.
    pub fn from_lookup<F>(lookup: F) -> AppResult<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let defaults = Self::default();
        let get = |name: &str| lookup(name).filter(|v| !v.trim().is_empty());

        let config = Self {
            source_url: get(ENV_SYNC_SOURCE_URL).unwrap_or(defaults.source_url),
            destination_url: get(ENV_SYNC_DESTINATION_URL).unwrap_or(defaults.destination_url),
            schema: get(ENV_SYNC_SCHEMA).unwrap_or(defaults.schema),
            exclude_tables: get(ENV_SYNC_EXCLUDE_TABLES)
                .map(|s| {
                    s.split(',')
                        .map(|t| t.trim().to_string())
                        .filter(|t| !t.is_empty())
                        .collect()
                })
                .unwrap_or(defaults.exclude_tables),
            truncate_destination: parse_bool(
                get(ENV_SYNC_TRUNCATE),
                defaults.truncate_destination,
            ),
            disable_triggers: parse_bool(
                get(ENV_SYNC_DISABLE_TRIGGERS),
                defaults.disable_triggers,
            ),
            verify_row_counts: parse_bool(get(ENV_SYNC_VERIFY), defaults.verify_row_counts),
            tools: ToolPaths {
                psql: get(ENV_PSQL_PATH).unwrap_or(defaults.tools.psql),
                pg_dump: get(ENV_PG_DUMP_PATH).unwrap_or(defaults.tools.pg_dump),
                pg_restore: get(ENV_PG_RESTORE_PATH).unwrap_or(defaults.tools.pg_restore),
            },
        };

        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> AppResult<()> {
        for (name, url) in [
            ("source", &self.source_url),
            ("destination", &self.destination_url),
        ] {
            if !url.starts_with("postgresql://") && !url.starts_with("postgres://") {
                return Err(AppError::InvalidConfiguration(format!(
                    "{} database URL must be a valid PostgreSQL connection string",
                    name
                )));
            }
        }

        if self.source_url == self.destination_url {
            return Err(AppError::InvalidConfiguration(
                "source and destination database URLs must differ".to_string(),
            ));
        }

        if self.schema.trim().is_empty() {
            return Err(AppError::InvalidConfiguration(
                "schema must not be empty".to_string(),
            ));
        }

        Ok(())
    }

    /// Whether `table` is in the exclusion set (exact match).
    pub fn is_excluded(&self, table: &str) -> bool {
        self.exclude_tables.iter().any(|t| t == table)
    }
}

/// Asset upload configuration
#[derive(Clone, Debug)]
pub struct UploadConfig {
    pub backend: StorageBackend,
    pub bucket: String,
    pub region: String,
    pub access_key_id: String,
    pub secret_access_key: String,
    /// Custom endpoint for S3-compatible providers (MinIO, DigitalOcean Spaces, etc.)
    pub endpoint: Option<String>,
    pub local_storage_path: Option<PathBuf>,
    pub root_dir: PathBuf,
    /// File name suffix selecting which files are uploaded
    pub extension: String,
}

impl UploadConfig {
    pub fn from_env() -> AppResult<Self> {
        Self::from_lookup(|name| env::var(name).ok())
    }

    /// Read the upload configuration.
    ///
    /// Every missing required variable is collected so a single error names all
    /// of them.
    pub fn from_lookup<F>(lookup: F) -> AppResult<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let get = |name: &str| lookup(name).filter(|v| !v.trim().is_empty());

        let backend = match get(ENV_STORAGE_BACKEND) {
            Some(raw) => raw
                .parse::<StorageBackend>()
                .map_err(|e| AppError::InvalidConfiguration(e.to_string()))?,
            None => StorageBackend::S3,
        };

        let required: &[&str] = match backend {
            StorageBackend::S3 => &[
                ENV_S3_BUCKET,
                ENV_S3_REGION,
                ENV_S3_ACCESS_KEY_ID,
                ENV_S3_SECRET_ACCESS_KEY,
            ],
            StorageBackend::Local => &[ENV_LOCAL_STORAGE_PATH],
        };

        let missing: Vec<String> = required
            .iter()
            .filter(|&&name| get(name).is_none())
            .map(|name| name.to_string())
            .collect();
        if !missing.is_empty() {
            return Err(AppError::MissingConfiguration { vars: missing });
        }

        Ok(Self {
            backend,
            bucket: get(ENV_S3_BUCKET).unwrap_or_default(),
            region: get(ENV_S3_REGION).unwrap_or_default(),
            access_key_id: get(ENV_S3_ACCESS_KEY_ID).unwrap_or_default(),
            secret_access_key: get(ENV_S3_SECRET_ACCESS_KEY).unwrap_or_default(),
            endpoint: get(ENV_S3_ENDPOINT),
            local_storage_path: get(ENV_LOCAL_STORAGE_PATH).map(PathBuf::from),
            root_dir: get(ENV_ASSET_ROOT)
                .map(PathBuf::from)
                .unwrap_or_else(|| PathBuf::from(DEFAULT_ASSET_ROOT)),
            extension: get(ENV_ASSET_EXTENSION)
                .unwrap_or_else(|| DEFAULT_ASSET_EXTENSION.to_string()),
        })
    }

    /// Human-readable destination, e.g. `s3://bucket`.
    pub fn destination_label(&self) -> String {
        match self.backend {
            StorageBackend::S3 => format!("s3://{}", self.bucket),
            StorageBackend::Local => match &self.local_storage_path {
                Some(path) => format!("file://{}", path.display()),
                None => "file://".to_string(),
            },
        }
    }
}

fn parse_bool(value: Option<String>, default: bool) -> bool {
    match value.map(|v| v.trim().to_lowercase()) {
        Some(v) if matches!(v.as_str(), "1" | "true" | "yes" | "on") => true,
        Some(v) if matches!(v.as_str(), "0" | "false" | "no" | "off") => false,
        _ => default,
    }
}
