//! Compiled-in defaults and environment variable names.

// Database sync defaults
pub const DEFAULT_SOURCE_DATABASE_URL: &str = "postgresql://postgres@localhost:5432/italian_shoes";
pub const DEFAULT_DESTINATION_DATABASE_URL: &str =
    "postgresql://postgres@localhost:5433/italianshoedb";
pub const DEFAULT_SCHEMA: &str = "public";

/// Tables whose destination data is left untouched by a sync run.
pub const DEFAULT_EXCLUDE_TABLES: &[&str] = &[
    "_prisma_migrations",
    "product",
    "product_variant",
    "product_images",
    "product_materials",
    "product_gemstones",
    "product_reviews",
];

pub const DEFAULT_PSQL: &str = "psql";
pub const DEFAULT_PG_DUMP: &str = "pg_dump";
pub const DEFAULT_PG_RESTORE: &str = "pg_restore";

/// File name of the custom-format archive inside the scoped temp directory.
pub const DUMP_FILE_NAME: &str = "data.dump";

pub const ENV_SYNC_SOURCE_URL: &str = "SYNC_SOURCE_DATABASE_URL";
pub const ENV_SYNC_DESTINATION_URL: &str = "SYNC_DESTINATION_DATABASE_URL";
pub const ENV_SYNC_SCHEMA: &str = "SYNC_SCHEMA";
pub const ENV_SYNC_EXCLUDE_TABLES: &str = "SYNC_EXCLUDE_TABLES";
pub const ENV_SYNC_TRUNCATE: &str = "SYNC_TRUNCATE_DESTINATION";
pub const ENV_SYNC_DISABLE_TRIGGERS: &str = "SYNC_DISABLE_TRIGGERS";
pub const ENV_SYNC_VERIFY: &str = "SYNC_VERIFY_ROW_COUNTS";
pub const ENV_PSQL_PATH: &str = "PSQL_PATH";
pub const ENV_PG_DUMP_PATH: &str = "PG_DUMP_PATH";
pub const ENV_PG_RESTORE_PATH: &str = "PG_RESTORE_PATH";

// Asset upload defaults
pub const DEFAULT_ASSET_ROOT: &str = "public";
pub const DEFAULT_ASSET_EXTENSION: &str = ".glb";

/// Content type used when the extension table has no entry.
pub const DEFAULT_CONTENT_TYPE: &str = "model/gltf-binary";

pub const ENV_S3_BUCKET: &str = "NEXT_PUBLIC_AWS_S3_BUCKET_NAME";
pub const ENV_S3_REGION: &str = "NEXT_PUBLIC_AWS_S3_REGION";
pub const ENV_S3_ACCESS_KEY_ID: &str = "NEXT_PUBLIC_AWS_S3_ACCESS_KEY_ID";
pub const ENV_S3_SECRET_ACCESS_KEY: &str = "NEXT_PUBLIC_AWS_S3_SECRET_ACCESS_KEY";
pub const ENV_S3_ENDPOINT: &str = "S3_ENDPOINT";
pub const ENV_STORAGE_BACKEND: &str = "ASSET_STORAGE_BACKEND";
pub const ENV_LOCAL_STORAGE_PATH: &str = "LOCAL_STORAGE_PATH";
pub const ENV_ASSET_ROOT: &str = "ASSET_ROOT_DIR";
pub const ENV_ASSET_EXTENSION: &str = "ASSET_EXTENSION";
