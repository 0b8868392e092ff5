//! Argument vectors for the PostgreSQL client tools.

use crate::runner::ToolInvocation;
use atelier_core::SyncConfig;
use std::path::Path;

/// `<tool> --version`, used by the preflight check.
pub fn version_probe(tool: &str) -> ToolInvocation {
    ToolInvocation::new(tool).arg("--version")
}

/// Execute a statement, stopping on the first error and ignoring `~/.psqlrc`.
pub fn psql_execute(config: &SyncConfig, dsn: &str, sql: &str) -> ToolInvocation {
    ToolInvocation::new(&config.tools.psql)
        .arg(dsn)
        .args(["-v", "ON_ERROR_STOP=1", "-X", "-q", "-c"])
        .arg(sql)
}

/// Like [`psql_execute`] but with unaligned, tuples-only output for parsing.
pub fn psql_query(config: &SyncConfig, dsn: &str, sql: &str) -> ToolInvocation {
    ToolInvocation::new(&config.tools.psql)
        .arg(dsn)
        .args(["-v", "ON_ERROR_STOP=1", "-X", "-q", "-A", "-t", "-c"])
        .arg(sql)
}

/// Data-only custom-format dump of one schema from the source.
pub fn pg_dump(config: &SyncConfig, dump_path: &Path) -> ToolInvocation {
    let mut invocation = ToolInvocation::new(&config.tools.pg_dump)
        .arg(&config.source_url)
        .args([
            "--format=custom",
            "--data-only",
            "--no-owner",
            "--no-privileges",
        ])
        .arg(format!("--schema={}", config.schema));

    for table in &config.exclude_tables {
        invocation = invocation.arg(format!("--exclude-table-data={}.{}", config.schema, table));
    }

    invocation
        .arg("--file")
        .arg(dump_path.to_string_lossy().into_owned())
}

/// Data-only restore of the archive into the destination.
pub fn pg_restore(config: &SyncConfig, dump_path: &Path) -> ToolInvocation {
    let mut invocation = ToolInvocation::new(&config.tools.pg_restore)
        .args(["--data-only", "--no-owner", "--no-privileges"])
        .arg(format!("--dbname={}", config.destination_url));

    if config.disable_triggers {
        invocation = invocation.arg("--disable-triggers");
    }

    invocation.arg(dump_path.to_string_lossy().into_owned())
}
