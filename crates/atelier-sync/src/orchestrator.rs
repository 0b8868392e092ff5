//! Data sync orchestration: preflight → truncate → dump → restore → verify.

use std::path::Path;
use std::sync::Arc;
use std::time::Instant;

use atelier_core::constants::DUMP_FILE_NAME;
use atelier_core::{AppError, AppResult, SyncConfig};
use tempfile::TempDir;

use crate::commands;
use crate::report::{RowCountCheck, SyncReport};
use crate::runner::CommandRunner;
use crate::sql;

/// Reproduces the source schema's table data in the destination.
///
/// Steps run strictly in sequence and the first failing tool aborts the run.
/// Truncation is not undone when a later step fails.
pub struct DbSync {
    config: SyncConfig,
    runner: Arc<dyn CommandRunner>,
}

impl DbSync {
    pub fn new(config: SyncConfig, runner: Arc<dyn CommandRunner>) -> Self {
        Self { config, runner }
    }

    pub fn config(&self) -> &SyncConfig {
        &self.config
    }

    /// Run the full pipeline.
    pub async fn run(&self) -> AppResult<SyncReport> {
        let start = Instant::now();

        self.preflight().await?;

        let truncated_tables = if self.config.truncate_destination {
            self.truncate_target().await?
        } else {
            tracing::info!("Skipping destination truncation");
            Vec::new()
        };

        let dump_bytes = self.dump_and_restore().await?;

        let verification = if self.config.verify_row_counts {
            Some(self.verify_row_counts().await)
        } else {
            None
        };

        let report = SyncReport {
            truncated_tables,
            dump_bytes,
            verification,
            duration_ms: start.elapsed().as_secs_f64() * 1000.0,
        };

        tracing::info!(
            truncated = report.truncated_tables.len(),
            dump_bytes = report.dump_bytes,
            duration_ms = report.duration_ms,
            "Sync complete (tables only; enums/types untouched)"
        );

        Ok(report)
    }

    /// Verify every required client tool is invocable.
    pub async fn preflight(&self) -> AppResult<()> {
        for tool in self.config.tools.all() {
            if let Err(e) = self.runner.run(&commands::version_probe(tool)).await {
                tracing::debug!(tool = %tool, error = %e, "Preflight probe failed");
                return Err(AppError::ToolNotFound {
                    tool: tool.to_string(),
                });
            }
        }
        tracing::debug!("Preflight check passed");
        Ok(())
    }

    /// Tables of the configured schema in the destination catalog.
    pub async fn destination_tables(&self) -> AppResult<Vec<String>> {
        let output = self
            .runner
            .run(&commands::psql_query(
                &self.config,
                &self.config.destination_url,
                &sql::catalog_query(&self.config.schema),
            ))
            .await?;

        Ok(output.lines().map(str::to_string).collect())
    }

    /// Truncate all non-excluded destination tables in one statement.
    ///
    /// Returns the truncated tables; empty when the exclusion set covers the
    /// whole schema, in which case nothing is executed.
    pub async fn truncate_target(&self) -> AppResult<Vec<String>> {
        tracing::info!("Truncating destination tables (CASCADE, restart identity)...");

        let catalog = self.destination_tables().await?;
        let Some(plan) =
            sql::plan_truncate(&self.config.schema, &catalog, &self.config.exclude_tables)
        else {
            tracing::info!(
                schema = %self.config.schema,
                catalog_tables = catalog.len(),
                "No tables left to truncate after exclusions"
            );
            return Ok(Vec::new());
        };

        self.runner
            .run(&commands::psql_execute(
                &self.config,
                &self.config.destination_url,
                &plan.statement,
            ))
            .await?;

        tracing::info!(tables = plan.tables.len(), "Destination tables truncated");
        Ok(plan.tables)
    }

    /// Dump the source into a scoped temp directory and restore it.
    ///
    /// The directory is removed when this returns, whatever the outcome.
    pub async fn dump_and_restore(&self) -> AppResult<u64> {
        let temp_dir = tempfile::Builder::new()
            .prefix("atelier-sync-")
            .tempdir()?;
        let dump_path = temp_dir.path().join(DUMP_FILE_NAME);

        let dump_bytes = self.dump_and_restore_in(&dump_path).await?;

        close_temp_dir(temp_dir);
        Ok(dump_bytes)
    }

    async fn dump_and_restore_in(&self, dump_path: &Path) -> AppResult<u64> {
        tracing::info!("Running pg_dump (custom format)...");
        self.runner
            .run(&commands::pg_dump(&self.config, dump_path))
            .await?;

        let dump_bytes = match tokio::fs::metadata(dump_path).await {
            Ok(metadata) => metadata.len(),
            Err(e) => {
                tracing::error!(
                    path = %dump_path.display(),
                    error = %e,
                    "pg_dump reported success but the archive is unreadable"
                );
                return Err(e.into());
            }
        };
        tracing::debug!(dump_bytes = dump_bytes, "Dump archive written");

        tracing::info!("Running pg_restore into destination...");
        self.runner
            .run(&commands::pg_restore(&self.config, dump_path))
            .await?;

        Ok(dump_bytes)
    }

    /// Compare per-table row counts of non-excluded tables.
    ///
    /// Runs after the data is committed, so nothing here is fatal: query
    /// failures and mismatches are logged, and an unreadable catalog yields no
    /// checks.
    pub async fn verify_row_counts(&self) -> Vec<RowCountCheck> {
        tracing::info!("Verifying row counts...");

        let tables = match self.destination_tables().await {
            Ok(tables) => tables,
            Err(e) => {
                tracing::warn!(
                    error = %e,
                    "Could not list destination tables; skipping verification"
                );
                return Vec::new();
            }
        };

        let mut checks = Vec::new();
        for table in tables {
            if self.config.is_excluded(&table) {
                continue;
            }

            let check = RowCountCheck {
                source_rows: self.count_rows(&self.config.source_url, &table).await,
                destination_rows: self.count_rows(&self.config.destination_url, &table).await,
                table,
            };

            if !check.matches() {
                tracing::warn!(
                    table = %check.table,
                    source_rows = ?check.source_rows,
                    destination_rows = ?check.destination_rows,
                    "Row count mismatch after restore"
                );
            }
            checks.push(check);
        }

        checks
    }

    async fn count_rows(&self, dsn: &str, table: &str) -> Option<i64> {
        let query = sql::row_count_query(&self.config.schema, table);
        let result = self
            .runner
            .run(&commands::psql_query(&self.config, dsn, &query))
            .await
            .and_then(|output| {
                output
                    .lines()
                    .next()
                    .and_then(|line| line.parse::<i64>().ok())
                    .ok_or_else(|| AppError::UnexpectedOutput {
                        tool: self.config.tools.psql.clone(),
                        output: output.stdout.clone(),
                    })
            });

        match result {
            Ok(count) => Some(count),
            Err(e) => {
                tracing::warn!(table = %table, error = %e, "Row count query failed");
                None
            }
        }
    }
}

fn close_temp_dir(temp_dir: TempDir) {
    let path = temp_dir.path().to_path_buf();
    if let Err(e) = temp_dir.close() {
        tracing::warn!(path = %path.display(), error = %e, "Failed to remove temp directory");
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::runner::{ToolInvocation, ToolOutput};
    use async_trait::async_trait;
    use std::sync::Mutex;

    /// Answers the catalog query with a fixed table list; everything else succeeds.
    struct CatalogRunner {
        tables: Vec<&'static str>,
        calls: Mutex<Vec<ToolInvocation>>,
    }

    #[async_trait]
    impl CommandRunner for CatalogRunner {
        async fn run(&self, invocation: &ToolInvocation) -> AppResult<ToolOutput> {
            self.calls.lock().unwrap().push(invocation.clone());
            let is_catalog = invocation
                .args
                .last()
                .is_some_and(|sql| sql.contains("FROM pg_tables"));
            let stdout = if is_catalog {
                self.tables.join("\n")
            } else {
                String::new()
            };
            Ok(ToolOutput { stdout })
        }
    }

    fn sync_with(tables: Vec<&'static str>, exclude: &[&str]) -> (DbSync, Arc<CatalogRunner>) {
        let runner = Arc::new(CatalogRunner {
            tables,
            calls: Mutex::new(Vec::new()),
        });
        let config = SyncConfig {
            exclude_tables: exclude.iter().map(|t| t.to_string()).collect(),
            ..SyncConfig::default()
        };
        (DbSync::new(config, runner.clone()), runner)
    }

    #[tokio::test]
    async fn truncate_issues_single_statement_for_remaining_tables() {
        let (sync, runner) = sync_with(vec!["A", "B", "C"], &["B"]);

        let truncated = sync.truncate_target().await.unwrap();
        assert_eq!(truncated, vec!["A", "C"]);

        let calls = runner.calls.lock().unwrap();
        assert_eq!(calls.len(), 2);
        let statement = calls[1].args.last().unwrap();
        assert!(statement.starts_with("TRUNCATE TABLE"));
        assert!(statement.contains("\"public\".\"A\""));
        assert!(statement.contains("\"public\".\"C\""));
        assert!(!statement.contains("\"B\""));
    }

    #[tokio::test]
    async fn truncate_is_a_no_op_when_everything_is_excluded() {
        let (sync, runner) = sync_with(vec!["A", "B"], &["A", "B"]);

        let truncated = sync.truncate_target().await.unwrap();
        assert!(truncated.is_empty());

        let calls = runner.calls.lock().unwrap();
        assert_eq!(calls.len(), 1, "only the catalog query should run");
        assert!(!calls
            .iter()
            .any(|c| c.args.iter().any(|a| a.contains("TRUNCATE"))));
    }

    #[tokio::test]
    async fn preflight_checks_each_tool_in_order() {
        let (sync, runner) = sync_with(vec![], &[]);
        sync.preflight().await.unwrap();

        let calls = runner.calls.lock().unwrap();
        let programs: Vec<&str> = calls.iter().map(|c| c.program.as_str()).collect();
        assert_eq!(programs, vec!["psql", "pg_dump", "pg_restore"]);
        assert!(calls.iter().all(|c| c.args == vec!["--version"]));
    }
}
