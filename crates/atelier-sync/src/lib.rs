//! Atelier Sync
//!
//! Copies table data (never schema) from a source PostgreSQL database into a
//! destination one by orchestrating `psql`, `pg_dump` and `pg_restore`.
//!
//! The destination schema is truncated in a single statement computed from
//! its catalog minus an exclusion set, then reloaded from a data-only
//! custom-format archive that lives in a scoped temp directory.

pub mod commands;
pub mod orchestrator;
pub mod report;
pub mod runner;
pub mod sql;

pub use orchestrator::DbSync;
pub use report::{RowCountCheck, SyncReport};
pub use runner::{CommandRunner, ProcessRunner, ToolInvocation, ToolOutput};
pub use sql::{plan_truncate, TruncatePlan};
