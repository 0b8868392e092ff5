//! Postgres data sync (source -> destination).
//!
//! Truncates the destination schema (CASCADE, restart identity) except the
//! excluded tables, then reloads it from a data-only `pg_dump` of the source.
//! Enums, types and schemas are never touched. Requires `psql`, `pg_dump` and
//! `pg_restore`.

use std::process::ExitCode;
use std::sync::Arc;

use atelier_cli::{fail, init_tracing, load_dotenv, print_json, OutputFormat};
use atelier_core::{redact_connection_string, SyncConfig};
use atelier_sync::{DbSync, ProcessRunner, SyncReport};
use clap::Parser;

#[derive(Parser, Debug)]
#[command(name = "db_sync")]
#[command(about = "Sync table data from the source Postgres into the destination")]
struct Args {
    /// Leave destination data in place before restoring
    #[arg(long)]
    skip_truncate: bool,

    /// Let triggers fire while restoring
    #[arg(long)]
    keep_triggers: bool,

    /// Compare per-table row counts after restore
    #[arg(long)]
    verify: bool,

    /// Additional table to exclude (repeatable)
    #[arg(long = "exclude", value_name = "TABLE")]
    exclude: Vec<String>,

    /// Output format for the final report
    #[arg(long, value_enum, default_value = "text")]
    format: OutputFormat,
}

impl Args {
    fn apply(self, mut config: SyncConfig) -> (SyncConfig, OutputFormat) {
        if self.skip_truncate {
            config.truncate_destination = false;
        }
        if self.keep_triggers {
            config.disable_triggers = false;
        }
        if self.verify {
            config.verify_row_counts = true;
        }
        for table in self.exclude {
            if !config.is_excluded(&table) {
                config.exclude_tables.push(table);
            }
        }
        (config, self.format)
    }
}

fn print_banner(config: &SyncConfig) {
    let exclude = if config.exclude_tables.is_empty() {
        "[]".to_string()
    } else {
        format!("[{}]", config.exclude_tables.join(", "))
    };

    println!("===== Postgres Data Sync =====");
    println!("Source:      {}", redact_connection_string(&config.source_url));
    println!("Destination: {}", redact_connection_string(&config.destination_url));
    println!("Schema:      {}", config.schema);
    println!("Exclude:     {}", exclude);
    println!(
        "Truncate:    {}",
        if config.truncate_destination { "YES" } else { "NO" }
    );
    println!("==============================");
}

fn print_report(report: &SyncReport) {
    println!(
        "Truncated {} table(s), restored {} byte archive in {:.0} ms",
        report.truncated_tables.len(),
        report.dump_bytes,
        report.duration_ms
    );
    if let Some(checks) = &report.verification {
        let mismatched = report.mismatches().count();
        println!(
            "Verified {} table(s): {} mismatch(es)",
            checks.len(),
            mismatched
        );
        for check in report.mismatches() {
            println!(
                "  {}: source={:?} destination={:?}",
                check.table, check.source_rows, check.destination_rows
            );
        }
    }
}

#[tokio::main(flavor = "current_thread")]
async fn main() -> ExitCode {
    let args = Args::parse();
    init_tracing(args.format);
    load_dotenv();

    let config = match SyncConfig::from_env() {
        Ok(config) => config,
        Err(e) => return fail(&e),
    };
    let (config, format) = args.apply(config);

    if format == OutputFormat::Text {
        print_banner(&config);
    }

    let sync = DbSync::new(config, Arc::new(ProcessRunner::new()));
    let report = match sync.run().await {
        Ok(report) => report,
        Err(e) => return fail(&e),
    };

    match format {
        OutputFormat::Json => {
            if let Err(e) = print_json(&report) {
                eprintln!("ERROR: {:#}", e);
                return ExitCode::FAILURE;
            }
        }
        OutputFormat::Text => {
            print_report(&report);
            println!("Sync complete (tables only; enums/types untouched).");
        }
    }

    ExitCode::SUCCESS
}
