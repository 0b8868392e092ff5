//! Mirror local `.glb` model files into the asset bucket.
//!
//! Reads bucket, region and credentials from the environment (or `.env`),
//! walks the asset root and uploads every match under its relative path.
//! A failed file is reported and the run carries on.

use std::path::PathBuf;
use std::process::ExitCode;

use atelier_assets::{AssetUploader, UploadSummary};
use atelier_cli::{fail, init_tracing, load_dotenv, print_json, OutputFormat};
use atelier_core::{AppError, UploadConfig};
use atelier_storage::create_storage;
use clap::Parser;

#[derive(Parser, Debug)]
#[command(name = "upload_assets")]
#[command(about = "Upload model assets to object storage")]
struct Args {
    /// Directory to scan (defaults to ASSET_ROOT_DIR or `public`)
    #[arg(long, value_name = "DIR")]
    root: Option<PathBuf>,

    /// File name suffix to upload (defaults to ASSET_EXTENSION or `.glb`)
    #[arg(long)]
    extension: Option<String>,

    /// Output format for the final summary
    #[arg(long, value_enum, default_value = "text")]
    format: OutputFormat,
}

fn print_summary(summary: &UploadSummary) {
    println!(
        "Uploaded {} file(s) ({} bytes), {} failed, {} skipped",
        summary.uploaded.len(),
        summary.total_bytes(),
        summary.failed.len(),
        summary.skipped
    );
    if !summary.is_clean() {
        eprintln!("Failed uploads:");
        for failure in &summary.failed {
            eprintln!("  {} ({}): {}", failure.path.display(), failure.key, failure.error);
        }
    }
}

#[tokio::main(flavor = "current_thread")]
async fn main() -> ExitCode {
    let args = Args::parse();
    init_tracing(args.format);
    load_dotenv();

    let mut config = match UploadConfig::from_env() {
        Ok(config) => config,
        Err(e) => return fail(&e),
    };
    if let Some(root) = args.root {
        config.root_dir = root;
    }
    if let Some(extension) = args.extension {
        config.extension = extension;
    }

    let storage = match create_storage(&config).await {
        Ok(storage) => storage,
        Err(e) => return fail(&AppError::InvalidConfiguration(e.to_string())),
    };

    tracing::info!(
        "Syncing {} files from {} to {}...",
        config.extension,
        config.root_dir.display(),
        config.destination_label()
    );

    let uploader = AssetUploader::new(storage, config.root_dir.clone(), config.extension.clone());
    let summary = match uploader.run().await {
        Ok(summary) => summary,
        Err(e) => return fail(&e),
    };

    match args.format {
        OutputFormat::Json => {
            if let Err(e) = print_json(&summary) {
                eprintln!("ERROR: {:#}", e);
                return ExitCode::FAILURE;
            }
        }
        OutputFormat::Text => {
            print_summary(&summary);
            println!("Sync complete.");
        }
    }

    ExitCode::SUCCESS
}
