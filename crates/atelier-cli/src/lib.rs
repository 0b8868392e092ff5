use anyhow::Context;
use atelier_core::AppError;
use serde::Serialize;
use std::io::IsTerminal;
use std::process::ExitCode;
use tracing_subscriber::fmt::writer::MakeWriterExt;
use tracing_subscriber::EnvFilter;

/// Output format for run summaries.
#[derive(Debug, Clone, Copy, PartialEq, Eq, clap::ValueEnum)]
pub enum OutputFormat {
    Text,
    Json,
}

fn env_filter() -> EnvFilter {
    EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"))
}

/// Initialize tracing for CLI binaries.
///
/// In text mode warnings and errors go to stderr and progress to stdout.
/// In JSON mode stdout carries only the summary document, so every event is
/// written to stderr as a JSON line.
pub fn init_tracing(format: OutputFormat) {
    match format {
        OutputFormat::Text => {
            let writer = std::io::stderr
                .with_max_level(tracing::Level::WARN)
                .or_else(std::io::stdout);

            tracing_subscriber::fmt()
                .with_env_filter(env_filter())
                .with_target(false)
                .with_ansi(std::io::stdout().is_terminal())
                .with_writer(writer)
                .init();
        }
        OutputFormat::Json => {
            tracing_subscriber::fmt()
                .json()
                .with_env_filter(env_filter())
                .with_target(false)
                .with_writer(std::io::stderr)
                .init();
        }
    }
}

pub fn print_json(value: &impl Serialize) -> anyhow::Result<()> {
    let out = serde_json::to_string_pretty(value).context("Serialize summary")?;
    println!("{}", out);
    Ok(())
}

/// Report a fatal error on stderr and turn it into the process exit code.
pub fn fail(err: &AppError) -> ExitCode {
    tracing::error!(category = ?err.category(), "{}", err);
    eprintln!("ERROR: {}", err);
    ExitCode::from(err.exit_code())
}

/// Load `.env` from the working directory if present.
pub fn load_dotenv() {
    match dotenvy::dotenv() {
        Ok(path) => tracing::debug!(path = %path.display(), "Loaded .env"),
        Err(e) if e.not_found() => {}
        Err(e) => tracing::warn!(error = %e, "Failed to load .env"),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::ValueEnum;

    #[test]
    fn output_format_parses_case_insensitively() {
        assert_eq!(OutputFormat::from_str("JSON", true).unwrap(), OutputFormat::Json);
        assert_eq!(OutputFormat::from_str("text", false).unwrap(), OutputFormat::Text);
        assert!(OutputFormat::from_str("yaml", true).is_err());
    }
}
