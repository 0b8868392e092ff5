//! External tool execution.
//!
//! Every PostgreSQL client call goes through [`CommandRunner`] so the
//! orchestrator can be driven by a recording double in tests.

use async_trait::async_trait;
use atelier_core::{redact_connection_string, AppError, AppResult};
use std::fmt;
use std::io::ErrorKind;
use std::process::Stdio;
use tokio::process::Command;

/// One external command: program plus argument vector (no shell involved).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ToolInvocation {
    pub program: String,
    pub args: Vec<String>,
}

impl ToolInvocation {
    pub fn new(program: impl Into<String>) -> Self {
        Self {
            program: program.into(),
            args: Vec::new(),
        }
    }

    pub fn arg(mut self, arg: impl Into<String>) -> Self {
        self.args.push(arg.into());
        self
    }

    pub fn args<I, S>(mut self, args: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.args.extend(args.into_iter().map(Into::into));
        self
    }

    /// Whether any argument equals `value` exactly.
    pub fn has_arg(&self, value: &str) -> bool {
        self.args.iter().any(|a| a == value)
    }

    /// Value following a flag such as `--file`.
    pub fn value_after(&self, flag: &str) -> Option<&str> {
        self.args
            .iter()
            .position(|a| a == flag)
            .and_then(|i| self.args.get(i + 1))
            .map(String::as_str)
    }
}

/// Renders the command line with connection-string passwords masked.
impl fmt::Display for ToolInvocation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.program)?;
        for arg in &self.args {
            write!(f, " {}", redact_connection_string(arg))?;
        }
        Ok(())
    }
}

/// Captured output of a successful invocation.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ToolOutput {
    pub stdout: String,
}

impl ToolOutput {
    /// Non-empty, trimmed stdout lines.
    pub fn lines(&self) -> impl Iterator<Item = &str> {
        self.stdout.lines().map(str::trim).filter(|l| !l.is_empty())
    }
}

#[async_trait]
pub trait CommandRunner: Send + Sync {
    /// Run to completion.
    ///
    /// A non-zero exit is `AppError::ProcessFailed`; a missing executable is
    /// `AppError::ToolNotFound`.
    async fn run(&self, invocation: &ToolInvocation) -> AppResult<ToolOutput>;
}

/// Runs tools as child processes with tokio.
#[derive(Debug, Clone, Default)]
pub struct ProcessRunner;

impl ProcessRunner {
    pub fn new() -> Self {
        Self
    }
}

#[async_trait]
impl CommandRunner for ProcessRunner {
    #[tracing::instrument(skip(self, invocation), fields(
        process.executable.name = %invocation.program,
    ))]
    async fn run(&self, invocation: &ToolInvocation) -> AppResult<ToolOutput> {
        let start = std::time::Instant::now();
        tracing::debug!(command = %invocation, "Spawning external tool");

        let output = Command::new(&invocation.program)
            .args(&invocation.args)
            .stdin(Stdio::null())
            .output()
            .await
            .map_err(|e| match e.kind() {
                ErrorKind::NotFound | ErrorKind::PermissionDenied => AppError::ToolNotFound {
                    tool: invocation.program.clone(),
                },
                _ => AppError::Io(e),
            })?;

        let stderr = String::from_utf8_lossy(&output.stderr).trim().to_string();

        if !output.status.success() {
            for line in stderr.lines() {
                tracing::warn!(tool = %invocation.program, "{}", line);
            }
            tracing::error!(
                tool = %invocation.program,
                exit_code = ?output.status.code(),
                duration_ms = start.elapsed().as_secs_f64() * 1000.0,
                "External tool failed"
            );
            return Err(AppError::ProcessFailed {
                tool: invocation.program.clone(),
                code: output.status.code(),
                stderr,
            });
        }

        if !stderr.is_empty() {
            tracing::debug!(tool = %invocation.program, stderr = %stderr, "External tool stderr");
        }

        tracing::debug!(
            tool = %invocation.program,
            duration_ms = start.elapsed().as_secs_f64() * 1000.0,
            "External tool completed"
        );

        Ok(ToolOutput {
            stdout: String::from_utf8_lossy(&output.stdout).into_owned(),
        })
    }
}
