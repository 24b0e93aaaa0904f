use crate::domain::model::{CommandOutcome, CommandSpec};
use crate::domain::ports::CommandRunner;
use crate::utils::error::{BootstrapError, Result};
use async_trait::async_trait;
use std::io::ErrorKind;
use tokio::process::Command;

/// Runs commands as child processes sharing this process's stdio, so the
/// output of venv and pip reaches the terminal as it is produced.
#[derive(Debug, Clone, Default)]
pub struct ProcessRunner;

impl ProcessRunner {
    pub fn new() -> Self {
        Self
    }
}

#[async_trait]
impl CommandRunner for ProcessRunner {
    async fn run(&self, spec: &CommandSpec) -> Result<CommandOutcome> {
        let mut command = Command::new(&spec.program);
        command.args(&spec.args);
        if let Some(dir) = &spec.current_dir {
            command.current_dir(dir);
        }

        let status = command.status().await.map_err(|e| match e.kind() {
            ErrorKind::NotFound => BootstrapError::IoError(std::io::Error::new(
                ErrorKind::NotFound,
                format!("{} not found", spec.program.display()),
            )),
            _ => BootstrapError::IoError(e),
        })?;

        tracing::debug!("{} finished with {}", spec.program.display(), status);
        Ok(CommandOutcome {
            success: status.success(),
            code: status.code(),
        })
    }
}

#[cfg(all(test, unix))]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_successful_command() {
        let outcome = ProcessRunner::new()
            .run(&CommandSpec::new("sh").args(["-c", "exit 0"]))
            .await
            .unwrap();
        assert!(outcome.success);
        assert_eq!(outcome.code, Some(0));
    }

    #[tokio::test]
    async fn test_failing_command_reports_code() {
        let outcome = ProcessRunner::new()
            .run(&CommandSpec::new("sh").args(["-c", "exit 3"]))
            .await
            .unwrap();
        assert!(!outcome.success);
        assert_eq!(outcome.code, Some(3));
    }

    #[tokio::test]
    async fn test_missing_program_is_an_error() {
        let result = ProcessRunner::new()
            .run(&CommandSpec::new("/nonexistent/venv-bootstrap-python"))
            .await;
        let err = result.unwrap_err();
        assert!(err.to_string().contains("not found"));
    }

    #[tokio::test]
    async fn test_runs_in_current_dir() {
        let dir = tempfile::TempDir::new().unwrap();
        let outcome = ProcessRunner::new()
            .run(
                &CommandSpec::new("sh")
                    .args(["-c", "touch marker"])
                    .current_dir(dir.path()),
            )
            .await
            .unwrap();
        assert!(outcome.success);
        assert!(dir.path().join("marker").exists());
    }
}
