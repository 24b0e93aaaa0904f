use crate::domain::model::{CommandOutcome, CommandSpec};
use crate::utils::error::Result;
use async_trait::async_trait;

/// Runs external commands to completion.
///
/// An `Err` means the command could not be started at all; a command that
/// started and failed is reported through [`CommandOutcome::success`].
#[async_trait]
pub trait CommandRunner: Send + Sync {
    async fn run(&self, command: &CommandSpec) -> Result<CommandOutcome>;
}

/// A source of configuration overrides. `None` leaves the lower layer's value
/// in place.
pub trait ConfigProvider {
    fn venv_dir(&self) -> Option<&str>;
    fn requirements_file(&self) -> Option<&str>;
    fn python(&self) -> Option<&str>;
    fn pip_args(&self) -> &[String];
    fn verify_existing(&self) -> Option<bool>;
}
