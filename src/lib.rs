pub mod adapters;
#[cfg(feature = "cli")]
pub mod config;
pub mod core;
pub mod domain;
pub mod utils;

#[cfg(feature = "cli")]
pub use config::{toml_config::TomlConfig, CliConfig};

pub use adapters::process::ProcessRunner;
pub use crate::core::{bootstrap::Bootstrapper, settings::resolve_settings};
pub use domain::model::{
    BootstrapReport, BootstrapSettings, CommandOutcome, CommandSpec, EnvLayout, EnvironmentState,
};
pub use domain::ports::{CommandRunner, ConfigProvider};
pub use utils::error::{BootstrapError, Result};
