pub mod bootstrap;
pub mod settings;

pub use crate::domain::model::{BootstrapReport, BootstrapSettings, EnvironmentState};
pub use crate::domain::ports::{CommandRunner, ConfigProvider};
pub use crate::utils::error::Result;
