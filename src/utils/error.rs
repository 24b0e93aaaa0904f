use std::path::PathBuf;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum BootstrapError {
    #[error("requirements file not found: {}", .path.display())]
    ManifestMissing { path: PathBuf },

    #[error("failed to create virtual environment at {}: {reason}", .path.display())]
    EnvironmentCreationFailed { path: PathBuf, reason: String },

    #[error("failed to install dependencies from {}: {reason}", .manifest.display())]
    InstallFailed { manifest: PathBuf, reason: String },

    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("Configuration error: {message}")]
    ConfigError { message: String },

    #[error("Invalid value '{value}' for {field}: {reason}")]
    InvalidConfigValueError {
        field: String,
        value: String,
        reason: String,
    },
}

impl BootstrapError {
    /// One-line diagnostic shown to the user on stderr.
    pub fn user_friendly_message(&self) -> String {
        match self {
            BootstrapError::ManifestMissing { path } => {
                format!("{} not found.", path.display())
            }
            BootstrapError::EnvironmentCreationFailed { path, .. } => {
                format!("Failed to create virtual environment in {}.", path.display())
            }
            BootstrapError::InstallFailed { manifest, .. } => {
                format!("Failed to install dependencies from {}.", manifest.display())
            }
            other => other.to_string(),
        }
    }

    pub fn recovery_suggestion(&self) -> &'static str {
        match self {
            BootstrapError::ManifestMissing { .. } => {
                "Create the requirements file or point --requirements at an existing one"
            }
            BootstrapError::EnvironmentCreationFailed { .. } => {
                "Check that the Python interpreter is installed and ships the venv module"
            }
            BootstrapError::InstallFailed { .. } => {
                "Inspect the pip output above for the package that failed to install"
            }
            BootstrapError::IoError(_) => "Check file permissions in the project directory",
            BootstrapError::ConfigError { .. } => "Make sure the config file exists and is valid TOML",
            BootstrapError::InvalidConfigValueError { .. } => {
                "Fix the reported field in the config file or on the command line"
            }
        }
    }
}

pub type Result<T> = std::result::Result<T, BootstrapError>;
