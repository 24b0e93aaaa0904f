pub mod toml_config;

use crate::core::ConfigProvider;
use clap::Parser;
use std::path::PathBuf;

pub const DEFAULT_CONFIG_FILE: &str = "venv-bootstrap.toml";

#[derive(Debug, Clone, Default, Parser)]
#[command(name = "venv-bootstrap")]
#[command(about = "Create a Python virtual environment and install its requirements")]
pub struct CliConfig {
    /// Requirements manifest [default: requirements.txt]
    #[arg(short, long)]
    pub requirements: Option<String>,

    /// Virtual environment directory [default: .venv]
    #[arg(short = 'e', long)]
    pub venv_dir: Option<String>,

    /// Python interpreter used to create the environment
    #[arg(long)]
    pub python: Option<String>,

    /// Directory relative paths are resolved against [default: current directory]
    #[arg(short = 'C', long)]
    pub project_dir: Option<PathBuf>,

    /// TOML configuration file [default: venv-bootstrap.toml, if present]
    #[arg(short, long)]
    pub config: Option<PathBuf>,

    /// Extra argument passed to `pip install` (repeatable)
    #[arg(long = "pip-arg", allow_hyphen_values = true)]
    pub pip_args: Vec<String>,

    /// Recreate an existing environment that has no pip executable
    #[arg(long)]
    pub verify_existing: bool,

    /// Show what would be run without running it
    #[arg(long)]
    pub dry_run: bool,

    #[arg(short, long, help = "Enable verbose output")]
    pub verbose: bool,
}

impl ConfigProvider for CliConfig {
    fn venv_dir(&self) -> Option<&str> {
        self.venv_dir.as_deref()
    }

    fn requirements_file(&self) -> Option<&str> {
        self.requirements.as_deref()
    }

    fn python(&self) -> Option<&str> {
        self.python.as_deref()
    }

    fn pip_args(&self) -> &[String] {
        &self.pip_args
    }

    fn verify_existing(&self) -> Option<bool> {
        // a bare flag can only switch verification on
        self.verify_existing.then_some(true)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_no_arguments_overrides_nothing() {
        let cli = CliConfig::try_parse_from(["venv-bootstrap"]).unwrap();
        assert!(cli.venv_dir().is_none());
        assert!(cli.requirements_file().is_none());
        assert!(cli.python().is_none());
        assert!(cli.pip_args().is_empty());
        assert!(cli.verify_existing().is_none());
        assert!(!cli.dry_run);
    }

    #[test]
    fn test_parse_overrides() {
        let cli = CliConfig::try_parse_from([
            "venv-bootstrap",
            "-r",
            "dev.txt",
            "--venv-dir",
            "env",
            "--pip-arg",
            "--no-cache-dir",
            "--pip-arg=--quiet",
            "--verify-existing",
            "--dry-run",
        ])
        .unwrap();

        assert_eq!(cli.requirements_file(), Some("dev.txt"));
        assert_eq!(cli.venv_dir(), Some("env"));
        assert_eq!(cli.pip_args(), ["--no-cache-dir", "--quiet"]);
        assert_eq!(cli.verify_existing(), Some(true));
        assert!(cli.dry_run);
    }
}
