use crate::domain::model::{
    BootstrapReport, BootstrapSettings, CommandSpec, EnvLayout, EnvironmentState,
};
use crate::domain::ports::CommandRunner;
use crate::utils::error::{BootstrapError, Result};
use crate::utils::validation::normalize_lexically;
use std::path::Path;
use std::time::Instant;

/// Ensures a virtual environment exists and installs the manifest into it.
///
/// Steps run strictly in order and the first failure ends the run:
/// manifest check, environment check/creation, install.
pub struct Bootstrapper<R: CommandRunner> {
    runner: R,
    settings: BootstrapSettings,
    dry_run: bool,
}

impl<R: CommandRunner> Bootstrapper<R> {
    pub fn new(runner: R, settings: BootstrapSettings) -> Self {
        Self {
            runner,
            settings,
            dry_run: false,
        }
    }

    /// In dry-run mode the manifest is still checked but no command is run.
    pub fn with_dry_run(mut self, dry_run: bool) -> Self {
        self.dry_run = dry_run;
        self
    }

    pub fn settings(&self) -> &BootstrapSettings {
        &self.settings
    }

    pub async fn run(&self) -> Result<BootstrapReport> {
        let started = Instant::now();
        let layout = self.settings.layout();

        self.check_manifest()?;
        let environment = self.ensure_environment(&layout).await?;
        let installed = self.install(&layout).await?;

        let report = BootstrapReport {
            venv_dir: self.settings.venv_dir.clone(),
            requirements: self.settings.requirements.clone(),
            environment,
            installed,
            elapsed: started.elapsed(),
        };
        tracing::info!(
            "Bootstrap finished in {:?} (environment: {:?}, installed: {})",
            report.elapsed,
            report.environment,
            report.installed
        );
        Ok(report)
    }

    fn check_manifest(&self) -> Result<()> {
        let manifest = &self.settings.requirements;
        if !manifest.is_file() {
            tracing::debug!("Manifest not found at {}", manifest.display());
            return Err(BootstrapError::ManifestMissing {
                path: manifest.clone(),
            });
        }
        Ok(())
    }

    async fn ensure_environment(&self, layout: &EnvLayout) -> Result<EnvironmentState> {
        let venv_dir = layout.root();

        if !venv_dir.exists() {
            println!("Creating virtual environment in {}...", venv_dir.display());
            self.create_environment(venv_dir).await?;
            return Ok(EnvironmentState::Created);
        }

        if self.settings.verify_existing && !layout.pip().is_file() {
            self.check_removable(layout)?;
            println!(
                "Virtual environment at {} is incomplete (missing {}), recreating...",
                venv_dir.display(),
                layout.pip().display()
            );
            if !self.dry_run {
                std::fs::remove_dir_all(venv_dir)?;
            }
            self.create_environment(venv_dir).await?;
            return Ok(EnvironmentState::Recreated);
        }

        println!("Virtual environment already exists at {}", venv_dir.display());
        Ok(EnvironmentState::Reused)
    }

    /// Only a directory carrying `pyvenv.cfg` and not holding the manifest may
    /// be removed for recreation.
    fn check_removable(&self, layout: &EnvLayout) -> Result<()> {
        let venv_dir = layout.root();
        let refuse = |reason: String| BootstrapError::EnvironmentCreationFailed {
            path: venv_dir.to_path_buf(),
            reason,
        };

        let manifest = normalize_lexically(&self.settings.requirements);
        if manifest.starts_with(normalize_lexically(venv_dir)) {
            return Err(refuse(format!(
                "it contains {}, refusing to remove it",
                self.settings.requirements.display()
            )));
        }

        if !layout.marker().is_file() {
            return Err(refuse(format!(
                "no {} found, not a virtual environment; refusing to remove it",
                layout.marker().display()
            )));
        }
        Ok(())
    }

    async fn create_environment(&self, venv_dir: &Path) -> Result<()> {
        let command = CommandSpec::new(&self.settings.python)
            .args(["-m", "venv"])
            .arg(venv_dir)
            .current_dir(&self.settings.project_dir);

        if self.dry_run {
            println!("[dry-run] {}", command);
            return Ok(());
        }

        tracing::debug!("Running: {}", command);
        let outcome = self.runner.run(&command).await.map_err(|e| {
            BootstrapError::EnvironmentCreationFailed {
                path: venv_dir.to_path_buf(),
                reason: e.to_string(),
            }
        })?;

        if !outcome.success {
            return Err(BootstrapError::EnvironmentCreationFailed {
                path: venv_dir.to_path_buf(),
                reason: format!("{} {}", self.settings.python, outcome.describe()),
            });
        }
        Ok(())
    }

    async fn install(&self, layout: &EnvLayout) -> Result<bool> {
        let manifest = &self.settings.requirements;
        let command = CommandSpec::new(layout.pip())
            .args(["install", "-r"])
            .arg(manifest)
            .args(self.settings.pip_args.iter())
            .current_dir(&self.settings.project_dir);

        println!("Installing dependencies from {}...", manifest.display());

        if self.dry_run {
            println!("[dry-run] {}", command);
            return Ok(false);
        }

        tracing::debug!("Running: {}", command);
        let outcome = self
            .runner
            .run(&command)
            .await
            .map_err(|e| BootstrapError::InstallFailed {
                manifest: manifest.clone(),
                reason: e.to_string(),
            })?;

        if !outcome.success {
            return Err(BootstrapError::InstallFailed {
                manifest: manifest.clone(),
                reason: format!("pip {}", outcome.describe()),
            });
        }
        Ok(true)
    }
}
