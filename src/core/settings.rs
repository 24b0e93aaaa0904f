use crate::domain::model::BootstrapSettings;
use crate::domain::ports::ConfigProvider;
use crate::utils::error::Result;
use crate::utils::validation::{self, Validate};
use std::path::Path;

/// Folds configuration layers over the built-in defaults, lowest precedence
/// first. Relative paths resolve against `project_dir`; `pip_args` from every
/// layer accumulate in order.
///
/// Raw path values are checked before they are joined, since joining an empty
/// string onto `project_dir` yields `project_dir` itself.
pub fn resolve_settings(
    project_dir: &Path,
    layers: &[&dyn ConfigProvider],
) -> Result<BootstrapSettings> {
    let mut settings = BootstrapSettings::new(project_dir);

    for layer in layers {
        if let Some(dir) = layer.venv_dir() {
            validation::validate_path("environment.dir", Path::new(dir))?;
            settings.venv_dir = project_dir.join(dir);
        }
        if let Some(file) = layer.requirements_file() {
            validation::validate_path("install.requirements", Path::new(file))?;
            settings.requirements = project_dir.join(file);
        }
        if let Some(python) = layer.python() {
            settings.python = python.to_string();
        }
        if let Some(verify) = layer.verify_existing() {
            settings.verify_existing = verify;
        }
        settings.pip_args.extend(layer.pip_args().iter().cloned());
    }

    tracing::debug!("Resolved settings: {:?}", settings);
    Ok(settings)
}

impl Validate for BootstrapSettings {
    fn validate(&self) -> Result<()> {
        validation::validate_path("project_dir", &self.project_dir)?;
        validation::validate_path("environment.dir", &self.venv_dir)?;
        validation::validate_not_ancestor("environment.dir", &self.venv_dir, &self.project_dir)?;
        validation::validate_path("install.requirements", &self.requirements)?;
        validation::validate_non_empty_string("environment.python", &self.python)?;
        validation::validate_pip_args("install.pip_args", &self.pip_args)?;
        Ok(())
    }
}
