use crate::core::ConfigProvider;
use crate::utils::error::{BootstrapError, Result};
use serde::Deserialize;
use std::path::Path;

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct TomlConfig {
    #[serde(default)]
    pub environment: EnvironmentConfig,
    #[serde(default)]
    pub install: InstallConfig,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct EnvironmentConfig {
    pub dir: Option<String>,
    pub python: Option<String>,
    pub verify_existing: Option<bool>,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct InstallConfig {
    pub requirements: Option<String>,
    #[serde(default)]
    pub pip_args: Vec<String>,
}

impl TomlConfig {
    /// Reads and parses a config file; a missing file is an error.
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let content = std::fs::read_to_string(path).map_err(|e| BootstrapError::ConfigError {
            message: format!("cannot read {}: {}", path.display(), e),
        })?;
        Self::from_toml_str(&content)
    }

    /// Loads `path` if it exists. Used for the default config location, which
    /// is optional.
    pub fn from_optional_file<P: AsRef<Path>>(path: P) -> Result<Option<Self>> {
        let path = path.as_ref();
        if !path.exists() {
            tracing::debug!("No config file at {}", path.display());
            return Ok(None);
        }
        Self::from_file(path).map(Some)
    }

    /// Parses config text after `${VAR}` substitution.
    pub fn from_toml_str(content: &str) -> Result<Self> {
        let processed_content = Self::substitute_env_vars(content)?;

        toml::from_str(&processed_content).map_err(|e| BootstrapError::ConfigError {
            message: format!("TOML parsing error: {}", e),
        })
    }

    /// Replaces `${VAR}` with the variable's value; unset variables are left as is.
    fn substitute_env_vars(content: &str) -> Result<String> {
        use regex::Regex;
        let re = Regex::new(r"\$\{([^}]+)\}").map_err(|e| BootstrapError::ConfigError {
            message: format!("invalid substitution pattern: {}", e),
        })?;

        let result = re.replace_all(content, |caps: &regex::Captures| {
            let var_name = &caps[1];
            std::env::var(var_name).unwrap_or_else(|_| format!("${{{}}}", var_name))
        });

        Ok(result.to_string())
    }
}

impl ConfigProvider for TomlConfig {
    fn venv_dir(&self) -> Option<&str> {
        self.environment.dir.as_deref()
    }

    fn requirements_file(&self) -> Option<&str> {
        self.install.requirements.as_deref()
    }

    fn python(&self) -> Option<&str> {
        self.environment.python.as_deref()
    }

    fn pip_args(&self) -> &[String] {
        &self.install.pip_args
    }

    fn verify_existing(&self) -> Option<bool> {
        self.environment.verify_existing
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::NamedTempFile;

    #[test]
    fn test_parse_full_config() {
        let toml_content = r#"
[environment]
dir = "env"
python = "python3.12"
verify_existing = true

[install]
requirements = "requirements-dev.txt"
pip_args = ["--disable-pip-version-check"]
"#;

        let config = TomlConfig::from_toml_str(toml_content).unwrap();

        assert_eq!(config.venv_dir(), Some("env"));
        assert_eq!(config.python(), Some("python3.12"));
        assert_eq!(config.verify_existing(), Some(true));
        assert_eq!(config.requirements_file(), Some("requirements-dev.txt"));
        assert_eq!(config.pip_args(), ["--disable-pip-version-check"]);
    }

    #[test]
    fn test_empty_config_overrides_nothing() {
        let config = TomlConfig::from_toml_str("").unwrap();
        assert!(config.venv_dir().is_none());
        assert!(config.requirements_file().is_none());
        assert!(config.pip_args().is_empty());
    }

    #[test]
    fn test_env_var_substitution() {
        std::env::set_var("VENV_BOOTSTRAP_TEST_PYTHON", "/opt/python/bin/python3");

        let config = TomlConfig::from_toml_str(
            r#"
[environment]
python = "${VENV_BOOTSTRAP_TEST_PYTHON}"
"#,
        )
        .unwrap();
        assert_eq!(config.python(), Some("/opt/python/bin/python3"));

        std::env::remove_var("VENV_BOOTSTRAP_TEST_PYTHON");
    }

    #[test]
    fn test_unset_variable_left_verbatim() {
        let config = TomlConfig::from_toml_str(
            r#"
[install]
requirements = "${VENV_BOOTSTRAP_TEST_UNSET}"
"#,
        )
        .unwrap();
        assert_eq!(
            config.requirements_file(),
            Some("${VENV_BOOTSTRAP_TEST_UNSET}")
        );
    }

    #[test]
    fn test_unknown_key_rejected() {
        let result = TomlConfig::from_toml_str(
            r#"
[environment]
directory = ".venv"
"#,
        );
        assert!(matches!(result, Err(BootstrapError::ConfigError { .. })));
    }

    #[test]
    fn test_config_from_file() {
        let mut temp_file = NamedTempFile::new().unwrap();
        temp_file
            .write_all(b"[environment]\ndir = \"file-env\"\n")
            .unwrap();

        let config = TomlConfig::from_file(temp_file.path()).unwrap();
        assert_eq!(config.venv_dir(), Some("file-env"));
    }

    #[test]
    fn test_optional_file_missing() {
        let dir = tempfile::TempDir::new().unwrap();
        let config = TomlConfig::from_optional_file(dir.path().join("absent.toml")).unwrap();
        assert!(config.is_none());
    }

    #[test]
    fn test_explicit_file_missing_is_error() {
        let dir = tempfile::TempDir::new().unwrap();
        assert!(TomlConfig::from_file(dir.path().join("absent.toml")).is_err());
    }
}
