use crate::utils::error::{BootstrapError, Result};
use std::path::{Component, Path, PathBuf};

pub trait Validate {
    fn validate(&self) -> Result<()>;
}

pub fn validate_path(field_name: &str, path: &Path) -> Result<()> {
    let display = path.to_string_lossy();

    if path.as_os_str().is_empty() {
        return Err(BootstrapError::InvalidConfigValueError {
            field: field_name.to_string(),
            value: display.to_string(),
            reason: "Path cannot be empty".to_string(),
        });
    }

    if display.contains('\0') {
        return Err(BootstrapError::InvalidConfigValueError {
            field: field_name.to_string(),
            value: display.to_string(),
            reason: "Path contains null bytes".to_string(),
        });
    }

    Ok(())
}

/// Resolves `.` and `..` without touching the filesystem.
pub fn normalize_lexically(path: &Path) -> PathBuf {
    let mut normalized = PathBuf::new();
    for component in path.components() {
        match component {
            Component::CurDir => {}
            Component::ParentDir => {
                if !normalized.pop() {
                    normalized.push(component);
                }
            }
            other => normalized.push(other),
        }
    }
    normalized
}

/// Rejects `path` when it is `descendant` itself or one of its ancestors.
pub fn validate_not_ancestor(field_name: &str, path: &Path, descendant: &Path) -> Result<()> {
    let path = normalize_lexically(path);
    if normalize_lexically(descendant).starts_with(&path) {
        return Err(BootstrapError::InvalidConfigValueError {
            field: field_name.to_string(),
            value: path.to_string_lossy().to_string(),
            reason: format!(
                "Must not be {} or one of its parent directories",
                descendant.display()
            ),
        });
    }
    Ok(())
}

pub fn validate_non_empty_string(field_name: &str, value: &str) -> Result<()> {
    if value.trim().is_empty() {
        return Err(BootstrapError::InvalidConfigValueError {
            field: field_name.to_string(),
            value: value.to_string(),
            reason: "Value cannot be empty or whitespace-only".to_string(),
        });
    }
    Ok(())
}

/// `-r` and its target are always supplied by the installer step; passing
/// them again would install from two manifests. Covers the attached short
/// form `-rfile.txt`.
pub fn validate_pip_args(field_name: &str, args: &[String]) -> Result<()> {
    for arg in args {
        validate_non_empty_string(field_name, arg)?;
        let short_requirement = arg.starts_with("-r") && !arg.starts_with("--");
        if short_requirement || arg.starts_with("--requirement") {
            return Err(BootstrapError::InvalidConfigValueError {
                field: field_name.to_string(),
                value: arg.clone(),
                reason: "The requirements file is set with --requirements".to_string(),
            });
        }
    }
    Ok(())
}
