use std::ffi::OsString;
use std::fmt;
use std::path::{Path, PathBuf};
use std::time::Duration;

pub const DEFAULT_VENV_DIR: &str = ".venv";
pub const DEFAULT_REQUIREMENTS_FILE: &str = "requirements.txt";

#[cfg(windows)]
pub const DEFAULT_PYTHON: &str = "python";
#[cfg(not(windows))]
pub const DEFAULT_PYTHON: &str = "python3";

/// Fully resolved inputs of one bootstrap run. `venv_dir` and `requirements`
/// are already joined onto `project_dir`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BootstrapSettings {
    pub project_dir: PathBuf,
    pub venv_dir: PathBuf,
    pub requirements: PathBuf,
    pub python: String,
    pub pip_args: Vec<String>,
    pub verify_existing: bool,
}

impl BootstrapSettings {
    /// Defaults of the original fixed script, rooted at `project_dir`.
    pub fn new(project_dir: impl Into<PathBuf>) -> Self {
        let project_dir = project_dir.into();
        Self {
            venv_dir: project_dir.join(DEFAULT_VENV_DIR),
            requirements: project_dir.join(DEFAULT_REQUIREMENTS_FILE),
            project_dir,
            python: DEFAULT_PYTHON.to_string(),
            pip_args: Vec::new(),
            verify_existing: false,
        }
    }

    pub fn layout(&self) -> EnvLayout {
        EnvLayout::new(&self.venv_dir)
    }
}

/// Where a virtual environment keeps its executables.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EnvLayout {
    root: PathBuf,
}

impl EnvLayout {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    pub fn bin_dir(&self) -> PathBuf {
        if cfg!(windows) {
            self.root.join("Scripts")
        } else {
            self.root.join("bin")
        }
    }

    /// `pyvenv.cfg`, written by `python -m venv` at the environment root.
    pub fn marker(&self) -> PathBuf {
        self.root.join("pyvenv.cfg")
    }

    pub fn pip(&self) -> PathBuf {
        self.bin_dir().join(exe_name("pip"))
    }

    pub fn python(&self) -> PathBuf {
        self.bin_dir().join(exe_name("python"))
    }
}

fn exe_name(stem: &str) -> String {
    if cfg!(windows) {
        format!("{}.exe", stem)
    } else {
        stem.to_string()
    }
}

/// One external invocation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CommandSpec {
    pub program: PathBuf,
    pub args: Vec<OsString>,
    pub current_dir: Option<PathBuf>,
}

impl CommandSpec {
    pub fn new(program: impl Into<PathBuf>) -> Self {
        Self {
            program: program.into(),
            args: Vec::new(),
            current_dir: None,
        }
    }

    pub fn arg(mut self, arg: impl Into<OsString>) -> Self {
        self.args.push(arg.into());
        self
    }

    pub fn args<I, A>(mut self, args: I) -> Self
    where
        I: IntoIterator<Item = A>,
        A: Into<OsString>,
    {
        self.args.extend(args.into_iter().map(Into::into));
        self
    }

    pub fn current_dir(mut self, dir: impl Into<PathBuf>) -> Self {
        self.current_dir = Some(dir.into());
        self
    }
}

impl fmt::Display for CommandSpec {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.program.display())?;
        for arg in &self.args {
            write!(f, " {}", arg.to_string_lossy())?;
        }
        Ok(())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CommandOutcome {
    pub success: bool,
    pub code: Option<i32>,
}

impl CommandOutcome {
    pub fn from_code(code: i32) -> Self {
        Self {
            success: code == 0,
            code: Some(code),
        }
    }

    /// Human-readable failure reason, e.g. "exited with code 2".
    pub fn describe(&self) -> String {
        match self.code {
            Some(code) => format!("exited with code {}", code),
            None => "terminated by signal".to_string(),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EnvironmentState {
    Created,
    Reused,
    Recreated,
}

#[derive(Debug, Clone)]
pub struct BootstrapReport {
    pub venv_dir: PathBuf,
    pub requirements: PathBuf,
    pub environment: EnvironmentState,
    pub installed: bool,
    pub elapsed: Duration,
}
