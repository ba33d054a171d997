use std::ffi::OsString;
use std::path::{Path, PathBuf};
use std::process::{Command, ExitStatus};
use std::sync::Arc;

use crate::env::{BuildOutcome, BuildStep, Environment};
use crate::error::{Result, YarnBuilderError};

/// Builder name the yarn step is registered under.
pub const BUILDER_NAME: &str = "yarn";

/// Flags keeping yarn quiet and non-interactive under a build system.
const YARN_FLAGS: &[&str] = &["-s", "--no-progress", "--non-interactive"];

// ─── Options ──────────────────────────────────────────────────────────────

/// Invocation options for the yarn step.
///
/// The program can be overridden (tests point it at a stub binary), and
/// extra args / env vars are appended after the fixed quiet flags.
#[derive(Debug, Clone, Default)]
pub struct YarnOptions {
    /// Program to invoke instead of `yarn` on PATH.
    pub program: Option<PathBuf>,
    /// Arguments appended after the fixed flags.
    pub extra_args: Vec<OsString>,
    /// Additional environment variables for the subprocess.
    pub env: Vec<(OsString, OsString)>,
}

impl YarnOptions {
    pub fn program_name(&self) -> &Path {
        self.program.as_deref().unwrap_or(Path::new("yarn"))
    }
}

// ─── YarnStep ─────────────────────────────────────────────────────────────

/// The yarn build step: bundles a JS library by running yarn in the
/// directory holding the source package manifest.
#[derive(Debug)]
pub struct YarnStep {
    options: YarnOptions,
}

impl YarnStep {
    pub fn new(options: YarnOptions) -> Self {
        Self { options }
    }
}

impl BuildStep for YarnStep {
    fn run(&self, target: &Path, source: &Path, _env: &Environment) -> Result<ExitStatus> {
        if let Some(parent) = target.parent() {
            std::fs::create_dir_all(parent)?;
        }

        let cwd = working_dir(source)?;
        let mut cmd = build_command(&self.options, cwd);
        tracing::debug!(command = ?cmd, "invoking package manager");

        match cmd.status() {
            Ok(status) => Ok(status),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                Err(YarnBuilderError::ProgramNotFound(
                    self.options.program_name().display().to_string(),
                ))
            }
            Err(e) => Err(e.into()),
        }
    }

    fn describe(&self, target: &Path) -> String {
        format!("yarn: bundling js library: {}", target.display())
    }

    fn suffix(&self) -> Option<&str> {
        Some(".js")
    }
}

/// The directory yarn runs in: the one holding the source manifest.
fn working_dir(source: &Path) -> Result<&Path> {
    match source.parent() {
        Some(p) if p.as_os_str().is_empty() => Ok(Path::new(".")),
        Some(p) => Ok(p),
        None => Err(YarnBuilderError::NoWorkingDir(source.to_path_buf())),
    }
}

fn build_command(options: &YarnOptions, cwd: &Path) -> Command {
    let mut cmd = Command::new(options.program_name());
    cmd.args(YARN_FLAGS)
        .args(&options.extra_args)
        .current_dir(cwd);
    for (k, v) in &options.env {
        cmd.env(k, v);
    }
    cmd
}

// ─── Registration ─────────────────────────────────────────────────────────

/// Install the yarn step into `env` under [`BUILDER_NAME`].
pub fn register(env: &mut Environment, options: YarnOptions) {
    env.register_builder(BUILDER_NAME, Arc::new(YarnStep::new(options)));
}

/// Resolve the configured yarn program on PATH, if present.
pub fn yarn_available(options: &YarnOptions) -> Option<PathBuf> {
    which::which(options.program_name()).ok()
}

/// Environment extension wiring a yarn target into the build graph.
pub trait AddYarn {
    /// Bundle `target` from the package rooted at `source`'s directory, and
    /// alias the declared target name to the produced node.
    fn add_yarn(&mut self, target: &Path, source: &Path) -> Result<BuildOutcome>;
}

impl AddYarn for Environment {
    fn add_yarn(&mut self, target: &Path, source: &Path) -> Result<BuildOutcome> {
        let outcome = self.build(BUILDER_NAME, target, source)?;
        self.alias(target.display().to_string(), outcome.node.clone());
        Ok(outcome)
    }
}
