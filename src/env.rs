use std::collections::{BTreeMap, HashMap};
use std::path::{Path, PathBuf};
use std::process::ExitStatus;
use std::sync::Arc;

use crate::error::{Result, YarnBuilderError};

// ─── Build graph surface ──────────────────────────────────────────────────

/// A path-backed node in the build graph.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BuildNode(PathBuf);

impl BuildNode {
    pub fn path(&self) -> &Path {
        &self.0
    }

    /// The node's string name, as used for alias registration.
    pub fn name(&self) -> String {
        self.0.display().to_string()
    }
}

impl From<PathBuf> for BuildNode {
    fn from(path: PathBuf) -> Self {
        Self(path)
    }
}

impl From<&Path> for BuildNode {
    fn from(path: &Path) -> Self {
        Self(path.to_path_buf())
    }
}

/// What a builder invocation produced: the target node and the external
/// command's exit status, returned verbatim for the host to judge.
#[derive(Debug)]
pub struct BuildOutcome {
    pub node: BuildNode,
    pub status: ExitStatus,
}

impl BuildOutcome {
    pub fn success(&self) -> bool {
        self.status.success()
    }

    /// Exit code of the external command. `None` when it was killed by a
    /// signal.
    pub fn exit_code(&self) -> Option<i32> {
        self.status.code()
    }
}

/// A named build-step type that an [`Environment`] can invoke.
pub trait BuildStep: Send + Sync + std::fmt::Debug {
    /// Run the step producing `target` from `source`. Returns the external
    /// command's exit status; only spawn-level failures are errors.
    fn run(&self, target: &Path, source: &Path, env: &Environment) -> Result<ExitStatus>;

    /// One-line progress description for `target`.
    fn describe(&self, target: &Path) -> String;

    /// Default extension applied to targets declared without one.
    fn suffix(&self) -> Option<&str> {
        None
    }
}

// ─── Environment ──────────────────────────────────────────────────────────

/// The extension surface a build step is registered against: a builder
/// registry plus an alias table. Models only what a step plugin touches;
/// scheduling and persistence belong to the host.
#[derive(Default)]
pub struct Environment {
    builders: HashMap<String, Arc<dyn BuildStep>>,
    aliases: BTreeMap<String, Vec<BuildNode>>,
}

impl Environment {
    pub fn new() -> Self {
        Self::default()
    }

    /// Install `step` under `name`, replacing any previous builder of that
    /// name.
    pub fn register_builder(&mut self, name: impl Into<String>, step: Arc<dyn BuildStep>) {
        self.builders.insert(name.into(), step);
    }

    pub fn builder(&self, name: &str) -> Result<Arc<dyn BuildStep>> {
        self.builders
            .get(name)
            .cloned()
            .ok_or_else(|| YarnBuilderError::BuilderNotFound(name.to_string()))
    }

    /// Invoke the named builder for `(target, source)`.
    ///
    /// A target declared without an extension gets the builder's default
    /// suffix first, matching how the host names produced nodes.
    pub fn build(&self, name: &str, target: &Path, source: &Path) -> Result<BuildOutcome> {
        let step = self.builder(name)?;
        let target = apply_suffix(target, step.suffix());
        tracing::info!("{}", step.describe(&target));
        let status = step.run(&target, source, self)?;
        Ok(BuildOutcome {
            node: BuildNode::from(target),
            status,
        })
    }

    /// Map `name` to `node`. Repeated registration of the same pair is a
    /// no-op.
    pub fn alias(&mut self, name: impl Into<String>, node: BuildNode) {
        let entry = self.aliases.entry(name.into()).or_default();
        if !entry.contains(&node) {
            entry.push(node);
        }
    }

    /// Nodes registered under `name`; empty when the alias is unknown.
    pub fn alias_targets(&self, name: &str) -> &[BuildNode] {
        self.aliases.get(name).map(Vec::as_slice).unwrap_or(&[])
    }
}

fn apply_suffix(target: &Path, suffix: Option<&str>) -> PathBuf {
    match suffix {
        Some(ext) if target.extension().is_none() => {
            let mut name = target.as_os_str().to_owned();
            name.push(ext);
            PathBuf::from(name)
        }
        _ => target.to_path_buf(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::process::Command;

    /// Step that runs a shell snippet, ignoring target and source.
    #[derive(Debug)]
    struct ShStep(&'static str);

    impl BuildStep for ShStep {
        fn run(&self, _target: &Path, _source: &Path, _env: &Environment) -> Result<ExitStatus> {
            Ok(Command::new("sh").arg("-c").arg(self.0).status()?)
        }

        fn describe(&self, target: &Path) -> String {
            format!("sh: {}", target.display())
        }

        fn suffix(&self) -> Option<&str> {
            Some(".out")
        }
    }

    #[test]
    fn unknown_builder_is_an_error() {
        let env = Environment::new();
        let err = env.builder("missing").unwrap_err();
        assert!(matches!(err, YarnBuilderError::BuilderNotFound(name) if name == "missing"));
    }

    #[test]
    fn build_applies_suffix_and_reports_status() {
        let mut env = Environment::new();
        env.register_builder("sh", Arc::new(ShStep("exit 0")));

        let outcome = env
            .build("sh", Path::new("dist/bundle"), Path::new("src/input"))
            .unwrap();
        assert_eq!(outcome.node.path(), Path::new("dist/bundle.out"));
        assert!(outcome.success());
        assert_eq!(outcome.exit_code(), Some(0));
    }

    #[test]
    fn build_returns_nonzero_status_as_data() {
        let mut env = Environment::new();
        env.register_builder("sh", Arc::new(ShStep("exit 3")));

        let outcome = env
            .build("sh", Path::new("dist/bundle.out"), Path::new("src/input"))
            .unwrap();
        assert!(!outcome.success());
        assert_eq!(outcome.exit_code(), Some(3));
    }

    #[test]
    fn suffix_leaves_existing_extension_alone() {
        assert_eq!(
            apply_suffix(Path::new("dist/app.js"), Some(".out")),
            PathBuf::from("dist/app.js")
        );
        assert_eq!(
            apply_suffix(Path::new("dist/app"), Some(".out")),
            PathBuf::from("dist/app.out")
        );
        assert_eq!(
            apply_suffix(Path::new("dist/app"), None),
            PathBuf::from("dist/app")
        );
    }

    #[test]
    fn alias_registration_is_idempotent() {
        let mut env = Environment::new();
        let node = BuildNode::from(Path::new("dist/app.js"));

        env.alias("app", node.clone());
        env.alias("app", node.clone());
        assert_eq!(env.alias_targets("app"), &[node]);

        env.alias("app", BuildNode::from(Path::new("dist/app.map")));
        assert_eq!(env.alias_targets("app").len(), 2);
    }

    #[test]
    fn unknown_alias_is_empty() {
        let env = Environment::new();
        assert!(env.alias_targets("nothing").is_empty());
    }
}
