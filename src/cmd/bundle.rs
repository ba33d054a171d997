use std::path::Path;

use anyhow::Context;
use serde::Serialize;
use yarn_builder::{yarn, AddYarn, Environment, YarnOptions};

#[derive(Serialize)]
struct BundleReport {
    alias: String,
    node: String,
    exit_code: Option<i32>,
    success: bool,
}

pub fn run(options: YarnOptions, target: &Path, source: &Path, json: bool) -> anyhow::Result<i32> {
    let mut env = Environment::new();
    yarn::register(&mut env, options);

    let outcome = env
        .add_yarn(target, source)
        .with_context(|| format!("failed to bundle {}", target.display()))?;

    if json {
        let report = BundleReport {
            alias: target.display().to_string(),
            node: outcome.node.name(),
            exit_code: outcome.exit_code(),
            success: outcome.success(),
        };
        println!("{}", serde_json::to_string_pretty(&report)?);
    } else if outcome.success() {
        println!("bundled {}", outcome.node.path().display());
    } else {
        eprintln!("yarn failed on {}: {}", outcome.node.path().display(), outcome.status);
    }

    // The host build decides what a non-zero code means; forward it as ours.
    Ok(outcome.exit_code().unwrap_or(1))
}
