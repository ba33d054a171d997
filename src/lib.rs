//! `yarn-builder` — a build step that bundles a JavaScript library with Yarn.
//!
//! The step ensures the target's parent directory exists, runs
//! `yarn -s --no-progress --non-interactive` in the directory holding the
//! source package manifest, and hands the external exit status back to the
//! caller verbatim. Registration wires it into a build [`Environment`] as a
//! named builder plus an alias from the declared target name to the produced
//! node.
//!
//! ```rust,ignore
//! use yarn_builder::{yarn, AddYarn, Environment, YarnOptions};
//!
//! let mut env = Environment::new();
//! yarn::register(&mut env, YarnOptions::default());
//!
//! let outcome = env.add_yarn(
//!     "dist/thread-view".as_ref(),
//!     "ui/thread-view/js/package.json".as_ref(),
//! )?;
//! assert!(outcome.success());
//! ```

pub mod env;
pub mod error;
pub mod yarn;

pub use env::{BuildNode, BuildOutcome, BuildStep, Environment};
pub use error::{Result, YarnBuilderError};
pub use yarn::{yarn_available, AddYarn, YarnOptions, YarnStep};
