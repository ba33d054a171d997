use std::path::PathBuf;

use thiserror::Error;

#[derive(Debug, Error)]
pub enum YarnBuilderError {
    #[error("no builder registered under '{0}'")]
    BuilderNotFound(String),

    #[error("package manager '{0}' not found on PATH")]
    ProgramNotFound(String),

    #[error("source '{0}' has no parent directory to run in")]
    NoWorkingDir(PathBuf),

    #[error(transparent)]
    Io(#[from] std::io::Error),
}

pub type Result<T> = std::result::Result<T, YarnBuilderError>;
