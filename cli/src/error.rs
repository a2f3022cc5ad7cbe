use std::path::PathBuf;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum CliError {
    #[error("input not found: {0}")]
    MissingInput(PathBuf),

    #[error("failed to write file {path}: {source}")]
    WriteFile {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("directory walk error: {0}")]
    WalkDir(#[from] walkdir::Error),

    #[error(transparent)]
    Processing(#[from] snapimg_core::ProcessingError),
}
