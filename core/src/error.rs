use std::path::PathBuf;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ProcessingError {
    #[error("no files selected")]
    NoFiles,

    #[error("no processed files to download")]
    NothingToDownload,

    #[error("index {index} out of range for selection of {len} file(s)")]
    IndexOutOfRange { index: usize, len: usize },

    #[error("failed to read file {path}: {source}")]
    ReadFile {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("failed to decode image: {0}")]
    Decode(String),

    #[error("encoding failed: {0}")]
    Encode(String),

    #[error("encoder produced no output")]
    EmptyOutput,

    #[error("archive packaging failed: {0}")]
    Archive(#[from] zip::result::ZipError),

    #[error("failed to start worker pool: {0}")]
    WorkerPool(#[from] rayon::ThreadPoolBuildError),
}
