//! Batch image conversion: select files, convert each one with a pluggable
//! converter on a bounded worker pool, then hand back a single file or a ZIP
//! archive.

pub mod catalog;
pub mod config;
pub mod error;
pub mod format;
pub mod package;
pub mod pipeline;
pub mod preview;
pub mod processor;
pub mod progress;
pub mod selection;
pub mod session;

pub use config::{ProcessingConfig, TargetFormat};
pub use error::ProcessingError;
pub use format::MediaType;
pub use package::Download;
pub use pipeline::{BatchOutcome, Pipeline, ProcessedFile};
pub use progress::{Alert, BatchObserver, NoopObserver, Progress};
pub use selection::{SelectedFile, Selection};
pub use session::{Session, SessionState};
