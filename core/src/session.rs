use std::fmt;

use crate::config::ProcessingConfig;
use crate::error::ProcessingError;
use crate::package::{package, Download};
use crate::pipeline::{BatchOutcome, Pipeline, ProcessedFile};
use crate::preview::{render_previews, Preview};
use crate::processor::ImageConverter;
use crate::progress::{Alert, BatchObserver, Progress};
use crate::selection::{SelectedFile, Selection};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SessionState {
    Idle,
    Selecting,
    Previewing,
    Processing,
    Done,
    NoResults,
}

impl fmt::Display for SessionState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            Self::Idle => "idle",
            Self::Selecting => "selecting",
            Self::Previewing => "previewing",
            Self::Processing => "processing",
            Self::Done => "done",
            Self::NoResults => "no-results",
        };
        f.write_str(s)
    }
}

/// One user session: a selection, its previews, and the last run's results.
///
/// The selection survives a download; only results and progress are reset.
pub struct Session {
    pipeline: Pipeline,
    selection: Selection,
    previews: Vec<Preview>,
    results: Vec<ProcessedFile>,
    progress: Progress,
    state: SessionState,
}

impl Session {
    pub fn new(converter: Box<dyn ImageConverter>, config: ProcessingConfig) -> Self {
        Self {
            pipeline: Pipeline::new(converter, config),
            selection: Selection::new(),
            previews: Vec::new(),
            results: Vec::new(),
            progress: Progress::default(),
            state: SessionState::Idle,
        }
    }

    pub fn state(&self) -> SessionState {
        self.state
    }

    pub fn selection(&self) -> &Selection {
        &self.selection
    }

    pub fn previews(&self) -> &[Preview] {
        &self.previews
    }

    pub fn results(&self) -> &[ProcessedFile] {
        &self.results
    }

    pub fn progress(&self) -> Progress {
        self.progress
    }

    /// Replace the selection. Returns `false` (and changes nothing) for an empty list.
    pub fn accept(&mut self, files: Vec<SelectedFile>) -> bool {
        if !self.selection.accept(files) {
            return false;
        }
        self.previews.clear();
        self.results.clear();
        self.progress = Progress::default();
        self.state = SessionState::Selecting;
        true
    }

    /// Render thumbnails for the whole selection, replacing any earlier ones.
    pub fn preview(&mut self) -> &[Preview] {
        self.previews = render_previews(
            self.selection.files(),
            self.pipeline.config().thumbnail_size,
        );
        self.state = SessionState::Previewing;
        &self.previews
    }

    /// Remove one file. Previews, if rendered, are redone from scratch and
    /// results of an earlier run are discarded.
    pub fn remove(&mut self, index: usize) -> Result<SelectedFile, ProcessingError> {
        let removed = self.selection.remove(index)?;
        self.results.clear();
        self.progress = Progress::default();
        if !self.previews.is_empty() {
            self.preview();
        } else if matches!(self.state, SessionState::Done | SessionState::NoResults) {
            self.state = SessionState::Selecting;
        }
        Ok(removed)
    }

    /// Convert the selection. Ends in `Done` when anything converted.
    pub fn process(&mut self, observer: &dyn BatchObserver) -> Result<BatchOutcome, ProcessingError> {
        self.results.clear();
        self.progress = Progress::new(self.selection.len());

        if self.selection.is_empty() {
            self.progress = Progress::default();
            observer.alert(&Alert::NoFiles);
            return Err(ProcessingError::NoFiles);
        }

        self.state = SessionState::Processing;
        let outcome = match self.pipeline.run(self.selection.files(), observer) {
            Ok(outcome) => outcome,
            Err(e) => {
                self.state = SessionState::NoResults;
                return Err(e);
            }
        };
        self.progress.done = outcome.total;

        if outcome.results.is_empty() {
            observer.alert(&Alert::NoResults);
            self.state = SessionState::NoResults;
        } else {
            self.results = outcome.results.clone();
            self.state = SessionState::Done;
        }
        Ok(outcome)
    }

    /// Package the last run's results and return to `Idle`.
    pub fn download(&mut self, observer: &dyn BatchObserver) -> Result<Download, ProcessingError> {
        if self.results.is_empty() {
            observer.alert(&Alert::NothingToDownload);
            return Err(ProcessingError::NothingToDownload);
        }

        let download = package(&self.results, &self.pipeline.config().archive_name)?;
        self.results.clear();
        self.progress = Progress::default();
        observer.progress(self.progress);
        self.state = SessionState::Idle;
        Ok(download)
    }
}
