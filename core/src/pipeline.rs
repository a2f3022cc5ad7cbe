use std::sync::{Mutex, PoisonError};

use rayon::prelude::*;

use crate::config::ProcessingConfig;
use crate::error::ProcessingError;
use crate::processor::ImageConverter;
use crate::progress::{Alert, BatchObserver, Progress};
use crate::selection::SelectedFile;

/// One converted file, ready for download.
#[derive(Debug, Clone)]
pub struct ProcessedFile {
    /// Position of the source file in the selection
    pub index: usize,
    pub source_name: String,
    pub output_name: String,
    pub data: Vec<u8>,
}

/// Results of one run, in selection order. Failed files are not listed.
#[derive(Debug, Default)]
pub struct BatchOutcome {
    pub results: Vec<ProcessedFile>,
    pub total: usize,
    pub unsupported: usize,
    pub failed: usize,
}

enum FileOutcome {
    Converted(ProcessedFile),
    Unsupported,
    Failed,
}

pub struct Pipeline {
    converter: Box<dyn ImageConverter>,
    config: ProcessingConfig,
}

impl Pipeline {
    pub fn new(converter: Box<dyn ImageConverter>, config: ProcessingConfig) -> Self {
        Self { converter, config }
    }

    pub fn config(&self) -> &ProcessingConfig {
        &self.config
    }

    /// Convert every file on a pool of `config.concurrency` workers.
    ///
    /// Unsupported types raise one alert each and are skipped. Conversion
    /// errors are logged and the file is dropped. Progress advances once per
    /// file whatever the outcome.
    pub fn run(
        &self,
        files: &[SelectedFile],
        observer: &dyn BatchObserver,
    ) -> Result<BatchOutcome, ProcessingError> {
        if files.is_empty() {
            observer.alert(&Alert::NoFiles);
            return Err(ProcessingError::NoFiles);
        }

        let progress = Mutex::new(Progress::new(files.len()));
        observer.progress(Progress::new(files.len()));

        let pool = rayon::ThreadPoolBuilder::new()
            .num_threads(self.config.workers())
            .thread_name(|i| format!("snapimg-worker-{i}"))
            .build()?;

        log::debug!(
            "Converting {} file(s) to {} on {} worker(s)",
            files.len(),
            self.converter.target().as_str(),
            self.config.workers()
        );

        let outcomes: Vec<FileOutcome> = pool.install(|| {
            files
                .par_iter()
                .enumerate()
                .map(|(index, file)| {
                    let outcome = self.process_one(index, file, observer);
                    let mut progress = progress.lock().unwrap_or_else(PoisonError::into_inner);
                    progress.done += 1;
                    observer.progress(*progress);
                    outcome
                })
                .collect()
        });

        let mut batch = BatchOutcome {
            total: files.len(),
            ..BatchOutcome::default()
        };
        for outcome in outcomes {
            match outcome {
                FileOutcome::Converted(file) => batch.results.push(file),
                FileOutcome::Unsupported => batch.unsupported += 1,
                FileOutcome::Failed => batch.failed += 1,
            }
        }

        log::debug!(
            "Batch finished: {} converted, {} unsupported, {} failed",
            batch.results.len(),
            batch.unsupported,
            batch.failed
        );

        Ok(batch)
    }

    fn process_one(&self, index: usize, file: &SelectedFile, observer: &dyn BatchObserver) -> FileOutcome {
        if !self.converter.accepts(&file.media_type) {
            log::warn!("Skipping {}: unsupported type {}", file.name, file.media_type);
            observer.alert(&Alert::UnsupportedType {
                name: file.name.clone(),
            });
            return FileOutcome::Unsupported;
        }

        observer.item_started(index, &file.name);
        match self.converter.convert(file, &self.config) {
            Ok(data) => {
                observer.item_finished(index, &file.name, true);
                FileOutcome::Converted(ProcessedFile {
                    index,
                    source_name: file.name.clone(),
                    output_name: self.converter.output_name(&file.name),
                    data,
                })
            }
            Err(e) => {
                log::error!("Error processing file {}: {}", file.name, e);
                observer.item_finished(index, &file.name, false);
                FileOutcome::Failed
            }
        }
    }
}
