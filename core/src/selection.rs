use std::fs;
use std::path::Path;
use std::sync::Arc;

use crate::error::ProcessingError;
use crate::format::MediaType;

/// A user-supplied file: its name, declared media type and contents.
#[derive(Debug, Clone)]
pub struct SelectedFile {
    pub name: String,
    pub media_type: MediaType,
    pub data: Arc<[u8]>,
}

impl SelectedFile {
    pub fn new(name: impl Into<String>, media_type: MediaType, data: impl Into<Arc<[u8]>>) -> Self {
        Self {
            name: name.into(),
            media_type,
            data: data.into(),
        }
    }

    /// Read a file from disk, declaring its type from the extension.
    pub fn from_path(path: &Path) -> Result<Self, ProcessingError> {
        let data = fs::read(path).map_err(|e| ProcessingError::ReadFile {
            path: path.to_path_buf(),
            source: e,
        })?;
        let name = path
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_else(|| path.display().to_string());
        Ok(Self::new(name, MediaType::from_path(path), data))
    }

    pub fn size(&self) -> u64 {
        self.data.len() as u64
    }
}

/// Ordered set of files picked for the next batch.
#[derive(Debug, Default, Clone)]
pub struct Selection {
    files: Vec<SelectedFile>,
}

impl Selection {
    pub fn new() -> Self {
        Self::default()
    }

    /// Replace the selection wholesale. An empty list is logged and ignored.
    pub fn accept(&mut self, files: Vec<SelectedFile>) -> bool {
        if files.is_empty() {
            log::error!("No files selected!");
            return false;
        }
        self.files = files;
        log::debug!("{} files selected", self.files.len());
        true
    }

    /// Remove the file at `index`, keeping the others in order.
    pub fn remove(&mut self, index: usize) -> Result<SelectedFile, ProcessingError> {
        if index >= self.files.len() {
            return Err(ProcessingError::IndexOutOfRange {
                index,
                len: self.files.len(),
            });
        }
        let removed = self.files.remove(index);
        log::debug!(
            "Removed {}, {} files selected",
            removed.name,
            self.files.len()
        );
        Ok(removed)
    }

    pub fn files(&self) -> &[SelectedFile] {
        &self.files
    }

    pub fn len(&self) -> usize {
        self.files.len()
    }

    pub fn is_empty(&self) -> bool {
        self.files.is_empty()
    }

    pub fn total_size(&self) -> u64 {
        self.files.iter().map(SelectedFile::size).sum()
    }
}
