use std::fs;
use std::path::{Path, PathBuf};

use snapimg_core::{MediaType, SelectedFile};
use walkdir::WalkDir;

use crate::error::CliError;

/// Expand inputs into an ordered file list.
///
/// Files named explicitly are always kept, whatever their type, so that the
/// converter can reject them visibly. Directories only contribute files that
/// look like images.
pub fn collect_files(inputs: &[PathBuf], recursive: bool) -> Result<Vec<PathBuf>, CliError> {
    let mut files = Vec::new();
    for input in inputs {
        if input.is_file() {
            files.push(input.clone());
            continue;
        }
        if !input.is_dir() {
            return Err(CliError::MissingInput(input.clone()));
        }

        let max_depth = if recursive { usize::MAX } else { 1 };
        let mut found = Vec::new();
        for entry in WalkDir::new(input).max_depth(max_depth).sort_by_file_name() {
            let entry = entry?;
            if !entry.file_type().is_file() {
                continue;
            }
            let path = entry.into_path();
            if MediaType::from_path(&path).is_image() {
                found.push(path);
            }
        }
        log::debug!("Collected {} image(s) from {}", found.len(), input.display());
        files.extend(found);
    }
    Ok(files)
}

/// Load every path as a selected file.
pub fn load_selection(paths: &[PathBuf]) -> Result<Vec<SelectedFile>, CliError> {
    paths
        .iter()
        .map(|p| SelectedFile::from_path(p).map_err(CliError::from))
        .collect()
}

/// Write file contents, creating parent directories as needed.
pub fn write_file(path: &Path, data: &[u8]) -> Result<(), CliError> {
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent).map_err(|e| CliError::WriteFile {
            path: parent.to_path_buf(),
            source: e,
        })?;
    }
    fs::write(path, data).map_err(|e| CliError::WriteFile {
        path: path.to_path_buf(),
        source: e,
    })
}
