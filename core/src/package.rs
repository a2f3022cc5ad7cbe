use std::collections::HashSet;
use std::io::{Cursor, Write};

use zip::write::SimpleFileOptions;
use zip::{CompressionMethod, ZipWriter};

use crate::error::ProcessingError;
use crate::pipeline::ProcessedFile;

/// What a download hands to the user.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Download {
    /// Exactly one result: the converted file itself.
    Single { name: String, data: Vec<u8> },
    /// Two or more results bundled into one ZIP archive.
    Archive {
        name: String,
        entries: usize,
        data: Vec<u8>,
    },
}

impl Download {
    pub fn name(&self) -> &str {
        match self {
            Download::Single { name, .. } | Download::Archive { name, .. } => name,
        }
    }

    pub fn data(&self) -> &[u8] {
        match self {
            Download::Single { data, .. } | Download::Archive { data, .. } => data,
        }
    }

    pub fn is_archive(&self) -> bool {
        matches!(self, Download::Archive { .. })
    }
}

/// Package results: one file goes out directly, more are zipped.
pub fn package(results: &[ProcessedFile], archive_name: &str) -> Result<Download, ProcessingError> {
    match results {
        [] => Err(ProcessingError::NothingToDownload),
        [single] => Ok(Download::Single {
            name: single.output_name.clone(),
            data: single.data.clone(),
        }),
        _ => Ok(Download::Archive {
            name: archive_name.to_string(),
            entries: results.len(),
            data: build_zip(results)?,
        }),
    }
}

fn build_zip(results: &[ProcessedFile]) -> Result<Vec<u8>, ProcessingError> {
    let mut writer = ZipWriter::new(Cursor::new(Vec::new()));
    // Already-compressed image data gains nothing from deflate.
    let options = SimpleFileOptions::default().compression_method(CompressionMethod::Stored);

    let mut used = HashSet::new();
    for file in results {
        let entry = unique_entry_name(&file.output_name, &mut used);
        writer.start_file(entry, options)?;
        writer
            .write_all(&file.data)
            .map_err(|e| ProcessingError::Archive(e.into()))?;
    }

    let cursor = writer.finish()?;
    log::debug!("Packaged {} file(s) into archive", results.len());
    Ok(cursor.into_inner())
}

/// `a.jpg`, `a-2.jpg`, `a-3.jpg`, ... so that no entry overwrites another.
fn unique_entry_name(name: &str, used: &mut HashSet<String>) -> String {
    if used.insert(name.to_string()) {
        return name.to_string();
    }
    let (stem, ext) = match name.rfind('.') {
        Some(pos) if pos > 0 => (&name[..pos], &name[pos..]),
        _ => (name, ""),
    };
    let mut n = 2;
    loop {
        let candidate = format!("{stem}-{n}{ext}");
        if used.insert(candidate.clone()) {
            return candidate;
        }
        n += 1;
    }
}
