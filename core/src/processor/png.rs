use std::io::Cursor;

use crate::config::{ProcessingConfig, TargetFormat};
use crate::error::ProcessingError;
use crate::processor::{converted_name, decode, ImageConverter};
use crate::selection::SelectedFile;

/// Lossless re-encode to PNG. Alpha is preserved.
pub struct PngConverter;

impl ImageConverter for PngConverter {
    fn target(&self) -> TargetFormat {
        TargetFormat::Png
    }

    fn convert(&self, file: &SelectedFile, _config: &ProcessingConfig) -> Result<Vec<u8>, ProcessingError> {
        let img = decode(file)?;

        let mut output = Vec::new();
        img.write_to(&mut Cursor::new(&mut output), image::ImageFormat::Png)
            .map_err(|e| ProcessingError::Encode(format!("Failed to encode PNG: {}", e)))?;

        if output.is_empty() {
            return Err(ProcessingError::EmptyOutput);
        }
        Ok(output)
    }

    fn output_name(&self, original_name: &str) -> String {
        converted_name(original_name, self.target().extension())
    }
}
