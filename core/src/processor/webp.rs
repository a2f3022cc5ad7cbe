use crate::config::{ProcessingConfig, TargetFormat};
use crate::error::ProcessingError;
use crate::processor::{converted_name, decode, ImageConverter};
use crate::selection::SelectedFile;

/// Lossy WebP at the configured quality; quality 100 switches to lossless.
pub struct WebpConverter;

impl ImageConverter for WebpConverter {
    fn target(&self) -> TargetFormat {
        TargetFormat::Webp
    }

    fn convert(&self, file: &SelectedFile, config: &ProcessingConfig) -> Result<Vec<u8>, ProcessingError> {
        let img = decode(file)?;
        let rgba = img.to_rgba8();

        let encoder = webp::Encoder::from_rgba(rgba.as_raw(), rgba.width(), rgba.height());
        let encoded = encoder
            .encode_simple(config.quality >= 100, config.quality as f32)
            .map_err(|e| ProcessingError::Encode(format!("Failed to encode WebP: {:?}", e)))?;

        let output = encoded.to_vec();
        if output.is_empty() {
            return Err(ProcessingError::EmptyOutput);
        }
        Ok(output)
    }

    fn output_name(&self, original_name: &str) -> String {
        converted_name(original_name, self.target().extension())
    }
}
