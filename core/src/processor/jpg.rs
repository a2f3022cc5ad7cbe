use std::io::Cursor;

use image::codecs::jpeg::JpegEncoder;

use crate::config::{ProcessingConfig, TargetFormat};
use crate::error::ProcessingError;
use crate::processor::{converted_name, decode, flatten, ImageConverter};
use crate::selection::SelectedFile;

pub struct JpgConverter;

impl ImageConverter for JpgConverter {
    fn target(&self) -> TargetFormat {
        TargetFormat::Jpg
    }

    fn convert(&self, file: &SelectedFile, config: &ProcessingConfig) -> Result<Vec<u8>, ProcessingError> {
        let img = decode(file)?;
        let rgb = flatten(&img);

        let mut output = Vec::new();
        let mut cursor = Cursor::new(&mut output);
        let mut encoder = JpegEncoder::new_with_quality(&mut cursor, config.quality.clamp(1, 100));

        encoder
            .encode(rgb.as_raw(), rgb.width(), rgb.height(), image::ExtendedColorType::Rgb8)
            .map_err(|e| ProcessingError::Encode(e.to_string()))?;

        if output.is_empty() {
            return Err(ProcessingError::EmptyOutput);
        }
        Ok(output)
    }

    fn output_name(&self, original_name: &str) -> String {
        converted_name(original_name, self.target().extension())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::format::MediaType;
    use crate::processor::fixtures::image_file;

    #[test]
    fn converts_every_supported_type_to_jpeg() {
        let config = ProcessingConfig::default();
        for (name, media_type) in [
            ("a.png", MediaType::Png),
            ("b.jpg", MediaType::Jpeg),
            ("c.gif", MediaType::Gif),
            ("d.webp", MediaType::Webp),
        ] {
            let file = image_file(name, media_type);
            let out = JpgConverter.convert(&file, &config).unwrap();
            assert_eq!(&out[..2], &[0xFF, 0xD8], "{name} is not a JPEG");
            let decoded = image::load_from_memory_with_format(&out, image::ImageFormat::Jpeg).unwrap();
            assert_eq!((decoded.width(), decoded.height()), (6, 4));
        }
    }

    #[test]
    fn output_name_gets_jpg_suffix() {
        assert_eq!(JpgConverter.output_name("holiday.png"), "holiday_converted.jpg");
    }

    #[test]
    fn gif_is_accepted_text_is_not() {
        assert!(JpgConverter.accepts(&MediaType::Gif));
        assert!(!JpgConverter.accepts(&MediaType::Other("text/plain".into())));
    }
}
