pub mod jpg;
pub mod png;
pub mod webp;

use image::{DynamicImage, RgbImage};

use crate::config::{ProcessingConfig, TargetFormat};
use crate::error::ProcessingError;
use crate::format::{MediaType, CONVERTIBLE_TYPES};
use crate::selection::SelectedFile;

/// A per-file transform plus the naming strategy for its output.
pub trait ImageConverter: Send + Sync {
    fn target(&self) -> TargetFormat;

    /// Declared media types this converter accepts.
    fn accepted_types(&self) -> &[MediaType] {
        CONVERTIBLE_TYPES
    }

    fn accepts(&self, media_type: &MediaType) -> bool {
        self.accepted_types().contains(media_type)
    }

    fn convert(&self, file: &SelectedFile, config: &ProcessingConfig) -> Result<Vec<u8>, ProcessingError>;

    fn output_name(&self, original_name: &str) -> String {
        original_name.to_string()
    }
}

/// Build the converter for a target format.
pub fn converter_for(target: TargetFormat) -> Box<dyn ImageConverter> {
    match target {
        TargetFormat::Jpg => Box::new(jpg::JpgConverter),
        TargetFormat::Png => Box::new(png::PngConverter),
        TargetFormat::Webp => Box::new(webp::WebpConverter),
    }
}

/// Decode using the declared type as a hint, falling back to sniffing.
pub(crate) fn decode(file: &SelectedFile) -> Result<DynamicImage, ProcessingError> {
    let hinted = file
        .media_type
        .image_format()
        .map(|format| image::load_from_memory_with_format(&file.data, format));
    match hinted {
        Some(Ok(img)) => Ok(img),
        _ => image::load_from_memory(&file.data)
            .map_err(|e| ProcessingError::Decode(format!("{}: {}", file.name, e))),
    }
}

/// Draw onto an opaque RGB surface. Transparent pixels end up black.
pub(crate) fn flatten(img: &DynamicImage) -> RgbImage {
    if !img.color().has_alpha() {
        return img.to_rgb8();
    }
    let rgba = img.to_rgba8();
    RgbImage::from_fn(rgba.width(), rgba.height(), |x, y| {
        let [r, g, b, a] = rgba.get_pixel(x, y).0;
        let blend = |c: u8| ((c as u16 * a as u16 + 127) / 255) as u8;
        image::Rgb([blend(r), blend(g), blend(b)])
    })
}

/// Drop a trailing `.ext` and append `_converted.<extension>`.
pub fn converted_name(original_name: &str, extension: &str) -> String {
    format!("{}_converted.{}", strip_extension(original_name), extension)
}

fn strip_extension(name: &str) -> &str {
    match name.rfind('.') {
        Some(pos) if pos + 1 < name.len() && !name[pos + 1..].contains('/') => &name[..pos],
        _ => name,
    }
}


#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn converted_name_replaces_extension() {
        assert_eq!(converted_name("photo.png", "jpg"), "photo_converted.jpg");
        assert_eq!(converted_name("a.b.webp", "jpg"), "a.b_converted.jpg");
        assert_eq!(converted_name("noext", "png"), "noext_converted.png");
        assert_eq!(converted_name("trailing.", "jpg"), "trailing._converted.jpg");
        assert_eq!(converted_name(".hidden", "jpg"), "_converted.jpg");
    }

    #[test]
    fn flatten_composites_transparency_onto_black() {
        let mut rgba = image::RgbaImage::new(2, 1);
        rgba.put_pixel(0, 0, image::Rgba([255, 255, 255, 0]));
        rgba.put_pixel(1, 0, image::Rgba([200, 100, 50, 255]));
        let flat = flatten(&DynamicImage::ImageRgba8(rgba));
        assert_eq!(flat.get_pixel(0, 0).0, [0, 0, 0]);
        assert_eq!(flat.get_pixel(1, 0).0, [200, 100, 50]);
    }

    #[test]
    fn decode_falls_back_when_declared_type_is_wrong() {
        let png = fixtures::encoded(image::ImageFormat::Png, 3, 3);
        let file = SelectedFile::new("mislabelled.jpg", MediaType::Jpeg, png);
        let img = decode(&file).unwrap();
        assert_eq!((img.width(), img.height()), (3, 3));
    }

    #[test]
    fn decode_rejects_garbage() {
        let file = SelectedFile::new("x.png", MediaType::Png, b"not an image".to_vec());
        assert!(matches!(decode(&file), Err(ProcessingError::Decode(_))));
    }

    #[test]
    fn converter_for_matches_target() {
        for target in [TargetFormat::Jpg, TargetFormat::Png, TargetFormat::Webp] {
            assert_eq!(converter_for(target).target(), target);
        }
    }
}
