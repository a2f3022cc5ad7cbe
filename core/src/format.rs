use std::fmt;
use std::path::Path;

/// Media type declared for a selected file.
///
/// The declared type is what the caller claims the file is (derived from the
/// extension on disk, or from a `Content-Type` header on upload). It is not
/// sniffed from the bytes, so a mislabelled file is rejected by the allow-list
/// even when its contents would decode.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum MediaType {
    Png,
    Jpeg,
    Gif,
    Webp,
    Other(String),
}

impl MediaType {
    pub fn from_path(path: &Path) -> Self {
        let ext = path
            .extension()
            .and_then(|e| e.to_str())
            .map(|e| e.to_ascii_lowercase())
            .unwrap_or_default();
        match ext.as_str() {
            "png" => MediaType::Png,
            "jpg" | "jpeg" | "jpe" | "jfif" => MediaType::Jpeg,
            "gif" => MediaType::Gif,
            "webp" => MediaType::Webp,
            "" => MediaType::Other("application/octet-stream".into()),
            other => MediaType::Other(format!("application/x-{other}")),
        }
    }

    /// Parse a MIME string such as `image/png; charset=binary`.
    pub fn from_mime(mime: &str) -> Self {
        let essence = mime
            .split(';')
            .next()
            .unwrap_or_default()
            .trim()
            .to_ascii_lowercase();
        match essence.as_str() {
            "image/png" => MediaType::Png,
            "image/jpeg" | "image/jpg" | "image/pjpeg" => MediaType::Jpeg,
            "image/gif" => MediaType::Gif,
            "image/webp" => MediaType::Webp,
            _ => MediaType::Other(essence),
        }
    }

    pub fn as_mime(&self) -> &str {
        match self {
            MediaType::Png => "image/png",
            MediaType::Jpeg => "image/jpeg",
            MediaType::Gif => "image/gif",
            MediaType::Webp => "image/webp",
            MediaType::Other(s) => s,
        }
    }

    /// Decoder hint for the `image` crate.
    pub fn image_format(&self) -> Option<image::ImageFormat> {
        match self {
            MediaType::Png => Some(image::ImageFormat::Png),
            MediaType::Jpeg => Some(image::ImageFormat::Jpeg),
            MediaType::Gif => Some(image::ImageFormat::Gif),
            MediaType::Webp => Some(image::ImageFormat::WebP),
            MediaType::Other(_) => None,
        }
    }

    pub fn is_image(&self) -> bool {
        !matches!(self, MediaType::Other(_))
    }
}

impl fmt::Display for MediaType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_mime())
    }
}

/// Types every converter accepts as input.
pub const CONVERTIBLE_TYPES: &[MediaType] = &[
    MediaType::Png,
    MediaType::Webp,
    MediaType::Gif,
    MediaType::Jpeg,
];
