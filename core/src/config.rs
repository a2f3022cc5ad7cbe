use std::fmt;
use std::str::FromStr;

/// Default archive name used when more than one file is downloaded.
pub const DEFAULT_ARCHIVE_NAME: &str = "processed-images.zip";

/// Output format of a conversion run.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TargetFormat {
    Jpg,
    Png,
    Webp,
}

impl TargetFormat {
    pub fn extension(&self) -> &'static str {
        match self {
            Self::Jpg => "jpg",
            Self::Png => "png",
            Self::Webp => "webp",
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Jpg => "JPEG",
            Self::Png => "PNG",
            Self::Webp => "WebP",
        }
    }

    pub fn mime_type(&self) -> &'static str {
        match self {
            Self::Jpg => "image/jpeg",
            Self::Png => "image/png",
            Self::Webp => "image/webp",
        }
    }
}

impl fmt::Display for TargetFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.extension())
    }
}

impl FromStr for TargetFormat {
    type Err = String;
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "jpg" | "jpeg" => Ok(Self::Jpg),
            "png" => Ok(Self::Png),
            "webp" => Ok(Self::Webp),
            _ => Err(format!("unknown target format: {s} (use jpg, png or webp)")),
        }
    }
}

#[derive(Debug, Clone)]
pub struct ProcessingConfig {
    /// Encoder quality 0-100 for lossy targets
    pub quality: u8,
    /// Maximum number of files converted at the same time (1 = sequential)
    pub concurrency: usize,
    /// Longest edge of preview thumbnails, in pixels
    pub thumbnail_size: u32,
    /// File name of the archive produced for multi-file downloads
    pub archive_name: String,
}

impl Default for ProcessingConfig {
    fn default() -> Self {
        Self {
            quality: 85,
            concurrency: std::thread::available_parallelism()
                .map(|n| n.get())
                .unwrap_or(1),
            thumbnail_size: 160,
            archive_name: DEFAULT_ARCHIVE_NAME.to_string(),
        }
    }
}

impl ProcessingConfig {
    /// Worker count actually used by the pipeline.
    pub fn workers(&self) -> usize {
        self.concurrency.max(1)
    }
}
