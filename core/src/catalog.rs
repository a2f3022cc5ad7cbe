use serde::Serialize;

use crate::config::TargetFormat;

/// An entry in the list of conversion tools offered to users.
#[derive(Debug, Clone, Serialize)]
pub struct Tool {
    pub slug: &'static str,
    pub title: &'static str,
    pub description: &'static str,
    #[serde(serialize_with = "serialize_target")]
    pub target: TargetFormat,
}

pub const TOOLS: &[Tool] = &[
    Tool {
        slug: "convert-to-jpg",
        title: "Convert to JPG",
        description: "Convert PNG, WEBP, and GIFs to JPG efficiently.",
        target: TargetFormat::Jpg,
    },
    Tool {
        slug: "convert-to-png",
        title: "Convert to PNG",
        description: "Convert JPG, WEBP, and GIFs to PNG efficiently.",
        target: TargetFormat::Png,
    },
    Tool {
        slug: "convert-to-webp",
        title: "Convert to WEBP",
        description: "Convert JPG, PNG, and GIFs to WebP efficiently.",
        target: TargetFormat::Webp,
    },
];

fn serialize_target<S: serde::Serializer>(target: &TargetFormat, s: S) -> Result<S::Ok, S::Error> {
    s.serialize_str(target.extension())
}
