use std::io::Cursor;

use image::GenericImageView;
use rayon::prelude::*;

use crate::processor::decode;
use crate::selection::SelectedFile;

/// Thumbnail of one selected file. `index` is the handle used to remove it.
#[derive(Debug, Clone)]
pub struct Preview {
    pub index: usize,
    pub name: String,
    pub dimensions: Option<(u32, u32)>,
    /// PNG-encoded thumbnail; `None` when the file could not be decoded
    pub thumbnail: Option<Vec<u8>>,
}

/// Render previews for the whole selection, in order.
pub fn render_previews(files: &[SelectedFile], max_edge: u32) -> Vec<Preview> {
    files
        .par_iter()
        .enumerate()
        .map(|(index, file)| render_preview(index, file, max_edge))
        .collect()
}

fn render_preview(index: usize, file: &SelectedFile, max_edge: u32) -> Preview {
    let mut preview = Preview {
        index,
        name: file.name.clone(),
        dimensions: None,
        thumbnail: None,
    };

    let img = match decode(file) {
        Ok(img) => img,
        Err(e) => {
            log::warn!("No preview for {}: {}", file.name, e);
            return preview;
        }
    };
    preview.dimensions = Some(img.dimensions());

    let edge = max_edge.max(1);
    let thumb = img.thumbnail(edge, edge);
    let mut png = Vec::new();
    match thumb.write_to(&mut Cursor::new(&mut png), image::ImageFormat::Png) {
        Ok(()) => preview.thumbnail = Some(png),
        Err(e) => log::warn!("Failed to encode preview for {}: {}", file.name, e),
    }
    preview
}
