// PlantCare - core/preview.rs
//
// Local preview of the selected image, available before any upload.
// Decoding happens once at selection time; the UI turns the RGBA pixels
// into a texture keyed by the preview URI.

use crate::core::model::SelectedImage;
use crate::util::constants::{MAX_PREVIEW_DIMENSION, PREVIEW_URI_SCHEME};

/// Decoded RGBA8 pixels ready for upload to the GPU.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PreviewImage {
    pub width: u32,
    pub height: u32,
    /// Row-major, unpremultiplied RGBA, `width * height * 4` bytes.
    pub rgba: Vec<u8>,
}

/// A locally generated reference to the selected image.
///
/// The URI is always present once a file is selected. Pixels are absent when
/// the bytes cannot be decoded locally; the service may still accept them.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Preview {
    pub uri: String,
    pub image: Option<PreviewImage>,
}

impl Preview {
    /// Build the preview for the `seq`-th selection of this session.
    pub fn create(seq: u64, selected: &SelectedImage) -> Self {
        let uri = format!("{PREVIEW_URI_SCHEME}://{seq}/{}", selected.file_name);
        let image = decode(&selected.bytes, MAX_PREVIEW_DIMENSION)
            .map_err(|e| {
                tracing::warn!(
                    file = %selected.file_name,
                    error = %e,
                    "Cannot decode image for preview"
                );
            })
            .ok();
        Self { uri, image }
    }
}

/// Decode `bytes` and shrink so neither edge exceeds `max_dim`.
fn decode(bytes: &[u8], max_dim: u32) -> image::ImageResult<PreviewImage> {
    let mut img = image::load_from_memory(bytes)?;
    if img.width() > max_dim || img.height() > max_dim {
        img = img.thumbnail(max_dim, max_dim);
    }
    let rgba = img.into_rgba8();
    let (width, height) = rgba.dimensions();
    Ok(PreviewImage {
        width,
        height,
        rgba: rgba.into_raw(),
    })
}
