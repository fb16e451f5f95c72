// PlantCare - core/model.rs
//
// Core data types shared across layers: the selected image, the messages
// the background predict thread sends back, and the display modes.

use crate::util::constants::{FALLBACK_MIME_TYPE, MAX_IMAGE_BYTES};
use crate::util::error::SelectionError;
use std::path::{Path, PathBuf};

/// An image the user picked, held in memory until it is uploaded.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SelectedImage {
    /// Where the image was read from.
    pub path: PathBuf,

    /// File name sent as the multipart part's filename.
    pub file_name: String,

    /// MIME type sent as the part's content type.
    pub mime_type: String,

    /// Raw file contents.
    pub bytes: Vec<u8>,
}

impl SelectedImage {
    /// Build a selection from bytes already in memory (e.g. a drag-and-drop
    /// payload without a backing file).
    pub fn from_bytes(path: PathBuf, bytes: Vec<u8>) -> Self {
        let file_name = path
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_else(|| "image".to_string());
        let mime_type = mime_type_for(&path).to_string();
        Self {
            path,
            file_name,
            mime_type,
            bytes,
        }
    }

    /// Validate an in-memory payload (drag-and-drop without a backing file)
    /// against the same limits as a file on disk.
    pub fn from_bytes_checked(path: PathBuf, bytes: Vec<u8>) -> Result<Self, SelectionError> {
        Self::from_bytes_with_limit(path, bytes, MAX_IMAGE_BYTES)
    }

    pub(crate) fn from_bytes_with_limit(
        path: PathBuf,
        bytes: Vec<u8>,
        max_size: u64,
    ) -> Result<Self, SelectionError> {
        check_size(&path, bytes.len() as u64, max_size)?;
        Ok(Self::from_bytes(path, bytes))
    }

    /// Read an image file from disk, enforcing the upload size limit.
    pub fn load(path: &Path) -> Result<Self, SelectionError> {
        Self::load_with_limit(path, MAX_IMAGE_BYTES)
    }

    pub(crate) fn load_with_limit(path: &Path, max_size: u64) -> Result<Self, SelectionError> {
        let io_err = |e| SelectionError::Io {
            path: path.to_path_buf(),
            source: e,
        };
        // Checked before reading so an oversized file is never pulled into memory.
        let meta = std::fs::metadata(path).map_err(io_err)?;
        check_size(path, meta.len(), max_size)?;

        let bytes = std::fs::read(path).map_err(io_err)?;
        tracing::debug!(path = %path.display(), bytes = bytes.len(), "Image loaded");
        Self::from_bytes_with_limit(path.to_path_buf(), bytes, max_size)
    }

    /// Size of the image in bytes.
    pub fn len(&self) -> usize {
        self.bytes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.bytes.is_empty()
    }
}

/// Reject empty payloads and payloads over `max_size` bytes.
fn check_size(path: &Path, size: u64, max_size: u64) -> Result<(), SelectionError> {
    if size == 0 {
        return Err(SelectionError::Empty {
            path: path.to_path_buf(),
        });
    }
    if size > max_size {
        return Err(SelectionError::TooLarge {
            path: path.to_path_buf(),
            size,
            max_size,
        });
    }
    Ok(())
}

/// MIME type for an image path, derived from its extension.
pub fn mime_type_for(path: &Path) -> &'static str {
    image::ImageFormat::from_path(path)
        .map(|f| f.to_mime_type())
        .unwrap_or(FALLBACK_MIME_TYPE)
}

/// Messages sent from the background predict thread to the UI thread.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PredictProgress {
    /// The service returned an article (already resolved to display text).
    Completed { request_id: u64, article: String },

    /// The request failed; `error` is the user-facing message.
    Failed { request_id: u64, error: String },
}

impl PredictProgress {
    pub fn request_id(&self) -> u64 {
        match self {
            Self::Completed { request_id, .. } | Self::Failed { request_id, .. } => *request_id,
        }
    }
}

/// What the result area shows. Exactly one mode is active at a time.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DisplayMode {
    /// No image chosen yet: the upload drop zone fills the window.
    Upload,
    /// Image chosen, nothing generated yet.
    Placeholder,
    /// A request is in flight.
    Loading,
    /// The last request failed.
    Error,
    /// An article is shown.
    Article,
}
