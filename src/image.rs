//! Image acquisition contract
//!
//! Two local capabilities feed the draft's photo: capture via camera
//! (filesystem-backed) and pick from gallery (content reference). Both yield
//! an opaque [`PhotoRef`]; the bytes are never decoded here.

use crate::models::PhotoRef;
use std::path::{Path, PathBuf};
use thiserror::Error;
use uuid::Uuid;

#[derive(Debug, Error)]
pub enum ImageError {
    #[error("image source unavailable: {0}")]
    Unavailable(String),

    #[error("failed to prepare capture file: {0}")]
    Io(#[from] std::io::Error),
}

/// Platform seam for attaching a photo to the draft.
///
/// `Ok(None)` means the user cancelled; that is not an error.
pub trait ImageAcquirer: Send + Sync {
    /// Capture a new photo with the camera
    fn capture_camera(&self) -> Result<Option<PhotoRef>, ImageError>;

    /// Pick an existing image from the gallery
    fn pick_gallery(&self) -> Result<Option<PhotoRef>, ImageError>;
}

/// Allocate a fresh, uniquely named capture path in the scratch directory
pub fn fresh_capture_path(scratch_dir: &Path) -> PathBuf {
    scratch_dir.join(format!("carcare_{}.jpg", Uuid::new_v4()))
}
