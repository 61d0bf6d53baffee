use std::path::Path;

use crate::shared::frame::Frame;

/// Writes the finished strip image to disk.
///
/// Called once per completed job; an aborted job never reaches it.
pub trait ImageWriter: Send {
    fn write(&self, path: &Path, image: &Frame) -> Result<(), Box<dyn std::error::Error>>;
}
