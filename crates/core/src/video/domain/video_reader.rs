use std::path::Path;

use crate::shared::frame::Frame;
use crate::shared::video_metadata::VideoMetadata;

/// Result of one seek-and-decode request.
#[derive(Debug)]
pub enum FrameRead {
    /// Decoded pixel data for the requested index.
    Frame(Frame),
    /// The index is within the stream but no frame could be produced.
    /// Recoverable: the caller skips this sample and continues.
    Missing,
    /// The stream ended before the requested index.
    EndOfStream,
}

/// Random-access frame source for one video file.
///
/// Implementations handle codec and container details while the pipeline
/// works with the abstract `Frame` and `VideoMetadata` types. Reading is
/// blocking and potentially slow; it is the pipeline's sole suspension
/// point.
pub trait VideoReader: Send {
    /// Opens a video file and returns its metadata.
    fn open(&mut self, path: &Path) -> Result<VideoMetadata, Box<dyn std::error::Error>>;

    /// Seeks to the given frame index and decodes that frame.
    fn seek_and_read(&mut self, frame_index: usize)
        -> Result<FrameRead, Box<dyn std::error::Error>>;

    /// Playback position of the most recently decoded frame, in
    /// milliseconds. Zero before the first read.
    fn position_ms(&self) -> f64;

    /// Releases any resources held by the reader.
    fn close(&mut self);
}
