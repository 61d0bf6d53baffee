use std::path::PathBuf;

/// Immutable facts about an opened video, supplied once by the reader.
#[derive(Clone, Debug, PartialEq)]
pub struct VideoMetadata {
    pub width: u32,
    pub height: u32,
    pub fps: f64,
    pub total_frames: usize,
    pub codec: String,
    pub source_path: Option<PathBuf>,
}

impl VideoMetadata {
    /// Full video duration in seconds. Callers must check `fps > 0` first;
    /// the planner rejects non-positive frame rates before getting here.
    pub fn duration_secs(&self) -> f64 {
        self.total_frames as f64 / self.fps
    }
}
