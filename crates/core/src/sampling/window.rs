use crate::shared::video_metadata::VideoMetadata;

/// Sentinel end time meaning "to the end of the video".
pub const END_OF_VIDEO: f64 = -1.0;

/// Time span within a source video, in seconds.
///
/// An end of [`END_OF_VIDEO`] is resolved against the video metadata
/// before any frame arithmetic happens.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct TimeWindow {
    pub start_secs: f64,
    pub end_secs: f64,
}

impl TimeWindow {
    pub fn new(start_secs: f64, end_secs: f64) -> Self {
        Self {
            start_secs,
            end_secs,
        }
    }

    /// The whole video, start to end.
    pub fn full() -> Self {
        Self::new(0.0, END_OF_VIDEO)
    }

    /// End time with the sentinel resolved to the video duration.
    pub fn resolved_end_secs(&self, metadata: &VideoMetadata) -> f64 {
        if self.end_secs == END_OF_VIDEO {
            metadata.duration_secs()
        } else {
            self.end_secs
        }
    }
}
