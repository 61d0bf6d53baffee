use crate::sampling::window::TimeWindow;
use crate::shared::error::CompositionError;
use crate::shared::video_metadata::VideoMetadata;

/// Which frames of a source video become canvas columns.
///
/// Computed once per job by [`plan`] and consumed by the orchestrator to
/// drive iteration; never mutated afterward.
#[derive(Clone, Debug, PartialEq)]
pub struct SamplingPlan {
    /// First frame index of the window.
    pub start_frame: usize,
    /// Distance between consecutive sampled indices; always >= 1.
    pub frame_stride: usize,
    /// Upper bound on the number of sampled frames.
    pub sample_count: usize,
    /// Count of frames spanning the window before downsampling. Sampled
    /// indices never reach this value.
    pub frame_span: usize,
    /// Resolved window end in milliseconds of playback time.
    pub end_position_ms: f64,
}

impl SamplingPlan {
    /// Sampled frame indices in composition order:
    /// `start_frame, start_frame + stride, ...`, stopping at the frame
    /// span. May yield fewer than `sample_count` entries when the start
    /// offset pushes later indices past the span.
    pub fn frame_indices(&self) -> impl Iterator<Item = usize> + '_ {
        let start = self.start_frame;
        let stride = self.frame_stride;
        let span = self.frame_span;
        (0..self.sample_count)
            .map(move |i| start + i * stride)
            .take_while(move |&idx| idx < span)
    }

    pub fn is_empty(&self) -> bool {
        self.sample_count == 0
    }
}

/// Plans which frames to sample for one job.
///
/// `target_sample_count` is the desired canvas width before upscaling;
/// the stride is chosen by ceiling division so the sampled sequence never
/// exceeds it. A degenerate or inverted window yields an empty plan, not
/// an error.
pub fn plan(
    metadata: &VideoMetadata,
    window: TimeWindow,
    target_sample_count: usize,
) -> Result<SamplingPlan, CompositionError> {
    if metadata.fps <= 0.0 {
        return Err(CompositionError::InvalidMetadata { fps: metadata.fps });
    }
    if target_sample_count == 0 {
        return Err(CompositionError::InvalidDimensions {
            width: 0,
            height: 0,
        });
    }

    let end_secs = window.resolved_end_secs(metadata);
    let movie_ms = (end_secs - window.start_secs) * 1000.0;
    let start_frame = (window.start_secs * metadata.fps).floor() as usize;
    let span = (movie_ms / 1000.0 * metadata.fps).floor();

    if span <= 0.0 {
        return Ok(SamplingPlan {
            start_frame,
            frame_stride: 1,
            sample_count: 0,
            frame_span: 0,
            end_position_ms: end_secs * 1000.0,
        });
    }

    let frame_span = span as usize;
    let frame_stride = frame_span.div_ceil(target_sample_count);
    let sample_count = frame_span / frame_stride;

    Ok(SamplingPlan {
        start_frame,
        frame_stride,
        sample_count,
        frame_span,
        end_position_ms: end_secs * 1000.0,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    fn meta(fps: f64, total_frames: usize) -> VideoMetadata {
        VideoMetadata {
            width: 1280,
            height: 720,
            fps,
            total_frames,
            codec: String::new(),
            source_path: None,
        }
    }

    #[test]
    fn test_thirty_second_video_sampled_to_hundred_columns() {
        // 30 fps * 30 s = 900 frames, full window, 100 samples
        let plan = plan(&meta(30.0, 900), TimeWindow::full(), 100).unwrap();
        assert_eq!(plan.start_frame, 0);
        assert_eq!(plan.frame_span, 900);
        assert_eq!(plan.frame_stride, 9);
        assert_eq!(plan.sample_count, 100);
        assert_eq!(plan.end_position_ms, 30_000.0);
    }

    #[rstest]
    #[case(30.0, 900, 0.0, -1.0, 100)]
    #[case(30.0, 900, 0.0, -1.0, 1000)]
    #[case(25.0, 50, 0.0, 2.0, 7)]
    #[case(24.0, 100_000, 10.0, 500.0, 1920)]
    #[case(29.97, 12_345, 1.5, -1.0, 640)]
    fn test_sample_count_never_exceeds_target(
        #[case] fps: f64,
        #[case] total_frames: usize,
        #[case] start: f64,
        #[case] end: f64,
        #[case] target: usize,
    ) {
        let plan = plan(&meta(fps, total_frames), TimeWindow::new(start, end), target).unwrap();
        assert!(plan.sample_count <= target);
        assert!(plan.frame_stride >= 1);
        assert!(plan.frame_indices().count() <= target);
    }

    #[test]
    fn test_stride_is_one_for_short_videos() {
        // 10 frames, 100 requested samples: ceil(10/100) must stay 1
        let plan = plan(&meta(10.0, 10), TimeWindow::full(), 100).unwrap();
        assert_eq!(plan.frame_stride, 1);
        assert_eq!(plan.sample_count, 10);
    }

    #[test]
    fn test_inverted_window_is_empty_not_an_error() {
        let plan = plan(&meta(30.0, 900), TimeWindow::new(10.0, 5.0), 100).unwrap();
        assert_eq!(plan.sample_count, 0);
        assert!(plan.is_empty());
        assert_eq!(plan.frame_indices().count(), 0);
    }

    #[test]
    fn test_zero_length_video_is_empty() {
        let plan = plan(&meta(30.0, 0), TimeWindow::full(), 100).unwrap();
        assert!(plan.is_empty());
    }

    #[test]
    fn test_nonpositive_fps_rejected() {
        let err = plan(&meta(0.0, 900), TimeWindow::full(), 100).unwrap_err();
        assert!(matches!(err, CompositionError::InvalidMetadata { .. }));
    }

    #[test]
    fn test_zero_target_rejected() {
        let err = plan(&meta(30.0, 900), TimeWindow::full(), 0).unwrap_err();
        assert!(matches!(err, CompositionError::InvalidDimensions { .. }));
    }

    #[test]
    fn test_sentinel_end_resolves_to_duration_ms() {
        use approx::assert_relative_eq;
        let plan = plan(&meta(29.97, 12_345), TimeWindow::full(), 100).unwrap();
        assert_relative_eq!(plan.end_position_ms, 12_345.0 / 29.97 * 1000.0);
    }

    #[test]
    fn test_indices_follow_stride() {
        let plan = plan(&meta(30.0, 900), TimeWindow::full(), 100).unwrap();
        let indices: Vec<usize> = plan.frame_indices().collect();
        assert_eq!(indices.len(), 100);
        assert_eq!(indices[0], 0);
        assert_eq!(indices[1], 9);
        assert_eq!(*indices.last().unwrap(), 891);
    }

    #[test]
    fn test_offset_start_can_truncate_the_sequence() {
        // Window starts at 20 s of a 30 s video: start_frame 600, span
        // covers 10 s = 300 frames, so indices past 300 are dropped and
        // the sequence is empty (start is already beyond the span).
        let plan = plan(&meta(30.0, 900), TimeWindow::new(20.0, -1.0), 100).unwrap();
        assert_eq!(plan.start_frame, 600);
        assert_eq!(plan.frame_span, 300);
        assert_eq!(plan.frame_indices().count(), 0);
    }

    #[test]
    fn test_explicit_end_time_bounds_the_span() {
        let plan = plan(&meta(30.0, 900), TimeWindow::new(0.0, 10.0), 100).unwrap();
        assert_eq!(plan.frame_span, 300);
        assert_eq!(plan.frame_stride, 3);
        assert_eq!(plan.sample_count, 100);
        assert_eq!(plan.end_position_ms, 10_000.0);
    }
}
