use std::path::PathBuf;

use crate::config::job::CompositionJob;
use crate::pipeline::compose_strip_use_case::{ComposeStripUseCase, JobOutcome};
use crate::shared::error::CompositionError;

/// Final status of one job in a batch report.
#[derive(Debug)]
pub enum JobStatus {
    Completed { output: PathBuf },
    Skipped,
    Failed(CompositionError),
    Aborted,
}

/// Per-job result surfaced to the caller; no failure is silently dropped.
#[derive(Debug)]
pub struct JobReport {
    pub name: String,
    pub status: JobStatus,
}

impl JobReport {
    pub fn is_failure(&self) -> bool {
        matches!(self.status, JobStatus::Failed(_))
    }
}

/// Runs jobs sequentially, one video end-to-end at a time.
///
/// A failed job is recorded and the batch moves on; an aborted job stops
/// the batch, since the cancellation signal is shared and every remaining
/// job would abort immediately anyway. Jobs completed before the abort
/// keep their outputs.
pub fn run_batch(jobs: &[CompositionJob], use_case: &mut ComposeStripUseCase) -> Vec<JobReport> {
    let mut reports = Vec::with_capacity(jobs.len());
    for job in jobs {
        let status = match use_case.execute(job) {
            Ok(JobOutcome::Completed { output, .. }) => JobStatus::Completed { output },
            Ok(JobOutcome::Skipped { .. }) => JobStatus::Skipped,
            Ok(JobOutcome::Aborted) => JobStatus::Aborted,
            Err(e) => {
                log::error!("{}: {e}", job.name);
                JobStatus::Failed(e)
            }
        };
        let aborted = matches!(status, JobStatus::Aborted);
        reports.push(JobReport {
            name: job.name.clone(),
            status,
        });
        if aborted {
            log::info!("batch cancelled after {}", job.name);
            break;
        }
    }
    reports
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::job::RenderSettings;
    use crate::sampling::window::TimeWindow;
    use crate::shared::frame::Frame;
    use crate::shared::video_metadata::VideoMetadata;
    use crate::video::domain::image_writer::ImageWriter;
    use crate::video::domain::video_reader::{FrameRead, VideoReader};
    use std::path::Path;
    use std::sync::atomic::AtomicBool;
    use std::sync::{Arc, Mutex};

    /// Reader that fails `open` for sources whose name contains "bad".
    struct SelectiveReader {
        position_ms: f64,
    }

    impl VideoReader for SelectiveReader {
        fn open(&mut self, path: &Path) -> Result<VideoMetadata, Box<dyn std::error::Error>> {
            if path.to_string_lossy().contains("bad") {
                return Err("cannot open".into());
            }
            self.position_ms = 0.0;
            Ok(VideoMetadata {
                width: 4,
                height: 4,
                fps: 10.0,
                total_frames: 10,
                codec: "stub".to_string(),
                source_path: Some(path.to_path_buf()),
            })
        }

        fn seek_and_read(
            &mut self,
            frame_index: usize,
        ) -> Result<FrameRead, Box<dyn std::error::Error>> {
            self.position_ms = frame_index as f64 * 100.0;
            Ok(FrameRead::Frame(Frame::new(
                vec![128; 4 * 4 * 3],
                4,
                4,
                frame_index,
            )))
        }

        fn position_ms(&self) -> f64 {
            self.position_ms
        }

        fn close(&mut self) {}
    }

    struct CountingWriter {
        writes: Arc<Mutex<usize>>,
    }

    impl ImageWriter for CountingWriter {
        fn write(&self, _path: &Path, _image: &Frame) -> Result<(), Box<dyn std::error::Error>> {
            *self.writes.lock().unwrap() += 1;
            Ok(())
        }
    }

    fn job(name: &str, source: &str, dir: &Path) -> CompositionJob {
        CompositionJob {
            name: name.to_string(),
            source: PathBuf::from(source),
            window: TimeWindow::full(),
            settings: RenderSettings {
                canvas_height: 4,
                canvas_width: 10,
                crop_ratio: 0.5,
                final_width: 20,
                final_height: 8,
                output_root: dir.join(name),
                output_format: ".png".to_string(),
                video_root: PathBuf::from("/videos"),
                show_progress: false,
            },
        }
    }

    #[test]
    fn test_failed_job_does_not_abort_the_batch() {
        let dir = tempfile::tempdir().unwrap();
        let jobs = vec![
            job("first", "/videos/bad.mp4", dir.path()),
            job("second", "/videos/good.mp4", dir.path()),
        ];
        let writes = Arc::new(Mutex::new(0));
        let mut uc = ComposeStripUseCase::new(
            Box::new(SelectiveReader { position_ms: 0.0 }),
            Box::new(CountingWriter {
                writes: writes.clone(),
            }),
            None,
            None,
        );

        let reports = run_batch(&jobs, &mut uc);
        assert_eq!(reports.len(), 2);
        assert!(reports[0].is_failure());
        assert!(matches!(reports[1].status, JobStatus::Completed { .. }));
        assert_eq!(*writes.lock().unwrap(), 1);
    }

    #[test]
    fn test_cancellation_stops_the_batch() {
        let dir = tempfile::tempdir().unwrap();
        let jobs = vec![
            job("first", "/videos/a.mp4", dir.path()),
            job("second", "/videos/b.mp4", dir.path()),
        ];
        let cancelled = Arc::new(AtomicBool::new(true));
        let writes = Arc::new(Mutex::new(0));
        let mut uc = ComposeStripUseCase::new(
            Box::new(SelectiveReader { position_ms: 0.0 }),
            Box::new(CountingWriter {
                writes: writes.clone(),
            }),
            None,
            Some(cancelled),
        );

        let reports = run_batch(&jobs, &mut uc);
        assert_eq!(reports.len(), 1);
        assert!(matches!(reports[0].status, JobStatus::Aborted));
        assert_eq!(*writes.lock().unwrap(), 0);
    }
}
