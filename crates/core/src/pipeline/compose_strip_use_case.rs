use std::path::PathBuf;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

use crate::compose::canvas::Canvas;
use crate::compose::crop::CropSpec;
use crate::compose::reducer;
use crate::compose::upscale::upscale;
use crate::config::job::CompositionJob;
use crate::sampling::plan::plan;
use crate::shared::error::CompositionError;
use crate::video::domain::image_writer::ImageWriter;
use crate::video::domain::video_reader::{FrameRead, VideoReader};

/// Caller-visible result of one job, excluding hard failures (those are
/// the `Err` branch of [`ComposeStripUseCase::execute`]).
#[derive(Debug, PartialEq, Eq)]
pub enum JobOutcome {
    /// Final image written. `columns` counts the seed column plus one per
    /// accepted frame; it may fall short of the plan on early end of
    /// stream.
    Completed { output: PathBuf, columns: usize },
    /// Output already existed; nothing was read or written.
    Skipped { output: PathBuf },
    /// Cancelled mid-composition; nothing was written.
    Aborted,
}

/// Sequences sampling, reduction, accumulation, upscale, and output for
/// one video at a time.
///
/// Composition is synchronous and single-threaded: the blocking frame
/// read is the only slow operation, and cancellation is polled once per
/// sampled frame right before it. The same use case instance is reused
/// across the jobs of a batch.
pub struct ComposeStripUseCase {
    reader: Box<dyn VideoReader>,
    writer: Box<dyn ImageWriter>,
    on_progress: Option<Box<dyn Fn(usize, usize) -> bool + Send>>,
    cancelled: Arc<AtomicBool>,
}

impl ComposeStripUseCase {
    pub fn new(
        reader: Box<dyn VideoReader>,
        writer: Box<dyn ImageWriter>,
        on_progress: Option<Box<dyn Fn(usize, usize) -> bool + Send>>,
        cancelled: Option<Arc<AtomicBool>>,
    ) -> Self {
        Self {
            reader,
            writer,
            on_progress,
            cancelled: cancelled.unwrap_or_else(|| Arc::new(AtomicBool::new(false))),
        }
    }

    pub fn execute(&mut self, job: &CompositionJob) -> Result<JobOutcome, CompositionError> {
        let output = job.output_path();
        if output.exists() {
            log::info!("{}: output already exists at {}", job.name, output.display());
            return Ok(JobOutcome::Skipped { output });
        }

        let metadata = self.reader.open(&job.source).map_err(|e| {
            CompositionError::FileNotAccessible {
                path: job.source.clone(),
                reason: e.to_string(),
            }
        })?;

        let plan = match plan(&metadata, job.window, job.settings.canvas_width) {
            Ok(p) => p,
            Err(e) => {
                self.reader.close();
                return Err(e);
            }
        };

        log::info!(
            "{}: fps {} | {} frames in window | stride {} | {} samples | canvas {}x{}",
            job.name,
            metadata.fps,
            plan.frame_span,
            plan.frame_stride,
            plan.sample_count,
            plan.sample_count + 1,
            job.settings.canvas_height,
        );
        if plan.is_empty() {
            log::warn!("{}: empty time window, output will be a bare seed strip", job.name);
        }

        let crop = CropSpec::from_canvas(
            job.settings.canvas_height,
            job.settings.canvas_width,
            job.settings.crop_ratio,
        );
        let mut canvas = Canvas::new(job.settings.canvas_height, plan.sample_count);
        let total = plan.sample_count;
        let mut aborted = false;

        for (sample, frame_index) in plan.frame_indices().enumerate() {
            if self.cancelled.load(Ordering::Relaxed) {
                aborted = true;
                break;
            }
            if self.reader.position_ms() >= plan.end_position_ms {
                break;
            }

            match self.reader.seek_and_read(frame_index) {
                Ok(FrameRead::Frame(frame)) => {
                    canvas.push_column(reducer::reduce(&frame, &crop));
                }
                Ok(FrameRead::Missing) => {
                    log::warn!("{}: no frame data at index {frame_index}, skipping", job.name);
                }
                Ok(FrameRead::EndOfStream) => {
                    log::info!("{}: end of stream at index {frame_index}", job.name);
                    break;
                }
                Err(e) => {
                    // Recoverable gap: one lost sample, composition goes on.
                    log::warn!("{}: read failed at index {frame_index}: {e}", job.name);
                }
            }

            if let Some(on_progress) = &self.on_progress {
                if !on_progress(sample + 1, total) {
                    aborted = true;
                    break;
                }
            }
        }

        self.reader.close();

        if aborted {
            log::info!("{}: aborted, discarding partial canvas", job.name);
            return Ok(JobOutcome::Aborted);
        }

        let columns = canvas.width();
        let strip = canvas.into_frame();
        let image = upscale(&strip, job.settings.final_width, job.settings.final_height)?;

        self.writer
            .write(&output, &image)
            .map_err(|e| CompositionError::IoFailure {
                path: output.clone(),
                reason: e.to_string(),
            })?;

        log::info!("{}: wrote {}", job.name, output.display());
        Ok(JobOutcome::Completed { output, columns })
    }
}
