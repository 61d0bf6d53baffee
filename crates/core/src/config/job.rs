use std::path::PathBuf;

use serde::Deserialize;

use crate::sampling::window::TimeWindow;

fn default_end_time() -> f64 {
    crate::sampling::window::END_OF_VIDEO
}

fn default_output_format() -> String {
    ".png".to_string()
}

/// Render settings shared by every job in a batch.
#[derive(Clone, Debug, Deserialize)]
pub struct RenderSettings {
    /// Canvas height in pixels; also sizes the crop rectangle.
    pub canvas_height: usize,
    /// Canvas width target, i.e. the number of frame samples to aim for.
    pub canvas_width: usize,
    /// Fraction of each canvas dimension used for the centered crop, (0, 1].
    pub crop_ratio: f64,
    /// Final output size after nearest-neighbor upscale.
    pub final_width: u32,
    pub final_height: u32,
    /// Directory prefix for outputs; the crop ratio is appended.
    pub output_root: PathBuf,
    #[serde(default = "default_output_format")]
    pub output_format: String,
    /// Directory that source filenames are resolved against.
    #[serde(default)]
    pub video_root: PathBuf,
    /// On-screen preview toggle; parsed for compatibility, ignored by the
    /// compositing core.
    #[serde(default)]
    pub show_progress: bool,
}

/// One video entry in a batch file.
#[derive(Clone, Debug, Deserialize)]
pub struct JobSpec {
    pub name: String,
    pub filename: PathBuf,
    #[serde(default)]
    pub start_time: f64,
    #[serde(default = "default_end_time")]
    pub end_time: f64,
}

/// Everything the orchestrator needs for one video, resolved from the
/// batch file. Explicit per-job state; nothing is read from ambient
/// configuration during composition.
#[derive(Clone, Debug)]
pub struct CompositionJob {
    pub name: String,
    pub source: PathBuf,
    pub window: TimeWindow,
    pub settings: RenderSettings,
}

impl CompositionJob {
    pub fn new(spec: &JobSpec, settings: &RenderSettings) -> Self {
        Self {
            name: spec.name.clone(),
            source: settings.video_root.join(&spec.filename),
            window: TimeWindow::new(spec.start_time, spec.end_time),
            settings: settings.clone(),
        }
    }

    /// Destination identity for this job:
    /// `{output_root}_{crop_ratio}/{source_stem}_{crop_ratio}{output_format}`.
    /// An existing file at this path short-circuits the job as skipped.
    pub fn output_path(&self) -> PathBuf {
        let ratio = format_ratio(self.settings.crop_ratio);
        let dir = PathBuf::from(format!("{}_{ratio}", self.settings.output_root.display()));
        let stem = self
            .source
            .file_stem()
            .map(|s| s.to_string_lossy().into_owned())
            .unwrap_or_else(|| "output".to_string());
        dir.join(format!("{stem}_{ratio}{}", self.settings.output_format))
    }
}

/// Renders the crop ratio the way it appears in output names: integral
/// values keep their fractional part (`1.0`, not `1`), so a given ratio
/// always maps to the same path.
fn format_ratio(ratio: f64) -> String {
    if ratio == ratio.trunc() {
        format!("{ratio:.1}")
    } else {
        format!("{ratio}")
    }
}
