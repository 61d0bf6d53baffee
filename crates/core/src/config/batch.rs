use std::path::Path;

use serde::Deserialize;

use crate::config::job::{CompositionJob, JobSpec, RenderSettings};
use crate::shared::error::CompositionError;

/// Batch job file: one set of render settings plus the list of videos.
#[derive(Clone, Debug, Deserialize)]
pub struct BatchConfig {
    pub settings: RenderSettings,
    pub jobs: Vec<JobSpec>,
}

impl BatchConfig {
    pub fn from_json(text: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(text)
    }

    /// Reads and validates a batch file.
    pub fn load(path: &Path) -> Result<Self, Box<dyn std::error::Error>> {
        let text = std::fs::read_to_string(path)?;
        let config = Self::from_json(&text)?;
        config.validate()?;
        Ok(config)
    }

    /// Rejects settings that cannot produce a valid composition: a crop
    /// ratio outside (0, 1], a zero canvas dimension, or a zero final
    /// dimension.
    pub fn validate(&self) -> Result<(), CompositionError> {
        let s = &self.settings;
        if !(s.crop_ratio > 0.0 && s.crop_ratio <= 1.0) {
            return Err(CompositionError::InvalidConfig {
                reason: format!("crop_ratio must be in (0, 1], got {}", s.crop_ratio),
            });
        }
        if s.canvas_height == 0 || s.canvas_width == 0 {
            return Err(CompositionError::InvalidConfig {
                reason: format!(
                    "canvas dimensions must be positive, got {}x{}",
                    s.canvas_width, s.canvas_height
                ),
            });
        }
        if s.final_width == 0 || s.final_height == 0 {
            return Err(CompositionError::InvalidDimensions {
                width: s.final_width,
                height: s.final_height,
            });
        }
        Ok(())
    }

    /// Checks that every source file exists before any composition starts.
    /// Per-job open failures are still isolated at run time; this is an
    /// early, whole-batch sanity pass.
    pub fn check_sources(&self) -> Result<(), CompositionError> {
        for spec in &self.jobs {
            let path = self.settings.video_root.join(&spec.filename);
            if !path.exists() {
                return Err(CompositionError::FileNotAccessible {
                    path,
                    reason: "file does not exist".to_string(),
                });
            }
        }
        Ok(())
    }

    /// Resolves each job spec into a self-contained composition job.
    pub fn composition_jobs(&self) -> Vec<CompositionJob> {
        self.jobs
            .iter()
            .map(|spec| CompositionJob::new(spec, &self.settings))
            .collect()
    }
}
