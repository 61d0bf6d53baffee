use std::path::{Path, PathBuf};
use std::process;

use clap::Parser;

use framestripe_core::config::batch::BatchConfig;
use framestripe_core::config::job::{JobSpec, RenderSettings};
use framestripe_core::pipeline::batch_runner::{run_batch, JobStatus};
use framestripe_core::pipeline::compose_strip_use_case::ComposeStripUseCase;
use framestripe_core::video::infrastructure::ffmpeg_reader::FfmpegReader;
use framestripe_core::video::infrastructure::image_file_writer::ImageFileWriter;

/// Composes a video into a strip-per-frame timeline image.
#[derive(Parser)]
#[command(name = "framestripe")]
struct Cli {
    /// A batch job file (.json) or a single video file.
    input: PathBuf,

    /// Start time in seconds (single-video mode).
    #[arg(long, default_value = "0")]
    start: f64,

    /// End time in seconds; -1 means to the end of the video.
    #[arg(long, default_value = "-1", allow_hyphen_values = true)]
    end: f64,

    /// Canvas height before upscaling.
    #[arg(long, default_value = "1080")]
    canvas_height: usize,

    /// Canvas width target, i.e. how many frames to sample.
    #[arg(long, default_value = "1920")]
    canvas_width: usize,

    /// Fraction of the canvas used for the centered color crop, (0, 1].
    #[arg(long, default_value = "0.5")]
    crop_ratio: f64,

    /// Final output width.
    #[arg(long, default_value = "3840")]
    width: u32,

    /// Final output height.
    #[arg(long, default_value = "2160")]
    height: u32,

    /// Output directory prefix; the crop ratio is appended.
    #[arg(long, default_value = "strips")]
    output_root: PathBuf,

    /// Output file extension, including the dot.
    #[arg(long, default_value = ".png")]
    format: String,
}

fn main() {
    env_logger::init();

    if let Err(e) = run() {
        eprintln!("Error: {e}");
        process::exit(1);
    }
}

fn run() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();

    let config = if is_batch_file(&cli.input) {
        BatchConfig::load(&cli.input)?
    } else {
        single_config(&cli)
    };
    config.validate()?;
    config.check_sources()?;
    let jobs = config.composition_jobs();
    log::info!("{} job(s) planned", jobs.len());

    let progress: Box<dyn Fn(usize, usize) -> bool + Send> = Box::new(|current, total| {
        eprint!("\rFrames {current}/{total}");
        if current == total {
            eprintln!();
        }
        true
    });

    let mut use_case = ComposeStripUseCase::new(
        Box::new(FfmpegReader::new()),
        Box::new(ImageFileWriter::new()),
        Some(progress),
        None,
    );

    let reports = run_batch(&jobs, &mut use_case);

    let mut failures = 0;
    for report in &reports {
        match &report.status {
            JobStatus::Completed { output } => {
                println!("{}: completed -> {}", report.name, output.display());
            }
            JobStatus::Skipped => println!("{}: skipped (output exists)", report.name),
            JobStatus::Aborted => println!("{}: aborted", report.name),
            JobStatus::Failed(e) => {
                failures += 1;
                println!("{}: failed: {e}", report.name);
            }
        }
    }

    if failures > 0 {
        return Err(format!("{failures} of {} jobs failed", reports.len()).into());
    }
    Ok(())
}

fn is_batch_file(path: &Path) -> bool {
    path.extension()
        .is_some_and(|ext| ext.eq_ignore_ascii_case("json"))
}

fn single_config(cli: &Cli) -> BatchConfig {
    let settings = RenderSettings {
        canvas_height: cli.canvas_height,
        canvas_width: cli.canvas_width,
        crop_ratio: cli.crop_ratio,
        final_width: cli.width,
        final_height: cli.height,
        output_root: cli.output_root.clone(),
        output_format: cli.format.clone(),
        video_root: PathBuf::new(),
        show_progress: false,
    };
    let name = cli
        .input
        .file_stem()
        .map(|s| s.to_string_lossy().into_owned())
        .unwrap_or_else(|| "video".to_string());
    let spec = JobSpec {
        name,
        filename: cli.input.clone(),
        start_time: cli.start,
        end_time: cli.end,
    };
    BatchConfig {
        settings,
        jobs: vec![spec],
    }
}
