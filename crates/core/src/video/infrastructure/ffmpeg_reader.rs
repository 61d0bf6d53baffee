use std::path::Path;

use crate::shared::frame::Frame;
use crate::shared::video_metadata::VideoMetadata;
use crate::video::domain::video_reader::{FrameRead, VideoReader};

/// Seekable frame source backed by ffmpeg-next (libavformat + libavcodec).
///
/// Each `seek_and_read` seeks the demuxer to the keyframe at or before
/// the requested index, flushes the decoder, then decodes forward until a
/// frame at or past the requested timestamp appears. Decoded frames are
/// converted to RGB24 through a software scaling context.
pub struct FfmpegReader {
    input_ctx: Option<ffmpeg_next::format::context::Input>,
    decoder: Option<ffmpeg_next::decoder::Video>,
    scaler: Option<ffmpeg_next::software::scaling::Context>,
    video_stream_index: usize,
    fps: f64,
    /// Seconds per stream timestamp unit.
    time_base: f64,
    position_ms: f64,
    width: u32,
    height: u32,
}

// Safety: FfmpegReader is only used from a single thread at a time.
// The raw pointers inside ffmpeg types are not shared across threads.
unsafe impl Send for FfmpegReader {}

impl FfmpegReader {
    pub fn new() -> Self {
        Self {
            input_ctx: None,
            decoder: None,
            scaler: None,
            video_stream_index: 0,
            fps: 0.0,
            time_base: 0.0,
            position_ms: 0.0,
            width: 0,
            height: 0,
        }
    }
}

impl Default for FfmpegReader {
    fn default() -> Self {
        Self::new()
    }
}

impl VideoReader for FfmpegReader {
    fn open(&mut self, path: &Path) -> Result<VideoMetadata, Box<dyn std::error::Error>> {
        ffmpeg_next::init()?;

        let ictx = ffmpeg_next::format::input(path)?;

        let stream = ictx
            .streams()
            .best(ffmpeg_next::media::Type::Video)
            .ok_or("No video stream found")?;

        let video_stream_index = stream.index();
        let codec_ctx = ffmpeg_next::codec::context::Context::from_parameters(stream.parameters())?;
        let decoder = codec_ctx.decoder().video()?;

        let rate = stream.rate();
        let fps = if rate.denominator() != 0 {
            rate.numerator() as f64 / rate.denominator() as f64
        } else {
            0.0
        };

        let tb = stream.time_base();
        let time_base = if tb.denominator() != 0 {
            tb.numerator() as f64 / tb.denominator() as f64
        } else {
            0.0
        };

        let width = decoder.width();
        let height = decoder.height();

        let scaler = ffmpeg_next::software::scaling::Context::get(
            decoder.format(),
            width,
            height,
            ffmpeg_next::format::Pixel::RGB24,
            width,
            height,
            ffmpeg_next::software::scaling::Flags::BILINEAR,
        )?;

        let metadata = VideoMetadata {
            width,
            height,
            fps,
            total_frames: stream.frames().max(0) as usize,
            codec: decoder
                .codec()
                .map(|c| c.name().to_string())
                .unwrap_or_default(),
            source_path: Some(path.to_path_buf()),
        };

        self.video_stream_index = video_stream_index;
        self.fps = fps;
        self.time_base = time_base;
        self.position_ms = 0.0;
        self.width = width;
        self.height = height;
        self.decoder = Some(decoder);
        self.scaler = Some(scaler);
        self.input_ctx = Some(ictx);

        Ok(metadata)
    }

    fn seek_and_read(
        &mut self,
        frame_index: usize,
    ) -> Result<FrameRead, Box<dyn std::error::Error>> {
        if self.fps <= 0.0 {
            return Err("FfmpegReader: not opened or frame rate unknown".into());
        }
        let target_secs = frame_index as f64 / self.fps;
        // Accept the first frame within half a frame period of the target;
        // container timestamps rarely land exactly on index / fps.
        let tolerance = 0.5 / self.fps;
        let time_base = self.time_base;
        let width = self.width;
        let height = self.height;
        let stream_index = self.video_stream_index;

        let ictx = self
            .input_ctx
            .as_mut()
            .ok_or("FfmpegReader: not opened")?;
        let decoder = self.decoder.as_mut().ok_or("FfmpegReader: not opened")?;
        let scaler = self.scaler.as_mut().ok_or("FfmpegReader: not opened")?;

        let ts = (target_secs * f64::from(ffmpeg_next::ffi::AV_TIME_BASE)) as i64;
        if let Err(e) = ictx.seek(ts, ..ts) {
            log::debug!("seek to frame {frame_index} failed: {e}");
            return Ok(FrameRead::EndOfStream);
        }
        decoder.flush();

        let mut decoded = ffmpeg_next::util::frame::video::Video::empty();
        let mut last_secs = 0.0;

        let accept = |decoded: &ffmpeg_next::util::frame::video::Video, last: &mut f64| {
            let secs = decoded
                .timestamp()
                .or_else(|| decoded.pts())
                .map(|t| t as f64 * time_base)
                .unwrap_or(*last);
            *last = secs;
            secs + tolerance >= target_secs
        };

        // Demux and decode forward until the target timestamp is reached.
        loop {
            let Some((stream, packet)) = ictx.packets().next() else {
                break;
            };
            if stream.index() != stream_index {
                continue;
            }
            if decoder.send_packet(&packet).is_err() {
                // A corrupt packet is a gap, not the end of the stream.
                return Ok(FrameRead::Missing);
            }
            while decoder.receive_frame(&mut decoded).is_ok() {
                if accept(&decoded, &mut last_secs) {
                    let mut rgb = ffmpeg_next::util::frame::video::Video::empty();
                    scaler.run(&decoded, &mut rgb)?;
                    self.position_ms = last_secs * 1000.0;
                    let pixels = extract_rgb_pixels(&rgb, width, height);
                    return Ok(FrameRead::Frame(Frame::new(
                        pixels,
                        width,
                        height,
                        frame_index,
                    )));
                }
            }
        }

        // Demuxer exhausted: flush the decoder and drain what remains.
        let _ = decoder.send_eof();
        while decoder.receive_frame(&mut decoded).is_ok() {
            if accept(&decoded, &mut last_secs) {
                let mut rgb = ffmpeg_next::util::frame::video::Video::empty();
                scaler.run(&decoded, &mut rgb)?;
                self.position_ms = last_secs * 1000.0;
                let pixels = extract_rgb_pixels(&rgb, width, height);
                return Ok(FrameRead::Frame(Frame::new(
                    pixels,
                    width,
                    height,
                    frame_index,
                )));
            }
        }

        self.position_ms = last_secs * 1000.0;
        Ok(FrameRead::EndOfStream)
    }

    fn position_ms(&self) -> f64 {
        self.position_ms
    }

    fn close(&mut self) {
        self.input_ctx = None;
        self.decoder = None;
        self.scaler = None;
        self.position_ms = 0.0;
    }
}

/// Copies RGB24 plane data into a packed buffer, dropping the per-row
/// padding ffmpeg may add for alignment.
fn extract_rgb_pixels(
    rgb_frame: &ffmpeg_next::util::frame::video::Video,
    width: u32,
    height: u32,
) -> Vec<u8> {
    let stride = rgb_frame.stride(0);
    let data = rgb_frame.data(0);
    let w = width as usize;
    let h = height as usize;

    let mut pixels = Vec::with_capacity(w * h * 3);
    for row in 0..h {
        let row_start = row * stride;
        pixels.extend_from_slice(&data[row_start..row_start + w * 3]);
    }
    pixels
}
