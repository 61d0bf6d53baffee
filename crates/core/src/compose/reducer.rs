use ndarray::s;

use crate::compose::crop::CropSpec;
use crate::shared::color::Rgb;
use crate::shared::frame::Frame;

/// Reduces one frame to the arithmetic mean color of its centered crop.
///
/// Crop bounds are clamped to the frame; a clamp that collapses to
/// nothing falls back to the single center pixel. Each channel's mean is
/// truncated to u8 independently. Deterministic for identical pixel data.
pub fn reduce(frame: &Frame, crop: &CropSpec) -> Rgb {
    let h = frame.height() as usize;
    let w = frame.width() as usize;
    let (r0, r1) = clamped_range(h, crop.half_height);
    let (c0, c1) = clamped_range(w, crop.half_width);

    let view = frame.as_ndarray();
    let region = view.slice(s![r0..r1, c0..c1, ..]);
    let pixel_count = ((r1 - r0) * (c1 - c0)) as u64;

    let mut channels = [0u8; 3];
    for (ch, out) in channels.iter_mut().enumerate() {
        let sum: u64 = region
            .slice(s![.., .., ch])
            .iter()
            .map(|&v| u64::from(v))
            .sum();
        *out = (sum / pixel_count) as u8;
    }
    Rgb::new(channels[0], channels[1], channels[2])
}

/// `[mid - half, mid + half)` clamped into `[0, extent)`. Degenerate
/// ranges (half of 0, or a frame smaller than the crop) collapse to the
/// center pixel so the mean is always over at least one pixel.
fn clamped_range(extent: usize, half: usize) -> (usize, usize) {
    let mid = extent / 2;
    let lo = mid.saturating_sub(half);
    let hi = (mid + half).min(extent);
    if lo >= hi {
        (mid.min(extent - 1), mid.min(extent - 1) + 1)
    } else {
        (lo, hi)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn uniform_frame(width: u32, height: u32, color: [u8; 3]) -> Frame {
        let mut data = Vec::with_capacity((width * height * 3) as usize);
        for _ in 0..(width * height) {
            data.extend_from_slice(&color);
        }
        Frame::new(data, width, height, 0)
    }

    #[test]
    fn test_uniform_frame_reduces_to_its_color() {
        let frame = uniform_frame(8, 8, [10, 130, 250]);
        let crop = CropSpec {
            half_height: 2,
            half_width: 2,
        };
        assert_eq!(reduce(&frame, &crop), Rgb::new(10, 130, 250));
    }

    #[test]
    fn test_mean_truncates_per_channel() {
        // 4x1 frame: two black pixels flanking two pixels of (1, 2, 3).
        // Crop half_width 1 selects columns [1, 3): mean exactly (1, 2, 3).
        let data = vec![0, 0, 0, 1, 2, 3, 1, 2, 3, 0, 0, 0];
        let frame = Frame::new(data, 4, 1, 0);
        let crop = CropSpec {
            half_height: 1,
            half_width: 1,
        };
        assert_eq!(reduce(&frame, &crop), Rgb::new(1, 2, 3));
    }

    #[test]
    fn test_fractional_mean_truncates_down() {
        // Two pixels: (0,0,0) and (255, 3, 1) -> mean (127.5, 1.5, 0.5)
        let data = vec![0, 0, 0, 255, 3, 1];
        let frame = Frame::new(data, 2, 1, 0);
        let crop = CropSpec {
            half_height: 1,
            half_width: 1,
        };
        assert_eq!(reduce(&frame, &crop), Rgb::new(127, 1, 0));
    }

    #[test]
    fn test_crop_larger_than_frame_clamps_to_full_frame() {
        let frame = uniform_frame(4, 4, [50, 60, 70]);
        let crop = CropSpec {
            half_height: 500,
            half_width: 500,
        };
        assert_eq!(reduce(&frame, &crop), Rgb::new(50, 60, 70));
    }

    #[test]
    fn test_zero_half_sizes_fall_back_to_center_pixel() {
        // 3x3 frame, center pixel distinct from the rest
        let mut data = vec![0u8; 27];
        let center = (3 + 1) * 3; // row 1, col 1
        data[center] = 9;
        data[center + 1] = 8;
        data[center + 2] = 7;
        let frame = Frame::new(data, 3, 3, 0);
        let crop = CropSpec {
            half_height: 0,
            half_width: 0,
        };
        assert_eq!(reduce(&frame, &crop), Rgb::new(9, 8, 7));
    }

    #[test]
    fn test_crop_ignores_pixels_outside_the_region() {
        // 4x4 frame: center 2x2 is (100, 100, 100), border is (0, 0, 0)
        let mut data = vec![0u8; 4 * 4 * 3];
        for row in 1..3 {
            for col in 1..3 {
                let at = (row * 4 + col) * 3;
                data[at..at + 3].copy_from_slice(&[100, 100, 100]);
            }
        }
        let frame = Frame::new(data, 4, 4, 0);
        let crop = CropSpec {
            half_height: 1,
            half_width: 1,
        };
        assert_eq!(reduce(&frame, &crop), Rgb::new(100, 100, 100));
    }
}
