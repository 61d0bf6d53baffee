use crate::shared::error::CompositionError;
use crate::shared::frame::Frame;

/// Nearest-neighbor upscale to the final output size.
///
/// Each destination pixel copies the source pixel at
/// `(floor(x * src_w / dst_w), floor(y * src_h / dst_h))` with no
/// blending, so strip boundaries stay hard rectangles. This is a visual
/// fidelity requirement of the output, not a performance shortcut.
pub fn upscale(
    source: &Frame,
    target_width: u32,
    target_height: u32,
) -> Result<Frame, CompositionError> {
    if target_width == 0 || target_height == 0 {
        return Err(CompositionError::InvalidDimensions {
            width: target_width,
            height: target_height,
        });
    }

    let src_w = source.width() as usize;
    let src_h = source.height() as usize;
    let dst_w = target_width as usize;
    let dst_h = target_height as usize;
    let src = source.data();

    let mut data = Vec::with_capacity(dst_w * dst_h * 3);
    for y in 0..dst_h {
        let sy = y * src_h / dst_h;
        let row_base = sy * src_w;
        for x in 0..dst_w {
            let sx = x * src_w / dst_w;
            let at = (row_base + sx) * 3;
            data.extend_from_slice(&src[at..at + 3]);
        }
    }
    Ok(Frame::new(data, target_width, target_height, 0))
}
