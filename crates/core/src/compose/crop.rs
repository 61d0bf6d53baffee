/// Centered crop rectangle sampled from each frame.
///
/// Half sizes derive from the canvas dimensions and the crop ratio, not
/// from any particular frame, so the rectangle can exceed a small frame's
/// bounds; the reducer clamps at sampling time.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct CropSpec {
    pub half_height: usize,
    pub half_width: usize,
}

impl CropSpec {
    /// `crop_ratio` is the fraction of each canvas dimension used for the
    /// sampling rectangle, in (0, 1].
    pub fn from_canvas(canvas_height: usize, canvas_width: usize, crop_ratio: f64) -> Self {
        Self {
            half_height: (canvas_height as f64 * crop_ratio) as usize / 2,
            half_width: (canvas_width as f64 * crop_ratio) as usize / 2,
        }
    }
}
