use crate::shared::color::Rgb;
use crate::shared::frame::Frame;

/// The growing strip image: one uniform column per accepted frame, plus
/// the initial white seed column, which stays in the final output as the
/// first column.
///
/// Height is fixed at construction; width only grows. Every column is
/// pixel-uniform, so the canvas stores one color per column and expands
/// to full pixel rows only when composition hands it off via
/// [`Canvas::into_frame`].
pub struct Canvas {
    height: usize,
    columns: Vec<Rgb>,
}

impl Canvas {
    /// `expected_samples` pre-sizes the column buffer (seed plus one per
    /// planned sample) so appends do not reallocate on the happy path.
    pub fn new(height: usize, expected_samples: usize) -> Self {
        let mut columns = Vec::with_capacity(expected_samples + 1);
        columns.push(Rgb::WHITE);
        Self { height, columns }
    }

    pub fn push_column(&mut self, color: Rgb) {
        self.columns.push(color);
    }

    pub fn height(&self) -> usize {
        self.height
    }

    /// Seed column plus one column per accepted frame.
    pub fn width(&self) -> usize {
        self.columns.len()
    }

    pub fn column(&self, index: usize) -> Rgb {
        self.columns[index]
    }

    /// Materializes the canvas as a row-major RGB frame, ending the
    /// composition phase; no further columns can be appended.
    pub fn into_frame(self) -> Frame {
        let width = self.columns.len();
        let mut data = Vec::with_capacity(self.height * width * 3);
        for _ in 0..self.height {
            for color in &self.columns {
                data.extend_from_slice(&color.channels());
            }
        }
        Frame::new(data, width as u32, self.height as u32, 0)
    }
}
