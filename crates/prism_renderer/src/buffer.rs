//! Linear RGB pixel buffer the renderer writes into.

use crate::Color;

/// Row-major buffer of linear (not gamma-corrected) colors.
#[derive(Debug, Clone, PartialEq)]
pub struct ImageBuffer {
    pub width: u32,
    pub height: u32,
    pub pixels: Vec<Color>,
}

impl ImageBuffer {
    /// Create a new image buffer filled with black.
    pub fn new(width: u32, height: u32) -> Self {
        Self {
            width,
            height,
            pixels: vec![Color::ZERO; width as usize * height as usize],
        }
    }

    /// Get the pixel at `(row, col)`. Row 0 is the top of the image.
    pub fn get_pixel(&self, row: u32, col: u32) -> Color {
        self.pixels[self.index(row, col)]
    }

    /// Set the pixel at `(row, col)`.
    pub fn set_pixel(&mut self, row: u32, col: u32, color: Color) {
        let index = self.index(row, col);
        self.pixels[index] = color;
    }

    /// One row of pixels.
    pub fn row(&self, row: u32) -> &[Color] {
        let start = row as usize * self.width as usize;
        &self.pixels[start..start + self.width as usize]
    }

    fn index(&self, row: u32, col: u32) -> usize {
        row as usize * self.width as usize + col as usize
    }
}
