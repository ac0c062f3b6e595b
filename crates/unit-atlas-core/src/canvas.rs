use crate::error::{AtlasError, Result};
use crate::model::Rect;
use crate::packer::{Packer, grid::GridPacker};

/// Fixed-size palette-index raster plus its occupancy/logo grid.
///
/// Mutable only while fragments are being placed; a finished canvas is moved into a
/// [`CompositeAtlas`](crate::atlas::CompositeAtlas).
#[derive(Debug, Clone)]
pub struct Canvas {
    width: u32,
    height: u32,
    indices: Vec<u8>,
    packer: GridPacker,
}

impl Canvas {
    pub fn new(width: u32, height: u32) -> Result<Self> {
        if width == 0 || height == 0 {
            return Err(AtlasError::InvalidDimensions { width, height });
        }
        Ok(Self {
            width,
            height,
            indices: vec![0; (width as usize) * (height as usize)],
            packer: GridPacker::new(width, height),
        })
    }

    pub fn width(&self) -> u32 {
        self.width
    }

    pub fn height(&self) -> u32 {
        self.height
    }

    /// Palette indices, row-major.
    pub fn indices(&self) -> &[u8] {
        &self.indices
    }

    pub fn is_logo(&self, x: u32, y: u32) -> bool {
        self.packer.is_logo(x, y)
    }

    pub fn is_occupied(&self, x: u32, y: u32) -> bool {
        self.packer.is_occupied(x, y)
    }

    /// Reserves a `w x h` rectangle; fails with [`AtlasError::BufferFull`] when none is free.
    pub fn place(&mut self, w: u32, h: u32, logo: bool) -> Result<Rect> {
        self.packer.pack(w, h, logo).ok_or(AtlasError::BufferFull {
            width: self.width,
            height: self.height,
            fragment_width: w,
            fragment_height: h,
        })
    }

    /// Copies a row-major `rect.w`-stride pixel block to `rect`'s origin.
    ///
    /// Writes past the canvas edge and reads past the end of `pixels` are clipped.
    pub fn write_rows(&mut self, rect: &Rect, pixels: &[u8]) {
        if rect.x >= self.width {
            return;
        }
        let cols = rect.w.min(self.width - rect.x) as usize;
        let stride = rect.w as usize;
        for row in 0..rect.h {
            let dy = rect.y + row;
            if dy >= self.height {
                break;
            }
            let src = row as usize * stride;
            if src >= pixels.len() {
                break;
            }
            let n = cols.min(pixels.len() - src);
            let dst = (dy as usize) * (self.width as usize) + rect.x as usize;
            self.indices[dst..dst + n].copy_from_slice(&pixels[src..src + n]);
        }
    }

    /// Paints every in-bounds pixel of `rect` with `value`.
    pub fn fill(&mut self, rect: &Rect, value: u8) {
        if rect.x >= self.width {
            return;
        }
        let cols = rect.w.min(self.width - rect.x) as usize;
        for dy in rect.y..(rect.y + rect.h).min(self.height) {
            let dst = (dy as usize) * (self.width as usize) + rect.x as usize;
            self.indices[dst..dst + cols].fill(value);
        }
    }

    /// Splits into `(width, height, indices, logo mask)`.
    pub fn into_parts(self) -> (u32, u32, Vec<u8>, Vec<bool>) {
        (
            self.width,
            self.height,
            self.indices,
            self.packer.into_logo_mask(),
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn write_rows_clips_to_canvas() {
        let mut c = Canvas::new(4, 4).unwrap();
        let px: Vec<u8> = (1..=9).collect();
        c.write_rows(&Rect::new(2, 2, 3, 3), &px);
        assert_eq!(
            c.indices(),
            &[0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 1, 2, 0, 0, 4, 5]
        );
    }

    #[test]
    fn write_rows_tolerates_short_layer() {
        let mut c = Canvas::new(4, 4).unwrap();
        c.write_rows(&Rect::new(0, 0, 2, 2), &[7, 7, 7]);
        assert_eq!(&c.indices()[..6], &[7, 7, 0, 0, 7, 0]);
    }

    #[test]
    fn zero_dimension_is_invalid() {
        assert!(matches!(
            Canvas::new(0, 64),
            Err(AtlasError::InvalidDimensions { width: 0, height: 64 })
        ));
    }
}
