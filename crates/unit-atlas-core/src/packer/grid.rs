use super::Packer;
use crate::model::Rect;

/// First-fit packer over a per-pixel occupancy grid.
///
/// Candidate origins are scanned column-major: `x` ascending, then `y` ascending within each
/// column. The first origin whose rectangle is entirely free wins. Each accepted cell also
/// records the logo flag active at placement time.
#[derive(Debug, Clone)]
pub struct GridPacker {
    width: u32,
    height: u32,
    occupied: Vec<bool>,
    logo: Vec<bool>,
}

impl GridPacker {
    pub fn new(width: u32, height: u32) -> Self {
        let len = (width as usize) * (height as usize);
        Self {
            width,
            height,
            occupied: vec![false; len],
            logo: vec![false; len],
        }
    }

    #[inline]
    fn index(&self, x: u32, y: u32) -> usize {
        (y as usize) * (self.width as usize) + x as usize
    }

    pub fn is_occupied(&self, x: u32, y: u32) -> bool {
        x < self.width && y < self.height && self.occupied[self.index(x, y)]
    }

    pub fn is_logo(&self, x: u32, y: u32) -> bool {
        x < self.width && y < self.height && self.logo[self.index(x, y)]
    }

    /// Number of reserved cells.
    pub fn used_cells(&self) -> usize {
        self.occupied.iter().filter(|&&o| o).count()
    }

    /// Consumes the packer, returning the per-pixel logo flags (row-major).
    pub fn into_logo_mask(self) -> Vec<bool> {
        self.logo
    }

    /// Lowest occupied row inside the candidate rectangle, if any.
    ///
    /// Every origin in the same column at or above that row overlaps it, so the scan can
    /// resume one row below.
    fn lowest_collision(&self, x: u32, y: u32, w: u32, h: u32) -> Option<u32> {
        for row in (y..y + h).rev() {
            let start = self.index(x, row);
            if self.occupied[start..start + w as usize].iter().any(|&o| o) {
                return Some(row);
            }
        }
        None
    }

    fn mark(&mut self, r: &Rect, logo: bool) {
        for row in r.y..r.y + r.h {
            let start = self.index(r.x, row);
            let end = start + r.w as usize;
            self.occupied[start..end].fill(true);
            self.logo[start..end].fill(logo);
        }
    }
}

impl Packer for GridPacker {
    fn dimensions(&self) -> (u32, u32) {
        (self.width, self.height)
    }

    fn find(&self, w: u32, h: u32) -> Option<Rect> {
        if w > self.width || h > self.height {
            return None;
        }
        let mut x = 0;
        while x + w <= self.width {
            let mut y = 0;
            while y + h <= self.height {
                match self.lowest_collision(x, y, w, h) {
                    None => return Some(Rect::new(x, y, w, h)),
                    Some(row) => y = row + 1,
                }
            }
            x += 1;
        }
        None
    }

    fn pack(&mut self, w: u32, h: u32, logo: bool) -> Option<Rect> {
        let r = self.find(w, h)?;
        self.mark(&r, logo);
        Some(r)
    }
}
