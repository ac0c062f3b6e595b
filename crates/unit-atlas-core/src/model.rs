use serde::{Deserialize, Serialize};

/// Axis-aligned rectangle (pixels). `x,y` is top-left; `w,h` are sizes.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Default)]
pub struct Rect {
    pub x: u32,
    pub y: u32,
    pub w: u32,
    pub h: u32,
}

impl Rect {
    pub fn new(x: u32, y: u32, w: u32, h: u32) -> Self {
        Self { x, y, w, h }
    }
    /// Inclusive right edge coordinate (`x + w - 1`).
    pub fn right(&self) -> u32 {
        self.x + self.w.saturating_sub(1)
    }
    /// Inclusive bottom edge coordinate (`y + h - 1`).
    pub fn bottom(&self) -> u32 {
        self.y + self.h.saturating_sub(1)
    }
    /// Returns true if `r` is fully inside `self` (inclusive edges).
    pub fn contains(&self, r: &Rect) -> bool {
        r.x >= self.x && r.y >= self.y && r.right() <= self.right() && r.bottom() <= self.bottom()
    }
    /// Returns true if the two rectangles share at least one pixel.
    pub fn overlaps(&self, r: &Rect) -> bool {
        if self.w == 0 || self.h == 0 || r.w == 0 || r.h == 0 {
            return false;
        }
        !(self.x >= r.x + r.w || r.x >= self.x + self.w || self.y >= r.y + r.h || r.y >= self.y + self.h)
    }
    pub fn area(&self) -> u64 {
        (self.w as u64) * (self.h as u64)
    }
}

/// A named block of pixels reserved on the canvas.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Default)]
pub struct Fragment {
    /// Placed rectangle; only meaningful once `placed` is set.
    pub rect: Rect,
    /// Transparent palette index declared by the frame header.
    pub transparency_key: u32,
    /// Whether the fragment was placed while the logo flag was active.
    pub logo: bool,
    /// Set once the allocator reserved `rect`.
    pub placed: bool,
}

/// Normalized texture coordinates of a fragment, all in `[0, 1]`.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Default)]
#[serde(rename_all = "camelCase")]
pub struct UvRect {
    pub u_min: f64,
    pub v_min: f64,
    pub u_max: f64,
    pub v_max: f64,
}

impl UvRect {
    /// Maps a pixel rectangle on a `width x height` canvas to normalized coordinates.
    pub fn from_rect(rect: &Rect, width: u32, height: u32) -> Self {
        let w = width as f64;
        let h = height as f64;
        Self {
            u_min: rect.x as f64 / w,
            v_min: rect.y as f64 / h,
            u_max: (rect.x + rect.w) as f64 / w,
            v_max: (rect.y + rect.h) as f64 / h,
        }
    }

    /// Degenerate rectangle returned for names the atlas does not know.
    pub fn zero() -> Self {
        Self::default()
    }

    pub fn min(&self) -> [f64; 2] {
        [self.u_min, self.v_min]
    }

    pub fn max(&self) -> [f64; 2] {
        [self.u_max, self.v_max]
    }
}

/// Statistics about how well a composite atlas is filled.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct AtlasStats {
    pub width: u32,
    pub height: u32,
    /// Number of placed fragments.
    pub num_fragments: usize,
    /// Number of placed fragments flagged as logo.
    pub num_logo: usize,
    pub total_area: u64,
    /// Sum of placed fragment areas.
    pub used_area: u64,
    /// used_area / total_area (0.0 to 1.0).
    pub occupancy: f64,
}

impl AtlasStats {
    /// Returns a human-readable summary of the statistics.
    pub fn summary(&self) -> String {
        format!(
            "Canvas: {}x{}, Fragments: {} ({} logo), Occupancy: {:.2}%, Used Area: {} px²",
            self.width,
            self.height,
            self.num_fragments,
            self.num_logo,
            self.occupancy * 100.0,
            self.used_area,
        )
    }

    /// Returns wasted space in pixels.
    pub fn wasted_area(&self) -> u64 {
        self.total_area.saturating_sub(self.used_area)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn overlap_is_exclusive_of_touching_edges() {
        let a = Rect::new(0, 0, 16, 16);
        assert!(!a.overlaps(&Rect::new(16, 0, 8, 8)));
        assert!(!a.overlaps(&Rect::new(0, 16, 8, 8)));
        assert!(a.overlaps(&Rect::new(15, 15, 8, 8)));
        assert!(!a.overlaps(&Rect::new(4, 4, 0, 3)));
    }

    #[test]
    fn uv_spans_fragment_width() {
        let uv = UvRect::from_rect(&Rect::new(16, 8, 32, 16), 64, 128);
        assert_eq!(uv.u_min, 0.25);
        assert_eq!(uv.v_min, 0.0625);
        assert_eq!(uv.u_max, 0.75);
        assert_eq!(uv.v_max, 0.1875);
    }
}
