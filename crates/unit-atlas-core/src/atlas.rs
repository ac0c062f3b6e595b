use crate::model::{AtlasStats, Fragment, UvRect};
use std::collections::BTreeMap;
use tracing::warn;

/// A fully placed, read-only atlas produced by a successful sizing attempt.
#[derive(Debug, Clone)]
pub struct CompositeAtlas {
    width: u32,
    height: u32,
    indices: Vec<u8>,
    logo: Vec<bool>,
    fragments: BTreeMap<String, Fragment>,
}

impl CompositeAtlas {
    pub(crate) fn new(
        width: u32,
        height: u32,
        indices: Vec<u8>,
        logo: Vec<bool>,
        fragments: BTreeMap<String, Fragment>,
    ) -> Self {
        Self {
            width,
            height,
            indices,
            logo,
            fragments,
        }
    }

    pub fn width(&self) -> u32 {
        self.width
    }

    pub fn height(&self) -> u32 {
        self.height
    }

    /// Palette index per pixel, row-major.
    pub fn indices(&self) -> &[u8] {
        &self.indices
    }

    /// Logo flag per pixel, row-major.
    pub fn logo_mask(&self) -> &[bool] {
        &self.logo
    }

    pub fn fragments(&self) -> &BTreeMap<String, Fragment> {
        &self.fragments
    }

    pub fn fragment(&self, name: &str) -> Option<&Fragment> {
        self.fragments.get(name)
    }

    /// Normalized UV rectangle of `name`.
    ///
    /// Unknown or never-placed names log a warning and map to the zero rectangle.
    pub fn uv(&self, name: &str) -> UvRect {
        match self.fragments.get(name) {
            Some(f) if f.placed => UvRect::from_rect(&f.rect, self.width, self.height),
            _ => {
                warn!(name, "unknown texture");
                UvRect::zero()
            }
        }
    }

    /// Computes fill statistics for this atlas.
    pub fn stats(&self) -> AtlasStats {
        let placed = self.fragments.values().filter(|f| f.placed);
        let mut num_fragments = 0;
        let mut num_logo = 0;
        let mut used_area = 0u64;
        for f in placed {
            num_fragments += 1;
            if f.logo {
                num_logo += 1;
            }
            used_area += f.rect.area();
        }
        let total_area = (self.width as u64) * (self.height as u64);
        let occupancy = if total_area > 0 {
            used_area as f64 / total_area as f64
        } else {
            0.0
        };
        AtlasStats {
            width: self.width,
            height: self.height,
            num_fragments,
            num_logo,
            total_area,
            used_area,
            occupancy,
        }
    }

    /// Consumes the atlas, returning the indexed buffer.
    pub fn into_indices(self) -> Vec<u8> {
        self.indices
    }
}
