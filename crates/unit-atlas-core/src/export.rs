//! Raster exports of a composite atlas: indexed bytes, RGBA albedo and RGBA team mask.

use crate::atlas::CompositeAtlas;
use crate::palette::Palette;
use image::{Rgba, RgbaImage};

/// HSV decomposition of an 8-bit RGB colour.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Hsv {
    /// Hue in degrees `[0, 360)`; `None` for greys.
    pub hue: Option<f32>,
    /// Saturation in `[0, 1]`.
    pub saturation: f32,
    /// Largest channel, `0..=255`.
    pub value: u8,
}

impl Hsv {
    /// Value scaled to `[0, 1]`.
    pub fn value_unit(&self) -> f32 {
        self.value as f32 / 255.0
    }
}

pub fn rgb_to_hsv([r, g, b]: [u8; 3]) -> Hsv {
    let max = r.max(g).max(b);
    let min = r.min(g).min(b);
    let delta = max - min;
    if delta == 0 {
        return Hsv {
            hue: None,
            saturation: 0.0,
            value: max,
        };
    }
    let d = delta as f32;
    let (rf, gf, bf) = (r as f32, g as f32, b as f32);
    let sector = if max == r {
        ((gf - bf) / d).rem_euclid(6.0)
    } else if max == g {
        (bf - rf) / d + 2.0
    } else {
        (rf - gf) / d + 4.0
    };
    Hsv {
        hue: Some(sector * 60.0),
        saturation: d / max as f32,
        value: max,
    }
}

/// Team-colour pixel test: logo-flagged and saturated above `threshold`.
#[inline]
pub fn is_team_pixel(logo: bool, hsv: &Hsv, threshold: f32) -> bool {
    logo && hsv.saturation > threshold
}

/// Team-mask alpha for a team pixel: `255 - floor(255 * V)`, darker means more opaque.
#[inline]
pub fn team_mask_alpha(hsv: &Hsv) -> u8 {
    // floor(255 * max / 255) == max
    255 - hsv.value
}

/// All three rasters of an atlas, same dimensions.
pub struct AtlasExports {
    pub indexed: Vec<u8>,
    pub albedo: RgbaImage,
    pub team_mask: RgbaImage,
}

/// Computes the indexed, albedo and team-mask rasters in one pass.
pub fn export_all(atlas: &CompositeAtlas, palette: &Palette, threshold: f32) -> AtlasExports {
    let (w, h) = (atlas.width(), atlas.height());
    let mut albedo = RgbaImage::new(w, h);
    let mut team_mask = RgbaImage::new(w, h);
    let indices = atlas.indices();
    let logo = atlas.logo_mask();
    for (i, (&idx, &is_logo)) in indices.iter().zip(logo.iter()).enumerate() {
        let x = (i % w as usize) as u32;
        let y = (i / w as usize) as u32;
        let (a, m) = shade(palette, idx, is_logo, threshold);
        albedo.put_pixel(x, y, a);
        team_mask.put_pixel(x, y, m);
    }
    AtlasExports {
        indexed: indices.to_vec(),
        albedo,
        team_mask,
    }
}

/// Per-pixel albedo: palette colour, or black for team pixels. Always opaque.
pub fn albedo_rgba(atlas: &CompositeAtlas, palette: &Palette, threshold: f32) -> RgbaImage {
    let w = atlas.width() as usize;
    RgbaImage::from_fn(atlas.width(), atlas.height(), |x, y| {
        let i = y as usize * w + x as usize;
        shade(palette, atlas.indices()[i], atlas.logo_mask()[i], threshold).0
    })
}

/// Per-pixel team mask: RGB zero, alpha from the colour's value on team pixels only.
pub fn team_mask_rgba(atlas: &CompositeAtlas, palette: &Palette, threshold: f32) -> RgbaImage {
    let w = atlas.width() as usize;
    RgbaImage::from_fn(atlas.width(), atlas.height(), |x, y| {
        let i = y as usize * w + x as usize;
        shade(palette, atlas.indices()[i], atlas.logo_mask()[i], threshold).1
    })
}

fn shade(palette: &Palette, idx: u8, logo: bool, threshold: f32) -> (Rgba<u8>, Rgba<u8>) {
    let rgb = palette.rgb(idx);
    let hsv = rgb_to_hsv(rgb);
    if is_team_pixel(logo, &hsv, threshold) {
        (Rgba([0, 0, 0, 255]), Rgba([0, 0, 0, team_mask_alpha(&hsv)]))
    } else {
        (Rgba([rgb[0], rgb[1], rgb[2], 255]), Rgba([0, 0, 0, 0]))
    }
}
