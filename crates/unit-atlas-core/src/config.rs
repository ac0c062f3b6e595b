use serde::{Deserialize, Serialize};
use std::str::FromStr;

/// Saturation above which a logo-flagged pixel is treated as team colour.
///
/// Empirical value carried over from the legacy converter; kept tunable through
/// [`AtlasConfig::logo_saturation_threshold`].
pub const DEFAULT_LOGO_SATURATION_THRESHOLD: f32 = 0.333;

/// Side length of the solid swatch synthesized for colour-index primitives.
pub const DEFAULT_SWATCH_SIZE: u32 = 4;

/// Archive file name fragment that marks team-colour (logo) textures.
pub const DEFAULT_LOGO_ARCHIVE_MARKER: &str = "logos.gaf";

/// Byte order of each 32-bit palette entry as stored on disk.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Default)]
#[serde(rename_all = "lowercase")]
pub enum ChannelOrder {
    /// Bytes B, G, R, X; the little-endian word reads as `0xXXRRGGBB`.
    #[default]
    Bgrx,
    /// Bytes R, G, B, X as shipped with the game data.
    Rgbx,
}

impl FromStr for ChannelOrder {
    type Err = ();
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "bgrx" | "bgr" => Ok(Self::Bgrx),
            "rgbx" | "rgb" => Ok(Self::Rgbx),
            _ => Err(()),
        }
    }
}

/// Compositor configuration.
///
/// Defaults reproduce the legacy converter: widths 64..=2048, each tried square and
/// then twice as tall, 4x4 colour swatches, logo threshold 0.333.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct AtlasConfig {
    /// Smallest canvas width tried by the size search (power of two).
    #[serde(default = "default_min_width")]
    pub min_width: u32,
    /// Largest canvas width tried by the size search (power of two).
    #[serde(default = "default_max_width")]
    pub max_width: u32,
    /// Also try `height = 2 * width` after each square size.
    #[serde(default = "default_true")]
    pub tall_variants: bool,
    /// Swatch side for colour-index fragments.
    #[serde(default = "default_swatch_size")]
    pub swatch_size: u32,
    #[serde(default = "default_logo_saturation_threshold")]
    pub logo_saturation_threshold: f32,
    /// Case-insensitive substring of an archive name that marks logo textures.
    #[serde(default = "default_logo_archive_marker")]
    pub logo_archive_marker: String,
    #[serde(default)]
    pub channel_order: ChannelOrder,
}

impl Default for AtlasConfig {
    fn default() -> Self {
        Self {
            min_width: default_min_width(),
            max_width: default_max_width(),
            tall_variants: true,
            swatch_size: default_swatch_size(),
            logo_saturation_threshold: default_logo_saturation_threshold(),
            logo_archive_marker: default_logo_archive_marker(),
            channel_order: ChannelOrder::default(),
        }
    }
}

impl AtlasConfig {
    /// Validates the configuration parameters.
    ///
    /// Returns an error if:
    /// - A width bound is zero or not a power of two
    /// - `min_width` exceeds `max_width`
    /// - The swatch size is zero or the threshold lies outside `[0, 1]`
    pub fn validate(&self) -> crate::error::Result<()> {
        use crate::error::AtlasError;

        for w in [self.min_width, self.max_width] {
            if w == 0 || !w.is_power_of_two() {
                return Err(AtlasError::InvalidDimensions {
                    width: w,
                    height: w,
                });
            }
        }
        if self.min_width > self.max_width {
            return Err(AtlasError::InvalidConfig(format!(
                "min_width ({}) exceeds max_width ({})",
                self.min_width, self.max_width
            )));
        }
        if self.swatch_size == 0 {
            return Err(AtlasError::InvalidConfig("swatch_size must be > 0".into()));
        }
        if !(0.0..=1.0).contains(&self.logo_saturation_threshold) {
            return Err(AtlasError::InvalidConfig(format!(
                "logo_saturation_threshold ({}) must lie in [0, 1]",
                self.logo_saturation_threshold
            )));
        }
        Ok(())
    }

    /// True if an archive with this name carries team-colour paint.
    pub fn is_logo_archive(&self, archive_name: &str) -> bool {
        !self.logo_archive_marker.is_empty()
            && archive_name
                .to_ascii_lowercase()
                .contains(&self.logo_archive_marker.to_ascii_lowercase())
    }
}

fn default_min_width() -> u32 {
    64
}
fn default_max_width() -> u32 {
    2048
}
fn default_true() -> bool {
    true
}
fn default_swatch_size() -> u32 {
    DEFAULT_SWATCH_SIZE
}
fn default_logo_saturation_threshold() -> f32 {
    DEFAULT_LOGO_SATURATION_THRESHOLD
}
fn default_logo_archive_marker() -> String {
    DEFAULT_LOGO_ARCHIVE_MARKER.into()
}

/// Builder for `AtlasConfig` for ergonomic construction.
#[derive(Debug, Default, Clone)]
pub struct AtlasConfigBuilder {
    cfg: AtlasConfig,
}

impl AtlasConfigBuilder {
    pub fn new() -> Self {
        Self {
            cfg: AtlasConfig::default(),
        }
    }
    pub fn with_width_range(mut self, min: u32, max: u32) -> Self {
        self.cfg.min_width = min;
        self.cfg.max_width = max;
        self
    }
    pub fn tall_variants(mut self, v: bool) -> Self {
        self.cfg.tall_variants = v;
        self
    }
    pub fn swatch_size(mut self, v: u32) -> Self {
        self.cfg.swatch_size = v;
        self
    }
    pub fn logo_saturation_threshold(mut self, v: f32) -> Self {
        self.cfg.logo_saturation_threshold = v;
        self
    }
    pub fn logo_archive_marker(mut self, v: impl Into<String>) -> Self {
        self.cfg.logo_archive_marker = v.into();
        self
    }
    pub fn channel_order(mut self, v: ChannelOrder) -> Self {
        self.cfg.channel_order = v;
        self
    }
    pub fn build(self) -> AtlasConfig {
        self.cfg
    }
}

impl AtlasConfig {
    /// Create a fluent builder for `AtlasConfig`.
    pub fn builder() -> AtlasConfigBuilder {
        AtlasConfigBuilder::new()
    }
}
