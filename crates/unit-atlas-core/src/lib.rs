//! Core library for compositing legacy unit textures into a single palette atlas.
//!
//! - Placement: first-fit scan over an occupancy grid (x ascending, then y ascending)
//! - Size search: 64..=2048 wide canvases, square then double height, until everything fits
//! - Exports: indexed bytes, RGBA albedo and an RGBA team-colour mask derived from HSV
//! - Archive readers stream frames into an [`AtlasSink`](sink::AtlasSink) through the
//!   [`FrameSink`](sink::FrameSink) protocol; colour-index faces get synthesized swatches.
//!
//! Quick example:
//! ```ignore
//! use unit_atlas_core::prelude::*;
//! # fn main() -> anyhow::Result<()> {
//! let palette = Palette::load("PALETTE.PAL", ChannelOrder::Bgrx)?;
//! let index = TextureIndex::from_archives([
//!     Box::new(MemoryArchive::load("textures/logos.json")?) as Box<dyn ArchiveReader>,
//! ]);
//! let roots = load_unit("objects3d/armcom.json")?;
//! let cfg = AtlasConfig::default();
//! if let Some(atlas) = build_unit_atlas(&roots[0], &index, &cfg)? {
//!     let out = export_all(&atlas, &palette, cfg.logo_saturation_threshold);
//!     out.albedo.save("armcom_albedo.png")?;
//! }
//! # Ok(()) }
//! ```

pub mod archive;
pub mod atlas;
pub mod canvas;
pub mod color_index;
pub mod config;
pub mod error;
pub mod export;
pub mod export_json;
pub mod mesh;
pub mod model;
pub mod packer;
pub mod palette;
pub mod pipeline;
pub mod sink;

pub use archive::*;
pub use atlas::*;
pub use config::*;
pub use error::*;
pub use export::*;
pub use export_json::*;
pub use model::*;
pub use pipeline::*;

/// Convenience prelude for common types and functions.
/// Importing `unit_atlas_core::prelude::*` brings the primary APIs into scope.
pub mod prelude {
    pub use crate::archive::{ArchiveFrame, ArchiveReader, MemoryArchive, TextureIndex};
    pub use crate::atlas::CompositeAtlas;
    pub use crate::config::{AtlasConfig, AtlasConfigBuilder, ChannelOrder};
    pub use crate::error::{AtlasError, Result};
    pub use crate::export::{AtlasExports, albedo_rgba, export_all, team_mask_rgba};
    pub use crate::export_json::{mesh_to_json, to_json_hash, unit_to_json};
    pub use crate::mesh::{MeshObject, Primitive, Vertex, load_unit};
    pub use crate::model::{AtlasStats, Fragment, Rect, UvRect};
    pub use crate::palette::Palette;
    pub use crate::pipeline::{SizeCandidates, build_unit_atlas, compose_at_size, compose_atlas};
    pub use crate::sink::{AtlasSink, FrameHeader, FrameSink};
}
