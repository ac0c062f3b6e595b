use crate::archive::TextureIndex;
use crate::atlas::CompositeAtlas;
use crate::color_index;
use crate::config::AtlasConfig;
use crate::error::Result;
use crate::mesh::MeshObject;
use crate::sink::AtlasSink;
use std::collections::BTreeSet;
use tracing::{debug, info, instrument, warn};

/// Canvas sizes tried by the size search, smallest first.
///
/// Widths double from `min_width` to `max_width`; each width is tried square and, with
/// `tall_variants`, then twice as tall. Areas are strictly increasing and the sequence is
/// finite.
#[derive(Debug, Clone)]
pub struct SizeCandidates {
    next: Option<(u32, u32)>,
    max_width: u32,
    tall_variants: bool,
}

impl SizeCandidates {
    pub fn new(cfg: &AtlasConfig) -> Self {
        let next = (cfg.min_width > 0 && cfg.min_width <= cfg.max_width)
            .then_some((cfg.min_width, cfg.min_width));
        Self {
            next,
            max_width: cfg.max_width,
            tall_variants: cfg.tall_variants,
        }
    }
}

impl Iterator for SizeCandidates {
    type Item = (u32, u32);

    fn next(&mut self) -> Option<(u32, u32)> {
        let (w, h) = self.next?;
        self.next = if self.tall_variants && h == w {
            w.checked_mul(2).map(|h2| (w, h2))
        } else {
            w.checked_mul(2)
                .filter(|&w2| w2 <= self.max_width)
                .map(|w2| (w2, w2))
        };
        Some((w, h))
    }
}

/// Builds the atlas for one mesh root: every fragment referenced anywhere in its tree.
pub fn build_unit_atlas(
    root: &MeshObject,
    index: &TextureIndex,
    cfg: &AtlasConfig,
) -> Result<Option<CompositeAtlas>> {
    compose_atlas(&root.referenced_fragments(), index, cfg)
}

#[instrument(skip_all, fields(fragments = names.len()))]
/// Runs the size search: tries each candidate size on a fresh canvas until every fragment
/// fits.
///
/// Returns `Ok(None)` when no candidate size can hold the fragments. Placement failures are
/// retried at the next size; any other error is returned as is.
pub fn compose_atlas(
    names: &BTreeSet<String>,
    index: &TextureIndex,
    cfg: &AtlasConfig,
) -> Result<Option<CompositeAtlas>> {
    cfg.validate()?;
    for (width, height) in SizeCandidates::new(cfg) {
        match compose_at_size(names, index, cfg, width, height) {
            Ok(atlas) => {
                info!(width, height, "atlas composed");
                return Ok(Some(atlas));
            }
            Err(e) if e.is_buffer_full() => {
                debug!(width, height, error = %e, "canvas too small, trying next size");
            }
            Err(e) => return Err(e),
        }
    }
    warn!(
        max_width = cfg.max_width,
        "fragments do not fit any candidate canvas size"
    );
    Ok(None)
}

/// One sizing attempt: ingests every name onto a fresh `width x height` canvas.
///
/// Names provided by an archive are streamed from it, with the logo flag derived from the
/// archive name. Remaining colour-index names get a synthesized swatch. Anything else is
/// skipped.
pub fn compose_at_size(
    names: &BTreeSet<String>,
    index: &TextureIndex,
    cfg: &AtlasConfig,
    width: u32,
    height: u32,
) -> Result<CompositeAtlas> {
    let mut sink = AtlasSink::new(width, height)?.with_swatch_size(cfg.swatch_size);
    for name in names {
        if let Some(archive) = index.lookup(name) {
            sink.set_current_texture_is_logo(cfg.is_logo_archive(archive.name()));
            archive.extract(name, &mut sink)?;
        } else if !color_index::synthesize_named(&mut sink, name)? {
            debug!(name = name.as_str(), "no archive provides texture");
        }
    }
    Ok(sink.finish())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_candidates_cover_64_to_2048() {
        let sizes: Vec<_> = SizeCandidates::new(&AtlasConfig::default()).collect();
        assert_eq!(sizes.len(), 12);
        assert_eq!(sizes[0], (64, 64));
        assert_eq!(sizes[1], (64, 128));
        assert_eq!(sizes[2], (128, 128));
        assert_eq!(sizes[11], (2048, 4096));
    }

    #[test]
    fn square_only_when_tall_variants_disabled() {
        let cfg = AtlasConfig::builder()
            .with_width_range(64, 256)
            .tall_variants(false)
            .build();
        let sizes: Vec<_> = SizeCandidates::new(&cfg).collect();
        assert_eq!(sizes, vec![(64, 64), (128, 128), (256, 256)]);
    }
}
