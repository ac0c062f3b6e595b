//! Solid swatches for mesh faces that reference a palette entry instead of a texture.

use crate::error::Result;
use crate::sink::AtlasSink;

/// Prefix of the synthetic fragment name for a colour-index primitive.
pub const COLOR_INDEX_NAME_PREFIX: &str = "__colorIndex";

/// Fragment name for palette index `index`, e.g. `__colorIndex12`.
pub fn color_index_name(index: u32) -> String {
    format!("{COLOR_INDEX_NAME_PREFIX}{index}")
}

pub fn is_color_index_name(name: &str) -> bool {
    name.starts_with(COLOR_INDEX_NAME_PREFIX)
}

/// Palette index encoded in a colour-index name.
pub fn parse_color_index_name(name: &str) -> Option<u32> {
    name.strip_prefix(COLOR_INDEX_NAME_PREFIX)?.parse().ok()
}

/// Places a non-logo swatch for `index` and paints it with that index.
///
/// The fragment records `index - 1` as its transparency key while its pixels hold `index`;
/// downstream consumers depend on that pairing. Does nothing if the name is already
/// registered.
pub fn synthesize(sink: &mut AtlasSink, index: u32) -> Result<()> {
    let name = color_index_name(index);
    if sink.contains(&name) {
        return Ok(());
    }
    let side = sink.swatch_size();
    sink.insert_solid(&name, side, index.wrapping_sub(1), index as u8)?;
    Ok(())
}

/// Synthesizes the swatch named by `name`; returns `false` if it is not a colour-index name.
pub fn synthesize_named(sink: &mut AtlasSink, name: &str) -> Result<bool> {
    match parse_color_index_name(name) {
        Some(index) => {
            synthesize(sink, index)?;
            Ok(true)
        }
        None => Ok(false),
    }
}
