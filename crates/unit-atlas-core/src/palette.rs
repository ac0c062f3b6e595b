//! Palette table: a flat run of 32-bit little-endian colour words.

use crate::config::ChannelOrder;
use crate::error::{AtlasError, Result};
use std::path::Path;

/// Indexed colour table. Entries are stored as `0xXXRRGGBB` words regardless of the
/// byte order of the file they were loaded from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Palette {
    words: Vec<u32>,
}

impl Palette {
    /// Builds a palette from `0xXXRRGGBB` words. Fails on an empty table.
    pub fn from_words(words: Vec<u32>) -> Result<Self> {
        if words.is_empty() {
            return Err(AtlasError::InvalidPalette("palette has no entries".into()));
        }
        Ok(Self { words })
    }

    /// Decodes a palette file image. The byte length must be a non-zero multiple of 4.
    pub fn from_bytes(bytes: &[u8], order: ChannelOrder) -> Result<Self> {
        if bytes.is_empty() {
            return Err(AtlasError::InvalidPalette("palette file is empty".into()));
        }
        if bytes.len() % 4 != 0 {
            return Err(AtlasError::InvalidPalette(format!(
                "palette is truncated: {} bytes is not a whole number of entries",
                bytes.len()
            )));
        }
        let words = bytes
            .chunks_exact(4)
            .map(|c| {
                let le = u32::from_le_bytes([c[0], c[1], c[2], c[3]]);
                match order {
                    ChannelOrder::Bgrx => le,
                    ChannelOrder::Rgbx => swap_red_blue(le),
                }
            })
            .collect();
        Self::from_words(words)
    }

    /// Reads and decodes a palette file.
    pub fn load(path: impl AsRef<Path>, order: ChannelOrder) -> Result<Self> {
        let bytes = std::fs::read(path.as_ref())?;
        Self::from_bytes(&bytes, order)
    }

    /// Encodes the table back to file bytes in the requested order.
    pub fn to_bytes(&self, order: ChannelOrder) -> Vec<u8> {
        let mut out = Vec::with_capacity(self.words.len() * 4);
        for &w in &self.words {
            let word = match order {
                ChannelOrder::Bgrx => w,
                ChannelOrder::Rgbx => swap_red_blue(w),
            };
            out.extend_from_slice(&word.to_le_bytes());
        }
        out
    }

    pub fn len(&self) -> usize {
        self.words.len()
    }

    pub fn is_empty(&self) -> bool {
        self.words.is_empty()
    }

    /// Raw word at `index`.
    pub fn word(&self, index: u8) -> Option<u32> {
        self.words.get(index as usize).copied()
    }

    /// (R, G, B) of `index`; indices past the end of the table read as black.
    pub fn rgb(&self, index: u8) -> [u8; 3] {
        match self.word(index) {
            Some(w) => [(w >> 16) as u8, (w >> 8) as u8, w as u8],
            None => [0, 0, 0],
        }
    }
}

#[inline]
fn swap_red_blue(w: u32) -> u32 {
    (w & 0xFF00_FF00) | ((w >> 16) & 0xFF) | ((w & 0xFF) << 16)
}
