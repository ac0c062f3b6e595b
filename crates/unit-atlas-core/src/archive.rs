//! Archive readers: sources of named, palette-indexed frames.
//!
//! Decoding legacy archive files is left to external readers; they plug in through
//! [`ArchiveReader`]. [`MemoryArchive`] is a serde-backed reader used for JSON interchange
//! files and tests. [`TextureIndex`] resolves a texture name to the first archive that
//! provides it.

use crate::error::{AtlasError, Result};
use crate::sink::{FrameHeader, FrameSink};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::path::Path;
use tracing::debug;

/// A source of named entries that can stream their frames into a [`FrameSink`].
pub trait ArchiveReader {
    /// Archive name, usually its file name; used by the logo heuristic.
    fn name(&self) -> &str;
    fn entries(&self) -> Vec<&str>;
    fn contains(&self, entry: &str) -> bool {
        self.entries().contains(&entry)
    }
    /// Streams `entry` to `sink`: begin entity, frames with their layers, end entity.
    fn extract(&self, entry: &str, sink: &mut dyn FrameSink) -> Result<()>;
}

/// One frame of an archive entry: header fields plus its pixel layers.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct ArchiveFrame {
    pub width: u32,
    pub height: u32,
    #[serde(default)]
    pub transparency_index: u32,
    /// Row-major palette indices, `width * height` bytes each.
    pub layers: Vec<Vec<u8>>,
}

impl ArchiveFrame {
    /// Single-layer frame filled with `value`.
    pub fn solid(width: u32, height: u32, value: u8) -> Self {
        Self {
            width,
            height,
            transparency_index: 0,
            layers: vec![vec![value; (width as usize) * (height as usize)]],
        }
    }

    pub fn header(&self) -> FrameHeader {
        FrameHeader {
            width: self.width,
            height: self.height,
            transparency_index: self.transparency_index,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct ArchiveEntry {
    pub name: String,
    pub frames: Vec<ArchiveFrame>,
}

/// In-memory archive, (de)serializable as JSON.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct MemoryArchive {
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub entries: Vec<ArchiveEntry>,
}

impl MemoryArchive {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            entries: Vec::new(),
        }
    }

    pub fn with_entry(mut self, name: impl Into<String>, frames: Vec<ArchiveFrame>) -> Self {
        self.entries.push(ArchiveEntry {
            name: name.into(),
            frames,
        });
        self
    }

    pub fn from_json_str(s: &str) -> Result<Self> {
        Ok(serde_json::from_str(s)?)
    }

    /// Loads an archive JSON file. An empty `name` field defaults to the file name.
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let text = std::fs::read_to_string(path)?;
        let mut archive = Self::from_json_str(&text)?;
        if archive.name.is_empty() {
            archive.name = path
                .file_name()
                .map(|s| s.to_string_lossy().into_owned())
                .unwrap_or_default();
        }
        Ok(archive)
    }

    fn entry(&self, name: &str) -> Option<&ArchiveEntry> {
        self.entries.iter().find(|e| e.name == name)
    }
}

impl ArchiveReader for MemoryArchive {
    fn name(&self) -> &str {
        &self.name
    }

    fn entries(&self) -> Vec<&str> {
        self.entries.iter().map(|e| e.name.as_str()).collect()
    }

    fn contains(&self, entry: &str) -> bool {
        self.entry(entry).is_some()
    }

    fn extract(&self, entry: &str, sink: &mut dyn FrameSink) -> Result<()> {
        let found = self.entry(entry).ok_or_else(|| AtlasError::UnknownEntry {
            archive: self.name.clone(),
            entry: entry.to_string(),
        })?;
        sink.begin_entity(&found.name);
        for frame in &found.frames {
            sink.begin_frame(&frame.header())?;
            for layer in &frame.layers {
                sink.frame_layer(layer);
            }
            sink.end_frame();
        }
        sink.end_entity();
        Ok(())
    }
}

/// Maps texture names to the archive that provides them.
///
/// Archives are consulted in insertion order; the first one containing a name wins.
#[derive(Default)]
pub struct TextureIndex {
    archives: Vec<Box<dyn ArchiveReader>>,
    by_name: HashMap<String, usize>,
}

impl TextureIndex {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_archives(archives: impl IntoIterator<Item = Box<dyn ArchiveReader>>) -> Self {
        let mut index = Self::new();
        for a in archives {
            index.push(a);
        }
        index
    }

    /// Adds an archive; names it shares with earlier archives stay with the earlier ones.
    pub fn push(&mut self, archive: Box<dyn ArchiveReader>) {
        let slot = self.archives.len();
        for name in archive.entries() {
            if !self.by_name.contains_key(name) {
                debug!(archive = archive.name(), texture = name, "found texture");
                self.by_name.insert(name.to_string(), slot);
            }
        }
        self.archives.push(archive);
    }

    pub fn lookup(&self, name: &str) -> Option<&dyn ArchiveReader> {
        self.by_name
            .get(name)
            .and_then(|&i| self.archives.get(i))
            .map(|a| a.as_ref())
    }

    pub fn num_archives(&self) -> usize {
        self.archives.len()
    }

    pub fn num_textures(&self) -> usize {
        self.by_name.len()
    }
}
