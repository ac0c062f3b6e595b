//! Frame event protocol and the sink that composites archive frames onto a canvas.

use crate::atlas::CompositeAtlas;
use crate::canvas::Canvas;
use crate::config::DEFAULT_SWATCH_SIZE;
use crate::error::Result;
use crate::model::{Fragment, Rect};
use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, HashSet};
use tracing::trace;

/// Per-frame header streamed by an archive reader before the frame's layers.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
pub struct FrameHeader {
    pub width: u32,
    pub height: u32,
    pub transparency_index: u32,
}

/// Receiver of the archive event stream.
///
/// A reader emits, per entry: `begin_entity`, then for each frame `begin_frame`, one or more
/// `frame_layer` calls and `end_frame`, and finally `end_entity`.
pub trait FrameSink {
    fn begin_entity(&mut self, name: &str);
    fn begin_frame(&mut self, header: &FrameHeader) -> Result<()>;
    fn frame_layer(&mut self, pixels: &[u8]);
    fn end_frame(&mut self) {}
    fn end_entity(&mut self);
}

/// Ingest sink for one sizing attempt: owns the canvas, the fragment registry and the
/// transient per-entity cursor.
pub struct AtlasSink {
    canvas: Canvas,
    fragments: BTreeMap<String, Fragment>,
    filled: HashSet<String>,
    pending: Option<String>,
    current_is_logo: bool,
    swatch_size: u32,
}

impl AtlasSink {
    pub fn new(width: u32, height: u32) -> Result<Self> {
        Ok(Self {
            canvas: Canvas::new(width, height)?,
            fragments: BTreeMap::new(),
            filled: HashSet::new(),
            pending: None,
            current_is_logo: false,
            swatch_size: DEFAULT_SWATCH_SIZE,
        })
    }

    pub fn with_swatch_size(mut self, size: u32) -> Self {
        self.swatch_size = size;
        self
    }

    /// Marks the entities streamed next as team-colour paint.
    pub fn set_current_texture_is_logo(&mut self, is_logo: bool) {
        self.current_is_logo = is_logo;
    }

    pub fn canvas(&self) -> &Canvas {
        &self.canvas
    }

    pub fn fragment(&self, name: &str) -> Option<&Fragment> {
        self.fragments.get(name)
    }

    pub fn fragments(&self) -> &BTreeMap<String, Fragment> {
        &self.fragments
    }

    pub fn contains(&self, name: &str) -> bool {
        self.fragments.contains_key(name)
    }

    pub(crate) fn swatch_size(&self) -> u32 {
        self.swatch_size
    }

    /// Registers and places a fragment that is painted immediately with a solid index.
    pub(crate) fn insert_solid(
        &mut self,
        name: &str,
        side: u32,
        transparency_key: u32,
        value: u8,
    ) -> Result<Rect> {
        let rect = self.canvas.place(side, side, false)?;
        self.canvas.fill(&rect, value);
        self.fragments.insert(
            name.to_string(),
            Fragment {
                rect,
                transparency_key,
                logo: false,
                placed: true,
            },
        );
        self.filled.insert(name.to_string());
        Ok(rect)
    }

    /// Freezes the attempt into a read-only atlas.
    pub fn finish(self) -> CompositeAtlas {
        let (width, height, indices, logo) = self.canvas.into_parts();
        CompositeAtlas::new(width, height, indices, logo, self.fragments)
    }
}

impl FrameSink for AtlasSink {
    fn begin_entity(&mut self, name: &str) {
        self.fragments.entry(name.to_string()).or_default();
        self.pending = if self.filled.contains(name) {
            None
        } else {
            Some(name.to_string())
        };
    }

    fn begin_frame(&mut self, header: &FrameHeader) -> Result<()> {
        let Some(name) = self.pending.as_deref() else {
            return Ok(());
        };
        let Some(fragment) = self.fragments.get_mut(name) else {
            return Ok(());
        };
        if fragment.placed {
            return Ok(());
        }
        let rect = self
            .canvas
            .place(header.width, header.height, self.current_is_logo)?;
        trace!(name, x = rect.x, y = rect.y, w = rect.w, h = rect.h, "placed fragment");
        *fragment = Fragment {
            rect,
            transparency_key: header.transparency_index,
            logo: self.current_is_logo,
            placed: true,
        };
        Ok(())
    }

    fn frame_layer(&mut self, pixels: &[u8]) {
        let Some(name) = self.pending.as_deref() else {
            return;
        };
        let Some(fragment) = self.fragments.get(name) else {
            return;
        };
        if !fragment.placed {
            return;
        }
        let rect = fragment.rect;
        self.canvas.write_rows(&rect, pixels);
        // first static layer only
        if let Some(name) = self.pending.take() {
            self.filled.insert(name);
        }
    }

    fn end_entity(&mut self) {
        self.pending = None;
    }
}
