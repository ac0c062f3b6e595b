use crate::model::Rect;

pub mod grid;

/// A packer reserves non-overlapping rectangles on a fixed-size canvas.
///
/// Implementations must ensure no overlaps and keep every reservation inside the canvas.
/// `pack` returns `None` when the rectangle cannot be placed; nothing is reserved then.
pub trait Packer {
    /// Canvas size as `(width, height)`.
    fn dimensions(&self) -> (u32, u32);
    /// Returns the position `pack` would choose, without reserving it.
    fn find(&self, w: u32, h: u32) -> Option<Rect>;
    fn can_pack(&self, w: u32, h: u32) -> bool {
        self.find(w, h).is_some()
    }
    /// Reserves a `w x h` rectangle, tagging its cells with `logo`.
    fn pack(&mut self, w: u32, h: u32, logo: bool) -> Option<Rect>;
}
