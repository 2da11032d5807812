use crate::compose::plan::FramePlan;
use crate::foundation::error::ReelResult;

/// A rendered frame as RGBA8 pixels.
///
/// Frames coming out of [`crate::CpuBackend`] are **premultiplied alpha**; the flag makes this
/// explicit at API boundaries.
#[derive(Clone, Debug, PartialEq)]
pub struct FrameRGBA {
    /// Frame width in pixels.
    pub width: u32,
    /// Frame height in pixels.
    pub height: u32,
    /// RGBA8 bytes, tightly packed, row-major.
    pub data: Vec<u8>,
    /// Whether the `data` is premultiplied alpha.
    pub premultiplied: bool,
}

impl FrameRGBA {
    /// RGBA bytes of one pixel, or `None` outside the frame.
    pub fn pixel(&self, x: u32, y: u32) -> Option<[u8; 4]> {
        if x >= self.width || y >= self.height {
            return None;
        }
        let i = ((y as usize) * (self.width as usize) + (x as usize)) * 4;
        let px = self.data.get(i..i + 4)?;
        Some([px[0], px[1], px[2], px[3]])
    }
}

/// A rasterizer that turns a [`FramePlan`] into pixels.
pub trait RenderBackend {
    /// Paint every op of `plan`, in order, onto a fresh surface and read it back.
    fn render_plan(&mut self, plan: &FramePlan) -> ReelResult<FrameRGBA>;
}
