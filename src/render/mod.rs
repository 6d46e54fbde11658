//! Raster surfaces.
//!
//! [`cpu::CpuSurface`] implements [`crate::DrawSurface`] on top of `vello_cpu` with `parley`
//! text shaping. Frames read back from it are premultiplied RGBA8.

pub(crate) mod blur;
/// CPU raster surface.
pub mod cpu;
/// Font file discovery.
pub mod fonts;

/// A rendered frame as RGBA8 pixels.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct FrameRGBA {
    /// Frame width in pixels.
    pub width: u32,
    /// Frame height in pixels.
    pub height: u32,
    /// RGBA8 bytes, tightly packed, row-major.
    pub data: Vec<u8>,
    /// Whether `data` is premultiplied alpha.
    pub premultiplied: bool,
}

impl FrameRGBA {
    /// RGBA bytes of pixel `(x, y)`, or `None` out of bounds.
    pub fn pixel(&self, x: u32, y: u32) -> Option<[u8; 4]> {
        if x >= self.width || y >= self.height {
            return None;
        }
        let i = ((y as usize) * (self.width as usize) + (x as usize)) * 4;
        let px = self.data.get(i..i + 4)?;
        Some([px[0], px[1], px[2], px[3]])
    }
}
