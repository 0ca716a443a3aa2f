use crate::foundation::core::Rgba8;

/// A rendered frame as RGBA8 pixels.
///
/// Frames are **premultiplied alpha**. The banner paints an opaque background, so in practice the
/// bytes are identical to straight alpha; the flag keeps that explicit at API boundaries.
#[derive(Clone, Debug, PartialEq, Eq)]
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
    /// Read one pixel; `None` outside the frame.
    pub fn pixel(&self, x: u32, y: u32) -> Option<Rgba8> {
        if x >= self.width || y >= self.height {
            return None;
        }
        let i = ((y as usize) * (self.width as usize) + (x as usize)) * 4;
        let px = self.data.get(i..i + 4)?;
        Some(Rgba8 {
            r: px[0],
            g: px[1],
            b: px[2],
            a: px[3],
        })
    }

    /// `true` when every pixel has full alpha.
    pub fn is_opaque(&self) -> bool {
        self.data.chunks_exact(4).all(|px| px[3] == u8::MAX)
    }

    /// Count pixels exactly equal to `color`.
    pub fn count_color(&self, color: Rgba8) -> usize {
        let want = color.to_array();
        self.data
            .chunks_exact(4)
            .filter(|px| *px == want.as_slice())
            .count()
    }
}
