use crate::foundation::core::SurfaceSize;
use crate::foundation::error::{BannerError, BannerResult};

/// Alpha-only capture of the rasterized label, one byte per pixel in row-major order.
///
/// A mask is immutable once built; resizing the surface produces a new one.
#[derive(Clone, PartialEq, Eq)]
pub struct Mask {
    width: u32,
    height: u32,
    alpha: Vec<u8>,
}

impl std::fmt::Debug for Mask {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Mask")
            .field("width", &self.width)
            .field("height", &self.height)
            .field("len", &self.alpha.len())
            .finish()
    }
}

impl Mask {
    pub fn new(width: u32, height: u32, alpha: Vec<u8>) -> BannerResult<Self> {
        let expected = (width as usize) * (height as usize);
        if alpha.len() != expected {
            return Err(BannerError::raster(format!(
                "mask buffer has {} bytes, expected {expected} for {width}x{height}",
                alpha.len()
            )));
        }
        Ok(Self {
            width,
            height,
            alpha,
        })
    }

    /// Fully transparent mask.
    pub fn empty(width: u32, height: u32) -> Self {
        Self {
            width,
            height,
            alpha: vec![0; (width as usize) * (height as usize)],
        }
    }

    /// Keep only the alpha channel of an RGBA8 buffer (straight or premultiplied).
    pub fn from_rgba8(width: u32, height: u32, rgba: &[u8]) -> BannerResult<Self> {
        let expected = (width as usize) * (height as usize) * 4;
        if rgba.len() != expected {
            return Err(BannerError::raster(format!(
                "rgba buffer has {} bytes, expected {expected} for {width}x{height}",
                rgba.len()
            )));
        }
        let alpha = rgba.chunks_exact(4).map(|px| px[3]).collect();
        Ok(Self {
            width,
            height,
            alpha,
        })
    }

    /// Build a mask by evaluating `f(x, y)` for every pixel.
    pub fn from_fn(width: u32, height: u32, mut f: impl FnMut(u32, u32) -> u8) -> Self {
        let mut alpha = Vec::with_capacity((width as usize) * (height as usize));
        for y in 0..height {
            for x in 0..width {
                alpha.push(f(x, y));
            }
        }
        Self {
            width,
            height,
            alpha,
        }
    }

    pub fn width(&self) -> u32 {
        self.width
    }

    pub fn height(&self) -> u32 {
        self.height
    }

    pub fn size(&self) -> SurfaceSize {
        SurfaceSize::new(self.width, self.height)
    }

    pub fn alpha(&self) -> &[u8] {
        &self.alpha
    }

    pub fn alpha_at(&self, x: u32, y: u32) -> Option<u8> {
        if x >= self.width || y >= self.height {
            return None;
        }
        self.alpha
            .get((y as usize) * (self.width as usize) + (x as usize))
            .copied()
    }

    /// Number of pixels whose alpha is strictly above `threshold`.
    pub fn lit_count(&self, threshold: u8) -> usize {
        self.alpha.iter().filter(|&&a| a > threshold).count()
    }

    pub fn has_lit_pixels(&self, threshold: u8) -> bool {
        self.alpha.iter().any(|&a| a > threshold)
    }
}

#[cfg(test)]
#[path = "../../tests/unit/text/mask.rs"]
mod tests;
