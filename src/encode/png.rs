use std::path::{Path, PathBuf};

use crate::encode::ffmpeg::ensure_parent_dir;
use crate::encode::sink::{FrameSink, SinkConfig};
use crate::foundation::core::FrameIndex;
use crate::foundation::error::{BannerError, BannerResult};
use crate::render::frame::FrameRGBA;
use crate::text::mask::Mask;

/// Write one frame as an RGBA PNG.
///
/// Banner frames are opaque, so premultiplied bytes are written as-is.
pub fn write_frame_png(path: &Path, frame: &FrameRGBA) -> BannerResult<()> {
    ensure_parent_dir(path)?;
    image::save_buffer_with_format(
        path,
        &frame.data,
        frame.width,
        frame.height,
        image::ColorType::Rgba8,
        image::ImageFormat::Png,
    )
    .map_err(|e| BannerError::encode(format!("write png '{}': {e}", path.display())))
}

/// Write a mask as an 8-bit grayscale PNG (alpha becomes luminance).
pub fn write_mask_png(path: &Path, mask: &Mask) -> BannerResult<()> {
    ensure_parent_dir(path)?;
    image::save_buffer_with_format(
        path,
        mask.alpha(),
        mask.width(),
        mask.height(),
        image::ColorType::L8,
        image::ImageFormat::Png,
    )
    .map_err(|e| BannerError::encode(format!("write png '{}': {e}", path.display())))
}

/// Sink that writes every frame to `<dir>/<prefix><index:05>.png`.
#[derive(Debug, Clone)]
pub struct PngSequenceSink {
    dir: PathBuf,
    prefix: String,
    last_idx: Option<FrameIndex>,
    written: usize,
}

impl PngSequenceSink {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self {
            dir: dir.into(),
            prefix: "frame_".to_owned(),
            last_idx: None,
            written: 0,
        }
    }

    pub fn with_prefix(mut self, prefix: impl Into<String>) -> Self {
        self.prefix = prefix.into();
        self
    }

    pub fn path_for(&self, idx: FrameIndex) -> PathBuf {
        self.dir.join(format!("{}{:05}.png", self.prefix, idx.0))
    }

    /// Number of frames written since `begin`.
    pub fn written(&self) -> usize {
        self.written
    }
}

impl FrameSink for PngSequenceSink {
    fn begin(&mut self, _cfg: SinkConfig) -> BannerResult<()> {
        std::fs::create_dir_all(&self.dir).map_err(|e| {
            BannerError::encode(format!(
                "failed to create output directory '{}': {e}",
                self.dir.display()
            ))
        })?;
        self.last_idx = None;
        self.written = 0;
        Ok(())
    }

    fn push_frame(&mut self, idx: FrameIndex, frame: &FrameRGBA) -> BannerResult<()> {
        if let Some(last) = self.last_idx
            && idx.0 <= last.0
        {
            return Err(BannerError::encode(
                "png sink received out-of-order frame index",
            ));
        }
        self.last_idx = Some(idx);
        write_frame_png(&self.path_for(idx), frame)?;
        self.written += 1;
        Ok(())
    }

    fn end(&mut self) -> BannerResult<()> {
        tracing::debug!(frames = self.written, dir = %self.dir.display(), "png sequence done");
        Ok(())
    }
}

#[cfg(test)]
#[path = "../../tests/unit/encode/png.rs"]
mod tests;
