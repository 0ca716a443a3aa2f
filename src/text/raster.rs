use crate::foundation::core::SurfaceSize;
use crate::foundation::error::{BannerError, BannerResult};
use crate::text::label::{BannerLabel, StackLayout};
use crate::text::mask::Mask;

/// Largest surface edge accepted by the rasterizers.
pub const MAX_SURFACE_DIM: u32 = 16_384;

/// Capability to draw the label into an offscreen buffer and capture its alpha channel.
///
/// Implementations must return a mask of exactly `surface` dimensions with the lines placed as
/// described by `layout`.
pub trait MaskRasterizer {
    /// Draw `label` at `layout` and capture the alpha channel.
    fn rasterize(
        &mut self,
        label: &BannerLabel,
        layout: &StackLayout,
        surface: SurfaceSize,
    ) -> BannerResult<Mask>;

    /// Short backend name used in diagnostics.
    fn name(&self) -> &'static str;
}

/// A captured mask together with the geometry it was drawn with.
#[derive(Clone, Debug)]
pub struct RasterizedText {
    pub mask: Mask,
    pub layout: StackLayout,
}

impl RasterizedText {
    pub fn scale(&self) -> f64 {
        self.layout.scale
    }
}

/// Rasterize `label` for `surface` at `scale`.
///
/// Zero-area or oversized surfaces are rejected before the backend is invoked.
#[tracing::instrument(skip(rasterizer, label), fields(backend = rasterizer.name()))]
pub fn rasterize_text(
    rasterizer: &mut dyn MaskRasterizer,
    label: &BannerLabel,
    surface: SurfaceSize,
    scale: f64,
) -> BannerResult<RasterizedText> {
    if surface.is_empty() {
        return Err(BannerError::validation(format!(
            "surface has invalid dimensions: {}x{}",
            surface.width, surface.height
        )));
    }
    if surface.width > MAX_SURFACE_DIM || surface.height > MAX_SURFACE_DIM {
        return Err(BannerError::validation(format!(
            "surface too large: {}x{} (max {MAX_SURFACE_DIM}x{MAX_SURFACE_DIM})",
            surface.width, surface.height
        )));
    }
    if !scale.is_finite() || scale <= 0.0 {
        return Err(BannerError::validation("text scale must be finite and > 0"));
    }

    let layout = StackLayout::new(surface, scale);
    let mask = rasterizer.rasterize(label, &layout, surface)?;
    if mask.size() != surface {
        return Err(BannerError::raster(format!(
            "{} returned a {}x{} mask for a {}x{} surface",
            rasterizer.name(),
            mask.width(),
            mask.height(),
            surface.width,
            surface.height
        )));
    }
    tracing::debug!(lit = mask.lit_count(0), "captured text mask");
    Ok(RasterizedText { mask, layout })
}

/// Rasterizer backed by a closure; handy for synthetic masks.
pub struct FnRasterizer<F> {
    f: F,
}

impl<F> FnRasterizer<F>
where
    F: FnMut(&StackLayout, SurfaceSize) -> BannerResult<Mask>,
{
    pub fn new(f: F) -> Self {
        Self { f }
    }
}

impl<F> MaskRasterizer for FnRasterizer<F>
where
    F: FnMut(&StackLayout, SurfaceSize) -> BannerResult<Mask>,
{
    fn rasterize(
        &mut self,
        _label: &BannerLabel,
        layout: &StackLayout,
        surface: SurfaceSize,
    ) -> BannerResult<Mask> {
        (self.f)(layout, surface)
    }

    fn name(&self) -> &'static str {
        "fn"
    }
}

#[cfg(test)]
#[path = "../../tests/unit/text/raster.rs"]
mod tests;
