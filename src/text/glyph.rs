use crate::foundation::core::SurfaceSize;
use crate::foundation::error::{BannerError, BannerResult};
use crate::text::label::{BannerLabel, StackLayout};
use crate::text::mask::Mask;
use crate::text::raster::MaskRasterizer;

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
/// RGBA8 brush color used by Parley text layout.
pub struct TextBrushRgba8 {
    /// Red channel.
    pub r: u8,
    /// Green channel.
    pub g: u8,
    /// Blue channel.
    pub b: u8,
    /// Alpha channel.
    pub a: u8,
}

impl TextBrushRgba8 {
    const WHITE: Self = Self {
        r: 255,
        g: 255,
        b: 255,
        a: 255,
    };
}

/// Stateful helper for building Parley text layouts from one registered font.
pub struct TextLayoutEngine {
    font_ctx: parley::FontContext,
    layout_ctx: parley::LayoutContext<TextBrushRgba8>,
    family_name: String,
}

impl TextLayoutEngine {
    /// Register `font_bytes` and build fresh Parley contexts around it.
    pub fn new(font_bytes: &[u8]) -> BannerResult<Self> {
        let mut font_ctx = parley::FontContext::default();
        let families = font_ctx
            .collection
            .register_fonts(parley::fontique::Blob::from(font_bytes.to_vec()), None);
        let family_id = families
            .first()
            .map(|(id, _)| *id)
            .ok_or_else(|| BannerError::raster("no font families registered from font bytes"))?;
        let family_name = font_ctx
            .collection
            .family_name(family_id)
            .ok_or_else(|| BannerError::raster("registered font family has no name"))?
            .to_string();

        Ok(Self {
            font_ctx,
            layout_ctx: parley::LayoutContext::new(),
            family_name,
        })
    }

    /// Family name of the registered font.
    pub fn family_name(&self) -> &str {
        &self.family_name
    }

    /// Shape and lay out a single unwrapped line.
    pub fn layout_line(
        &mut self,
        text: &str,
        size_px: f32,
        bold: bool,
    ) -> BannerResult<parley::Layout<TextBrushRgba8>> {
        if !size_px.is_finite() || size_px <= 0.0 {
            return Err(BannerError::validation(
                "text size_px must be finite and > 0",
            ));
        }

        let mut builder = self
            .layout_ctx
            .ranged_builder(&mut self.font_ctx, text, 1.0, true);
        builder.push_default(parley::style::StyleProperty::FontStack(
            parley::style::FontStack::Source(std::borrow::Cow::Owned(self.family_name.clone())),
        ));
        builder.push_default(parley::style::StyleProperty::FontSize(size_px));
        builder.push_default(parley::style::StyleProperty::Brush(TextBrushRgba8::WHITE));
        if bold {
            builder.push_default(parley::style::StyleProperty::FontWeight(
                parley::style::FontWeight::BOLD,
            ));
        }

        let mut layout: parley::Layout<TextBrushRgba8> = builder.build(text);
        layout.break_all_lines(None);
        Ok(layout)
    }
}

/// Stroke width, in ems, used to embolden a regular face when bold is requested.
const SYNTHETIC_BOLD_STROKE_EM: f32 = 1.0 / 24.0;

/// Rasterizes the label from explicit font bytes: Parley shapes each line, `vello_cpu` fills the
/// glyph runs.
pub struct GlyphRasterizer {
    engine: TextLayoutEngine,
    font: vello_cpu::peniko::FontData,
}

impl GlyphRasterizer {
    pub fn new(font_bytes: Vec<u8>) -> BannerResult<Self> {
        let engine = TextLayoutEngine::new(&font_bytes)?;
        tracing::debug!(family = engine.family_name(), "registered glyph rasterizer font");
        let font = vello_cpu::peniko::FontData::new(vello_cpu::peniko::Blob::from(font_bytes), 0);
        Ok(Self { engine, font })
    }

    pub fn from_file(path: &std::path::Path) -> BannerResult<Self> {
        let bytes = std::fs::read(path).map_err(|e| {
            BannerError::raster(format!("failed to read font '{}': {e}", path.display()))
        })?;
        Self::new(bytes)
    }

    pub fn family_name(&self) -> &str {
        self.engine.family_name()
    }
}

impl MaskRasterizer for GlyphRasterizer {
    fn rasterize(
        &mut self,
        label: &BannerLabel,
        layout: &StackLayout,
        surface: SurfaceSize,
    ) -> BannerResult<Mask> {
        let to_u16 = |v: u32| {
            u16::try_from(v).map_err(|_| {
                BannerError::raster(format!("surface dimension {v} exceeds the cpu renderer limit"))
            })
        };
        let width = to_u16(surface.width)?;
        let height = to_u16(surface.height)?;

        let mut ctx = vello_cpu::RenderContext::new(width, height);
        ctx.set_paint(vello_cpu::peniko::Color::from_rgba8(255, 255, 255, 255));

        for line in layout.lines(label) {
            if line.text.trim().is_empty() {
                continue;
            }
            let text_layout = self
                .engine
                .layout_line(line.text, line.font_px as f32, label.bold)?;
            let left = line.center_x - f64::from(text_layout.width()) / 2.0;
            ctx.set_transform(vello_cpu::kurbo::Affine::translate((left, line.top)));

            for text_line in text_layout.lines() {
                for item in text_line.items() {
                    let parley::layout::PositionedLayoutItem::GlyphRun(run) = item else {
                        continue;
                    };
                    let font_size = run.run().font_size();
                    let synthesis = run.run().synthesis();
                    let skew = synthesis.skew().map(|deg| {
                        vello_cpu::kurbo::Affine::skew(f64::from(deg.to_radians().tan()), 0.0)
                    });
                    // Positioned glyphs carry the run offset and the line baseline.
                    let glyphs = run.positioned_glyphs().map(|g| vello_cpu::Glyph {
                        id: g.id,
                        x: g.x,
                        y: g.y,
                    });

                    draw_glyphs(&mut ctx, &self.font, font_size, skew, glyphs.clone(), false);
                    if synthesis.embolden() {
                        ctx.set_stroke(vello_cpu::kurbo::Stroke::new(f64::from(
                            font_size * SYNTHETIC_BOLD_STROKE_EM,
                        )));
                        draw_glyphs(&mut ctx, &self.font, font_size, skew, glyphs, true);
                    }
                }
            }
        }

        ctx.flush();
        let mut pixmap = vello_cpu::Pixmap::new(width, height);
        ctx.render_to_pixmap(&mut pixmap);
        Mask::from_rgba8(surface.width, surface.height, pixmap.data_as_u8_slice())
    }

    fn name(&self) -> &'static str {
        "glyph"
    }
}

fn draw_glyphs(
    ctx: &mut vello_cpu::RenderContext,
    font: &vello_cpu::peniko::FontData,
    font_size: f32,
    skew: Option<vello_cpu::kurbo::Affine>,
    glyphs: impl Iterator<Item = vello_cpu::Glyph>,
    stroke: bool,
) {
    let mut builder = ctx.glyph_run(font).font_size(font_size);
    if let Some(t) = skew {
        builder = builder.glyph_transform(t);
    }
    if stroke {
        builder.stroke_glyphs(glyphs);
    } else {
        builder.fill_glyphs(glyphs);
    }
}

#[cfg(test)]
#[path = "../../tests/unit/text/glyph.rs"]
mod tests;
