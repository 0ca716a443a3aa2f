use crate::foundation::core::{Rgba8, SurfaceSize};
use crate::foundation::error::{BannerError, BannerResult};
use crate::particles::particle::Dot;
use crate::render::frame::FrameRGBA;

/// Paints a tick's draw list onto an opaque background with `vello_cpu`.
///
/// The render context is kept between frames and only rebuilt when the surface size changes.
#[derive(Default)]
pub struct CpuFrameRenderer {
    ctx: Option<vello_cpu::RenderContext>,
}

impl CpuFrameRenderer {
    pub fn new() -> Self {
        Self::default()
    }

    /// Clear to `background`, then fill one `size`×`size` square per dot at its top-left corner.
    pub fn render(
        &mut self,
        surface: SurfaceSize,
        background: Rgba8,
        dots: &[Dot],
    ) -> BannerResult<FrameRGBA> {
        let width = to_u16(surface.width)?;
        let height = to_u16(surface.height)?;
        if width == 0 || height == 0 {
            return Err(BannerError::validation(format!(
                "cannot render a {}x{} frame",
                surface.width, surface.height
            )));
        }

        let mut ctx = match self.ctx.take() {
            Some(ctx) if ctx.width() == width && ctx.height() == height => ctx,
            _ => vello_cpu::RenderContext::new(width, height),
        };
        ctx.reset();
        ctx.set_transform(vello_cpu::kurbo::Affine::IDENTITY);

        ctx.set_paint(to_color(background));
        ctx.fill_rect(&vello_cpu::kurbo::Rect::new(
            0.0,
            0.0,
            f64::from(width),
            f64::from(height),
        ));

        let mut current: Option<Rgba8> = None;
        for dot in dots {
            if current != Some(dot.color) {
                ctx.set_paint(to_color(dot.color));
                current = Some(dot.color);
            }
            ctx.fill_rect(&vello_cpu::kurbo::Rect::new(
                dot.x,
                dot.y,
                dot.x + dot.size,
                dot.y + dot.size,
            ));
        }

        ctx.flush();
        let mut pixmap = vello_cpu::Pixmap::new(width, height);
        ctx.render_to_pixmap(&mut pixmap);
        self.ctx = Some(ctx);

        Ok(FrameRGBA {
            width: surface.width,
            height: surface.height,
            data: pixmap.data_as_u8_slice().to_vec(),
            premultiplied: true,
        })
    }
}

fn to_u16(v: u32) -> BannerResult<u16> {
    u16::try_from(v).map_err(|_| {
        BannerError::validation(format!("frame dimension {v} exceeds the cpu renderer limit"))
    })
}

fn to_color(c: Rgba8) -> vello_cpu::peniko::Color {
    vello_cpu::peniko::Color::from_rgba8(c.r, c.g, c.b, c.a)
}

#[cfg(test)]
#[path = "../../tests/unit/render/cpu.rs"]
mod tests;
