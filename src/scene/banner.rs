use rand::SeedableRng as _;
use rand::rngs::StdRng;

use crate::foundation::core::SurfaceSize;
use crate::foundation::error::BannerResult;
use crate::input::pointer::{InputEvent, PointerState};
use crate::particles::field::{ParticleField, StepStats};
use crate::particles::particle::Dot;
use crate::scene::config::BannerConfig;
use crate::text::raster::{MaskRasterizer, rasterize_text};

/// One banner instance: a surface, its text mask, the particles seeded from it, and the input
/// state that pushes them around.
///
/// Surface changes are never applied immediately. They mark the scene for a rebuild, which the
/// next [`Scene::tick`] performs before reading the mask.
pub struct Scene {
    config: BannerConfig,
    rasterizer: Box<dyn MaskRasterizer>,
    field: ParticleField,
    pointer: PointerState,
    surface: SurfaceSize,
    needs_rebuild: bool,
    rng: StdRng,
    draws: Vec<Dot>,
    scale: f64,
    ticks: u64,
}

impl Scene {
    /// Create a scene for `surface`. The first mask is built lazily by the first tick.
    pub fn new(
        config: BannerConfig,
        rasterizer: Box<dyn MaskRasterizer>,
        surface: SurfaceSize,
    ) -> BannerResult<Self> {
        config.validate()?;
        let rng = match config.seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_os_rng(),
        };
        Ok(Self {
            field: ParticleField::new(&config),
            pointer: PointerState::new(config.device),
            config,
            rasterizer,
            surface,
            needs_rebuild: true,
            rng,
            draws: Vec::new(),
            scale: 0.0,
            ticks: 0,
        })
    }

    pub fn config(&self) -> &BannerConfig {
        &self.config
    }

    pub fn surface(&self) -> SurfaceSize {
        self.surface
    }

    /// Scale of the current mask; `0.0` while no mask could be built.
    pub fn scale(&self) -> f64 {
        self.scale
    }

    pub fn field(&self) -> &ParticleField {
        &self.field
    }

    pub fn pointer(&self) -> &PointerState {
        &self.pointer
    }

    /// The dots drawn by the most recent tick, in sweep order.
    pub fn draws(&self) -> &[Dot] {
        &self.draws
    }

    /// Ticks run since creation.
    pub fn ticks(&self) -> u64 {
        self.ticks
    }

    /// Whether a rebuild is queued for the next tick.
    pub fn rebuild_pending(&self) -> bool {
        self.needs_rebuild
    }

    /// Whether the last rebuild produced a mask to animate.
    pub fn is_running(&self) -> bool {
        self.field.text().is_some()
    }

    /// Feed one host event. Returns `true` when the host should suppress its default handling.
    pub fn handle_event(&mut self, event: &InputEvent) -> bool {
        match *event {
            InputEvent::Resize { width, height } => {
                self.resize(SurfaceSize::new(width, height));
                false
            }
            _ => self.pointer.apply(event),
        }
    }

    /// Queue a full reset at `surface`.
    pub fn resize(&mut self, surface: SurfaceSize) {
        tracing::debug!(
            width = surface.width,
            height = surface.height,
            "surface resized; rebuild queued"
        );
        self.surface = surface;
        self.needs_rebuild = true;
    }

    /// Re-rasterize the label, discard every particle, and regenerate from the new mask.
    ///
    /// Returns the scale used, or `0.0` when the mask could not be built. Failures are logged
    /// and leave the scene idle until the next resize.
    #[tracing::instrument(skip(self), fields(width = self.surface.width, height = self.surface.height))]
    pub fn rebuild(&mut self) -> f64 {
        self.needs_rebuild = false;
        self.field.clear();
        self.draws.clear();

        let scale = self.config.viewport.scale_for(self.surface);
        let text = match rasterize_text(
            self.rasterizer.as_mut(),
            &self.config.label,
            self.surface,
            scale,
        ) {
            Ok(text) => text,
            Err(err) => {
                tracing::error!(error = %err, "text rasterization failed; particle generation skipped");
                self.scale = 0.0;
                return 0.0;
            }
        };

        if !text.mask.has_lit_pixels(self.config.field.alpha_threshold) {
            tracing::warn!("text mask has no pixels above the alpha threshold");
        }
        let created = self.field.reset(text, &mut self.rng);
        tracing::debug!(scale, created, "scene rebuilt");
        self.scale = scale;
        scale
    }

    /// Run one animation tick: apply a queued rebuild, then step the field.
    pub fn tick(&mut self) -> StepStats {
        if self.needs_rebuild {
            self.rebuild();
        }
        self.ticks += 1;
        self.field.step(&self.pointer, &mut self.rng, &mut self.draws)
    }
}

#[cfg(test)]
#[path = "../../tests/unit/scene/banner.rs"]
mod tests;
