use rand::Rng;

use crate::foundation::core::SurfaceSize;
use crate::input::pointer::PointerState;
use crate::particles::particle::{Dot, Particle};
use crate::particles::sampler::ParticleSampler;
use crate::scene::config::{BannerConfig, FieldConfig, MotionConfig};
use crate::text::raster::RasterizedText;

/// Counters for one animation tick.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct StepStats {
    /// Particles drawn this tick (the live set before respawn and top-up).
    pub drawn: usize,
    /// Of those, how many were inside the repulsion radius.
    pub scattered: usize,
    /// Expired particles replaced in place.
    pub respawned: usize,
    /// Expired particles removed because no replacement could be sampled.
    pub dropped: usize,
    /// Particles added by the top-up pass.
    pub spawned: usize,
    /// The top-up pass stopped early on a failed sample.
    pub starved: bool,
}

/// The live particle set and the mask it is sampled from.
pub struct ParticleField {
    particles: Vec<Particle>,
    sampler: ParticleSampler,
    field: FieldConfig,
    motion: MotionConfig,
    text: Option<RasterizedText>,
}

impl ParticleField {
    pub fn new(config: &BannerConfig) -> Self {
        Self {
            particles: Vec::new(),
            sampler: ParticleSampler::new(config),
            field: config.field.clone(),
            motion: config.motion.clone(),
            text: None,
        }
    }

    pub fn particles(&self) -> &[Particle] {
        &self.particles
    }

    pub fn len(&self) -> usize {
        self.particles.len()
    }

    pub fn is_empty(&self) -> bool {
        self.particles.is_empty()
    }

    pub fn text(&self) -> Option<&RasterizedText> {
        self.text.as_ref()
    }

    /// Area-proportional population target for the current mask (0 without one).
    pub fn target_count(&self) -> usize {
        self.text
            .as_ref()
            .map(|t| self.field.target_count(t.mask.size()))
            .unwrap_or(0)
    }

    /// Drop every particle and the mask.
    pub fn clear(&mut self) {
        self.particles.clear();
        self.text = None;
    }

    /// Replace the mask and regenerate the whole set from it.
    ///
    /// Makes exactly `target_count` sampling attempts; failed samples are skipped, so a sparse
    /// mask can leave the set short until later top-ups. Returns the number of particles created.
    #[tracing::instrument(skip_all)]
    pub fn reset<R: Rng>(&mut self, text: RasterizedText, rng: &mut R) -> usize {
        self.particles.clear();
        let surface: SurfaceSize = text.mask.size();
        let target = self.field.target_count(surface);
        self.particles.reserve(target);
        for _ in 0..target {
            if let Some(p) = self.sampler.sample(&text.mask, &text.layout, rng) {
                self.particles.push(p);
            }
        }
        self.text = Some(text);
        tracing::debug!(target, created = self.particles.len(), "generated particle set");
        self.particles.len()
    }

    /// Advance every particle by one tick.
    ///
    /// `draws` is cleared and refilled with what this tick drew, in sweep order. Without a mask
    /// the tick is a no-op.
    pub fn step<R: Rng>(
        &mut self,
        pointer: &PointerState,
        rng: &mut R,
        draws: &mut Vec<Dot>,
    ) -> StepStats {
        draws.clear();
        let mut stats = StepStats::default();

        let target = self.target_count();
        let Self {
            particles,
            sampler,
            motion,
            text,
            ..
        } = self;
        let Some(text) = text.as_ref() else {
            return stats;
        };

        let active = pointer.is_active();
        let radius = motion.repulsion_radius;
        let mut i = 0;
        while i < particles.len() {
            let p = &mut particles[i];
            let dx = pointer.x - p.x;
            let dy = pointer.y - p.y;
            let distance = (dx * dx + dy * dy).sqrt();

            let color = if active && distance < radius {
                let force = (radius - distance) / radius;
                let angle = dy.atan2(dx);
                p.x = p.base_x - angle.cos() * force * motion.max_displacement;
                p.y = p.base_y - angle.sin() * force * motion.max_displacement;
                stats.scattered += 1;
                p.scattered_color
            } else {
                p.x += (p.base_x - p.x) * motion.ease_factor;
                p.y += (p.base_y - p.y) * motion.ease_factor;
                p.color
            };
            draws.push(Dot {
                x: p.x,
                y: p.y,
                size: p.size,
                color,
            });

            p.life -= 1.0;
            if p.is_expired() {
                match sampler.sample(&text.mask, &text.layout, rng) {
                    Some(fresh) => {
                        particles[i] = fresh;
                        stats.respawned += 1;
                    }
                    None => {
                        particles.remove(i);
                        stats.dropped += 1;
                        continue;
                    }
                }
            }
            i += 1;
        }
        stats.drawn = draws.len();

        while particles.len() < target {
            match sampler.sample(&text.mask, &text.layout, rng) {
                Some(p) => {
                    particles.push(p);
                    stats.spawned += 1;
                }
                None => {
                    stats.starved = true;
                    break;
                }
            }
        }

        stats
    }
}

#[cfg(test)]
#[path = "../../tests/unit/particles/field.rs"]
mod tests;
