use rand::Rng;

use crate::foundation::core::Rgba8;
use crate::particles::particle::Particle;
use crate::scene::config::{BannerConfig, SpanF64};
use crate::text::label::StackLayout;
use crate::text::mask::Mask;

/// Seeds particles on lit mask pixels by bounded random probing.
#[derive(Clone, Debug, PartialEq)]
pub struct ParticleSampler {
    max_attempts: u32,
    alpha_threshold: u8,
    size: SpanF64,
    life: SpanF64,
    color: Rgba8,
    scattered_color: Rgba8,
}

impl ParticleSampler {
    pub fn new(config: &BannerConfig) -> Self {
        Self {
            max_attempts: config.field.max_sample_attempts,
            alpha_threshold: config.field.alpha_threshold,
            size: config.field.size,
            life: config.field.life,
            color: config.palette.base,
            scattered_color: config.palette.scattered,
        }
    }

    /// Try to place one particle on a lit pixel.
    ///
    /// Returns `None` when every attempt landed on an unlit pixel; callers treat that as "nothing
    /// available this time", not as an error.
    pub fn sample<R: Rng>(
        &self,
        mask: &Mask,
        layout: &StackLayout,
        rng: &mut R,
    ) -> Option<Particle> {
        let width = f64::from(mask.width());
        let height = f64::from(mask.height());

        for _ in 0..self.max_attempts {
            let x = (rng.random::<f64>() * width).floor();
            let y = (rng.random::<f64>() * height).floor();

            let Some(alpha) = mask.alpha_at(x as u32, y as u32) else {
                continue;
            };
            if alpha <= self.alpha_threshold {
                continue;
            }

            return Some(Particle {
                x,
                y,
                base_x: x,
                base_y: y,
                size: self.size.lerp(rng.random::<f64>()),
                color: self.color,
                scattered_color: self.scattered_color,
                category: layout.classify_row(y),
                life: self.life.lerp(rng.random::<f64>()),
            });
        }

        None
    }
}

#[cfg(test)]
#[path = "../../tests/unit/particles/sampler.rs"]
mod tests;
